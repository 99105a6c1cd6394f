//! # Budget allocator — partition editing without a UI
//!
//! Simulates the interaction loop a slider-based allocation editor runs:
//! the user drags one share up or down, and the partition redistributes the
//! difference across the other shares according to the active edit rule.
//!
//! Run with:
//!
//! ```bash
//! cargo run --example allocator --features std
//! ```
//!
//! Watch how the same drag lands differently under each rule:
//! `ProportionalAll` taxes everyone, `LeftAndRight` taxes the neighbours,
//! the single-sided rules push the whole adjustment one way and fall back
//! to proportional at the edge of the partition.

use partition_core::correct::EditRule;
use partition_core::partition::{Partition, Rgba, Segment};

const CATEGORIES: [(&str, Rgba); 4] = [
    ("rent", Rgba::RED),
    ("food", Rgba::GREEN),
    ("savings", Rgba::BLUE),
    ("fun", Rgba::GRAY),
];

fn print_partition(label: &str, partition: &Partition<&'static str>) {
    println!("{label}");
    for segment in partition.iter() {
        let ticks = (segment.weight * 40.0).round() as usize;
        println!(
            "  {:>8}  {:5.3}  {}",
            segment.payload,
            segment.weight,
            "#".repeat(ticks)
        );
    }
    let total: f32 = partition.iter().map(|s| s.weight).sum();
    println!("  {:>8}  {:5.3}", "total", total);
    println!();
}

fn main() {
    let mut partition: Partition<&'static str> = Partition::new();
    for (name, tint) in CATEGORIES {
        partition.push(Segment::new(name).tinted(tint), EditRule::ProportionalAll);
    }
    partition.set_weights(&[0.25, 0.25, 0.25, 0.25]);
    print_partition("even split", &partition);

    // Drag "food" up to 40%. Everyone else pays proportionally.
    partition.set_weight(1, 0.4, EditRule::ProportionalAll);
    print_partition("food -> 0.40 under ProportionalAll", &partition);

    // Drag "savings" up to 35%. Only its neighbours pay.
    partition.set_weight(2, 0.35, EditRule::LeftAndRight);
    print_partition("savings -> 0.35 under LeftAndRight", &partition);

    // Drag "rent" down to 10%. The freed mass flows rightward.
    partition.set_weight(0, 0.1, EditRule::RightOnly);
    print_partition("rent -> 0.10 under RightOnly", &partition);

    // A probe in [0, 1] maps back to the category owning that band.
    for probe in [0.05, 0.35, 0.75, 0.99] {
        if let Some(name) = partition.payload_at(probe) {
            println!("probe {probe:4.2} lands in {name}");
        }
    }
}
