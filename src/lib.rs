//! # partition-core
//!
//! Normalized partitions: ordered sequences of non-negative weights that
//! always sum to exactly 1.0, representing proportional shares of a whole
//! (slices of a range, allocation ratios, probability bands).
//!
//! The interesting part is not storing the weights, it is keeping the sum
//! invariant alive while they are edited. Change one weight, insert a
//! segment, remove one: the remaining mass has to move somewhere. Which
//! neighbours absorb it is a policy choice, not a fixed formula:
//!
//! ```text
//! edit w[i] → clamp negatives → delta = 1 − Σw → EditRule picks absorbers
//!
//!   ProportionalAll   every entry gains delta · w/Σw   (default)
//!   LeftAndRight      expanding rings around i, half the delta each side
//!   LeftOnly          walk left from i, full delta per step
//!   RightOnly         walk right from i, full delta per step
//! ```
//!
//! Directional rules degrade when they run off an end of the sequence
//! (`LeftAndRight` → single-sided → `ProportionalAll`), so every correction
//! terminates with the sum restored.
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`lookup`] | [`lookup::locate`] | Cumulative-sum segment search for a probe in [0, 1] |
//! | [`correct`] | [`correct::Corrector`], [`correct::EditRule`] | Restore the sum-to-1 invariant after an edit |
//! | [`partition`] | [`partition::Partition`], [`partition::Segment`] | Owning container; every mutation funnels through correction |
//! | [`snapshot`] | `snapshot::PartitionSnapshot` | Serialisable weight/tint columns (requires `serde` feature) |
//! | [`fixed`] | `fixed::FixedPartition` | Allocation-free container on `heapless` (requires `fixed-capacity` feature) |
//!
//! ## Quick start
//!
//! ```rust
//! use partition_core::correct::{correct, EditRule};
//! use partition_core::lookup::locate;
//!
//! let mut weights = [0.25, 0.45, 0.25, 0.25];
//! let report = correct(&mut weights, 1, EditRule::LeftAndRight);
//! assert!(report.converged);
//! assert_eq!(locate(&weights, 0.5), Some(1));
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default. The core math ([`lookup`],
//! [`correct`]) needs neither heap nor `std`. The [`partition`] container
//! stores its segments in a `Vec` and therefore needs a global allocator;
//! on allocation-free targets enable the `fixed-capacity` feature and use
//! `fixed::FixedPartition` instead. Enable `serde` for snapshot
//! serialisation and `std` for the demo programs.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Pull in std when the feature is enabled (for the demos, etc.)
#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod lookup;     // cumulative-sum segment search
pub mod correct;    // EditRule + Corrector, the sum-to-1 restoration loop
pub mod partition;  // Partition<T> owning container, Segment, Rgba
#[cfg(feature = "serde")]
pub mod snapshot;   // serialisable weight/tint columns

#[cfg(feature = "fixed-capacity")]
pub mod fixed;      // heapless-backed container for allocation-free targets

#[cfg(feature = "python-ffi")]
pub mod ffi;
