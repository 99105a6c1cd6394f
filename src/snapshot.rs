//! Portable snapshot of a partition for persistence and transport.
//!
//! A snapshot captures the two columns an editor needs to restore a
//! partition: weights and tints. The payload type is erased; payloads are
//! whatever the host application associates with each segment, and it
//! re-attaches them when it rebuilds the partition. Restoring goes through
//! the public container contract, so the weight column is renormalised on
//! the way back in and the sum invariant holds even for snapshots written
//! by older or sloppier producers.
//!
//! Requires the `serde` feature. Uses `alloc::vec::Vec` and is compatible
//! with no_std + alloc environments.

extern crate alloc;

use alloc::vec::Vec;

use crate::partition::{Partition, Rgba, Segment};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u16 = 1;

/// A serialisable snapshot of a [`Partition`]'s weight and tint columns.
///
/// # Example
///
/// ```rust,ignore
/// use partition_core::snapshot::PartitionSnapshot;
///
/// let snapshot = PartitionSnapshot::from_partition(&partition);
/// let json = serde_json::to_string(&snapshot).unwrap();
/// let restored: PartitionSnapshot = serde_json::from_str(&json).unwrap();
/// ```
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct PartitionSnapshot {
    /// Format version, always [`SNAPSHOT_VERSION`] for newly created
    /// snapshots.
    pub version: u16,
    /// All segments, in partition order.
    pub segments: Vec<SegmentRecord>,
}

/// Serialisable representation of a single segment.
///
/// Only the weight and the tint are stored; the payload is erased (see the
/// module docs).
#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct SegmentRecord {
    /// Fraction of the whole assigned to this segment.
    pub weight: f32,
    /// Display color.
    pub tint: Rgba,
}

impl<T> From<&Segment<T>> for SegmentRecord {
    fn from(segment: &Segment<T>) -> Self {
        Self { weight: segment.weight, tint: segment.tint }
    }
}

impl PartitionSnapshot {
    /// Build a snapshot from a live partition.
    pub fn from_partition<T>(partition: &Partition<T>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            segments: partition.iter().map(SegmentRecord::from).collect(),
        }
    }

    /// Number of segment records in this snapshot.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Restore this snapshot's columns into `partition`.
    ///
    /// The segment counts must match (payloads belong to the caller, so a
    /// snapshot cannot create or destroy segments); returns `false` and
    /// leaves the partition untouched otherwise. On success the weight
    /// column is written through [`Partition::set_weights`], which
    /// renormalises it.
    pub fn apply_to<T>(&self, partition: &mut Partition<T>) -> bool {
        if self.segments.len() != partition.len() {
            return false;
        }
        for (index, record) in self.segments.iter().enumerate() {
            if let Some(tint) = partition.tint_mut(index) {
                *tint = record.tint;
            }
        }
        let weights: Vec<f32> = self.segments.iter().map(|r| r.weight).collect();
        partition.set_weights(&weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correct::EditRule;

    fn sample() -> Partition<u8> {
        let mut p: Partition<u8> = Partition::new();
        p.push(Segment::new(1).tinted(Rgba::RED), EditRule::ProportionalAll);
        p.push(Segment::new(2).tinted(Rgba::BLUE), EditRule::ProportionalAll);
        p.push(Segment::new(3), EditRule::ProportionalAll);
        p.set_weights(&[0.5, 0.25, 0.25]);
        p
    }

    #[test]
    fn test_snapshot_captures_columns_in_order() {
        let snapshot = PartitionSnapshot::from_partition(&sample());
        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.segment_count(), 3);
        assert_eq!(snapshot.segments[0].weight, 0.5);
        assert_eq!(snapshot.segments[0].tint, Rgba::RED);
        assert_eq!(snapshot.segments[1].tint, Rgba::BLUE);
        assert_eq!(snapshot.segments[2].tint, Rgba::GRAY);
    }

    #[test]
    fn test_apply_restores_weights_and_tints() {
        let snapshot = PartitionSnapshot::from_partition(&sample());

        let mut target: Partition<u8> = Partition::new();
        for payload in [4, 5, 6] {
            target.push(Segment::new(payload), EditRule::ProportionalAll);
        }
        assert!(snapshot.apply_to(&mut target));

        assert_eq!(target.weights(), [0.5, 0.25, 0.25]);
        assert_eq!(target.get(0).unwrap().tint, Rgba::RED);
        // payloads stay the caller's business
        assert_eq!(target.get(0).unwrap().payload, 4);
    }

    #[test]
    fn test_apply_rejects_segment_count_mismatch() {
        let snapshot = PartitionSnapshot::from_partition(&sample());
        let mut target: Partition<u8> = Partition::new();
        target.push(Segment::new(9), EditRule::ProportionalAll);

        assert!(!snapshot.apply_to(&mut target));
        assert_eq!(target.weights(), [1.0]);
    }
}
