//! The owning partition container — segments with weights, tints and
//! payloads, kept normalised through every mutation.
//!
//! [`Partition`] is thin glue over the [`crate::correct`] math: it stores
//! the segments, and every write path (push, remove, set a weight, bulk
//! overwrite) copies the weight column out, runs the correction, and writes
//! the corrected column back. The read path ([`Partition::locate`] and
//! friends) never mutates.
//!
//! One generic container covers both the plain and the payload-carrying
//! case: `Partition<()>` is "just weights and tints", `Partition<T>`
//! associates an arbitrary value with each segment. The correction math
//! itself lives in free functions over `&mut [f32]` and is shared with
//! every other container in this crate, never re-implemented per variant.

extern crate alloc;

use alloc::vec::Vec;

use crate::correct::{CorrectionResult, Corrector, EditRule};
use crate::lookup;

// ─── Rgba ───────────────────────────────────────────────────────────────────

/// Display color attached to a segment. Pure presentation metadata; the
/// correction math never reads it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    /// Red channel in [0.0, 1.0].
    pub r: f32,
    /// Green channel in [0.0, 1.0].
    pub g: f32,
    /// Blue channel in [0.0, 1.0].
    pub b: f32,
    /// Alpha channel in [0.0, 1.0].
    pub a: f32,
}

impl Rgba {
    /// Mid gray, the default tint for new segments.
    pub const GRAY: Rgba = Rgba::new(0.5, 0.5, 0.5, 1.0);
    /// Opaque red.
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);
    /// Opaque green.
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    /// Opaque blue.
    pub const BLUE: Rgba = Rgba::new(0.0, 0.0, 1.0, 1.0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);

    /// Construct a color from its four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::GRAY
    }
}

// ─── Segment ────────────────────────────────────────────────────────────────

/// One element of a partition: a weight, a display tint and a payload.
///
/// The weight is the segment's fraction of the whole; the container keeps
/// the weights of all its segments summing to 1.0. The payload is whatever
/// the segment stands for (`()` when it stands for nothing).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment<T = ()> {
    /// Fraction of the whole assigned to this segment.
    pub weight: f32,
    /// Display color for editors and renderers.
    pub tint: Rgba,
    /// Associated value.
    pub payload: T,
}

impl<T> Segment<T> {
    /// New segment with zero weight and the default gray tint. The next
    /// correction pass decides how much of the whole it receives.
    pub fn new(payload: T) -> Self {
        Self { weight: 0.0, tint: Rgba::GRAY, payload }
    }

    /// Replace the tint, builder-style.
    pub fn tinted(mut self, tint: Rgba) -> Self {
        self.tint = tint;
        self
    }
}

impl<T: Default> Default for Segment<T> {
    fn default() -> Self {
        Segment::new(T::default())
    }
}

// ─── Partition ──────────────────────────────────────────────────────────────

/// Ordered collection of [`Segment`]s whose weights always sum to 1.0.
///
/// Every mutating operation runs the configured [`Corrector`] afterwards,
/// so the invariant holds whenever control returns to the caller. Reads
/// never mutate.
///
/// ```rust
/// use partition_core::correct::EditRule;
/// use partition_core::partition::{Partition, Rgba, Segment};
///
/// let mut p: Partition = Partition::new();
/// p.push(Segment::new(()).tinted(Rgba::RED), EditRule::ProportionalAll);
/// p.push(Segment::new(()).tinted(Rgba::BLUE), EditRule::ProportionalAll);
/// p.set_weights(&[0.2, 0.8]);
///
/// assert_eq!(p.weights(), [0.2, 0.8]);
/// assert_eq!(p.locate(0.5), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct Partition<T = ()> {
    segments: Vec<Segment<T>>,
    corrector: Corrector,
}

impl<T> Partition<T> {
    /// New empty partition with the default [`Corrector`].
    pub fn new() -> Self {
        Self { segments: Vec::new(), corrector: Corrector::default() }
    }

    /// New empty partition with a caller-supplied [`Corrector`].
    pub fn with_corrector(corrector: Corrector) -> Self {
        Self { segments: Vec::new(), corrector }
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the partition has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segment at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<&Segment<T>> {
        self.segments.get(index)
    }

    /// Iterate over the segments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment<T>> {
        self.segments.iter()
    }

    /// Copy of the weight column.
    pub fn weights(&self) -> Vec<f32> {
        self.segments.iter().map(|s| s.weight).collect()
    }

    /// The corrector applied after every mutation.
    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    // ── Lookup ─────────────────────────────────────────────────────────────

    /// Index of the segment containing `probe`. See [`lookup::locate`].
    pub fn locate(&self, probe: f32) -> Option<usize> {
        lookup::locate(&self.weights(), probe)
    }

    /// The segment containing `probe`, or `None` when the partition is
    /// empty.
    pub fn segment_at(&self, probe: f32) -> Option<&Segment<T>> {
        self.locate(probe).map(|i| &self.segments[i])
    }

    /// The payload of the segment containing `probe`.
    pub fn payload_at(&self, probe: f32) -> Option<&T> {
        self.locate(probe).map(|i| &self.segments[i].payload)
    }

    // ── Non-weight field access ────────────────────────────────────────────

    /// Mutable access to a segment's payload. Payload edits need no
    /// correction.
    pub fn payload_mut(&mut self, index: usize) -> Option<&mut T> {
        self.segments.get_mut(index).map(|s| &mut s.payload)
    }

    /// Mutable access to a segment's tint. Tint edits need no correction.
    pub fn tint_mut(&mut self, index: usize) -> Option<&mut Rgba> {
        self.segments.get_mut(index).map(|s| &mut s.tint)
    }

    // ── Mutation (every path funnels through the corrector) ────────────────

    /// Append a segment, then correct at the new last index.
    pub fn push(&mut self, segment: Segment<T>, rule: EditRule) -> CorrectionResult {
        self.segments.push(segment);
        self.rebalance_after(self.segments.len() - 1, rule)
    }

    /// Remove and return the segment at `index`, then correct at the new
    /// last index. Out-of-range indices are a silent no-op returning
    /// `None`.
    pub fn remove(&mut self, index: usize, rule: EditRule) -> Option<Segment<T>> {
        if index >= self.segments.len() {
            return None;
        }
        let segment = self.segments.remove(index);
        if !self.segments.is_empty() {
            self.rebalance_after(self.segments.len() - 1, rule);
        }
        Some(segment)
    }

    /// Write a raw weight, then correct at `index` under `rule`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn set_weight(&mut self, index: usize, value: f32, rule: EditRule) -> CorrectionResult {
        self.segments[index].weight = value;
        self.rebalance_after(index, rule)
    }

    /// Bulk-overwrite the weight column, but only when `values` matches the
    /// segment count; returns whether the values were applied. The
    /// partition is renormalised either way.
    pub fn set_weights(&mut self, values: &[f32]) -> bool {
        let applied = values.len() == self.segments.len();
        if applied {
            for (segment, &value) in self.segments.iter_mut().zip(values) {
                segment.weight = value;
            }
        }
        self.rebalance();
        applied
    }

    /// Renormalise with no preferred index. See [`Corrector::normalize`].
    pub fn rebalance(&mut self) {
        let mut weights = self.weights();
        self.corrector.normalize(&mut weights);
        self.write_weights(&weights);
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    /// Copy the weight column out, correct it, re-apply the corrected
    /// values.
    fn rebalance_after(&mut self, index: usize, rule: EditRule) -> CorrectionResult {
        let mut weights = self.weights();
        let result = self.corrector.correct(&mut weights, index, rule);
        self.write_weights(&weights);
        result
    }

    fn write_weights(&mut self, weights: &[f32]) {
        for (segment, &weight) in self.segments.iter_mut().zip(weights) {
            segment.weight = weight;
        }
    }
}

impl<T: PartialEq> Partition<T> {
    /// Whether any segment carries `payload`.
    pub fn contains(&self, payload: &T) -> bool {
        self.segments.iter().any(|s| s.payload == *payload)
    }
}

impl Partition<()> {
    /// Plain partition seeded from raw weights, renormalised once.
    pub fn from_weights(weights: &[f32]) -> Self {
        let mut partition = Partition::new();
        partition.segments = weights
            .iter()
            .map(|&w| Segment { weight: w, tint: Rgba::GRAY, payload: () })
            .collect();
        partition.rebalance();
        partition
    }
}

impl<T> Default for Partition<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
