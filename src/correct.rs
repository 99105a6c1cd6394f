//! Partition correction — restore the sum-to-1 invariant after an edit.
//!
//! Editing a weight (or inserting/removing a segment) leaves the partition
//! with a mass imbalance `delta = 1 − Σw`. [`Corrector`] redistributes that
//! delta across the *other* entries according to an [`EditRule`], so the
//! edited entry keeps the value the caller just gave it wherever possible.
//!
//! Directional rules walk outward from the edit index in expanding rings.
//! When a ring probe runs off an end of the sequence the rule degrades:
//!
//! ```text
//! LeftAndRight ── left edge ──▶ RightOnly ─┐
//!       │                                  ├──▶ ProportionalAll
//!       └────── right edge ──▶ LeftOnly ───┘
//! ```
//!
//! `ProportionalAll` always resolves the remaining delta in one pass (with a
//! uniform fill when the sequence has no mass at all), which is what makes
//! the loop terminate. A defensive pass cap backs this up against f32
//! rounding residue; running into it is reported, never hidden.
//!
//! # Invariants
//!
//! - **PAR-001**: after any correction entry point, `Σw = 1.0` within
//!   [`Corrector::tolerance`] (or the report says `converged: false`).
//! - **PAR-002**: no weight is ever driven below 0.0.
//! - **PAR-003**: a partition already summing to exactly 1.0 is returned
//!   bit-identical; zero redistribution, not merely "numerically close".

// ─── EditRule ───────────────────────────────────────────────────────────────

/// Selects which entries absorb the adjustment delta during correction.
///
/// A pure configuration value; nothing here is stateful.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EditRule {
    /// Spread the delta over every entry in proportion to its weight.
    /// Ignores the edit index entirely. This is the default rule.
    ProportionalAll,
    /// Split the delta between the two ring neighbours of the edit index,
    /// expanding the ring until the delta is absorbed. Falls back to a
    /// single-sided rule at a sequence edge.
    LeftAndRight,
    /// Push the full delta into the left neighbour, walking further left
    /// each pass. Falls back to [`EditRule::ProportionalAll`] past index 0.
    LeftOnly,
    /// Push the full delta into the right neighbour, walking further right
    /// each pass. The last entry is treated as a boundary anchor and is
    /// never adjusted; the rule falls back to [`EditRule::ProportionalAll`]
    /// when the walk reaches it.
    RightOnly,
}

impl Default for EditRule {
    fn default() -> Self {
        EditRule::ProportionalAll
    }
}

// ─── CorrectionResult ───────────────────────────────────────────────────────

/// Report returned by [`Corrector::correct`].
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionResult {
    /// Whether the final residual is within [`Corrector::tolerance`].
    pub converged: bool,
    /// Number of ring/fallback passes performed.
    pub passes: u32,
    /// Absolute deviation of the final sum from 1.0.
    pub residual: f32,
}

// ─── Corrector ──────────────────────────────────────────────────────────────

/// Partition corrector — restores `Σw = 1.0` after a local edit.
///
/// Holds the convergence-report threshold and the defensive pass cap; it
/// carries no mutable state, so one `Corrector` can serve any number of
/// weight sequences.
#[derive(Clone, Debug)]
pub struct Corrector {
    /// Residual threshold for the `converged` flag (default: 1e-6). The
    /// arithmetic itself runs on exact comparisons; this only judges the
    /// report.
    pub tolerance: f32,
    /// Maximum number of correction passes (default: 128). The fallback
    /// chain terminates on its own for any real input; the cap is a
    /// backstop, sized comfortably above the low-tens sequence lengths this
    /// crate targets. It must exceed the sequence length for a directional
    /// rule to be able to reach a boundary.
    pub max_passes: u32,
}

impl Default for Corrector {
    fn default() -> Self {
        Self { tolerance: 1e-6, max_passes: 128 }
    }
}

impl Corrector {
    /// Create a corrector with the given report tolerance and pass cap.
    pub fn new(tolerance: f32, max_passes: u32) -> Self {
        Self { tolerance, max_passes }
    }

    /// Rebalance `weights` in place with no preferred index.
    ///
    /// Negative entries are clamped to 0 first. If the sum already equals
    /// 1.0 exactly, every value is left bit-identical (PAR-003). A sequence
    /// with no mass at all receives the uniform fill `delta / n` instead of
    /// a division by zero. Empty sequences are a no-op.
    ///
    /// A single-element sequence always ends at exactly `[1.0]`: the whole
    /// delta lands on the one entry there is.
    pub fn normalize(&self, weights: &mut [f32]) {
        if weights.is_empty() {
            return;
        }

        for w in weights.iter_mut() {
            if *w < 0.0 {
                *w = 0.0;
            }
        }

        let sum: f32 = weights.iter().sum();
        let delta = 1.0 - sum;
        if delta == 0.0 {
            return;
        }

        if sum == 0.0 {
            // no mass to scale against: uniform fill
            let share = delta / weights.len() as f32;
            for w in weights.iter_mut() {
                *w = share;
            }
        } else {
            for w in weights.iter_mut() {
                *w += delta * *w / sum;
            }
        }
    }

    /// Rebalance `weights` in place after `weights[index]` was edited,
    /// routing the imbalance according to `rule`.
    ///
    /// `EditRule::ProportionalAll` is identical to [`Corrector::normalize`]
    /// and ignores `index`. The directional rules run the ring walk
    /// described in the module docs, recomputing the delta and widening the
    /// ring after every pass, including passes that only downgrade the
    /// rule, so a successor rule resumes one ring further out.
    ///
    /// If the sequence has no mass after the negative clamp, the uniform
    /// fill is applied before any ring walk; an all-zero partition has no
    /// mass to anchor a directional redistribution.
    ///
    /// # Panics
    ///
    /// Panics if `index >= weights.len()` on a non-empty sequence. Empty
    /// sequences return a no-op report (`converged: false, residual: 1.0`)
    /// since there is nothing to redistribute to.
    pub fn correct(&self, weights: &mut [f32], index: usize, rule: EditRule) -> CorrectionResult {
        if weights.is_empty() {
            return CorrectionResult { converged: false, passes: 0, residual: 1.0 };
        }
        assert!(
            index < weights.len(),
            "edit index {} out of range for {} segments",
            index,
            weights.len()
        );

        if rule == EditRule::ProportionalAll {
            self.normalize(weights);
            let residual = (1.0 - weights.iter().sum::<f32>()).abs();
            return CorrectionResult { converged: residual <= self.tolerance, passes: 1, residual };
        }

        for w in weights.iter_mut() {
            if *w < 0.0 {
                *w = 0.0;
            }
        }

        let sum: f32 = weights.iter().sum();
        if sum == 0.0 {
            self.normalize(weights);
            let residual = (1.0 - weights.iter().sum::<f32>()).abs();
            return CorrectionResult { converged: residual <= self.tolerance, passes: 1, residual };
        }

        let last = weights.len() - 1;
        let mut rule = rule;
        let mut range = 1usize;
        let mut delta = 1.0 - sum;
        let mut passes = 0u32;

        while delta != 0.0 && passes < self.max_passes {
            match rule {
                EditRule::LeftAndRight => {
                    if range > index {
                        rule = EditRule::RightOnly;
                    } else if index + range > last {
                        rule = EditRule::LeftOnly;
                    } else {
                        let half = delta / 2.0;
                        weights[index + range] = (weights[index + range] + half).max(0.0);
                        weights[index - range] = (weights[index - range] + half).max(0.0);
                    }
                }
                EditRule::LeftOnly => {
                    if range > index {
                        rule = EditRule::ProportionalAll;
                    } else {
                        weights[index - range] = (weights[index - range] + delta).max(0.0);
                    }
                }
                EditRule::RightOnly => {
                    if index + range >= last {
                        rule = EditRule::ProportionalAll;
                    } else {
                        weights[index + range] = (weights[index + range] + delta).max(0.0);
                    }
                }
                EditRule::ProportionalAll => self.normalize(weights),
            }

            delta = 1.0 - weights.iter().sum::<f32>();
            range += 1;
            passes += 1;
        }

        let residual = delta.abs();
        CorrectionResult { converged: residual <= self.tolerance, passes, residual }
    }
}

// ─── Free-function interface ────────────────────────────────────────────────

/// Rebalance `weights` with the default [`Corrector`]. See
/// [`Corrector::normalize`].
pub fn normalize(weights: &mut [f32]) {
    Corrector::default().normalize(weights);
}

/// Correct `weights` after an edit at `index` with the default
/// [`Corrector`]. See [`Corrector::correct`].
pub fn correct(weights: &mut [f32], index: usize, rule: EditRule) -> CorrectionResult {
    Corrector::default().correct(weights, index, rule)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(weights: &[f32]) -> f32 {
        weights.iter().sum()
    }

    fn assert_unit_sum(weights: &[f32]) {
        assert!(
            (sum(weights) - 1.0).abs() < 1e-5,
            "sum = {} for {:?}",
            sum(weights),
            weights
        );
    }

    // ── normalize ─────────────────────────────────────────────────────────

    #[test]
    fn test_normalize_reduces_excess_mass() {
        let mut w = [0.5, 0.003, 0.075, 0.09, 0.12, 0.0159, 0.0137, 0.035, 0.237, 0.0349];
        normalize(&mut w);
        assert_unit_sum(&w);
    }

    #[test]
    fn test_normalize_fills_missing_mass() {
        let mut w = [0.3, 0.003, 0.075, 0.09, 0.12, 0.0159, 0.0137, 0.035, 0.237, 0.0349];
        normalize(&mut w);
        assert_unit_sum(&w);
    }

    #[test]
    fn test_normalize_is_proportional() {
        let mut w = [1.0, 3.0];
        normalize(&mut w);
        assert!((w[0] - 0.25).abs() < 1e-6, "w = {:?}", w);
        assert!((w[1] - 0.75).abs() < 1e-6, "w = {:?}", w);
    }

    #[test]
    fn test_normalize_exact_sum_is_untouched() {
        // dyadic values: the f32 sum is exactly 1.0, so not a single bit moves
        let mut w = [0.5, 0.125, 0.25, 0.125];
        let stored = w;
        normalize(&mut w);
        assert_eq!(w, stored);
    }

    #[test]
    fn test_normalize_clamps_negatives_first() {
        let mut w = [-0.5, 0.5, 0.5];
        normalize(&mut w);
        assert_eq!(w[0], 0.0);
        assert_unit_sum(&w);
        for &v in &w {
            assert!(v >= 0.0, "negative weight {} in {:?}", v, w);
        }
    }

    #[test]
    fn test_normalize_zero_mass_uniform_fill() {
        let mut w = [0.0, 0.0, 0.0, 0.0];
        normalize(&mut w);
        for &v in &w {
            assert_eq!(v, 0.25, "w = {:?}", w);
        }
    }

    #[test]
    fn test_normalize_all_negative_uniform_fill() {
        let mut w = [-1.0, -2.0];
        normalize(&mut w);
        assert_eq!(w, [0.5, 0.5]);
    }

    #[test]
    fn test_normalize_empty_is_noop() {
        let mut w: [f32; 0] = [];
        normalize(&mut w);
    }

    #[test]
    fn test_normalize_single_element_becomes_one() {
        let mut w = [0.5];
        normalize(&mut w);
        assert_eq!(w, [1.0]);

        let mut w = [0.0];
        normalize(&mut w);
        assert_eq!(w, [1.0]);
    }

    // ── correct: ProportionalAll ──────────────────────────────────────────

    #[test]
    fn test_proportional_all_ignores_index() {
        let mut a = [0.5, 0.25, 0.5];
        let mut b = a;
        correct(&mut a, 0, EditRule::ProportionalAll);
        correct(&mut b, 2, EditRule::ProportionalAll);
        assert_eq!(a, b);
        assert_unit_sum(&a);
    }

    #[test]
    fn test_correct_exact_sum_is_untouched_for_every_rule() {
        let rules = [
            EditRule::ProportionalAll,
            EditRule::LeftAndRight,
            EditRule::LeftOnly,
            EditRule::RightOnly,
        ];
        for rule in rules {
            let mut w = [0.25, 0.25, 0.25, 0.25];
            let stored = w;
            let r = correct(&mut w, 1, rule);
            assert_eq!(w, stored, "rule {:?} moved a balanced partition", rule);
            assert!(r.converged);
            assert_eq!(r.residual, 0.0);
        }
    }

    // ── correct: LeftAndRight ─────────────────────────────────────────────

    #[test]
    fn test_left_and_right_splits_delta_between_neighbours() {
        // raise w1 by 0.25: each neighbour gives up 0.125, w3 is untouched
        let mut w = [0.25, 0.5, 0.25, 0.25];
        let r = correct(&mut w, 1, EditRule::LeftAndRight);
        assert_eq!(w, [0.125, 0.5, 0.125, 0.25]);
        assert!(r.converged);
        assert_eq!(r.passes, 1);
    }

    #[test]
    fn test_left_and_right_ring_expands_past_emptied_neighbours() {
        // the first ring clamps both neighbours at 0 and only absorbs part
        // of the delta; the second ring finishes the job
        let mut w = [0.125, 0.125, 0.875, 0.125, 0.125];
        let r = correct(&mut w, 2, EditRule::LeftAndRight);
        assert_eq!(w, [0.0625, 0.0, 0.875, 0.0, 0.0625]);
        assert!(r.converged);
        assert_eq!(r.passes, 2);
    }

    #[test]
    fn test_left_and_right_at_left_edge_becomes_right_only() {
        // the downgrade pass itself adjusts nothing but still widens the
        // ring, so RightOnly resumes at range 2 and w1 is skipped
        let mut w = [0.625, 0.125, 0.125, 0.125, 0.125];
        let r = correct(&mut w, 0, EditRule::LeftAndRight);
        assert_eq!(w, [0.625, 0.125, 0.0, 0.125, 0.125]);
        assert!(r.converged);
    }

    #[test]
    fn test_left_and_right_at_right_edge_becomes_left_only() {
        let mut w = [0.125, 0.125, 0.125, 0.125, 0.625];
        let r = correct(&mut w, 4, EditRule::LeftAndRight);
        // downgrade widens the ring: LeftOnly resumes at w[4 - 2]
        assert_eq!(w, [0.125, 0.125, 0.0, 0.125, 0.625]);
        assert!(r.converged);
    }

    // ── correct: LeftOnly ─────────────────────────────────────────────────

    #[test]
    fn test_left_only_takes_from_left_neighbour() {
        let mut w = [0.25, 0.5, 0.25, 0.25];
        let r = correct(&mut w, 1, EditRule::LeftOnly);
        assert_eq!(w, [0.0, 0.5, 0.25, 0.25]);
        assert!(r.converged);
    }

    #[test]
    fn test_left_only_walks_left_until_absorbed() {
        let mut w = [0.25, 0.125, 0.75, 0.25];
        let r = correct(&mut w, 2, EditRule::LeftOnly);
        // ring 1 empties w1 (absorbs 0.125), ring 2 takes the rest from w0
        assert_eq!(w, [0.0, 0.0, 0.75, 0.25]);
        assert!(r.converged);
    }

    #[test]
    fn test_left_only_at_index_zero_falls_back_to_proportional() {
        let mut w = [0.6, 0.25, 0.25, 0.25, 0.25];
        let r = correct(&mut w, 0, EditRule::LeftOnly);
        assert_unit_sum(&w);
        assert!(r.converged);
        // proportional fallback scales everything down, nothing is zeroed
        for &v in &w {
            assert!(v > 0.0, "w = {:?}", w);
        }
    }

    // ── correct: RightOnly ────────────────────────────────────────────────

    #[test]
    fn test_right_only_takes_from_right_neighbour() {
        let mut w = [0.5, 0.25, 0.25, 0.25];
        let r = correct(&mut w, 0, EditRule::RightOnly);
        assert_eq!(w, [0.5, 0.0, 0.25, 0.25]);
        assert!(r.converged);
    }

    #[test]
    fn test_right_only_never_adjusts_the_last_entry() {
        // the right neighbour exists but is the last index, so the rule
        // falls straight through to the proportional fallback
        let mut w = [0.25, 0.625, 0.25];
        let r = correct(&mut w, 1, EditRule::RightOnly);
        assert_unit_sum(&w);
        assert!(r.converged);
        assert!(w[2] > 0.0, "last entry should not be zeroed: {:?}", w);
        assert!(w[1] < 0.625, "proportional fallback rescales the edit too: {:?}", w);
    }

    // ── degenerate and guard cases ────────────────────────────────────────

    #[test]
    fn test_correct_zero_mass_uniform_fill_before_ring_walk() {
        for rule in [EditRule::LeftAndRight, EditRule::LeftOnly, EditRule::RightOnly] {
            let mut w = [0.0, 0.0, 0.0];
            let r = correct(&mut w, 1, rule);
            for &v in &w {
                assert!((v - 1.0 / 3.0).abs() < 1e-6, "rule {:?}: w = {:?}", rule, w);
            }
            assert!(r.converged);
        }
    }

    #[test]
    fn test_correct_empty_reports_not_converged() {
        let mut w: [f32; 0] = [];
        let r = correct(&mut w, 0, EditRule::LeftAndRight);
        assert!(!r.converged);
        assert_eq!(r.passes, 0);
        assert_eq!(r.residual, 1.0);
    }

    #[test]
    fn test_correct_single_element_becomes_one() {
        for rule in [
            EditRule::ProportionalAll,
            EditRule::LeftAndRight,
            EditRule::LeftOnly,
            EditRule::RightOnly,
        ] {
            let mut w = [0.25];
            let r = correct(&mut w, 0, rule);
            assert_eq!(w, [1.0], "rule {:?}", rule);
            assert!(r.converged, "rule {:?}: {:?}", rule, r);
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_correct_out_of_range_index_panics() {
        let mut w = [0.5, 0.5];
        correct(&mut w, 2, EditRule::LeftAndRight);
    }

    #[test]
    fn test_pass_cap_is_observable() {
        let strict = Corrector::new(1e-6, 0);
        let mut w = [0.5, 0.25, 0.5];
        let r = strict.correct(&mut w, 1, EditRule::LeftAndRight);
        assert!(!r.converged, "cap of zero passes cannot converge: {:?}", r);
        assert_eq!(r.passes, 0);
        assert!(r.residual > 0.0);
    }

    #[test]
    fn test_non_negativity_for_every_rule() {
        let rules = [
            EditRule::ProportionalAll,
            EditRule::LeftAndRight,
            EditRule::LeftOnly,
            EditRule::RightOnly,
        ];
        for rule in rules {
            for index in 0..6 {
                let mut w = [0.05, 0.1, 0.9, 0.02, 0.4, 0.03];
                let r = correct(&mut w, index, rule);
                assert!(r.converged, "rule {:?} index {}: {:?}", rule, index, r);
                for &v in &w {
                    assert!(v >= 0.0, "rule {:?} index {}: negative {} in {:?}", rule, index, v, w);
                }
                assert_unit_sum(&w);
            }
        }
    }
}
