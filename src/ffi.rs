//! Python FFI bindings via PyO3.
//!
//! Exposes the correction math and a plain (payload-free) partition
//! container to Python. Payload-carrying partitions are a Rust-side
//! concern; attach Python objects by index on the host side.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from partition_core import Partition, EditRule, normalize, correct, locate
//!
//! weights, converged = correct([0.25, 0.5, 0.25, 0.25], 1, EditRule.LeftAndRight)
//! print(weights)                # [0.125, 0.5, 0.125, 0.25]
//!
//! p = Partition()
//! p.push(rule=EditRule.ProportionalAll)
//! p.push()
//! p.set_weights([0.2, 0.8])
//! print(p.locate(0.5))          # 1
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::correct::{Corrector, EditRule as RustEditRule};
use crate::partition::{Partition as RustPartition, Rgba, Segment};

// ── EditRule ──────────────────────────────────────────────────────────────────

/// Distribution rule selecting which entries absorb a correction delta.
#[pyclass(name = "EditRule", eq, eq_int)]
#[derive(Clone, Copy, PartialEq)]
pub enum PyEditRule {
    /// Spread the delta over every entry in proportion to its weight.
    ProportionalAll = 0,
    /// Split the delta between the ring neighbours of the edit index.
    LeftAndRight = 1,
    /// Push the delta leftward from the edit index.
    LeftOnly = 2,
    /// Push the delta rightward from the edit index.
    RightOnly = 3,
}

impl From<PyEditRule> for RustEditRule {
    fn from(rule: PyEditRule) -> Self {
        match rule {
            PyEditRule::ProportionalAll => RustEditRule::ProportionalAll,
            PyEditRule::LeftAndRight => RustEditRule::LeftAndRight,
            PyEditRule::LeftOnly => RustEditRule::LeftOnly,
            PyEditRule::RightOnly => RustEditRule::RightOnly,
        }
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Index of the segment containing `probe`, or None for an empty list.
#[pyfunction]
pub fn locate(weights: Vec<f32>, probe: f32) -> Option<usize> {
    crate::lookup::locate(&weights, probe)
}

/// Rebalance `weights` so they sum to 1.0, proportionally. Returns the
/// corrected list.
#[pyfunction]
pub fn normalize(mut weights: Vec<f32>) -> Vec<f32> {
    Corrector::default().normalize(&mut weights);
    weights
}

/// Correct `weights` after an edit at `index` under `rule`.
///
/// Returns `(corrected_weights, converged)`.
///
/// Raises:
///     ValueError: if `index` is out of range for a non-empty list.
#[pyfunction]
#[pyo3(signature = (weights, index, rule = PyEditRule::ProportionalAll))]
pub fn correct(
    mut weights: Vec<f32>,
    index: usize,
    rule: PyEditRule,
) -> PyResult<(Vec<f32>, bool)> {
    if !weights.is_empty() && index >= weights.len() {
        return Err(PyValueError::new_err(format!(
            "index {} out of range for {} weights",
            index,
            weights.len()
        )));
    }
    let result = Corrector::default().correct(&mut weights, index, rule.into());
    Ok((weights, result.converged))
}

// ── Partition ─────────────────────────────────────────────────────────────────

/// Ordered collection of weighted segments kept summing to 1.0.
///
/// Example:
///
/// ```python
/// p = Partition()
/// p.push(tint=[1.0, 0.0, 0.0, 1.0])
/// p.push(tint=[0.0, 0.0, 1.0, 1.0])
/// p.set_weights([0.2, 0.8])
/// p.set_weight(0, 0.5, EditRule.RightOnly)
/// ```
#[pyclass(name = "Partition")]
pub struct PyPartition {
    inner: RustPartition<()>,
}

#[pymethods]
impl PyPartition {
    /// Create a new empty partition.
    #[new]
    pub fn new() -> Self {
        Self { inner: RustPartition::new() }
    }

    /// Append a segment, then correct at the new last index.
    ///
    /// Args:
    ///     weight: initial raw weight (default 0.0)
    ///     tint:   display color [r, g, b, a] (default mid gray)
    ///     rule:   EditRule for the correction (default ProportionalAll)
    ///
    /// Returns:
    ///     True if the correction converged.
    #[pyo3(signature = (weight = 0.0, tint = None, rule = PyEditRule::ProportionalAll))]
    pub fn push(&mut self, weight: f32, tint: Option<[f32; 4]>, rule: PyEditRule) -> bool {
        let tint = tint.map_or(Rgba::GRAY, |[r, g, b, a]| Rgba::new(r, g, b, a));
        let segment = Segment { weight, tint, payload: () };
        self.inner.push(segment, rule.into()).converged
    }

    /// Remove the segment at `index`; out-of-range indices do nothing.
    ///
    /// Returns:
    ///     True if a segment was removed.
    #[pyo3(signature = (index, rule = PyEditRule::ProportionalAll))]
    pub fn remove(&mut self, index: usize, rule: PyEditRule) -> bool {
        self.inner.remove(index, rule.into()).is_some()
    }

    /// Write a raw weight, then correct at `index` under `rule`.
    ///
    /// Returns:
    ///     True if the correction converged.
    ///
    /// Raises:
    ///     ValueError: if `index` is out of range.
    #[pyo3(signature = (index, value, rule = PyEditRule::ProportionalAll))]
    pub fn set_weight(&mut self, index: usize, value: f32, rule: PyEditRule) -> PyResult<bool> {
        if index >= self.inner.len() {
            return Err(PyValueError::new_err(format!(
                "index {} out of range for {} segments",
                index,
                self.inner.len()
            )));
        }
        Ok(self.inner.set_weight(index, value, rule.into()).converged)
    }

    /// Bulk-overwrite the weights (lengths must match), then renormalise.
    ///
    /// Returns:
    ///     True if the values were applied.
    pub fn set_weights(&mut self, values: Vec<f32>) -> bool {
        self.inner.set_weights(&values)
    }

    /// Renormalise with no preferred index.
    pub fn rebalance(&mut self) {
        self.inner.rebalance();
    }

    /// Index of the segment containing `probe`, or None when empty.
    pub fn locate(&self, probe: f32) -> Option<usize> {
        self.inner.locate(probe)
    }

    /// Copy of the weight column.
    pub fn weights(&self) -> Vec<f32> {
        self.inner.weights()
    }

    /// Display color of the segment at `index` as [r, g, b, a].
    pub fn get_tint(&self, index: usize) -> PyResult<[f32; 4]> {
        self.inner
            .get(index)
            .map(|s| [s.tint.r, s.tint.g, s.tint.b, s.tint.a])
            .ok_or_else(|| PyValueError::new_err(format!("index {index} out of range")))
    }

    /// Set the display color of the segment at `index`.
    pub fn set_tint(&mut self, index: usize, tint: [f32; 4]) -> PyResult<()> {
        let [r, g, b, a] = tint;
        self.inner
            .tint_mut(index)
            .map(|t| *t = Rgba::new(r, g, b, a))
            .ok_or_else(|| PyValueError::new_err(format!("index {index} out of range")))
    }

    /// Number of segments.
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Partition(weights={:?})", self.inner.weights())
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Normalized partitions — ordered weight sequences that always sum to one.
#[pymodule]
pub fn partition_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEditRule>()?;
    m.add_class::<PyPartition>()?;
    m.add_function(wrap_pyfunction!(locate, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(correct, m)?)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
