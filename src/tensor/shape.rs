//! tensor::shape — static and runtime shapes with trailing-axis broadcasting.
//!
//! Purpose
//! -------
//! Represent array shapes that may only be partially known ahead of
//! evaluation ([`TensorShape`]) and implement the broadcasting rules that
//! distribution code uses to derive batch shapes, both from static metadata
//! ([`broadcast_static_shape`]) and from concrete runtime shapes
//! ([`broadcast_dynamic_shape`]).
//!
//! Key behaviors
//! -------------
//! - A [`TensorShape`] is either of unknown rank, or a list of dimensions
//!   where each dimension is known (`Some(d)`) or unknown (`None`).
//! - Static broadcasting never reads data and only fails when two *known*
//!   dimensions conflict; unknown information propagates as unknown.
//! - Dynamic broadcasting works on concrete `&[usize]` shapes and fails on
//!   any conflict.
//!
//! Invariants & assumptions
//! ------------------------
//! - Shapes are aligned on their trailing axes; the shorter shape is padded
//!   with leading `1`s.
//! - A known dimension of `1` broadcasts against anything, including an
//!   unknown dimension (the result is then unknown).
//!
//! Conventions
//! -----------
//! - Shapes display as `[2, ?, 3]`; an unknown-rank shape displays as
//!   `<unknown>`. These strings are what error messages carry.
use crate::tensor::errors::{TensorError, TensorResult};

/// Static shape of an array, possibly partially or entirely unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TensorShape {
    dims: Option<Vec<Option<usize>>>,
}

impl TensorShape {
    /// Rank-0 shape (a scalar).
    pub fn scalar() -> Self {
        TensorShape { dims: Some(Vec::new()) }
    }

    /// Shape of unknown rank.
    pub fn unknown() -> Self {
        TensorShape { dims: None }
    }

    /// Fully defined shape from concrete dimensions.
    pub fn from_dims(dims: &[usize]) -> Self {
        TensorShape { dims: Some(dims.iter().copied().map(Some).collect()) }
    }

    /// Known rank with a mix of known (`Some`) and unknown (`None`) dimensions.
    pub fn with_unknown_dims(dims: Vec<Option<usize>>) -> Self {
        TensorShape { dims: Some(dims) }
    }

    /// Rank, if known.
    pub fn rank(&self) -> Option<usize> {
        self.dims.as_ref().map(Vec::len)
    }

    /// Per-dimension view, if the rank is known.
    pub fn dims(&self) -> Option<&[Option<usize>]> {
        self.dims.as_deref()
    }

    /// `true` when the rank and every dimension are known.
    pub fn is_fully_defined(&self) -> bool {
        self.dims.as_ref().is_some_and(|d| d.iter().all(Option::is_some))
    }

    /// Concrete dimensions when fully defined.
    pub fn as_dims(&self) -> Option<Vec<usize>> {
        self.dims.as_ref()?.iter().copied().collect()
    }

    /// Append `other`'s dimensions after `self`'s. Unknown rank on either side
    /// yields unknown rank.
    pub fn concatenate(&self, other: &TensorShape) -> TensorShape {
        match (&self.dims, &other.dims) {
            (Some(a), Some(b)) => {
                TensorShape { dims: Some(a.iter().chain(b.iter()).copied().collect()) }
            }
            _ => TensorShape::unknown(),
        }
    }

    /// Whether a concrete runtime shape could be an instance of this static shape.
    pub fn is_compatible_with(&self, concrete: &[usize]) -> bool {
        match &self.dims {
            None => true,
            Some(dims) => {
                dims.len() == concrete.len()
                    && dims.iter().zip(concrete).all(|(d, c)| d.is_none_or(|d| d == *c))
            }
        }
    }
}

impl From<&[usize]> for TensorShape {
    fn from(dims: &[usize]) -> Self {
        TensorShape::from_dims(dims)
    }
}

impl From<Vec<usize>> for TensorShape {
    fn from(dims: Vec<usize>) -> Self {
        TensorShape::from_dims(&dims)
    }
}

impl std::fmt::Display for TensorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.dims {
            None => write!(f, "<unknown>"),
            Some(dims) => {
                let parts: Vec<String> = dims
                    .iter()
                    .map(|d| d.map_or_else(|| "?".to_string(), |d| d.to_string()))
                    .collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}

/// Format concrete dimensions the same way [`TensorShape`] displays.
pub fn format_dims(dims: &[usize]) -> String {
    TensorShape::from_dims(dims).to_string()
}

/// Broadcast two static shapes without reading any data.
///
/// Parameters
/// ----------
/// - `a`, `b`: `&TensorShape`
///   Static shapes, possibly partially known.
///
/// Returns
/// -------
/// `TensorResult<TensorShape>`
///   - Unknown rank if either input has unknown rank.
///   - Otherwise a shape of rank `max(rank(a), rank(b))` where each
///     dimension follows the rules below.
///
/// Per-dimension rules
/// -------------------
/// - equal known dims → that dim;
/// - a known `1` → the other dim (known or not);
/// - unknown vs known `d > 1` → `d`;
/// - unknown vs unknown → unknown.
///
/// Errors
/// ------
/// - [`TensorError::IncompatibleShapes`] when two known dims differ and
///   neither is `1`.
pub fn broadcast_static_shape(a: &TensorShape, b: &TensorShape) -> TensorResult<TensorShape> {
    let (Some(lhs), Some(rhs)) = (a.dims(), b.dims()) else {
        return Ok(TensorShape::unknown());
    };
    let rank = lhs.len().max(rhs.len());
    let mut out = Vec::with_capacity(rank);
    for i in 0..rank {
        let x = aligned_dim(lhs, rank, i);
        let y = aligned_dim(rhs, rank, i);
        let dim = match (x, y) {
            (Some(p), Some(q)) if p == q => Some(p),
            (Some(1), other) | (other, Some(1)) => other,
            (Some(_), Some(_)) => {
                return Err(TensorError::IncompatibleShapes {
                    lhs: a.to_string(),
                    rhs: b.to_string(),
                });
            }
            (None, known) | (known, None) => known,
        };
        out.push(dim);
    }
    Ok(TensorShape::with_unknown_dims(out))
}

/// Broadcast two concrete runtime shapes.
///
/// Errors
/// ------
/// - [`TensorError::IncompatibleShapes`] when two dims differ and neither is `1`.
pub fn broadcast_dynamic_shape(a: &[usize], b: &[usize]) -> TensorResult<Vec<usize>> {
    let rank = a.len().max(b.len());
    let mut out = Vec::with_capacity(rank);
    for i in 0..rank {
        let x = if i + a.len() >= rank { a[i + a.len() - rank] } else { 1 };
        let y = if i + b.len() >= rank { b[i + b.len() - rank] } else { 1 };
        let dim = match (x, y) {
            (p, q) if p == q => p,
            (1, q) => q,
            (p, 1) => p,
            _ => {
                return Err(TensorError::IncompatibleShapes {
                    lhs: format_dims(a),
                    rhs: format_dims(b),
                });
            }
        };
        out.push(dim);
    }
    Ok(out)
}

/// Element count of `dims`.
///
/// # Errors
/// [`TensorError::ShapeOverflow`] if the product does not fit in `usize`.
pub fn checked_num_elements(dims: &[usize]) -> TensorResult<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(|| TensorError::ShapeOverflow { shape: format_dims(dims) })
}

/// Build `front + shape + back`, e.g. `[n] + batch_shape + [3]`.
pub fn pad_shape(front: &[usize], shape: &[usize], back: &[usize]) -> Vec<usize> {
    let mut out = Vec::with_capacity(front.len() + shape.len() + back.len());
    out.extend_from_slice(front);
    out.extend_from_slice(shape);
    out.extend_from_slice(back);
    out
}

// ---- Helper Methods ----

fn aligned_dim(dims: &[Option<usize>], rank: usize, i: usize) -> Option<usize> {
    let offset = rank - dims.len();
    if i < offset { Some(1) } else { dims[i - offset] }
}
