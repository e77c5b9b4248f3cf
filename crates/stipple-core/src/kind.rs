//! Value kinds and the closed set of record value types.

use std::fmt::Debug;
use std::ops::AddAssign;

/// Numeric kind of a record's value field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Float,
}

impl ValueKind {
    /// Promote two kinds to the least general common kind.
    ///
    /// Floating point wins over integer; within the closed two-kind set that
    /// is the whole promotion table.
    #[must_use]
    pub const fn promote(lhs: Self, rhs: Self) -> Self {
        match (lhs, rhs) {
            (Self::Int, Self::Int) => Self::Int,
            _ => Self::Float,
        }
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float)
    }
}

/// Record value type: one of the closed {integer-like, floating-point-like}
/// set. The additive identity is `ZERO`; summing contributions uses
/// `AddAssign`.
pub trait Value:
    Copy + PartialEq + AddAssign + Send + Sync + Debug + 'static
{
    const KIND: ValueKind;
    const ZERO: Self;

    /// Re-encode an integer value into this kind. Used when concatenation
    /// promotes integer sequences to floating point; exact for any index or
    /// assembly count that fits in 53 bits.
    fn from_int(v: i64) -> Self;
}

impl Value for i64 {
    const KIND: ValueKind = ValueKind::Int;
    const ZERO: Self = 0;

    #[inline]
    fn from_int(v: i64) -> Self {
        v
    }
}

impl Value for f64 {
    const KIND: ValueKind = ValueKind::Float;
    const ZERO: Self = 0.0;

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn from_int(v: i64) -> Self {
        v as Self
    }
}
