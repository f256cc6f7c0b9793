//! The steps taken by canonicalization.

/// A single canonicalization rule application, reported through a
/// [`StepCollector`](super::StepCollector).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `f + 0 = f` and `f - 0 = f`.
    AdditiveIdentity,

    /// `f + (-g) = f - g` and `f - (-g) = f + g`.
    NormalizeSign,

    /// `f - f = 0`, detected by identical rendering of both operands.
    CancelSelf,

    /// A node whose own scaling factor is zero collapses to the zero
    /// scalar.
    AbsorbZero,

    /// A scalar factor common to both children hoisted into the node's own
    /// scaling.
    HoistCommonFactor,
}
