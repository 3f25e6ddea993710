//! Error types and the capability-gap condition

use core::fmt;
use std::panic;

use thiserror::Error;

use crate::Tier;

/// Result type for rafaga operations.
pub type Result<T> = std::result::Result<T, RafagaError>;

/// Errors surfaced by the tier-query helpers.
///
/// The vector operations themselves never return errors: misuse of a
/// precondition is undefined behavior, and a capability gap aborts (see
/// [`CapabilityGap`]). These variants exist for the harness-facing helpers
/// that decide whether a tier can be exercised at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RafagaError {
    /// The requested tier is not available on this CPU.
    #[error("tier not available on this CPU: {0:?}")]
    UnsupportedTier(Tier),

    /// Byte/word granularity instructions were not enabled at compile time.
    #[error("narrow-lane (avx512bw) instructions not enabled at compile time")]
    NarrowLanesDisabled,
}

/// Panic payload of the fatal "not implemented for this hardware tier"
/// condition.
///
/// Capability gaps never degrade to a wrong numeric result; they abort at
/// the point of use. The payload is a concrete type so a test harness can
/// `catch_unwind` and downcast it, recognizing an intentionally unexercised
/// path rather than a regression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityGap {
    /// Operation that was invoked.
    pub op: &'static str,
    /// Element type the operation was instantiated with.
    pub element: &'static str,
    /// What this tier is missing.
    pub detail: &'static str,
}

impl fmt::Display for CapabilityGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} over {} is not implemented at this hardware tier: {}",
            self.op, self.element, self.detail
        )
    }
}

/// Abort with a capability-gap report.
///
/// The return value of an operation that reaches this point is
/// unconstrained; callers must treat a triggered gap as a build or
/// configuration error, never as a data error.
#[cold]
#[track_caller]
pub(crate) fn capability_gap(
    op: &'static str,
    element: &'static str,
    detail: &'static str,
) -> ! {
    tracing::error!(op, element, detail, "not implemented for this hardware tier");
    panic::panic_any(CapabilityGap { op, element, detail });
}
