use crate::host::HostError;
use thiserror::Error;

/// Failures surfaced by method resolution, instantiation, and invocation.
///
/// All of these are deterministic functions of immutable metadata; none are
/// transient, so callers should not retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReflectError {
    /// The declaring type and the method signature disagree about generic
    /// arity. Correctly generated metadata never produces this.
    #[error(
        "method {method} takes {method_arity} trailing type parameters but its declaring type supplies {type_arity}"
    )]
    MetadataInconsistency {
        method: String,
        method_arity: usize,
        type_arity: usize,
    },

    /// The requested operation is not valid for the method's current
    /// generic state.
    #[error("invalid operation: {0}")]
    InvalidState(&'static str),

    /// A required type argument was absent or not a runtime type.
    #[error("type argument {index} is null or not a runtime type")]
    NullArgument { index: usize },

    /// The composed argument list disagrees with the host parameter count.
    #[error("argument count mismatch: host declares {expected} parameters, composed {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// The host invocation primitive reported a failure.
    #[error(transparent)]
    Host(#[from] HostError),
}
