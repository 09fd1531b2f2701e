//! The host platform's reflection surface, reduced to the shape this layer
//! actually consumes.
//!
//! The host has no notion of source-level generics: methods are plain
//! handles carrying a name, modifier bits, and a positional parameter
//! list, and the only call path is an untyped invoke primitive. Everything
//! above that level is built against these traits, so no host reflection
//! API leaks into the core.

use crate::types::generics::TypeHandle;
use std::{
    any::Any,
    fmt::{Debug, Formatter},
    sync::Arc,
};
use thiserror::Error;

/// Kind of a single host parameter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterKind {
    /// An ordinary value parameter.
    Ordinary,
    /// A parameter declared as the host's type-value class. The translator
    /// appends these to pass type arguments through the host call path.
    TypeValue,
}

/// A class on the host reflection surface.
pub trait HostClass: Send + Sync {
    fn name(&self) -> &str;

    /// Methods declared directly on this class, in declaration order.
    fn declared_methods(&self) -> Vec<Arc<dyn HostMethod>>;
}

/// A raw method handle on the host reflection surface.
pub trait HostMethod: Send + Sync {
    /// The name as emitted by the translator, including any marker suffix.
    fn name(&self) -> &str;

    fn is_static(&self) -> bool;

    fn is_public(&self) -> bool;

    fn parameter_kinds(&self) -> Vec<ParameterKind>;

    fn parameter_count(&self) -> usize {
        self.parameter_kinds().len()
    }

    /// The host's invocation primitive. `receiver` is ignored for static
    /// methods. Whatever this reports, success or failure, is propagated to
    /// the caller unchanged.
    fn invoke(&self, receiver: &HostValue, arguments: &[HostValue])
        -> Result<HostValue, HostError>;
}

/// Failure reported by the host invocation primitive.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{0}")]
pub struct HostError(pub String);

/// A value crossing the host call boundary.
#[derive(Clone)]
pub enum HostValue {
    Null,
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Str(Arc<str>),
    /// A reified type, as passed for type arguments.
    Type(TypeHandle),
    /// An opaque host object reference.
    Object(Arc<dyn Any + Send + Sync>),
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        use HostValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Int32(a), Int32(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Float64(a), Float64(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Type(a), Type(b)) => a == b,
            (Object(a), Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Debug for HostValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HostValue::Null => write!(f, "null"),
            HostValue::Boolean(v) => write!(f, "{v}"),
            HostValue::Int32(v) => write!(f, "{v}"),
            HostValue::Int64(v) => write!(f, "{v}l"),
            HostValue::Float64(v) => write!(f, "{v}"),
            HostValue::Str(v) => write!(f, "{v:?}"),
            HostValue::Type(t) => write!(f, "typeof({t:?})"),
            HostValue::Object(_) => write!(f, "object"),
        }
    }
}
