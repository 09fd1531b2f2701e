//! Runtime reflection metadata for .NET code translated onto a foreign
//! host platform.
//!
//! The host's reflection model is simpler than the source language's: it
//! has no first-class generic methods and identifies overloads purely by
//! name. The translator therefore encodes generic information into method
//! names and trailing type-valued parameters. This crate decodes that
//! encoding back into source-level semantics: lookup by logical name,
//! classification of a method's generic shape, explicit instantiation, and
//! invocation with automatic type-argument composition.

pub mod demangle;
pub mod error;
pub mod host;
pub mod lookup;
pub mod types;

pub use error::ReflectError;
pub use host::{HostClass, HostError, HostMethod, HostValue, ParameterKind};
pub use lookup::{find_method, Binding, TypeLookupExt};
pub use types::{
    generics::{GenericState, TypeArgumentCell, TypeHandle, TypeShape},
    members::RuntimeMethod,
    RuntimeType,
};
