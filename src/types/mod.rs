use crate::{
    host::HostClass,
    lookup::Binding,
    types::{generics::TypeHandle, members::RuntimeMethod},
};
use dashmap::DashMap;
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

pub mod generics;
pub mod members;

/// A source-level type bound to its backing host class.
///
/// For a generic instantiation `type_arguments` holds the concrete
/// arguments; for a generic definition it holds the unresolved parameters
/// themselves. A non-generic type has an empty list.
pub struct RuntimeType {
    class: Arc<dyn HostClass>,
    type_arguments: Arc<[TypeHandle]>,
    method_cache: DashMap<(Arc<str>, Binding), Arc<RuntimeMethod>>,
}

impl RuntimeType {
    pub fn new(class: Arc<dyn HostClass>) -> Arc<Self> {
        Self::with_type_arguments(class, Vec::new())
    }

    pub fn with_type_arguments(
        class: Arc<dyn HostClass>,
        type_arguments: Vec<TypeHandle>,
    ) -> Arc<Self> {
        Arc::new(RuntimeType {
            class,
            type_arguments: type_arguments.into(),
            method_cache: DashMap::new(),
        })
    }

    pub fn class(&self) -> &Arc<dyn HostClass> {
        &self.class
    }

    pub fn name(&self) -> &str {
        self.class.name()
    }

    /// Ordered type arguments; generic parameters for a definition,
    /// concrete types for an instantiation.
    pub fn type_arguments(&self) -> &Arc<[TypeHandle]> {
        &self.type_arguments
    }

    pub fn is_generic(&self) -> bool {
        !self.type_arguments.is_empty()
    }

    /// Whether any type argument is, or contains, an unresolved generic
    /// parameter.
    pub fn contains_generic_parameters(&self) -> bool {
        self.type_arguments
            .iter()
            .any(|t| t.is_generic_parameter() || t.contains_generic_parameters())
    }

    pub(crate) fn method_cache(&self) -> &DashMap<(Arc<str>, Binding), Arc<RuntimeMethod>> {
        &self.method_cache
    }
}

impl Debug for RuntimeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;
        if self.is_generic() {
            write!(f, "<")?;
            for (i, argument) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{argument:?}")?;
            }
            write!(f, ">")?;
        }
        Ok(())
    }
}
