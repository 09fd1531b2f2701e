use crate::host::HostClass;
use std::{
    fmt::{Debug, Formatter},
    sync::{Arc, OnceLock},
};

/// A resolved reference to a source-level type, backed by the host.
#[derive(Clone)]
pub struct TypeHandle {
    shape: Arc<TypeShape>,
}

pub enum TypeShape {
    /// A concrete, fully resolved type.
    Concrete(Arc<dyn HostClass>),
    /// An unresolved generic parameter, positional within its owner.
    Parameter { name: Arc<str>, index: usize },
    /// A generic instantiation; open iff any argument still is.
    Constructed {
        definition: Arc<dyn HostClass>,
        arguments: Vec<TypeHandle>,
    },
}

impl TypeHandle {
    pub fn concrete(class: Arc<dyn HostClass>) -> Self {
        TypeHandle {
            shape: Arc::new(TypeShape::Concrete(class)),
        }
    }

    pub fn parameter(name: impl Into<Arc<str>>, index: usize) -> Self {
        TypeHandle {
            shape: Arc::new(TypeShape::Parameter {
                name: name.into(),
                index,
            }),
        }
    }

    pub fn constructed(definition: Arc<dyn HostClass>, arguments: Vec<TypeHandle>) -> Self {
        TypeHandle {
            shape: Arc::new(TypeShape::Constructed {
                definition,
                arguments,
            }),
        }
    }

    pub fn get(&self) -> &TypeShape {
        &self.shape
    }

    pub fn name(&self) -> &str {
        match &*self.shape {
            TypeShape::Concrete(class) => class.name(),
            TypeShape::Parameter { name, .. } => name,
            TypeShape::Constructed { definition, .. } => definition.name(),
        }
    }

    pub fn is_generic_parameter(&self) -> bool {
        matches!(&*self.shape, TypeShape::Parameter { .. })
    }

    pub fn contains_generic_parameters(&self) -> bool {
        match &*self.shape {
            TypeShape::Concrete(_) => false,
            TypeShape::Parameter { .. } => true,
            TypeShape::Constructed { arguments, .. } => {
                arguments.iter().any(|a| a.contains_generic_parameters())
            }
        }
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        match (&*self.shape, &*other.shape) {
            (TypeShape::Concrete(a), TypeShape::Concrete(b)) => Arc::ptr_eq(a, b),
            (TypeShape::Parameter { index: a, .. }, TypeShape::Parameter { index: b, .. }) => {
                a == b
            }
            (
                TypeShape::Constructed {
                    definition: a,
                    arguments: a_args,
                },
                TypeShape::Constructed {
                    definition: b,
                    arguments: b_args,
                },
            ) => Arc::ptr_eq(a, b) && a_args == b_args,
            _ => false,
        }
    }
}

impl Eq for TypeHandle {}

impl Debug for TypeHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &*self.shape {
            TypeShape::Concrete(class) => write!(f, "{}", class.name()),
            TypeShape::Parameter { name, .. } => write!(f, "{name}"),
            TypeShape::Constructed {
                definition,
                arguments,
            } => {
                write!(f, "{}<", definition.name())?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument:?}")?;
                }
                write!(f, ">")
            }
        }
    }
}

/// Generic classification of a runtime method.
///
/// The variants form a closed set; the data a state needs travels with it,
/// so an instantiated method without its arguments, or a lazily combined
/// one without its cell, cannot be constructed.
#[derive(Clone, Debug)]
pub enum GenericState {
    /// Not generic; invokable as-is.
    Plain,
    /// A generic method definition; must be instantiated before use.
    Definition,
    /// Still contains unresolved generic parameters; never invokable.
    Open,
    /// The declaring type is a closed generic instantiation; its type
    /// arguments are fetched and appended automatically at invocation.
    CombineImplicit(TypeArgumentCell),
    /// Bound to a full, closed set of type arguments.
    Instantiated(Arc<[TypeHandle]>),
}

/// Compute-once storage for an implicit type-argument sequence.
///
/// Concurrent first fills race benignly: the sequence is a deterministic
/// function of the declaring type, exactly one fill is stored, and every
/// observer sees that one.
#[derive(Clone, Debug, Default)]
pub struct TypeArgumentCell(OnceLock<Arc<[TypeHandle]>>);

impl TypeArgumentCell {
    pub fn new() -> Self {
        TypeArgumentCell(OnceLock::new())
    }

    /// The stored sequence, if a fill has happened.
    pub fn get(&self) -> Option<&Arc<[TypeHandle]>> {
        self.0.get()
    }

    /// Returns the stored sequence, running `fill` only on the first call.
    pub fn get_or_fill(&self, fill: impl FnOnce() -> Arc<[TypeHandle]>) -> Arc<[TypeHandle]> {
        self.0.get_or_init(fill).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Class(&'static str);
    impl HostClass for Class {
        fn name(&self) -> &str {
            self.0
        }
        fn declared_methods(&self) -> Vec<Arc<dyn crate::host::HostMethod>> {
            vec![]
        }
    }

    #[test]
    fn openness_is_recursive_through_constructed_types() {
        let int32 = TypeHandle::concrete(Arc::new(Class("Int32")));
        let list: Arc<dyn HostClass> = Arc::new(Class("List"));

        assert!(!int32.contains_generic_parameters());
        assert!(!int32.is_generic_parameter());

        let t = TypeHandle::parameter("T", 0);
        assert!(t.is_generic_parameter());
        assert!(t.contains_generic_parameters());

        let closed = TypeHandle::constructed(list.clone(), vec![int32.clone()]);
        assert!(!closed.contains_generic_parameters());
        assert!(!closed.is_generic_parameter());

        let nested = TypeHandle::constructed(list.clone(), vec![closed]);
        assert!(!nested.contains_generic_parameters());

        let open = TypeHandle::constructed(list, vec![int32, t]);
        assert!(open.contains_generic_parameters());
        assert!(!open.is_generic_parameter());
    }

    #[test]
    fn cell_fills_at_most_once() {
        let cell = TypeArgumentCell::new();
        assert!(cell.get().is_none());

        let mut fills = 0;
        let first = cell.get_or_fill(|| {
            fills += 1;
            Arc::from(vec![TypeHandle::parameter("T", 0)])
        });
        let second = cell.get_or_fill(|| {
            fills += 1;
            Arc::from(Vec::new())
        });

        assert_eq!(fills, 1);
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cell.get().is_some());
    }
}
