use crate::{
    demangle,
    error::ReflectError,
    host::{HostMethod, HostValue, ParameterKind},
    types::{
        generics::{GenericState, TypeArgumentCell, TypeHandle},
        RuntimeType,
    },
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
    sync::Arc,
};
use tracing::{trace, warn};

/// A resolved method, carrying its generic classification.
///
/// Instantiation derives a new value sharing the same host handle; nothing
/// is mutated after classification except the one-time fill of the
/// implicit-combination cell.
pub struct RuntimeMethod {
    host: Arc<dyn HostMethod>,
    declaring: Arc<RuntimeType>,
    original_name: Arc<str>,
    logical_name: Arc<str>,
    state: GenericState,
}

/// Counts the trailing run of type-valued parameters, scanning backward
/// until the first ordinary slot.
pub fn trailing_type_parameters(kinds: &[ParameterKind]) -> usize {
    kinds
        .iter()
        .rev()
        .take_while(|kind| matches!(kind, ParameterKind::TypeValue))
        .count()
}

/// State of a method that owns no type parameters: it may still be
/// non-invokable if the declaring type is open, or need the declaring
/// type's arguments appended if that type is a closed instantiation.
fn declaring_type_state(declaring: &RuntimeType) -> GenericState {
    if declaring.contains_generic_parameters() {
        GenericState::Open
    } else if declaring.is_generic() {
        GenericState::CombineImplicit(TypeArgumentCell::new())
    } else {
        GenericState::Plain
    }
}

impl RuntimeMethod {
    /// Classifies a raw host handle against its declaring type.
    ///
    /// A suffix-marked static method passes its type arguments as trailing
    /// type-valued parameters; comparing that count against the declaring
    /// type's own argument count decides whether the method owns type
    /// parameters beyond the type's.
    pub fn classify(
        host: Arc<dyn HostMethod>,
        declaring: Arc<RuntimeType>,
    ) -> Result<Self, ReflectError> {
        let original_name: Arc<str> = host.name().into();
        let logical_name: Arc<str> = demangle::logical_name(&original_name).into();

        let state = if !demangle::has_generic_suffix(&original_name) {
            if host.is_static() {
                // an unmarked static method never takes type arguments
                GenericState::Plain
            } else {
                declaring_type_state(&declaring)
            }
        } else if !host.is_static() {
            // an instance method that takes any type arguments at all
            // must be a generic method definition
            GenericState::Definition
        } else {
            let kinds = host.parameter_kinds();
            let in_method = trailing_type_parameters(&kinds);
            let in_type = declaring.type_arguments().len();
            match in_method.cmp(&in_type) {
                Ordering::Equal => declaring_type_state(&declaring),
                Ordering::Greater => GenericState::Definition,
                Ordering::Less => {
                    warn!(
                        method = &*original_name,
                        in_method, in_type, "generic arity disagreement in translated metadata"
                    );
                    return Err(ReflectError::MetadataInconsistency {
                        method: original_name.to_string(),
                        method_arity: in_method,
                        type_arity: in_type,
                    });
                }
            }
        };

        trace!(method = &*original_name, state = ?state, "classified host method");

        Ok(RuntimeMethod {
            host,
            declaring,
            original_name,
            logical_name,
            state,
        })
    }

    /// Binds a generic method definition to explicit type arguments,
    /// combined after the declaring type's implicit ones.
    pub fn make_generic(&self, type_arguments: &[HostValue]) -> Result<Self, ReflectError> {
        if !matches!(self.state, GenericState::Definition) {
            return Err(ReflectError::InvalidState(
                "only a generic method definition can be instantiated",
            ));
        }

        let implicit = self.declaring.type_arguments();
        let mut combined = Vec::with_capacity(implicit.len() + type_arguments.len());
        combined.extend_from_slice(implicit);
        for (position, argument) in type_arguments.iter().enumerate() {
            match argument {
                HostValue::Type(handle) => combined.push(handle.clone()),
                _ => {
                    return Err(ReflectError::NullArgument {
                        index: implicit.len() + position,
                    })
                }
            }
        }

        // a definition instantiated with still-open arguments stays
        // non-invokable
        let open = combined
            .iter()
            .any(|t| t.is_generic_parameter() || t.contains_generic_parameters());
        let state = if open {
            GenericState::Open
        } else {
            GenericState::Instantiated(combined.into())
        };

        Ok(RuntimeMethod {
            host: self.host.clone(),
            declaring: self.declaring.clone(),
            original_name: self.original_name.clone(),
            logical_name: self.logical_name.clone(),
            state,
        })
    }

    /// Composes the final argument list and delegates to the host handle.
    ///
    /// Type arguments, implicit or explicit, go after the ordinary
    /// arguments, matching the order the translator emits parameters in.
    pub fn invoke(
        &self,
        receiver: &HostValue,
        arguments: &[HostValue],
    ) -> Result<HostValue, ReflectError> {
        let type_arguments = match &self.state {
            GenericState::Definition | GenericState::Open => {
                return Err(ReflectError::InvalidState(
                    "method still contains unresolved generic parameters",
                ));
            }
            GenericState::Plain => None,
            GenericState::CombineImplicit(cell) => {
                Some(cell.get_or_fill(|| self.declaring.type_arguments().clone()))
            }
            GenericState::Instantiated(bound) => Some(bound.clone()),
        };

        let mut composed = arguments.to_vec();
        if let Some(type_arguments) = &type_arguments {
            composed.extend(type_arguments.iter().cloned().map(HostValue::Type));
        }

        let expected = self.host.parameter_count();
        if composed.len() != expected {
            return Err(ReflectError::ArityMismatch {
                expected,
                actual: composed.len(),
            });
        }

        trace!(method = &*self.original_name, arity = composed.len(), "dispatching to host");
        Ok(self.host.invoke(receiver, &composed)?)
    }

    pub fn name(&self) -> &str {
        &self.logical_name
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn declaring_type(&self) -> &Arc<RuntimeType> {
        &self.declaring
    }

    pub fn host(&self) -> &Arc<dyn HostMethod> {
        &self.host
    }

    pub fn generic_state(&self) -> &GenericState {
        &self.state
    }

    pub fn is_generic_method(&self) -> bool {
        matches!(
            self.state,
            GenericState::Definition | GenericState::Instantiated(_)
        )
    }

    pub fn is_generic_method_definition(&self) -> bool {
        matches!(self.state, GenericState::Definition)
    }

    pub fn contains_generic_parameters(&self) -> bool {
        matches!(self.state, GenericState::Definition | GenericState::Open)
    }

    /// Type arguments observed so far; for the implicit-combination case
    /// this stays `None` until the first invocation fills the cell.
    pub fn type_arguments(&self) -> Option<Arc<[TypeHandle]>> {
        match &self.state {
            GenericState::Instantiated(bound) => Some(bound.clone()),
            GenericState::CombineImplicit(cell) => cell.get().cloned(),
            _ => None,
        }
    }
}

impl Debug for RuntimeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}::{} ({:?})",
            self.declaring.name(),
            self.logical_name,
            self.state
        )
    }
}

impl Display for RuntimeMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.logical_name)
    }
}
