//! Member lookup over the host reflection surface.
//!
//! The host identifies overloads purely by (possibly marker-suffixed)
//! names, so candidates are matched by demangled logical name: the first
//! declared method that survives the binding filter and matches wins.

use crate::{
    demangle,
    error::ReflectError,
    host::HostMethod,
    types::{members::RuntimeMethod, RuntimeType},
};
use bitflags::bitflags;
use std::sync::Arc;
use tracing::trace;

bitflags! {
    /// Member filter applied during lookup, mirroring the source
    /// language's binding-flag model. A method is admitted when both its
    /// visibility flag and its dispatch flag are present.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Binding: u8 {
        const PUBLIC = 1 << 0;
        const NON_PUBLIC = 1 << 1;
        const INSTANCE = 1 << 2;
        const STATIC = 1 << 3;
    }
}

impl Binding {
    fn admits(self, method: &dyn HostMethod) -> bool {
        let visibility = if method.is_public() {
            Binding::PUBLIC
        } else {
            Binding::NON_PUBLIC
        };
        let dispatch = if method.is_static() {
            Binding::STATIC
        } else {
            Binding::INSTANCE
        };
        self.contains(visibility) && self.contains(dispatch)
    }
}

/// Lookup entry points on a shared declaring type.
pub trait TypeLookupExt {
    /// First declared method whose logical name matches `name` under
    /// `binding`, classified. Results are cached per name and binding.
    fn get_method(
        &self,
        name: &str,
        binding: Binding,
    ) -> Result<Option<Arc<RuntimeMethod>>, ReflectError>;
}

impl TypeLookupExt for Arc<RuntimeType> {
    fn get_method(
        &self,
        name: &str,
        binding: Binding,
    ) -> Result<Option<Arc<RuntimeMethod>>, ReflectError> {
        find_method(self, name, binding)
    }
}

/// Finds the first declared method of `declaring` whose logical name
/// matches `name` under `binding`, classifying it on the way out.
///
/// No match is `Ok(None)`; a classification failure on the matched
/// candidate propagates. Successful results are cached on the declaring
/// type, so repeated lookups share one `RuntimeMethod`.
pub fn find_method(
    declaring: &Arc<RuntimeType>,
    name: &str,
    binding: Binding,
) -> Result<Option<Arc<RuntimeMethod>>, ReflectError> {
    let key = (Arc::<str>::from(name), binding);
    if let Some(found) = declaring.method_cache().get(&key) {
        return Ok(Some(Arc::clone(found.value())));
    }

    for host in declaring.class().declared_methods() {
        if !binding.admits(host.as_ref()) {
            continue;
        }
        if demangle::logical_name(host.name()) != name {
            continue;
        }

        trace!(
            class = declaring.name(),
            method = host.name(),
            "matched host method"
        );
        let method = Arc::new(RuntimeMethod::classify(host, declaring.clone())?);
        declaring.method_cache().insert(key, method.clone());
        return Ok(Some(method));
    }

    Ok(None)
}
