use dotnet_bridge::{HostClass, HostError, HostMethod, HostValue, ParameterKind, TypeHandle};
use std::sync::{Arc, Mutex};

/// A scripted host method. Records every invocation and answers with the
/// composed argument count, so tests can observe exactly what reached the
/// host call boundary.
pub struct FakeMethod {
    name: String,
    is_static: bool,
    is_public: bool,
    parameters: Vec<ParameterKind>,
    failure: Option<String>,
    calls: Mutex<Vec<(HostValue, Vec<HostValue>)>>,
}

impl FakeMethod {
    fn build(
        name: &str,
        is_static: bool,
        is_public: bool,
        parameters: Vec<ParameterKind>,
        failure: Option<String>,
    ) -> Arc<Self> {
        Arc::new(FakeMethod {
            name: name.to_string(),
            is_static,
            is_public,
            parameters,
            failure,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn public_static(name: &str, parameters: Vec<ParameterKind>) -> Arc<Self> {
        Self::build(name, true, true, parameters, None)
    }

    pub fn public_instance(name: &str, parameters: Vec<ParameterKind>) -> Arc<Self> {
        Self::build(name, false, true, parameters, None)
    }

    pub fn non_public_static(name: &str, parameters: Vec<ParameterKind>) -> Arc<Self> {
        Self::build(name, true, false, parameters, None)
    }

    pub fn failing_static(name: &str, parameters: Vec<ParameterKind>, message: &str) -> Arc<Self> {
        Self::build(name, true, true, parameters, Some(message.to_string()))
    }

    pub fn recorded_calls(&self) -> Vec<(HostValue, Vec<HostValue>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl HostMethod for FakeMethod {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_static(&self) -> bool {
        self.is_static
    }

    fn is_public(&self) -> bool {
        self.is_public
    }

    fn parameter_kinds(&self) -> Vec<ParameterKind> {
        self.parameters.clone()
    }

    fn invoke(
        &self,
        receiver: &HostValue,
        arguments: &[HostValue],
    ) -> Result<HostValue, HostError> {
        self.calls
            .lock()
            .unwrap()
            .push((receiver.clone(), arguments.to_vec()));
        match &self.failure {
            Some(message) => Err(HostError(message.clone())),
            None => Ok(HostValue::Int32(arguments.len() as i32)),
        }
    }
}

pub struct FakeClass {
    name: String,
    methods: Vec<Arc<dyn HostMethod>>,
}

impl FakeClass {
    pub fn new(name: &str, methods: Vec<Arc<dyn HostMethod>>) -> Arc<Self> {
        Arc::new(FakeClass {
            name: name.to_string(),
            methods,
        })
    }
}

impl HostClass for FakeClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn declared_methods(&self) -> Vec<Arc<dyn HostMethod>> {
        self.methods.clone()
    }
}

/// A concrete type backed by an empty fake class.
pub fn concrete(name: &str) -> TypeHandle {
    TypeHandle::concrete(FakeClass::new(name, vec![]))
}
