use std::{
    any::{type_name, TypeId},
    collections::HashSet,
    fmt,
};

/// Type descriptor of a service interface.
///
/// Rust has no runtime class objects, so an interface is identified by the
/// `TypeId` of the trait object (or type) the proxy implements.
#[derive(Copy, Clone)]
pub struct ServiceInterface {
    name: &'static str,
    type_id: TypeId,
}

impl ServiceInterface {
    pub fn of<T: ?Sized + 'static>() -> Self {
        ServiceInterface {
            name: type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl PartialEq for ServiceInterface {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ServiceInterface {}

impl fmt::Debug for ServiceInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceInterface").field(&self.name).finish()
    }
}

impl fmt::Display for ServiceInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Signature of a single method, either of a service interface or of a
/// callback target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodModel {
    name: String,
    declaring_type: String,
    parameter_types: Vec<String>,
    return_type: Option<String>,
}

impl MethodModel {
    pub fn new<N, D>(name: N, declaring_type: D) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        MethodModel {
            name: name.into(),
            declaring_type: declaring_type.into(),
            parameter_types: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_parameter<S: Into<String>>(mut self, ty: S) -> Self {
        self.parameter_types.push(ty.into());
        self
    }

    pub fn returning<S: Into<String>>(mut self, ty: S) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn parameter_types(&self) -> &[String] {
        &self.parameter_types
    }

    /// `None` for methods returning unit.
    pub fn return_type(&self) -> Option<&str> {
        self.return_type.as_deref()
    }

    pub fn matches(&self, name: &str, parameter_types: &[&str]) -> bool {
        self.name == name
            && self.parameter_types.len() == parameter_types.len()
            && self
                .parameter_types
                .iter()
                .zip(parameter_types)
                .all(|(a, b)| a == b)
    }
}

/// Method and interface metadata of a service, shared by every reference to it.
pub trait ServiceModel: Send + Sync {
    fn all_methods(&self) -> &HashSet<MethodModel>;
    fn service_interface(&self) -> ServiceInterface;
}

/// Plain [`ServiceModel`] built from an explicit method list.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    interface: ServiceInterface,
    methods: HashSet<MethodModel>,
}

impl ServiceDescriptor {
    pub fn new(interface: ServiceInterface) -> Self {
        ServiceDescriptor {
            interface,
            methods: HashSet::new(),
        }
    }

    pub fn with_method(mut self, method: MethodModel) -> Self {
        self.methods.insert(method);
        self
    }

    /// All overloads sharing `name`.
    pub fn methods(&self, name: &str) -> Vec<&MethodModel> {
        self.methods.iter().filter(|m| m.name == name).collect()
    }

    pub fn method(&self, name: &str, parameter_types: &[&str]) -> Option<&MethodModel> {
        self.methods.iter().find(|m| m.matches(name, parameter_types))
    }
}

impl ServiceModel for ServiceDescriptor {
    fn all_methods(&self) -> &HashSet<MethodModel> {
        &self.methods
    }

    fn service_interface(&self) -> ServiceInterface {
        self.interface
    }
}

/// Renders `group/interface:version`, leaving out blank group and version.
pub fn service_key(group: Option<&str>, interface: &str, version: Option<&str>) -> String {
    let mut key = String::with_capacity(interface.len() + 16);
    if let Some(group) = group.filter(|g| !g.trim().is_empty()) {
        key.push_str(group);
        key.push('/');
    }
    key.push_str(interface);
    if let Some(version) = version.filter(|v| !v.trim().is_empty()) {
        key.push(':');
        key.push_str(version);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter {}

    fn greeter() -> ServiceDescriptor {
        ServiceDescriptor::new(ServiceInterface::of::<dyn Greeter>())
            .with_method(
                MethodModel::new("sayHello", "Greeter")
                    .with_parameter("String")
                    .returning("String"),
            )
            .with_method(
                MethodModel::new("sayHello", "Greeter")
                    .with_parameter("String")
                    .with_parameter("u32")
                    .returning("String"),
            )
            .with_method(MethodModel::new("ping", "Greeter"))
    }

    #[test]
    fn interface_identity() {
        let a = ServiceInterface::of::<dyn Greeter>();
        let b = ServiceInterface::of::<dyn Greeter>();
        assert_eq!(a, b);
        assert!(a.is::<dyn Greeter>());
        assert!(!a.is::<String>());
        assert!(a.name().contains("Greeter"));
    }

    #[test]
    fn overloads_are_resolved_by_parameters() {
        let d = greeter();
        assert_eq!(3, d.all_methods().len());
        assert_eq!(2, d.methods("sayHello").len());

        let m = d.method("sayHello", &["String", "u32"]).unwrap();
        assert_eq!(2, m.parameter_types().len());
        assert_eq!(Some("String"), m.return_type());

        assert!(d.method("sayHello", &["u32"]).is_none());
        assert_eq!(None, d.method("ping", &[]).unwrap().return_type());
    }

    #[test]
    fn service_key_omits_blank_parts() {
        assert_eq!("demo.Greeter", service_key(None, "demo.Greeter", None));
        assert_eq!(
            "g1/demo.Greeter:1.0.0",
            service_key(Some("g1"), "demo.Greeter", Some("1.0.0"))
        );
        assert_eq!(
            "demo.Greeter:2",
            service_key(Some(" "), "demo.Greeter", Some("2"))
        );
        assert_eq!("g1/demo.Greeter", service_key(Some("g1"), "demo.Greeter", Some("")));
    }
}
