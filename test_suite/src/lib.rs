//! Fixtures shared by the integration tests.

use std::sync::Arc;

use rpcx::*;

pub trait Greeter: Send + Sync {
    fn say_hello(&self, name: &str) -> String;
}

#[derive(Debug, Default)]
pub struct GreeterProxy;

impl Greeter for GreeterProxy {
    fn say_hello(&self, name: &str) -> String {
        format!("hello {}", name)
    }
}

#[derive(Debug, Default)]
pub struct Notify;

pub fn greeter_service() -> Arc<ServiceDescriptor> {
    Arc::new(
        ServiceDescriptor::new(ServiceInterface::of::<dyn Greeter>())
            .with_method(
                MethodModel::new("sayHello", "Greeter")
                    .with_parameter("String")
                    .returning("String"),
            )
            .with_method(MethodModel::new("ping", "Greeter")),
    )
}

pub fn notify_registry() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    registry.register(
        "notify",
        Arc::new(Notify),
        vec![
            MethodModel::new("onInvoke", "Notify").with_parameter("String"),
            MethodModel::new("onReturn", "Notify")
                .with_parameter("String")
                .with_parameter("String"),
            MethodModel::new("onThrow", "Notify").with_parameter("Error"),
        ],
    );
    registry
}

pub fn greeter_builder(key: &str) -> ConsumerModelBuilder {
    ConsumerModel::builder()
        .service_key(key)
        .interface(ServiceInterface::of::<dyn Greeter>())
        .proxy_object(Arc::new(GreeterProxy))
        .service_model(greeter_service())
}
