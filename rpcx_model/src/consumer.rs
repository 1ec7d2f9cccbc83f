use std::{
    any::Any,
    collections::{HashMap, HashSet},
    fmt,
    sync::Arc,
};

use tracing::{debug, warn};

use crate::{
    AsyncMethodInfo, Attribute, Attributes, Error, MethodModel, Result, ServiceInterface,
    ServiceModel,
};

/// Generated client stub the caller invokes methods on.
pub type ProxyObject = Arc<dyn Any + Send + Sync>;

/// Runtime view of one client reference: its service key, proxy and
/// method-level async callback configuration.
///
/// All state is fixed once [`ConsumerModelBuilder::build`] returns, so a
/// model can be shared behind an `Arc` and read from any number of
/// invocation threads.
pub struct ConsumerModel {
    service_key: String,
    proxy_object: ProxyObject,
    service_model: Arc<dyn ServiceModel>,
    method_configs: HashMap<String, Arc<AsyncMethodInfo>>,
}

impl ConsumerModel {
    /// Fails with [`Error::InvalidArgument`] on a blank key and with
    /// [`Error::TypeMismatch`] if an attribute is not an async method config.
    pub fn new<K: Into<String>>(
        service_key: K,
        interface: ServiceInterface,
        proxy_object: ProxyObject,
        service_model: Arc<dyn ServiceModel>,
        attributes: Attributes,
    ) -> Result<Self> {
        ConsumerModel::builder()
            .service_key(service_key)
            .interface(interface)
            .proxy_object(proxy_object)
            .service_model(service_model)
            .attributes(attributes)
            .build()
    }

    pub fn builder() -> ConsumerModelBuilder {
        Default::default()
    }

    pub fn proxy_object(&self) -> &ProxyObject {
        &self.proxy_object
    }

    /// The proxy as its concrete type, if it is a `T`.
    pub fn proxy<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.proxy_object.clone().downcast::<T>().ok()
    }

    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    /// Hooks configured for `method`; `None` means no callbacks.
    pub fn method_config(&self, method: &str) -> Option<&Arc<AsyncMethodInfo>> {
        self.method_configs.get(method)
    }

    pub fn method_configs(&self) -> impl Iterator<Item = (&str, &Arc<AsyncMethodInfo>)> {
        self.method_configs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn all_methods(&self) -> &HashSet<MethodModel> {
        self.service_model.all_methods()
    }

    pub fn service_interface(&self) -> ServiceInterface {
        self.service_model.service_interface()
    }

    pub fn service_model(&self) -> &Arc<dyn ServiceModel> {
        &self.service_model
    }
}

impl fmt::Debug for ConsumerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumerModel")
            .field("service_key", &self.service_key)
            .field("interface", &self.service_model.service_interface())
            .field("methods", &self.method_configs.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Collects the inputs of a [`ConsumerModel`]; nothing is checked until
/// [`build`](Self::build).
#[derive(Default)]
pub struct ConsumerModelBuilder {
    service_key: Option<String>,
    interface: Option<ServiceInterface>,
    proxy_object: Option<ProxyObject>,
    service_model: Option<Arc<dyn ServiceModel>>,
    attributes: Attributes,
}

impl ConsumerModelBuilder {
    pub fn service_key<K: Into<String>>(mut self, key: K) -> Self {
        self.service_key = Some(key.into());
        self
    }

    pub fn interface(mut self, interface: ServiceInterface) -> Self {
        self.interface = Some(interface);
        self
    }

    pub fn proxy_object(mut self, proxy: ProxyObject) -> Self {
        self.proxy_object = Some(proxy);
        self
    }

    pub fn service_model(mut self, model: Arc<dyn ServiceModel>) -> Self {
        self.service_model = Some(model);
        self
    }

    pub fn attribute<M: Into<String>, A: Into<Attribute>>(mut self, method: M, value: A) -> Self {
        self.attributes.insert(method.into(), value.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes.extend(attributes);
        self
    }

    pub fn build(self) -> Result<ConsumerModel> {
        let key = self.service_key.clone().unwrap_or_default();
        match self.try_build() {
            Ok(model) => {
                debug!(
                    service_key = %model.service_key,
                    methods = model.method_configs.len(),
                    "consumer model built"
                );
                Ok(model)
            }
            Err(err) => {
                warn!(service_key = %key, error = %err, "consumer model rejected");
                Err(err)
            }
        }
    }

    fn try_build(self) -> Result<ConsumerModel> {
        let service_key = self
            .service_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::invalid_argument("service key can't be blank"))?;
        let interface = self
            .interface
            .ok_or_else(|| Error::invalid_argument("service interface can't be absent"))?;
        let proxy_object = self
            .proxy_object
            .ok_or_else(|| Error::invalid_argument("proxy object can't be absent"))?;
        let service_model = self
            .service_model
            .ok_or_else(|| Error::invalid_argument("service model can't be absent"))?;

        if service_model.service_interface() != interface {
            warn!(
                service_key = %service_key,
                reference = %interface,
                service = %service_model.service_interface(),
                "reference interface differs from service model"
            );
        }

        let mut method_configs = HashMap::with_capacity(self.attributes.len());
        for (method, value) in self.attributes {
            let info = value.into_async_method(&method)?;
            method_configs.insert(method, info);
        }

        Ok(ConsumerModel {
            service_key,
            proxy_object,
            service_model,
            method_configs,
        })
    }
}
