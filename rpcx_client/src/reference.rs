use std::{collections::HashSet, sync::Arc};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::debug;

use rpcx_model::{
    service_key, AsyncMethodInfo, Attributes, ConsumerModel, Error, HookPoint, ProxyObject,
    Result, ServiceInterface, ServiceModel,
};

use crate::CallbackRegistry;

/// Method-level settings of a reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodConfig {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oninvoke: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onreturn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onthrow: Option<String>,
}

impl MethodConfig {
    pub fn hook(&self, point: HookPoint) -> Option<&str> {
        match point {
            HookPoint::OnInvoke => self.oninvoke.as_deref(),
            HookPoint::OnReturn => self.onreturn.as_deref(),
            HookPoint::OnThrow => self.onthrow.as_deref(),
        }
    }

    pub fn has_callbacks(&self) -> bool {
        HookPoint::iter().any(|p| self.hook(p).is_some())
    }
}

/// Settings of one client reference, usually read from a config file.
///
/// ```json
/// {
///   "interface": "demo.Greeter",
///   "group": "canary",
///   "version": "1.0.0",
///   "methods": [{ "name": "sayHello", "onreturn": "notify.onReturn" }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub interface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub methods: Vec<MethodConfig>,
}

impl ReferenceConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Fails when the interface name is blank.
    pub fn service_key(&self) -> Result<String> {
        if self.interface.trim().is_empty() {
            return Err(Error::invalid_argument("reference interface can't be blank"));
        }
        Ok(service_key(
            self.group.as_deref(),
            &self.interface,
            self.version.as_deref(),
        ))
    }

    /// One async-method attribute per method that names at least one callback.
    pub fn attributes(&self, registry: &CallbackRegistry) -> Result<Attributes> {
        let mut seen = HashSet::new();
        let mut attributes = Attributes::new();

        for method in &self.methods {
            if !seen.insert(method.name.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "method `{}` is configured more than once",
                    method.name
                )));
            }
            if !method.has_callbacks() {
                continue;
            }

            let info = AsyncMethodInfo::new();
            for point in HookPoint::iter() {
                if let Some(reference) = method.hook(point) {
                    info.set_hook(point, registry.resolve(reference)?);
                    debug!(method = %method.name, %point, callback = reference, "callback wired");
                }
            }
            attributes.insert(method.name.clone(), Arc::new(info).into());
        }

        Ok(attributes)
    }

    pub fn build(
        &self,
        interface: ServiceInterface,
        proxy_object: ProxyObject,
        service_model: Arc<dyn ServiceModel>,
        registry: &CallbackRegistry,
    ) -> Result<ConsumerModel> {
        let service_key = self.service_key()?;
        ConsumerModel::builder()
            .service_key(service_key)
            .interface(interface)
            .proxy_object(proxy_object)
            .service_model(service_model)
            .attributes(self.attributes(registry)?)
            .build()
    }
}
