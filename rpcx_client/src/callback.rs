use std::{any::Any, collections::HashMap, sync::Arc};

use rpcx_model::{CallbackHook, CallbackInstance, CallbackMethod, Error, MethodModel, Result};

struct CallbackTarget {
    instance: CallbackInstance,
    methods: HashMap<String, CallbackMethod>,
}

/// Named callback objects that method configs may point at with
/// `"<name>.<method>"`.
#[derive(Default)]
pub struct CallbackRegistry {
    targets: HashMap<String, CallbackTarget>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers `instance` under `name` together with the methods it declares.
    /// A later registration under the same name replaces the earlier one.
    pub fn register<T, I>(&mut self, name: &str, instance: Arc<T>, methods: I)
    where
        T: Any + Send + Sync,
        I: IntoIterator<Item = MethodModel>,
    {
        let instance: CallbackInstance = instance;
        let methods = methods
            .into_iter()
            .map(|m| (m.name().to_owned(), Arc::new(m)))
            .collect();
        self.targets.insert(
            name.to_owned(),
            CallbackTarget {
                instance,
                methods,
            },
        );
    }

    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }

    /// Resolves `"<name>.<method>"` to a complete hook.
    pub fn resolve(&self, reference: &str) -> Result<CallbackHook> {
        let (name, method) = match reference.trim().rsplit_once('.') {
            Some((name, method)) if !name.is_empty() && !method.is_empty() => (name, method),
            _ => {
                return Err(Error::invalid_argument(format!(
                    "callback `{}` must look like <name>.<method>",
                    reference
                )))
            }
        };

        let target = self.targets.get(name).ok_or_else(|| Error::UnknownCallback {
            callback: reference.to_owned(),
            reason: format!("no callback registered as `{}`", name),
        })?;
        let method = target
            .methods
            .get(method)
            .ok_or_else(|| Error::UnknownCallback {
                callback: reference.to_owned(),
                reason: format!("`{}` declares no method `{}`", name, method),
            })?;

        Ok(CallbackHook::new(target.instance.clone(), method.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpcx_model::ErrorKind;

    struct Notify;

    fn registry() -> CallbackRegistry {
        let mut registry = CallbackRegistry::new();
        registry.register(
            "notify",
            Arc::new(Notify),
            vec![
                MethodModel::new("onReturn", "Notify").with_parameter("String"),
                MethodModel::new("onThrow", "Notify").with_parameter("Error"),
            ],
        );
        registry
    }

    #[test]
    fn resolves_instance_and_method() {
        let registry = registry();
        assert!(registry.contains("notify"));

        let hook = registry.resolve("notify.onReturn").unwrap();
        assert!(hook.is_complete());
        assert!(hook.instance.unwrap().is::<Notify>());
        assert_eq!("onReturn", hook.method.unwrap().name());
    }

    #[test]
    fn same_target_shares_references() {
        let registry = registry();
        let a = registry.resolve("notify.onReturn").unwrap();
        let b = registry.resolve("notify.onReturn").unwrap();
        assert!(Arc::ptr_eq(&a.method.unwrap(), &b.method.unwrap()));
        assert!(Arc::ptr_eq(&a.instance.unwrap(), &b.instance.unwrap()));
    }

    #[test]
    fn unresolvable_references() {
        let registry = registry();

        for malformed in &["notify", ".onReturn", "notify.", ""] {
            let err = registry.resolve(malformed).unwrap_err();
            assert_eq!(ErrorKind::InvalidArgument, err.kind(), "{}", malformed);
        }

        let err = registry.resolve("audit.onReturn").unwrap_err();
        assert_eq!(ErrorKind::UnknownCallback, err.kind());

        let err = registry.resolve("notify.onInvoke").unwrap_err();
        assert_eq!(ErrorKind::UnknownCallback, err.kind());
        assert!(err.to_string().contains("onInvoke"));
    }
}
