use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::ConsumerModel;

/// Every live client reference of an application, by service key.
#[derive(Debug, Default)]
pub struct ConsumerRepository {
    consumers: RwLock<HashMap<String, Arc<ConsumerModel>>>,
}

impl ConsumerRepository {
    pub fn new() -> Self {
        Default::default()
    }

    /// Publishes `model` unless its key is already taken; returns whichever
    /// model ends up stored.
    pub fn register(&self, model: ConsumerModel) -> Arc<ConsumerModel> {
        let mut consumers = self.consumers.write();
        if let Some(existing) = consumers.get(model.service_key()) {
            debug!(service_key = model.service_key(), "consumer already registered");
            return existing.clone();
        }

        let key = model.service_key().to_owned();
        let model = Arc::new(model);
        consumers.insert(key, model.clone());
        debug!(service_key = model.service_key(), "consumer registered");
        model
    }

    pub fn lookup(&self, service_key: &str) -> Option<Arc<ConsumerModel>> {
        self.consumers.read().get(service_key).cloned()
    }

    pub fn consumers(&self) -> Vec<Arc<ConsumerModel>> {
        self.consumers.read().values().cloned().collect()
    }

    /// Drops the reference's model; callers still holding an `Arc` keep it alive.
    pub fn unregister(&self, service_key: &str) -> Option<Arc<ConsumerModel>> {
        let removed = self.consumers.write().remove(service_key);
        if removed.is_some() {
            debug!(service_key, "consumer unregistered");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.consumers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ServiceDescriptor, ServiceInterface};

    struct Proxy;

    fn model(key: &str) -> ConsumerModel {
        let interface = ServiceInterface::of::<Proxy>();
        ConsumerModel::builder()
            .service_key(key)
            .interface(interface)
            .proxy_object(Arc::new(Proxy))
            .service_model(Arc::new(ServiceDescriptor::new(interface)))
            .build()
            .unwrap()
    }

    #[test]
    fn register_keeps_the_first_model() {
        let repo = ConsumerRepository::new();
        assert!(repo.is_empty());

        let first = repo.register(model("a"));
        let second = repo.register(model("a"));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(1, repo.len());

        repo.register(model("b"));
        assert_eq!(2, repo.consumers().len());
    }

    #[test]
    fn unregister_releases_the_entry() {
        let repo = ConsumerRepository::new();
        let held = repo.register(model("a"));

        let removed = repo.unregister("a").unwrap();
        assert!(Arc::ptr_eq(&held, &removed));
        assert!(repo.lookup("a").is_none());
        assert!(repo.unregister("a").is_none());
        assert_eq!("a", held.service_key());
    }
}
