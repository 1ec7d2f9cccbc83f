use std::{any::Any, collections::HashMap, sync::Arc};

use strum_macros::IntoStaticStr;

use crate::{AsyncMethodInfo, Error};

/// A method-level configuration value as produced by the configuration layer.
#[derive(Debug, Clone, IntoStaticStr)]
pub enum Attribute {
    AsyncMethod(Arc<AsyncMethodInfo>),
    Text(String),
    Flag(bool),
    Opaque(Arc<dyn Any + Send + Sync>),
}

/// Method name to configuration value.
pub type Attributes = HashMap<String, Attribute>;

impl Attribute {
    pub fn kind(&self) -> &'static str {
        self.into()
    }

    /// Interprets the value configured for `method` as callback hooks.
    pub fn into_async_method(self, method: &str) -> Result<Arc<AsyncMethodInfo>, Error> {
        match self {
            Attribute::AsyncMethod(info) => Ok(info),
            other => Err(Error::TypeMismatch {
                method: method.to_owned(),
                expected: "AsyncMethod",
                found: other.kind(),
            }),
        }
    }
}

impl From<Arc<AsyncMethodInfo>> for Attribute {
    fn from(info: Arc<AsyncMethodInfo>) -> Self {
        Attribute::AsyncMethod(info)
    }
}

impl From<AsyncMethodInfo> for Attribute {
    fn from(info: AsyncMethodInfo) -> Self {
        Attribute::AsyncMethod(Arc::new(info))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn async_method_passes_through() {
        let info = Arc::new(AsyncMethodInfo::new());
        let got = Attribute::from(info.clone()).into_async_method("sayHello").unwrap();
        assert!(Arc::ptr_eq(&info, &got));
    }

    #[test]
    fn other_kinds_are_rejected_by_name() {
        let err = Attribute::Text("timeout=3000".to_owned())
            .into_async_method("sayHello")
            .unwrap_err();
        assert_eq!(ErrorKind::TypeMismatch, err.kind());
        match err {
            Error::TypeMismatch { method, found, .. } => {
                assert_eq!("sayHello", method);
                assert_eq!("Text", found);
            }
            other => panic!("unexpected error: {}", other),
        }

        let err = Attribute::Opaque(Arc::new(7u8))
            .into_async_method("ping")
            .unwrap_err();
        assert!(err.to_string().contains("Opaque"));
        assert_eq!("Flag", Attribute::Flag(true).kind());
    }
}
