use std::{any::Any, sync::Arc};

use parking_lot::RwLock;
use strum_macros::{Display, EnumIter, EnumString};

use crate::MethodModel;

/// Object a callback method is invoked on.
pub type CallbackInstance = Arc<dyn Any + Send + Sync>;

/// Method invoked on a [`CallbackInstance`].
pub type CallbackMethod = Arc<MethodModel>;

/// Moments of an asynchronous call at which a callback may fire.
#[derive(Debug, Copy, Clone, Display, PartialEq, Eq, Hash, EnumIter, EnumString)]
pub enum HookPoint {
    #[strum(to_string = "oninvoke")]
    OnInvoke,
    #[strum(to_string = "onreturn")]
    OnReturn,
    #[strum(to_string = "onthrow")]
    OnThrow,
}

/// An (instance, method) pair. Either half may be unset.
#[derive(Debug, Clone, Default)]
pub struct CallbackHook {
    pub instance: Option<CallbackInstance>,
    pub method: Option<CallbackMethod>,
}

impl CallbackHook {
    pub fn new(instance: CallbackInstance, method: CallbackMethod) -> Self {
        CallbackHook {
            instance: Some(instance),
            method: Some(method),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.instance.is_none() && self.method.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.instance.is_some() && self.method.is_some()
    }
}

/// All three hooks of one method, read or written together.
#[derive(Debug, Clone, Default)]
pub struct CallbackHooks {
    pub oninvoke: CallbackHook,
    pub onreturn: CallbackHook,
    pub onthrow: CallbackHook,
}

impl CallbackHooks {
    pub fn get(&self, point: HookPoint) -> &CallbackHook {
        match point {
            HookPoint::OnInvoke => &self.oninvoke,
            HookPoint::OnReturn => &self.onreturn,
            HookPoint::OnThrow => &self.onthrow,
        }
    }

    pub fn get_mut(&mut self, point: HookPoint) -> &mut CallbackHook {
        match point {
            HookPoint::OnInvoke => &mut self.oninvoke,
            HookPoint::OnReturn => &mut self.onreturn,
            HookPoint::OnThrow => &mut self.onthrow,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.oninvoke.is_empty() && self.onreturn.is_empty() && self.onthrow.is_empty()
    }
}

/// Callback hooks configured for one method of an asynchronous reference.
///
/// Every setter takes `&self` and replaces exactly one field; there is no
/// atomicity across fields. Finish wiring before the info, or the
/// [`ConsumerModel`](crate::ConsumerModel) holding it, is shared with
/// invocation threads, otherwise a reader may observe a half-configured
/// pair. Use [`snapshot`](Self::snapshot) to read all fields at once, or
/// [`replace`](Self::replace) to swap them in one step.
#[derive(Debug, Default)]
pub struct AsyncMethodInfo {
    hooks: RwLock<CallbackHooks>,
}

macro_rules! hook_accessors {
    ($($field:ident => $instance:ident, $set_instance:ident, $method:ident, $set_method:ident;)*) => {
        impl AsyncMethodInfo {
            $(
                pub fn $instance(&self) -> Option<CallbackInstance> {
                    self.hooks.read().$field.instance.clone()
                }

                pub fn $set_instance(&self, instance: CallbackInstance) {
                    self.hooks.write().$field.instance = Some(instance);
                }

                pub fn $method(&self) -> Option<CallbackMethod> {
                    self.hooks.read().$field.method.clone()
                }

                pub fn $set_method(&self, method: CallbackMethod) {
                    self.hooks.write().$field.method = Some(method);
                }
            )*
        }
    };
}

hook_accessors! {
    oninvoke => oninvoke_instance, set_oninvoke_instance, oninvoke_method, set_oninvoke_method;
    onreturn => onreturn_instance, set_onreturn_instance, onreturn_method, set_onreturn_method;
    onthrow => onthrow_instance, set_onthrow_instance, onthrow_method, set_onthrow_method;
}

impl AsyncMethodInfo {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn hook(&self, point: HookPoint) -> CallbackHook {
        self.hooks.read().get(point).clone()
    }

    pub fn set_hook(&self, point: HookPoint, hook: CallbackHook) {
        *self.hooks.write().get_mut(point) = hook;
    }

    pub fn clear(&self, point: HookPoint) {
        *self.hooks.write().get_mut(point) = CallbackHook::default();
    }

    pub fn snapshot(&self) -> CallbackHooks {
        self.hooks.read().clone()
    }

    /// Swaps in all six fields under one write lock and returns the old ones.
    pub fn replace(&self, hooks: CallbackHooks) -> CallbackHooks {
        std::mem::replace(&mut *self.hooks.write(), hooks)
    }

    /// True when no field is set, i.e. the method has no callbacks.
    pub fn is_empty(&self) -> bool {
        self.hooks.read().is_empty()
    }
}

impl From<CallbackHooks> for AsyncMethodInfo {
    fn from(hooks: CallbackHooks) -> Self {
        AsyncMethodInfo {
            hooks: RwLock::new(hooks),
        }
    }
}

impl Clone for AsyncMethodInfo {
    fn clone(&self) -> Self {
        self.snapshot().into()
    }
}
