use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque host handle passed through `set_up`.
///
/// The core never looks inside; a backend may downcast it to whatever its host
/// binding stored (an application context, a window, an asset loader).
#[derive(Clone, Default)]
pub struct HostContext {
    inner: Option<Arc<dyn Any + Send + Sync>>,
}

impl HostContext {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Some(Arc::new(value)),
        }
    }

    /// A handle carrying nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.as_deref()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(_) => f.write_str("HostContext(..)"),
            None => f.write_str("HostContext(empty)"),
        }
    }
}
