use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use crate::domain::ports::ToastSurface;
use crate::domain::toast::{ToastPayload, ToastVariant};

// Forwards toasts to whichever surface registered last.
#[derive(Default)]
pub struct Toaster {
    surface: RwLock<Option<Arc<dyn ToastSurface>>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, surface: Arc<dyn ToastSurface>) {
        *self.surface.write().unwrap_or_else(PoisonError::into_inner) = Some(surface);
    }

    pub fn unregister(&self) {
        *self.surface.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn current(&self) -> Option<Arc<dyn ToastSurface>> {
        self.surface
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the surface-assigned id, or `None` when nothing is registered.
    pub fn show_toast(&self, payload: ToastPayload) -> Option<String> {
        let Some(surface) = self.current() else {
            tracing::warn!(
                title = payload.title.as_deref().unwrap_or_default(),
                "toast surface not registered, dropping toast"
            );
            return None;
        };
        Some(surface.add_toast(payload))
    }

    pub fn dismiss(&self, id: &str) {
        if let Some(surface) = self.current() {
            surface.remove_toast(id);
        }
    }

    pub fn success(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        duration: Option<Duration>,
    ) -> Option<String> {
        self.variant(ToastVariant::Success, title.into(), description, duration)
    }

    pub fn error(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        duration: Option<Duration>,
    ) -> Option<String> {
        self.variant(ToastVariant::Error, title.into(), description, duration)
    }

    pub fn warning(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        duration: Option<Duration>,
    ) -> Option<String> {
        self.variant(ToastVariant::Warning, title.into(), description, duration)
    }

    pub fn info(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        duration: Option<Duration>,
    ) -> Option<String> {
        self.variant(ToastVariant::Default, title.into(), description, duration)
    }

    fn variant(
        &self,
        variant: ToastVariant,
        title: String,
        description: Option<String>,
        duration: Option<Duration>,
    ) -> Option<String> {
        self.show_toast(ToastPayload {
            variant: Some(variant),
            title: Some(title),
            description,
            duration,
        })
    }
}
