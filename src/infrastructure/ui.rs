use crate::domain::ports::{UiContext, UiContextProvider};
use std::sync::Mutex;

/// Provider whose foreground surface can be attached and detached at
/// runtime, standing in for the host platform's surface lifecycle.
#[derive(Default)]
pub struct SwitchableUiContext {
    current: Mutex<Option<UiContext>>,
}

impl SwitchableUiContext {
    /// Starts with no surface attached.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Starts with the named surface already in the foreground.
    pub fn foreground(surface: impl Into<String>) -> Self {
        let provider = Self::default();
        provider.attach(UiContext::new(surface));
        provider
    }

    pub fn attach(&self, context: UiContext) {
        *self.current.lock().expect("ui context lock poisoned") = Some(context);
    }

    pub fn detach(&self) {
        *self.current.lock().expect("ui context lock poisoned") = None;
    }
}

impl UiContextProvider for SwitchableUiContext {
    fn current(&self) -> Option<UiContext> {
        self.current.lock().expect("ui context lock poisoned").clone()
    }
}
