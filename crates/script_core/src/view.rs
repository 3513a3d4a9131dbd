//! Presentation seam. The controller only calls hooks a binding declares in
//! [`ViewCapabilities`]; everything else about rendering stays outside the core.

use shared::{error::ErrorReport, protocol::SessionSnapshot};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCapabilities {
    /// Step panels and the step indicator.
    pub steps: bool,
    pub loading: bool,
    pub errors: bool,
    /// Preview pane with script counter and prev/next buttons.
    pub preview: bool,
}

impl ViewCapabilities {
    pub const ALL: Self = Self {
        steps: true,
        loading: true,
        errors: true,
        preview: true,
    };
}

pub trait ViewBinding: Send {
    fn capabilities(&self) -> ViewCapabilities;

    fn show_step(&mut self, _snapshot: &SessionSnapshot) {}

    fn set_loading(&mut self, _loading: bool) {}

    fn show_error(&mut self, _error: &ErrorReport) {}

    fn show_preview(&mut self, _snapshot: &SessionSnapshot) {}
}

/// Binding for headless use; declares no capabilities.
#[derive(Debug, Default)]
pub struct DetachedView;

impl ViewBinding for DetachedView {
    fn capabilities(&self) -> ViewCapabilities {
        ViewCapabilities::default()
    }
}

pub(crate) struct ViewHandle {
    binding: Box<dyn ViewBinding>,
    capabilities: ViewCapabilities,
}

impl ViewHandle {
    pub(crate) fn new(binding: Box<dyn ViewBinding>) -> Self {
        let capabilities = binding.capabilities();
        Self {
            binding,
            capabilities,
        }
    }

    pub(crate) fn step(&mut self, snapshot: &SessionSnapshot) {
        if self.capabilities.steps {
            self.binding.show_step(snapshot);
        }
    }

    pub(crate) fn loading(&mut self, loading: bool) {
        if self.capabilities.loading {
            self.binding.set_loading(loading);
        }
    }

    pub(crate) fn error(&mut self, error: &ErrorReport) {
        if self.capabilities.errors {
            self.binding.show_error(error);
        }
    }

    pub(crate) fn preview(&mut self, snapshot: &SessionSnapshot) {
        if self.capabilities.preview {
            self.binding.show_preview(snapshot);
        }
    }
}
