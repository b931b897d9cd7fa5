//! Binding configuration.

/// How a [`ViewBinding`](super::ViewBinding) turns updates into view calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingConfig {
    /// Apply deltas incrementally. When false every update becomes a reload.
    pub incremental: bool,

    /// Reload instead of applying deltas that mix section and row changes.
    pub reload_on_unsafe: bool,
}

impl BindingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A configuration that reloads on every update.
    pub fn reload_only() -> Self {
        Self::default().with_incremental(false)
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = incremental;
        self
    }

    pub fn with_reload_on_unsafe(mut self, reload_on_unsafe: bool) -> Self {
        self.reload_on_unsafe = reload_on_unsafe;
        self
    }
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            incremental: true,
            reload_on_unsafe: true,
        }
    }
}
