use crate::model::config::Settings;

/// What the host hands a function during `on_load`.
#[derive(Debug, Clone, Default)]
pub struct ServerContext {
    settings: Settings,
}

impl ServerContext {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// All configuration available to functions.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
