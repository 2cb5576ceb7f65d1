use crate::{
    error::{PipelineError, PipelineResult},
    view::ViewDescriptor,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The set of dashboard views available to the runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub views: Vec<ViewDescriptor>,
}

impl DashboardConfig {
    /// Load a view configuration file (JSON).
    /// Without one, use DashboardConfig::builtin().
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config = Self::from_json(&content)?;
        log::info!("Loaded {} views from {}", config.views.len(), path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> PipelineResult<Self> {
        let config: DashboardConfig = serde_json::from_str(content)?;
        if let Some(dup) = config.duplicate_name() {
            return Err(anyhow::anyhow!("View '{dup}' is defined more than once").into());
        }
        Ok(config)
    }

    /// The screens the original dashboard shipped with.
    pub fn builtin() -> Self {
        Self {
            views: vec![
                ViewDescriptor::overview(),
                ViewDescriptor::demographics(),
                ViewDescriptor::motivations(),
                ViewDescriptor::timeline(),
                ViewDescriptor::full(),
            ],
        }
    }

    pub fn view(&self, name: &str) -> PipelineResult<&ViewDescriptor> {
        self.views
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| PipelineError::UnknownView { name: name.to_string() })
    }

    pub fn view_names(&self) -> Vec<&str> {
        self.views.iter().map(|v| v.name.as_str()).collect()
    }

    fn duplicate_name(&self) -> Option<&str> {
        self.views.iter().enumerate().find_map(|(i, v)| {
            self.views[..i]
                .iter()
                .any(|earlier| earlier.name == v.name)
                .then_some(v.name.as_str())
        })
    }
}

impl Default for DashboardConfig {
    fn default() -> Self { Self::builtin() }
}
