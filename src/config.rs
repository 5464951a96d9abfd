//! Layout configuration
//!
//! Defaults match the server-side generator (250 x 150). A YAML file may
//! override any field:
//!
//! ```yaml
//! spacing:
//!   horizontal: 280
//!   vertical: 180
//! ```

use crate::error::{FamgraphError, FamgraphResult};
use famgraph_layout::Spacing;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingConfig {
    /// Distance between neighbours in a row
    pub horizontal: f64,
    /// Distance between generation rows
    pub vertical: f64,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        let spacing = Spacing::default();
        Self {
            horizontal: spacing.horizontal,
            vertical: spacing.vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub spacing: SpacingConfig,
}

impl LayoutConfig {
    pub fn from_yaml_str(yaml: &str) -> FamgraphResult<Self> {
        let config: LayoutConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> FamgraphResult<Self> {
        let path = path.as_ref();
        debug!("Loading layout config from {:?}", path);
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Override spacing values that were given explicitly
    pub fn with_spacing(mut self, horizontal: Option<f64>, vertical: Option<f64>) -> FamgraphResult<Self> {
        if let Some(h) = horizontal {
            self.spacing.horizontal = h;
        }
        if let Some(v) = vertical {
            self.spacing.vertical = v;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> FamgraphResult<()> {
        let SpacingConfig { horizontal, vertical } = self.spacing;
        for (name, value) in [("horizontal", horizontal), ("vertical", vertical)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FamgraphError::InvalidConfig(format!(
                    "{} spacing must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    pub fn spacing(&self) -> Spacing {
        Spacing::new(self.spacing.horizontal, self.spacing.vertical)
    }
}
