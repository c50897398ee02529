//! Tunable viewport limits, loadable from RON.

use crate::constants::{PAN_STEP, VISIBILITY_TOLERANCE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Zoom limits, step sizes and visibility tolerance for a viewport.
///
/// Every field is optional in RON; missing fields take their reference value:
///
/// ```ron
/// (max_zoom: 8.0, pan_step: 10.0)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Lowest zoom; also the zoom a reset returns to. Must be at least 1.
    pub min_zoom: f64,
    /// Highest zoom.
    pub max_zoom: f64,
    /// Zoom change per zoom-in/zoom-out.
    pub zoom_step: f64,
    /// Pan change per directional command.
    pub pan_step: f64,
    /// Band outside the nominal viewport still counted as visible.
    pub tolerance: f64,
}

impl ViewportConfig {
    /// The reference behaviour: zoom 1..=4 in 0.5 steps, 20 unit pans, 5 unit tolerance.
    pub const REFERENCE: Self = Self {
        min_zoom: ZOOM_MIN,
        max_zoom: ZOOM_MAX,
        zoom_step: ZOOM_STEP,
        pan_step: PAN_STEP,
        tolerance: VISIBILITY_TOLERANCE,
    };

    /// Checks that the values describe a usable viewport.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("min_zoom", self.min_zoom),
            ("max_zoom", self.max_zoom),
            ("zoom_step", self.zoom_step),
            ("pan_step", self.pan_step),
            ("tolerance", self.tolerance),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.min_zoom < ZOOM_MIN {
            return Err(ConfigError::Invalid(format!(
                "min_zoom must be at least {ZOOM_MIN}, got {}",
                self.min_zoom
            )));
        }
        if self.max_zoom < self.min_zoom {
            return Err(ConfigError::Invalid(format!(
                "max_zoom ({}) is below min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if self.zoom_step <= 0.0 {
            return Err(ConfigError::Invalid("zoom_step must be positive".to_owned()));
        }
        if self.pan_step <= 0.0 {
            return Err(ConfigError::Invalid("pan_step must be positive".to_owned()));
        }
        if self.tolerance < 0.0 {
            return Err(ConfigError::Invalid(
                "tolerance must not be negative".to_owned(),
            ));
        }

        Ok(())
    }

    /// Parses and validates a config from RON text.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a RON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron_str(&source)?;
        log::info!("Loaded viewport config from {}", path.display());
        Ok(config)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self::REFERENCE
    }
}
