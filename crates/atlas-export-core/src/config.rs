use serde::{Deserialize, Serialize};

/// Configuration for one atlas build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Maximum page width in pixels.
    pub max_width: u32,
    /// Maximum page height in pixels.
    pub max_height: u32,
    /// Keep final page dimensions at exactly max_width/max_height instead of
    /// shrinking to the used extent.
    #[serde(default)]
    pub force_max_dimensions: bool,
    /// Evaluate compression candidates in parallel when the "parallel"
    /// feature is enabled.
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            max_width: 2048,
            max_height: 2048,
            force_max_dimensions: false,
            parallel: false,
        }
    }
}

impl ExportConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        if self.max_width == 0 || self.max_height == 0 {
            return Err(AtlasError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `ExportConfig`.
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::new()
    }
}

/// Builder for `ExportConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct ExportConfigBuilder {
    cfg: ExportConfig,
}

impl ExportConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: ExportConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn force_max_dimensions(mut self, v: bool) -> Self {
        self.cfg.force_max_dimensions = v;
        self
    }
    pub fn parallel(mut self, v: bool) -> Self {
        self.cfg.parallel = v;
        self
    }
    pub fn build(self) -> ExportConfig {
        self.cfg
    }
}
