//! Box patch configuration

use serde::{Deserialize, Serialize};

/// Subdivision configuration for a box patch.
///
/// A patch carries two resolutions built from the same parameters: the
/// coarse template grid (`template` cells per axis) used for wireframe and
/// boundary lines, and the refined grid (`refinement * template` cells per
/// axis) used for shaded faces. The two are independent knobs on purpose:
/// picking and wireframe cost stays bounded by the template counts while
/// the shaded surface can be arbitrarily dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxConfig {
    /// Template subdivision counts along the U, V, W axes.
    pub template: [u32; 3],
    /// Refinement multiplier applied to all three template counts.
    pub refinement: u32,
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            template: [3, 4, 5],
            refinement: 2,
        }
    }
}

impl BoxConfig {
    /// Create a validated configuration.
    pub fn new(template: [u32; 3], refinement: u32) -> Result<Self, ConfigError> {
        let config = Self {
            template,
            refinement,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every subdivision count is at least 1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, &count) in self.template.iter().enumerate() {
            if count == 0 {
                return Err(ConfigError::ZeroSubdivision { axis, count });
            }
        }
        if self.refinement == 0 {
            return Err(ConfigError::ZeroRefinement(self.refinement));
        }
        Ok(())
    }

    /// Template cell counts per axis.
    pub fn template_cells(&self) -> [usize; 3] {
        self.template.map(|n| n as usize)
    }

    /// Refined cell counts per axis (`refinement * template`).
    pub fn refined_cells(&self) -> [usize; 3] {
        self.template.map(|n| (self.refinement * n) as usize)
    }
}

/// Configuration validation errors.
///
/// These are precondition violations: the builders assume validated,
/// positive counts and never re-check them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("subdivision count along axis {axis} must be at least 1, got {count}")]
    ZeroSubdivision { axis: usize, count: u32 },
    #[error("refinement factor must be at least 1, got {0}")]
    ZeroRefinement(u32),
}
