//! Editor configuration.

use crate::shapes::{DEFAULT_SHAPE_SIZE, MAX_SHAPE_SIZE, MIN_SHAPE_SIZE};

/// Placement and size-control settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Size given to shapes dropped from the palette.
    pub default_shape_size: f64,
    /// Lower bound of the size control.
    pub min_shape_size: f64,
    /// Upper bound of the size control.
    pub max_shape_size: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_shape_size: DEFAULT_SHAPE_SIZE,
            min_shape_size: MIN_SHAPE_SIZE,
            max_shape_size: MAX_SHAPE_SIZE,
        }
    }
}

impl CanvasConfig {
    /// Clamp a size-control value into the configured range.
    pub fn clamp_size(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.default_shape_size;
        }
        size.clamp(self.min_shape_size, self.max_shape_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_size() {
        let config = CanvasConfig::default();
        assert_eq!(config.clamp_size(5.0), 20.0);
        assert_eq!(config.clamp_size(20.0), 20.0);
        assert_eq!(config.clamp_size(200.0), 200.0);
        assert_eq!(config.clamp_size(500.0), 200.0);
        assert_eq!(config.clamp_size(f64::NAN), 50.0);
    }
}
