//! Collision engine configuration
//!
//! A small, serializable configuration surface for the collision
//! handler: world bounds, broad-phase grid resolution and the initial
//! body capacity. Supports TOML with defaults and validation.

use serde::{Deserialize, Serialize};

use crate::core::error::CollisionError;
use crate::foundation::math::Vec2;
use crate::shapes::Rect;

/// Configuration for a [`crate::physics::CollisionHandler`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// World bounds origin x
    pub x: f32,
    /// World bounds origin y
    pub y: f32,
    /// World bounds width
    pub width: f32,
    /// World bounds height
    pub height: f32,
    /// Broad-phase grid rows
    pub rows: usize,
    /// Broad-phase grid columns
    pub cols: usize,
    /// Initial capacity of the body registry
    pub start_capacity: usize,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1000.0,
            height: 1000.0,
            rows: 16,
            cols: 16,
            start_capacity: 64,
        }
    }
}

impl CollisionConfig {
    /// The configured world bounds as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.y),
            Vec2::new(self.x + self.width, self.y + self.height),
        )
    }

    /// Validate the configuration
    ///
    /// Grid dimensions must be positive and the bounds must have area;
    /// both would otherwise produce zero cell spacing.
    pub fn validate(&self) -> Result<(), CollisionError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(CollisionError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(CollisionError::EmptyBounds { bounds: self.bounds() });
        }
        Ok(())
    }

    /// Parse a configuration from a TOML string
    pub fn from_toml_str(input: &str) -> Result<Self, CollisionError> {
        let config: Self = toml::from_str(input).map_err(|e| CollisionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config_is_valid() {
        let config = CollisionConfig::default();
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.bounds().width(), 1000.0);
    }

    #[test]
    fn test_parse_toml_with_partial_fields() {
        let config = CollisionConfig::from_toml_str(
            r#"
            width = 200.0
            height = 100.0
            rows = 5
            cols = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.rows, 5);
        assert_eq!(config.cols, 10);
        assert_relative_eq!(config.bounds().max.x, 200.0);
        // Unspecified fields keep their defaults
        assert_eq!(config.start_capacity, 64);
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let result = CollisionConfig::from_toml_str("rows = 0");
        assert!(matches!(result, Err(CollisionError::InvalidGrid { .. })));
    }

    #[test]
    fn test_empty_bounds_rejected() {
        let result = CollisionConfig::from_toml_str("width = -5.0");
        assert!(matches!(result, Err(CollisionError::EmptyBounds { .. })));
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let result = CollisionConfig::from_toml_str("rows = \"ten\"");
        assert!(matches!(result, Err(CollisionError::Config(_))));
    }
}
