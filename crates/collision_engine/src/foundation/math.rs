//! Math utilities and types
//!
//! Provides fundamental math types for 2D collision detection.

pub use nalgebra::{Matrix2, Vector2};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 2x2 matrix type
pub type Mat2 = Matrix2<f32>;

/// 2D point type
pub type Point2 = nalgebra::Point2<f32>;

/// Transform representing position, rotation angle, and scale in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Position offset
    pub position: Vec2,

    /// Rotation angle in radians (counter-clockwise)
    pub rotation: f32,

    /// Scale factors
    pub scale: Vec2,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self {
            position: Vec2::zeros(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2 {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec2) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec2, rotation: f32) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Apply this transform to a local-space point
    pub fn transform_point(&self, point: Vec2) -> Vec2 {
        let scaled = Vec2::new(point.x * self.scale.x, point.y * self.scale.y);
        self.position + rotate(scaled, self.rotation)
    }

    /// Apply only the rotation and scale to a vector (no translation)
    pub fn transform_vector(&self, vector: Vec2) -> Vec2 {
        let scaled = Vec2::new(vector.x * self.scale.x, vector.y * self.scale.y);
        rotate(scaled, self.rotation)
    }

    /// Whether the rotation is close enough to zero to preserve axis alignment
    pub fn is_axis_aligned(&self) -> bool {
        self.rotation.abs() < f32::EPSILON
    }
}

/// Rotate a vector counter-clockwise by `angle` radians
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    if angle == 0.0 {
        return v;
    }
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Perpendicular vector (rotated 90 degrees counter-clockwise)
pub fn perp(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// 2D cross product (z component of the 3D cross product)
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Normalize a vector, returning `None` for zero-length input instead of NaN
pub fn try_normalize(v: Vec2) -> Option<Vec2> {
    let len_sq = v.magnitude_squared();
    if len_sq <= f32::EPSILON * f32::EPSILON {
        None
    } else {
        Some(v / len_sq.sqrt())
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Squared-distance tolerance used when ordering query results
    pub const DISTANCE_SQUARED_TOLERANCE: f32 = 0.01;
}

/// Math utility functions
pub mod utils {
    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = rotate(Vec2::new(1.0, 0.0), constants::PI * 0.5);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_transform_point_translation_only() {
        let t = Transform2::from_position(Vec2::new(3.0, -2.0));
        let p = t.transform_point(Vec2::new(1.0, 1.0));
        assert_relative_eq!(p.x, 4.0);
        assert_relative_eq!(p.y, -1.0);
    }

    #[test]
    fn test_try_normalize_zero_vector() {
        assert!(try_normalize(Vec2::zeros()).is_none());
        let n = try_normalize(Vec2::new(0.0, 4.0)).unwrap();
        assert_relative_eq!(n.y, 1.0);
    }

    #[test]
    fn test_perp_is_counter_clockwise() {
        let p = perp(Vec2::new(1.0, 0.0));
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 1.0);
    }
}
