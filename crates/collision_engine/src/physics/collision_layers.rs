//! Collision layer system for filtering collision detection
//!
//! A collider sits on a single layer (one bit) and carries a mask of the
//! layers it tests against. Filtering is deliberately one-directional:
//! each collider applies its own mask during its own iteration pass, so
//! asymmetric setups (A sees B, B ignores A) are expressible.

/// Collision layer definitions using bit masks for efficient filtering
pub struct CollisionLayers;

impl CollisionLayers {
    /// No collision layer
    pub const NONE: u32 = 0;

    /// All collision layers
    pub const ALL: u32 = 0xFFFF_FFFF;

    // Standard game entity layers (bits 0-7)
    /// Player character layer
    pub const PLAYER: u32 = 1 << 0;

    /// Enemy character layer
    pub const ENEMY: u32 = 1 << 1;

    /// Projectiles (bullets, missiles, etc.)
    pub const PROJECTILE: u32 = 1 << 2;

    /// Static environment geometry
    pub const ENVIRONMENT: u32 = 1 << 3;

    /// Trigger volumes (no physical response)
    pub const TRIGGER: u32 = 1 << 4;

    /// Debris and small physics objects
    pub const DEBRIS: u32 = 1 << 5;

    /// Vehicles
    pub const VEHICLE: u32 = 1 << 6;

    /// Pickups and collectibles
    pub const PICKUP: u32 = 1 << 7;

    /// Check whether `mask` accepts a collider on layer `layer`
    ///
    /// This is the per-collider half of the filter; the mirrored direction
    /// is checked independently by the other collider's own pass.
    pub fn mask_accepts(mask: u32, layer: u32) -> bool {
        (mask & layer) != 0
    }

    /// Check if two colliders should collide based on their layers and masks
    ///
    /// Both directions must accept: A's layer must be in B's mask AND B's
    /// layer must be in A's mask.
    pub fn should_collide(layer_a: u32, mask_a: u32, layer_b: u32, mask_b: u32) -> bool {
        (layer_a & mask_b) != 0 && (layer_b & mask_a) != 0
    }

    /// Helper to create a mask from multiple layers
    pub fn mask(layers: &[u32]) -> u32 {
        layers.iter().fold(0, |acc, &layer| acc | layer)
    }
}
