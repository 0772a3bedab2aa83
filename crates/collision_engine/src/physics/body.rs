//! The collision-object contract between the core and gameplay code
//!
//! The engine does not know what a game object is. It owns bodies only
//! through the [`CollisionBody`] trait: a position, a velocity, some
//! flags and a list of colliders. Gameplay reactions happen inside the
//! resolve callbacks, which the handler invokes during its Resolve phase.

use slotmap::new_key_type;

use crate::foundation::math::Vec2;
use crate::physics::collider::Collider;
use crate::physics::information::{CollisionInformation, ContactEndedInformation};

new_key_type! {
    /// Stable handle for a body registered with a collision handler
    pub struct BodyKey;
}

/// Stable identity of one collider: its owning body plus its index in the
/// body's collider list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColliderId {
    /// Owning body
    pub body: BodyKey,
    /// Index into the body's collider list
    pub index: usize,
}

impl ColliderId {
    /// Creates a collider identity
    pub fn new(body: BodyKey, index: usize) -> Self {
        Self { body, index }
    }
}

/// Capability interface a game object implements to participate in
/// collision detection
///
/// The handler owns registered bodies behind this trait. All methods are
/// called synchronously during `update`; the resolve hooks must not
/// expect `add`/`remove` calls on the handler to become visible before
/// the next tick.
pub trait CollisionBody {
    /// Whether this body participates in collision detection at all
    fn enabled(&self) -> bool {
        true
    }

    /// World-space position of the body origin
    fn position(&self) -> Vec2;

    /// Current velocity, mirrored into the body's colliders each tick
    fn velocity(&self) -> Vec2 {
        Vec2::zeros()
    }

    /// Passive bodies report contact geometry from the other party's
    /// perspective (typical for stationary trigger volumes)
    fn passive(&self) -> bool {
        false
    }

    /// Request swept (tunneling-resistant) detection: colliders are
    /// projected along `velocity * dt` before querying the broad phase
    fn project_shape(&self) -> bool {
        false
    }

    /// The body's colliders
    fn colliders(&self) -> &[Collider];

    /// Mutable access for the handler's per-tick refresh pass
    fn colliders_mut(&mut self) -> &mut [Collider];

    /// Whether the body carries any colliders
    fn has_colliders(&self) -> bool {
        !self.colliders().is_empty()
    }

    /// Invoked once per tick with every collision recorded against this
    /// body, grouped per other body
    fn resolve_collision(&mut self, _collisions: &[CollisionInformation]) {}

    /// Invoked once per tick with every contact that existed last tick
    /// and ended this tick
    fn resolve_collision_ended(&mut self, _ended: &[ContactEndedInformation]) {}
}
