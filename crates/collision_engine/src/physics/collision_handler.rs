//! The per-tick collision driver
//!
//! Owns the spatial hash, the registered bodies and the cross-tick
//! overlap registers. Each `update` runs three strictly ordered phases:
//! Fill (rebuild the grid), narrow phase (classify contacts against the
//! previous tick) and Resolve (dispatch callbacks, commit deferred
//! add/remove operations, swap the overlap registers).
//!
//! All mutation of the live body set is deferred: `add`/`remove` only
//! stage into pending buffers and are applied exactly once at the end of
//! Resolve, so resolve callbacks can safely call them without
//! invalidating the narrow-phase iteration. Visibility of staged
//! mutations is therefore always the *next* tick.

use std::collections::{HashMap, HashSet};

use log::debug;
use slotmap::SlotMap;

use crate::core::config::CollisionConfig;
use crate::core::error::CollisionError;
use crate::foundation::math::try_normalize;
use crate::physics::body::{BodyKey, ColliderId, CollisionBody};
use crate::physics::collider::Collider;
use crate::physics::collision_layers::CollisionLayers;
use crate::physics::contact::{CollisionPoint, Intersection};
use crate::physics::information::{
    Collision, CollisionInformation, ContactEndedInformation, Overlap, OverlapInformation,
};
use crate::shapes::{Rect, Shape};
use crate::spatial::SpatialHash;

/// Key of one ordered collider pair in the overlap registers
type OverlapKey = (ColliderId, ColliderId);

/// Per-tick collision detection driver
pub struct CollisionHandler {
    /// Uniform-grid broad phase
    pub(crate) spatial_hash: SpatialHash,
    /// All registered bodies, live or pending
    pub(crate) bodies: SlotMap<BodyKey, Box<dyn CollisionBody>>,
    /// Bodies currently participating in ticks, in registration order
    live: Vec<BodyKey>,
    /// Bodies staged by `add`, committed at the end of the next Resolve
    pending_add: Vec<BodyKey>,
    /// Bodies staged by `remove`, committed at the end of the next Resolve
    pending_remove: Vec<BodyKey>,
    /// Overlap register being built this tick (empty between ticks)
    active_overlaps: HashMap<OverlapKey, Overlap>,
    /// Overlap register from the previous tick
    previous_overlaps: HashMap<OverlapKey, Overlap>,
}

impl CollisionHandler {
    /// Create a handler over `bounds` with a `rows x cols` broad-phase
    /// grid and capacity for `start_capacity` bodies
    pub fn new(bounds: Rect, rows: usize, cols: usize, start_capacity: usize) -> Result<Self, CollisionError> {
        Ok(Self {
            spatial_hash: SpatialHash::new(bounds, rows, cols)?,
            bodies: SlotMap::with_capacity_and_key(start_capacity),
            live: Vec::with_capacity(start_capacity),
            pending_add: Vec::new(),
            pending_remove: Vec::new(),
            active_overlaps: HashMap::new(),
            previous_overlaps: HashMap::new(),
        })
    }

    /// Create a handler from a validated configuration
    pub fn from_config(config: &CollisionConfig) -> Result<Self, CollisionError> {
        config.validate()?;
        Self::new(config.bounds(), config.rows, config.cols, config.start_capacity)
    }

    /// Stage a body for registration; it becomes live at the start of the
    /// next tick
    ///
    /// The returned key is valid immediately for `body()` access and for
    /// `remove`, but the body participates in detection only after the
    /// current tick's Resolve commits it.
    pub fn add(&mut self, body: Box<dyn CollisionBody>) -> BodyKey {
        let key = self.bodies.insert(body);
        self.pending_add.push(key);
        key
    }

    /// Stage several bodies for registration
    pub fn add_range(&mut self, bodies: impl IntoIterator<Item = Box<dyn CollisionBody>>) -> Vec<BodyKey> {
        bodies.into_iter().map(|b| self.add(b)).collect()
    }

    /// Stage a body for removal at the end of the current/next tick
    pub fn remove(&mut self, key: BodyKey) {
        self.pending_remove.push(key);
    }

    /// Stage several bodies for removal
    pub fn remove_range(&mut self, keys: impl IntoIterator<Item = BodyKey>) {
        self.pending_remove.extend(keys);
    }

    /// Borrow a registered body
    pub fn body(&self, key: BodyKey) -> Option<&dyn CollisionBody> {
        self.bodies.get(key).map(Box::as_ref)
    }

    /// Mutably borrow a registered body
    pub fn body_mut(&mut self, key: BodyKey) -> Option<&mut (dyn CollisionBody + 'static)> {
        self.bodies.get_mut(key).map(Box::as_mut)
    }

    /// Whether a body is currently live (committed, not merely staged)
    pub fn is_live(&self, key: BodyKey) -> bool {
        self.live.contains(&key)
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no bodies are live
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// The broad-phase grid (read-only; used for diagnostics)
    pub fn spatial_hash(&self) -> &SpatialHash {
        &self.spatial_hash
    }

    /// Queue new world bounds, applied atomically at the next fill
    pub fn resize_bounds(&mut self, bounds: Rect) {
        self.spatial_hash.queue_resize(bounds);
    }

    /// Current overlaps recorded for `key`, grouped per other body
    ///
    /// Reflects the register from the most recent completed tick.
    pub fn current_overlaps(&self, key: BodyKey) -> Vec<OverlapInformation> {
        let mut grouped: HashMap<BodyKey, OverlapInformation> = HashMap::new();
        for (&(self_id, other_id), overlap) in &self.previous_overlaps {
            if self_id.body != key {
                continue;
            }
            grouped
                .entry(other_id.body)
                .or_insert_with(|| OverlapInformation {
                    self_body: key,
                    other_body: other_id.body,
                    overlaps: Vec::new(),
                })
                .overlaps
                .push(*overlap);
        }
        grouped.into_values().collect()
    }

    /// Run one collision tick: Fill, narrow phase, Resolve
    pub fn update(&mut self, dt: f32) {
        self.refresh_colliders();
        self.fill_spatial_hash();
        let stack = self.narrow_phase(dt);
        self.resolve(stack);
    }

    /// Recompute world shapes, velocity mirrors and position snapshots
    fn refresh_colliders(&mut self) {
        for &key in &self.live {
            let Some(body) = self.bodies.get_mut(key) else { continue };
            let position = body.position();
            let velocity = body.velocity();
            for collider in body.colliders_mut() {
                collider.refresh(position, velocity);
            }
        }
    }

    /// Phase 1: rebuild the broad-phase grid from live, enabled colliders
    fn fill_spatial_hash(&mut self) {
        let bodies = &self.bodies;
        let mut entries: Vec<(ColliderId, &Shape)> = Vec::new();
        for &key in &self.live {
            let Some(body) = bodies.get(key) else { continue };
            if !body.enabled() || !body.has_colliders() {
                continue;
            }
            for (index, collider) in body.colliders().iter().enumerate() {
                if collider.is_enabled() {
                    entries.push((ColliderId::new(key, index), collider.world_shape()));
                }
            }
        }
        self.spatial_hash.fill(entries);
    }

    /// Phase 2: classify contacts for every live collider
    ///
    /// Continuing pairs are popped out of the previous register and
    /// re-inserted into the active one; whatever remains in the previous
    /// register afterwards has ended and is dispatched during Resolve.
    fn narrow_phase(&mut self, dt: f32) -> HashMap<BodyKey, HashMap<BodyKey, CollisionInformation>> {
        let mut stack: HashMap<BodyKey, HashMap<BodyKey, CollisionInformation>> = HashMap::new();
        let mut visited: HashSet<ColliderId> = HashSet::new();

        for &key in &self.live {
            let Some(body) = self.bodies.get(key) else { continue };
            if !body.enabled() || !body.has_colliders() {
                continue;
            }
            let passive = body.passive();
            let swept = body.project_shape();
            let body_velocity = body.velocity();

            for (index, collider) in body.colliders().iter().enumerate() {
                if !collider.is_enabled() {
                    continue;
                }
                let collider_id = ColliderId::new(key, index);

                // Swept detection projects the shape along velocity * dt;
                // a collider whose kind cannot be projected is skipped
                // this tick.
                let projected: Option<Shape> = if swept {
                    match collider.project(body_velocity * dt) {
                        Some(shape) => Some(shape),
                        None => continue,
                    }
                } else {
                    None
                };

                let cells: Vec<usize> = match &projected {
                    Some(shape) => self.spatial_hash.cells_for_query(shape),
                    None => match self.spatial_hash.candidate_cells(collider_id) {
                        Some(cells) => cells.to_vec(),
                        None => continue,
                    },
                };

                visited.clear();
                for cell in cells {
                    for &candidate_id in self.spatial_hash.bucket(cell) {
                        if candidate_id.body == key {
                            continue; // colliders of the same body never pair
                        }
                        if !visited.insert(candidate_id) {
                            continue; // already tested via another cell
                        }
                        let Some(other_body) = self.bodies.get(candidate_id.body) else {
                            continue; // orphaned pair, silently dropped
                        };
                        if !other_body.enabled() {
                            continue;
                        }
                        let Some(candidate) = other_body.colliders().get(candidate_id.index) else {
                            continue;
                        };
                        if !candidate.is_enabled() {
                            continue;
                        }
                        // Mask reject before the (more expensive) overlap test
                        if !CollisionLayers::mask_accepts(collider.mask(), candidate.layer()) {
                            continue;
                        }

                        let overlapped = match &projected {
                            Some(shape) => candidate.overlap_shape(shape),
                            None => collider.overlap(candidate),
                        };
                        if !overlapped {
                            continue;
                        }

                        let pair = (collider_id, candidate_id);
                        let first_contact = if let Some(mut prev) = self.previous_overlaps.remove(&pair) {
                            prev.first_contact = false;
                            self.active_overlaps.insert(pair, prev);
                            false
                        } else {
                            self.active_overlaps
                                .insert(pair, Overlap::new(collider_id, candidate_id, true));
                            true
                        };

                        let intersection = if collider.computes_intersections() {
                            // A passive body reports geometry from the
                            // mover's perspective: the candidate probes
                            // this collider's surface instead.
                            let (raw, ref_velocity, ref_point) = if passive {
                                (
                                    candidate.intersect_points(collider),
                                    candidate.velocity(),
                                    candidate.position(),
                                )
                            } else {
                                (
                                    collider.intersect_points(candidate),
                                    collider.velocity(),
                                    collider.position(),
                                )
                            };
                            if raw.is_empty() {
                                containment_fallback(collider, candidate)
                            } else {
                                Intersection::new(raw, ref_velocity, ref_point)
                            }
                        } else {
                            None
                        };

                        let collision = Collision {
                            self_collider: collider_id,
                            other_collider: candidate_id,
                            self_velocity: collider.velocity(),
                            other_velocity: candidate.velocity(),
                            first_contact,
                            intersection,
                        };
                        stack
                            .entry(key)
                            .or_default()
                            .entry(candidate_id.body)
                            .or_insert_with(|| CollisionInformation::new(key, candidate_id.body))
                            .collisions
                            .push(collision);
                    }
                }
            }
        }
        stack
    }

    /// Phase 3: dispatch callbacks, commit buffers, swap registers
    fn resolve(&mut self, stack: HashMap<BodyKey, HashMap<BodyKey, CollisionInformation>>) {
        // Collision callbacks: once per body, with one container per
        // distinct other body
        for (key, per_other) in stack {
            let infos: Vec<CollisionInformation> = per_other.into_values().collect();
            if let Some(body) = self.bodies.get_mut(key) {
                body.resolve_collision(&infos);
            }
        }

        // Contact-ended callbacks: everything left in the previous
        // register was not re-confirmed this tick
        let mut ended: HashMap<BodyKey, HashMap<BodyKey, ContactEndedInformation>> = HashMap::new();
        for ((self_id, other_id), overlap) in self.previous_overlaps.drain() {
            if !self.bodies.contains_key(self_id.body) {
                continue; // owner vanished, nothing to notify
            }
            ended
                .entry(self_id.body)
                .or_default()
                .entry(other_id.body)
                .or_insert_with(|| ContactEndedInformation {
                    self_body: self_id.body,
                    other_body: other_id.body,
                    overlaps: Vec::new(),
                })
                .overlaps
                .push(overlap);
        }
        for (key, per_other) in ended {
            let infos: Vec<ContactEndedInformation> = per_other.into_values().collect();
            if let Some(body) = self.bodies.get_mut(key) {
                body.resolve_collision_ended(&infos);
            }
        }

        // Commit deferred registration changes
        if !self.pending_add.is_empty() || !self.pending_remove.is_empty() {
            debug!(
                "committing {} adds and {} removes",
                self.pending_add.len(),
                self.pending_remove.len()
            );
        }
        for key in self.pending_add.drain(..) {
            if self.bodies.contains_key(key) {
                self.live.push(key);
            }
        }
        for key in self.pending_remove.drain(..) {
            self.live.retain(|&k| k != key);
            self.bodies.remove(key);
        }

        // The just-built register becomes next tick's "old"; the drained
        // previous register is reused as the next active one.
        std::mem::swap(&mut self.active_overlaps, &mut self.previous_overlaps);
    }
}

/// Synthesize the containment contact point for a pair whose boolean
/// overlap succeeded without any boundary crossing
///
/// The point is the candidate's closest boundary point to the collider's
/// previous-frame position. No point is produced when that previous
/// position is already inside the candidate (the pair was fully engulfed
/// before this tick) or when the boundary direction degenerates.
fn containment_fallback(collider: &Collider, candidate: &Collider) -> Option<Intersection> {
    let prev = collider.prev_position();
    if candidate.world_shape().contains_point(prev) {
        return None;
    }
    let boundary = candidate.world_shape().closest_point_to(prev);
    let normal = try_normalize(prev - boundary)?;
    Some(Intersection::from_single(CollisionPoint::new(boundary, normal)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::shapes::Circle;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shared event log the test bodies append to
    #[derive(Default)]
    struct EventLog {
        collisions: Vec<(BodyKey, BodyKey, bool)>,
        ended: Vec<(BodyKey, BodyKey)>,
        fallback_points: Vec<CollisionPoint>,
    }

    /// Position shared between the test and the handler-owned body
    type SharedPos = Rc<std::cell::Cell<Vec2>>;

    struct TestBody {
        position: SharedPos,
        velocity: Vec2,
        enabled: bool,
        passive: bool,
        project: bool,
        colliders: Vec<Collider>,
        log: Rc<RefCell<EventLog>>,
    }

    impl TestBody {
        fn circle(x: f32, y: f32, radius: f32, log: Rc<RefCell<EventLog>>) -> Self {
            Self {
                position: Rc::new(std::cell::Cell::new(Vec2::new(x, y))),
                velocity: Vec2::zeros(),
                enabled: true,
                passive: false,
                project: false,
                colliders: vec![Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), radius)))],
                log,
            }
        }

        fn rect(x: f32, y: f32, w: f32, h: f32, log: Rc<RefCell<EventLog>>) -> Self {
            Self {
                position: Rc::new(std::cell::Cell::new(Vec2::new(x, y))),
                velocity: Vec2::zeros(),
                enabled: true,
                passive: false,
                project: false,
                colliders: vec![Collider::new(Shape::Rect(Rect::from_center_extents(
                    Vec2::zeros(),
                    Vec2::new(w * 0.5, h * 0.5),
                )))],
                log,
            }
        }

        fn shared_position(&self) -> SharedPos {
            self.position.clone()
        }
    }

    impl CollisionBody for TestBody {
        fn enabled(&self) -> bool {
            self.enabled
        }
        fn position(&self) -> Vec2 {
            self.position.get()
        }
        fn velocity(&self) -> Vec2 {
            self.velocity
        }
        fn passive(&self) -> bool {
            self.passive
        }
        fn project_shape(&self) -> bool {
            self.project
        }
        fn colliders(&self) -> &[Collider] {
            &self.colliders
        }
        fn colliders_mut(&mut self) -> &mut [Collider] {
            &mut self.colliders
        }
        fn resolve_collision(&mut self, collisions: &[CollisionInformation]) {
            let mut log = self.log.borrow_mut();
            for info in collisions {
                for c in &info.collisions {
                    log.collisions.push((info.self_body, info.other_body, c.first_contact));
                    if let Some(intersection) = &c.intersection {
                        log.fallback_points.extend(intersection.points.iter().copied());
                    }
                }
            }
        }
        fn resolve_collision_ended(&mut self, ended: &[ContactEndedInformation]) {
            let mut log = self.log.borrow_mut();
            for info in ended {
                log.ended.push((info.self_body, info.other_body));
            }
        }
    }

    fn handler() -> CollisionHandler {
        CollisionHandler::new(Rect::from_xywh(-100.0, -100.0, 300.0, 300.0), 10, 10, 16).unwrap()
    }

    #[test]
    fn test_add_is_deferred_until_next_tick() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();
        let a = h.add(Box::new(TestBody::circle(0.0, 0.0, 5.0, log.clone())));
        assert!(!h.is_live(a));
        h.update(1.0 / 60.0);
        assert!(h.is_live(a));
    }

    #[test]
    fn test_first_contact_then_continuation_then_ended() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();
        let a = h.add(Box::new(TestBody::circle(0.0, 0.0, 5.0, log.clone())));
        let body_b = TestBody::circle(8.0, 0.0, 5.0, log.clone());
        let b_pos = body_b.shared_position();
        let b = h.add(Box::new(body_b));
        h.update(1.0 / 60.0); // commit adds, nothing live yet during this tick

        // Tick 1: overlap at distance 8 < 10, first contact
        h.update(1.0 / 60.0);
        {
            let events = log.borrow();
            assert!(events.collisions.contains(&(a, b, true)));
            assert!(events.collisions.contains(&(b, a, true)));
            assert!(events.ended.is_empty());
        }

        // Tick 2: unchanged positions, continuation
        log.borrow_mut().collisions.clear();
        h.update(1.0 / 60.0);
        {
            let events = log.borrow();
            assert!(events.collisions.contains(&(a, b, false)));
            assert!(!events.collisions.contains(&(a, b, true)));
        }

        // Tick 3: move b far away, contact ends exactly once
        b_pos.set(Vec2::new(20.0, 0.0));
        log.borrow_mut().collisions.clear();
        h.update(1.0 / 60.0);
        {
            let events = log.borrow();
            assert!(events.collisions.is_empty());
            assert_eq!(events.ended.iter().filter(|e| **e == (a, b)).count(), 1);
            assert_eq!(events.ended.iter().filter(|e| **e == (b, a)).count(), 1);
        }

        // Tick 4: still apart, no further ended events
        log.borrow_mut().ended.clear();
        h.update(1.0 / 60.0);
        assert!(log.borrow().ended.is_empty());
    }

    #[test]
    fn test_mask_is_checked_per_collider_not_globally() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();

        // a tests against ENEMY; b sits on ENEMY but only tests PROJECTILE.
        // a must still record the contact; b must not.
        let mut body_a = TestBody::circle(0.0, 0.0, 5.0, log.clone());
        body_a.colliders[0] = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 5.0)))
            .with_layers(CollisionLayers::PLAYER, CollisionLayers::ENEMY);
        let mut body_b = TestBody::circle(8.0, 0.0, 5.0, log.clone());
        body_b.colliders[0] = Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), 5.0)))
            .with_layers(CollisionLayers::ENEMY, CollisionLayers::PROJECTILE);

        let a = h.add(Box::new(body_a));
        let b = h.add(Box::new(body_b));
        h.update(1.0 / 60.0);
        h.update(1.0 / 60.0);

        let events = log.borrow();
        assert!(events.collisions.contains(&(a, b, true)));
        assert!(!events.collisions.iter().any(|(s, o, _)| (*s, *o) == (b, a)));
    }

    #[test]
    fn test_containment_fallback_synthesizes_single_point() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();

        // A small circle jumps from outside the rect to fully inside it
        // in one tick: overlap without any boundary crossing. The
        // fallback point sits on the rect boundary closest to the
        // circle's previous (outside) position.
        let body = TestBody::circle(-10.0, 50.0, 2.0, log.clone());
        let circle_pos = body.shared_position();
        let circle = h.add(Box::new(body));
        let _rect = h.add(Box::new(TestBody::rect(50.0, 50.0, 100.0, 100.0, log.clone())));
        h.update(1.0 / 60.0); // commit adds
        h.update(1.0 / 60.0); // apart, no contact

        circle_pos.set(Vec2::new(10.0, 50.0));
        h.update(1.0 / 60.0);

        let events = log.borrow();
        let circle_records: Vec<_> = events
            .collisions
            .iter()
            .filter(|(s, _, _)| *s == circle)
            .collect();
        assert_eq!(circle_records.len(), 1);
        // The synthesized point lies on the rect's left edge (x = 0),
        // level with the circle's previous position
        let on_left_edge = events
            .fallback_points
            .iter()
            .filter(|p| p.point.x.abs() < 1e-3 && (p.point.y - 50.0).abs() < 1e-3)
            .count();
        assert_eq!(on_left_edge, 1, "expected one fallback point on the rect's left edge");
    }

    #[test]
    fn test_fallback_suppressed_when_already_engulfed() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();

        // Circle starts (and stays) deep inside the rect: its previous
        // position is inside the candidate, so no point is synthesized,
        // but the boolean collision is still recorded.
        let circle = h.add(Box::new(TestBody::circle(50.0, 50.0, 2.0, log.clone())));
        let _rect = h.add(Box::new(TestBody::rect(50.0, 50.0, 100.0, 100.0, log.clone())));
        h.update(1.0 / 60.0);
        h.update(1.0 / 60.0);

        let events = log.borrow();
        assert!(events.collisions.iter().any(|(s, _, _)| *s == circle));
        assert!(events.fallback_points.is_empty());
    }

    #[test]
    fn test_disabled_body_participates_in_nothing() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();
        let mut sleeping = TestBody::circle(0.0, 0.0, 5.0, log.clone());
        sleeping.enabled = false;
        let _a = h.add(Box::new(sleeping));
        let _b = h.add(Box::new(TestBody::circle(4.0, 0.0, 5.0, log.clone())));
        h.update(1.0 / 60.0);
        h.update(1.0 / 60.0);
        assert!(log.borrow().collisions.is_empty());
    }

    #[test]
    fn test_removed_body_stops_generating_events() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();
        let a = h.add(Box::new(TestBody::circle(0.0, 0.0, 5.0, log.clone())));
        let b = h.add(Box::new(TestBody::circle(8.0, 0.0, 5.0, log.clone())));
        h.update(1.0 / 60.0);
        h.update(1.0 / 60.0);
        assert!(!log.borrow().collisions.is_empty());

        h.remove(b);
        h.update(1.0 / 60.0); // removal commits at the end of this tick
        log.borrow_mut().collisions.clear();
        log.borrow_mut().ended.clear();
        h.update(1.0 / 60.0);
        let events = log.borrow();
        assert!(events.collisions.is_empty());
        // The ended notification for the vanished pair fires for the
        // surviving body only
        assert!(!events.ended.is_empty());
        assert!(events.ended.iter().all(|(s, _)| *s == a));
    }

    #[test]
    fn test_projected_swept_detection_catches_fast_mover() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut h = handler();

        // A fast bullet whose per-tick displacement jumps clean over a
        // thin wall; swept projection must still catch it.
        let mut bullet = TestBody::circle(-20.0, 0.0, 1.0, log.clone());
        bullet.velocity = Vec2::new(4000.0, 0.0);
        bullet.project = true;
        let bullet_key = h.add(Box::new(bullet));
        let _wall = h.add(Box::new(TestBody::rect(10.0, 0.0, 2.0, 40.0, log.clone())));

        h.update(1.0 / 60.0);
        h.update(1.0 / 60.0);

        let events = log.borrow();
        assert!(
            events.collisions.iter().any(|(s, _, _)| *s == bullet_key),
            "swept projection missed the wall"
        );
    }
}
