//! Bumpers: a headless demo of the collision engine
//!
//! Scatters circular pucks in a bounded arena, integrates their motion
//! with a fixed timestep and lets the collision handler report contact
//! begin/end events. Pucks reflect off each other's contact normals and
//! off the arena walls. Run with `RUST_LOG=info` to watch the contacts.

use std::cell::Cell;
use std::rc::Rc;

use collision_engine::prelude::*;
use log::{debug, info};
use rand::Rng;

const ARENA: f32 = 400.0;
const PUCK_COUNT: usize = 12;
const STEPS: usize = 600;
const DT: f32 = 1.0 / 60.0;

/// Shared mutable state for one puck, accessible both to the handler
/// (through the body trait) and to the integration loop
#[derive(Clone)]
struct PuckState {
    position: Rc<Cell<Vec2>>,
    velocity: Rc<Cell<Vec2>>,
}

struct Puck {
    id: usize,
    state: PuckState,
    colliders: Vec<Collider>,
}

impl Puck {
    fn new(id: usize, position: Vec2, velocity: Vec2, radius: f32) -> Self {
        Self {
            id,
            state: PuckState {
                position: Rc::new(Cell::new(position)),
                velocity: Rc::new(Cell::new(velocity)),
            },
            colliders: vec![Collider::new(Shape::Circle(Circle::new(Vec2::zeros(), radius)))],
        }
    }
}

impl CollisionBody for Puck {
    fn position(&self) -> Vec2 {
        self.state.position.get()
    }

    fn velocity(&self) -> Vec2 {
        self.state.velocity.get()
    }

    fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    fn colliders_mut(&mut self) -> &mut [Collider] {
        &mut self.colliders
    }

    fn resolve_collision(&mut self, collisions: &[CollisionInformation]) {
        for information in collisions {
            for collision in &information.collisions {
                if collision.first_contact {
                    info!(
                        "puck {} hit {:?} (first contact)",
                        self.id, information.other_body
                    );
                }
                // Arcade response: reflect velocity off the contact
                // normal when still moving into the surface
                if let Some(intersection) = &collision.intersection {
                    let n = intersection.combined.normal;
                    let v = self.state.velocity.get();
                    if n.dot(&v) < 0.0 {
                        let reflected = v - n * (2.0 * v.dot(&n));
                        self.state.velocity.set(reflected);
                    }
                }
            }
        }
    }

    fn resolve_collision_ended(&mut self, ended: &[ContactEndedInformation]) {
        for information in ended {
            debug!("puck {} separated from {:?}", self.id, information.other_body);
        }
    }
}

fn main() -> Result<(), CollisionError> {
    env_logger::init();

    let config = CollisionConfig::from_toml_str(
        r#"
        width = 400.0
        height = 400.0
        rows = 10
        cols = 10
        start_capacity = 32
        "#,
    )?;
    let mut handler = CollisionHandler::from_config(&config)?;

    let mut rng = rand::thread_rng();
    let mut states = Vec::with_capacity(PUCK_COUNT);
    for id in 0..PUCK_COUNT {
        let position = Vec2::new(rng.gen_range(30.0..ARENA - 30.0), rng.gen_range(30.0..ARENA - 30.0));
        let speed = rng.gen_range(40.0..120.0);
        let angle = rng.gen_range(0.0..std::f32::consts::TAU);
        let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
        let puck = Puck::new(id, position, velocity, rng.gen_range(6.0..14.0));
        states.push(puck.state.clone());
        handler.add(Box::new(puck));
    }
    info!("spawned {PUCK_COUNT} pucks in a {ARENA}x{ARENA} arena");

    for step in 0..STEPS {
        // Integrate motion and bounce off the arena walls
        for state in &states {
            let mut position = state.position.get();
            let mut velocity = state.velocity.get();
            position += velocity * DT;
            if (position.x < 0.0 && velocity.x < 0.0) || (position.x > ARENA && velocity.x > 0.0) {
                velocity.x = -velocity.x;
            }
            if (position.y < 0.0 && velocity.y < 0.0) || (position.y > ARENA && velocity.y > 0.0) {
                velocity.y = -velocity.y;
            }
            state.position.set(position);
            state.velocity.set(velocity);
        }

        handler.update(DT);

        if step % 120 == 0 {
            let grid = handler.spatial_hash();
            debug!(
                "step {step}: {} live bodies, {} occupied cells, {} grid entries",
                handler.len(),
                grid.occupied_cells(),
                grid.entry_count()
            );
        }
    }

    // A final ad-hoc sweep across the arena center
    let beam = Shape::Segment(Segment::new(
        Vec2::new(0.0, ARENA * 0.5),
        Vec2::new(ARENA, ARENA * 0.5),
    ));
    let hits = handler.cast_space(&beam, CollisionLayers::ALL, true);
    info!("final sweep across the arena center touches {} pucks", hits.len());
    for hit in handler.query_space(&beam, Vec2::new(0.0, ARENA * 0.5), CollisionLayers::ALL, true) {
        info!(
            "  {:?} at distance^2 {:.1} with {} contact points",
            hit.collider.body,
            hit.distance_squared,
            hit.points.len()
        );
    }

    Ok(())
}
