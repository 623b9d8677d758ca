// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end pipeline tests: a scripted host feeds contact reports into
//! `PhysicsWorld::step` and a recording sink captures the transforms the
//! world pushes back.

use std::collections::HashMap;

use approx::assert_relative_eq;
use sable_core::math::{Transform, Vec3};
use sable_dynamics::host::{ColliderClass, ContactQuery, ContactReport, TransformSink};
use sable_dynamics::{BodyDesc, ColliderId, CollisionShape, PhysicsError, PhysicsWorld};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host stand-in returning pre-scripted contact lists per collider.
#[derive(Default)]
struct ScriptedContacts {
    contacts: HashMap<ColliderId, Vec<ContactReport>>,
}

impl ScriptedContacts {
    fn with_contact(collider: ColliderId, report: ContactReport) -> Self {
        Self {
            contacts: HashMap::from([(collider, vec![report])]),
        }
    }
}

impl ContactQuery for ScriptedContacts {
    fn body_contacts(&self, collider: ColliderId) -> Option<Vec<ContactReport>> {
        self.contacts.get(&collider).cloned()
    }
}

/// Sink recording every pushed transform, optionally failing for one
/// collider to exercise the skip-and-continue path.
#[derive(Default)]
struct RecordingSink {
    pushed: Vec<(ColliderId, Transform)>,
    reject: Option<ColliderId>,
}

impl TransformSink for RecordingSink {
    fn push_transform(
        &mut self,
        collider: ColliderId,
        transform: &Transform,
    ) -> Result<(), PhysicsError> {
        if self.reject == Some(collider) {
            return Err(PhysicsError::MissingBodyState { collider });
        }
        self.pushed.push((collider, *transform));
        Ok(())
    }
}

impl RecordingSink {
    fn last_for(&self, collider: ColliderId) -> Option<Transform> {
        self.pushed
            .iter()
            .rev()
            .find(|(id, _)| *id == collider)
            .map(|(_, t)| *t)
    }
}

#[test]
fn test_free_fall_matches_closed_form() {
    init_logger();
    let mut world = PhysicsWorld::new();
    let handle = world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            position: Vec3::new(0.0, 50.0, 0.0),
            ..Default::default()
        })
        .unwrap();

    // The host has no contact state at all; detection skips the body.
    let host = ScriptedContacts::default();
    let mut sink = RecordingSink::default();
    let dt = 1.0 / 60.0;
    let steps = 90;
    for _ in 0..steps {
        world.step(dt, &host, &mut sink);
    }

    let n = steps as f32;
    let g = -9.8;
    let body = world.body(handle).unwrap();
    assert_relative_eq!(body.velocity().y, g * n * dt, epsilon = 1e-3);
    assert_relative_eq!(
        body.position().y,
        50.0 + g * dt * dt * n * (n + 1.0) / 2.0,
        epsilon = 1e-2
    );

    // Two syncs per tick.
    assert_eq!(sink.pushed.len(), steps * 2);
    let last = sink.last_for(ColliderId(1)).unwrap();
    assert_relative_eq!(last.origin.y, body.position().y, epsilon = 1e-6);
}

#[test]
fn test_elastic_head_on_collision_through_step() {
    init_logger();
    let mut world = PhysicsWorld::new();
    let a = world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            shape: CollisionShape::Sphere { radius: 0.5 },
            position: Vec3::new(-0.45, 0.0, 0.0),
            velocity: Vec3::new(2.0, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        })
        .unwrap();
    let b = world
        .register_body(BodyDesc {
            collider: ColliderId(2),
            shape: CollisionShape::Sphere { radius: 0.5 },
            position: Vec3::new(0.45, 0.0, 0.0),
            velocity: Vec3::new(-2.0, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        })
        .unwrap();

    // Only body 1 reports the contact; the normal points toward it.
    let host = ScriptedContacts::with_contact(
        ColliderId(1),
        ContactReport {
            position: Vec3::ZERO,
            normal: -Vec3::X,
            other_position: Vec3::ZERO,
            other: ColliderId(2),
            other_class: ColliderClass::Dynamic,
        },
    );
    let mut sink = RecordingSink::default();
    world.step(1.0 / 60.0, &host, &mut sink);

    // Equal masses, restitution 1: velocities swap, momentum conserved.
    assert_relative_eq!(world.body(a).unwrap().velocity().x, -2.0, epsilon = 1e-4);
    assert_relative_eq!(world.body(b).unwrap().velocity().x, 2.0, epsilon = 1e-4);
}

#[test]
fn test_duplicate_pair_reports_merge_into_one_manifold() {
    init_logger();
    let mut world = PhysicsWorld::new();
    for id in [1u64, 2] {
        world
            .register_body(BodyDesc {
                collider: ColliderId(id),
                shape: CollisionShape::Sphere { radius: 0.5 },
                position: Vec3::new(if id == 1 { -0.45 } else { 0.45 }, 0.0, 0.0),
                velocity: Vec3::new(if id == 1 { 2.0 } else { -2.0 }, 0.0, 0.0),
                gravity_enabled: false,
                ..Default::default()
            })
            .unwrap();
    }

    // Both bodies independently report the same contact with opposite
    // normals. Canonicalization must fold them into one manifold so the
    // impulse is not double counted beyond the two contact entries.
    let host = ScriptedContacts {
        contacts: HashMap::from([
            (
                ColliderId(1),
                vec![ContactReport {
                    position: Vec3::ZERO,
                    normal: -Vec3::X,
                    other_position: Vec3::ZERO,
                    other: ColliderId(2),
                    other_class: ColliderClass::Dynamic,
                }],
            ),
            (
                ColliderId(2),
                vec![ContactReport {
                    position: Vec3::ZERO,
                    normal: Vec3::X,
                    other_position: Vec3::ZERO,
                    other: ColliderId(1),
                    other_class: ColliderClass::Dynamic,
                }],
            ),
        ]),
    };
    let mut sink = RecordingSink::default();
    world.step(1.0 / 60.0, &host, &mut sink);

    assert_eq!(world.manifolds().len(), 1);
    let manifold = world.manifolds().iter().next().unwrap();
    assert_eq!(manifold.contacts.len(), 2);
    // Both stored normals share the canonical orientation.
    assert_eq!(manifold.contacts[0].normal, manifold.contacts[1].normal);
}

#[test]
fn test_bounce_and_positional_correction_off_static_floor() {
    init_logger();
    let mut world = PhysicsWorld::new();
    let penetration = 0.1;
    let handle = world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            shape: CollisionShape::Sphere { radius: 0.5 },
            position: Vec3::new(0.0, 0.5 - penetration, 0.0),
            velocity: Vec3::new(0.0, -4.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        })
        .unwrap();

    let host = ScriptedContacts::with_contact(
        ColliderId(1),
        ContactReport {
            position: Vec3::new(0.0, -penetration, 0.0),
            normal: Vec3::Y,
            other_position: Vec3::ZERO,
            other: ColliderId(1000),
            other_class: ColliderClass::StaticGeometry,
        },
    );
    let mut sink = RecordingSink::default();

    let dt = 1.0 / 60.0;
    let position_before = world.body(handle).unwrap().position();
    world.step(dt, &host, &mut sink);

    let body = world.body(handle).unwrap();
    // Central elastic bounce off infinite mass: velocity reflects.
    assert_relative_eq!(body.velocity().y, 4.0, epsilon = 1e-4);

    // Position moved by one integration step of the reflected velocity
    // plus the Baumgarte correction.
    let config = *world.config();
    let correction = (penetration - config.position_slop()) * config.correction_percent();
    let expected_y = position_before.y + 4.0 * dt + correction;
    assert_relative_eq!(body.position().y, expected_y, epsilon = 1e-5);

    // The post-correction transform is what reached the host last.
    let last = sink.last_for(ColliderId(1)).unwrap();
    assert_relative_eq!(last.origin.y, body.position().y, epsilon = 1e-6);
}

#[test]
fn test_sleep_threshold_zeroes_slow_body_during_step() {
    init_logger();
    let mut world = PhysicsWorld::new();
    let handle = world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            velocity: Vec3::new(0.1, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        })
        .unwrap();

    let host = ScriptedContacts::default();
    let mut sink = RecordingSink::default();
    world.step(1.0 / 60.0, &host, &mut sink);

    assert_eq!(world.body(handle).unwrap().velocity(), Vec3::ZERO);
}

#[test]
fn test_sink_failure_skips_body_but_not_tick() {
    init_logger();
    let mut world = PhysicsWorld::new();
    world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            ..Default::default()
        })
        .unwrap();
    let ok = world
        .register_body(BodyDesc {
            collider: ColliderId(2),
            ..Default::default()
        })
        .unwrap();

    let host = ScriptedContacts::default();
    let mut sink = RecordingSink {
        reject: Some(ColliderId(1)),
        ..Default::default()
    };
    world.step(1.0 / 60.0, &host, &mut sink);

    // The rejected body is skipped; the other still syncs, and the world
    // keeps simulating both.
    assert!(sink.pushed.iter().all(|(id, _)| *id == ColliderId(2)));
    assert!(!sink.pushed.is_empty());
    assert!(world.body(ok).unwrap().velocity().y < 0.0);
}

#[test]
fn test_deregistered_body_is_no_longer_simulated_or_synced() {
    init_logger();
    let mut world = PhysicsWorld::new();
    let handle = world
        .register_body(BodyDesc {
            collider: ColliderId(1),
            ..Default::default()
        })
        .unwrap();
    world.deregister_body(handle).unwrap();

    let host = ScriptedContacts::default();
    let mut sink = RecordingSink::default();
    world.step(1.0 / 60.0, &host, &mut sink);

    assert!(sink.pushed.is_empty());
    assert!(world.body(handle).is_err());
}
