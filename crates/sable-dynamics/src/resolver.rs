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

//! # Contact Resolution
//!
//! Two decoupled passes over the manifold store, run in a fixed order each
//! tick:
//!
//! 1. [`CollisionResolver::resolve_collisions`] — sequential-impulse
//!    (Gauss-Seidel) velocity resolution. Each contact is solved
//!    independently against the current velocities; the configured number
//!    of iterations sweeps the whole store again, letting impulses
//!    propagate through contact chains.
//! 2. [`CollisionResolver::apply_positional_corrections`] — a single
//!    Baumgarte-style pass that moves positions directly to bleed off
//!    penetration beyond the slop, without injecting velocity.
//!
//! Results are iteration-order dependent, as is standard for sequential
//! impulse; the store guarantees a deterministic insertion order.

use sable_core::manifold::{CollisionPartner, Contact, Manifold, ManifoldStore};
use sable_core::math::Vec3;
use sable_core::RigidBody;

use crate::config::SolverConfig;
use crate::world::BodyArena;

/// Restitution assumed for static geometry, so pair restitution
/// `min(eps_a, eps_b)` degenerates to the body's own coefficient.
const STATIC_RESTITUTION: f32 = 1.0;

/// Sequential-impulse velocity resolver plus positional correction.
#[derive(Debug, Default)]
pub struct CollisionResolver;

impl CollisionResolver {
    /// Creates a resolver.
    pub fn new() -> Self {
        Self
    }

    /// Runs `config.impulse_iterations()` sequential-impulse passes over
    /// every manifold in the store.
    ///
    /// Contact normals point from the partner toward the manifold's
    /// primary body, so a negative normal speed means the pair is
    /// approaching. Separating contacts (`vn > 0`) receive no impulse.
    pub fn resolve_collisions(
        &self,
        store: &ManifoldStore,
        bodies: &mut BodyArena,
        config: &SolverConfig,
    ) {
        for _ in 0..config.impulse_iterations() {
            for manifold in store.iter() {
                self.resolve_manifold(manifold, bodies, config);
            }
        }
    }

    fn resolve_manifold(&self, manifold: &Manifold, bodies: &mut BodyArena, config: &SolverConfig) {
        match manifold.partner {
            CollisionPartner::Static => {
                let Some(body) = bodies.get_mut(manifold.body) else {
                    log::debug!("Manifold references dead body {:?}; skipping", manifold.body);
                    return;
                };
                for contact in &manifold.contacts {
                    Self::resolve_contact(contact, body, None, config.epsilon());
                }
            }
            CollisionPartner::Dynamic(other) => {
                let Some((body_a, body_b)) = bodies.get_pair_mut(manifold.body, other) else {
                    log::debug!(
                        "Manifold references dead pair {:?}/{:?}; skipping",
                        manifold.body,
                        other
                    );
                    return;
                };
                for contact in &manifold.contacts {
                    Self::resolve_contact(contact, body_a, Some(body_b), config.epsilon());
                }
            }
        }
    }

    /// Solves one contact's velocity constraint. `body_b` is `None` when
    /// the partner is static (zero velocity, infinite mass).
    fn resolve_contact(
        contact: &Contact,
        body_a: &mut RigidBody,
        body_b: Option<&mut RigidBody>,
        epsilon: f32,
    ) {
        let normal = contact.normal;

        let r_a = contact.position - body_a.center_of_mass_global();
        let (r_b, vel_b, inv_mass_b, restitution_b) = match &body_b {
            Some(b) => (
                contact.position - b.center_of_mass_global(),
                b.velocity() + b.angular_velocity().cross(contact.position - b.center_of_mass_global()),
                b.inverse_mass(),
                b.restitution(),
            ),
            None => (Vec3::ZERO, Vec3::ZERO, 0.0, STATIC_RESTITUTION),
        };

        let vel_a = body_a.velocity() + body_a.angular_velocity().cross(r_a);
        let normal_speed = (vel_a - vel_b).dot(normal);

        // Separating: no impulse. Applying one here would glue bodies
        // together or add energy.
        if normal_speed > 0.0 {
            return;
        }

        let restitution = body_a.restitution().min(restitution_b);

        let ra_x_n = r_a.cross(normal);
        let rb_x_n = r_b.cross(normal);

        // Effective mass along the normal: linear terms plus the
        // orientation-dependent angular terms (r x n)^T J_world^-1 (r x n).
        let mut denominator = body_a.inverse_mass() + inv_mass_b;
        denominator += ra_x_n.dot(*body_a.inverse_world_inertia_tensor() * ra_x_n);
        if let Some(b) = &body_b {
            denominator += rb_x_n.dot(*b.inverse_world_inertia_tensor() * rb_x_n);
        }

        // Physically negligible contact (two immovable parties); skipping
        // avoids the division blowing up.
        if denominator.abs() < epsilon {
            return;
        }

        let lambda = -(1.0 + restitution) * normal_speed / denominator;
        let impulse = normal * lambda;

        body_a.apply_impulse_off_centre(impulse, r_a);
        if let Some(b) = body_b {
            b.apply_impulse_off_centre(-impulse, r_b);
        }
    }

    /// Single positional pass: any contact penetrating beyond the slop
    /// moves the bodies apart by `(penetration - slop) * correction_percent`
    /// along the normal.
    ///
    /// Static partners never move; dynamic pairs split the correction by
    /// mass ratio, the lighter body moving further. Decoupled from velocity
    /// resolution so it injects no kinetic energy.
    pub fn apply_positional_corrections(
        &self,
        store: &ManifoldStore,
        bodies: &mut BodyArena,
        config: &SolverConfig,
    ) {
        let slop = config.position_slop();
        let percent = config.correction_percent();

        for manifold in store.iter() {
            match manifold.partner {
                CollisionPartner::Static => {
                    let Some(body) = bodies.get_mut(manifold.body) else {
                        continue;
                    };
                    for contact in &manifold.contacts {
                        if contact.penetration.abs() <= slop {
                            continue;
                        }
                        let correction = contact.normal * (contact.penetration - slop) * percent;
                        body.set_position(body.position() + correction);
                    }
                }
                CollisionPartner::Dynamic(other) => {
                    let Some((body_a, body_b)) = bodies.get_pair_mut(manifold.body, other) else {
                        continue;
                    };
                    for contact in &manifold.contacts {
                        if contact.penetration.abs() <= slop {
                            continue;
                        }
                        let correction = contact.normal * (contact.penetration - slop) * percent;
                        // Mass 0 is the infinite-mass sentinel: that side
                        // never moves, the other side takes the full
                        // correction, mirroring the static branch.
                        let a_fixed = body_a.mass() == 0.0;
                        let b_fixed = body_b.mass() == 0.0;
                        match (a_fixed, b_fixed) {
                            (true, true) => continue,
                            (false, true) => {
                                body_a.set_position(body_a.position() + correction);
                            }
                            (true, false) => {
                                body_b.set_position(body_b.position() - correction);
                            }
                            (false, false) => {
                                let total_mass = body_a.mass() + body_b.mass();
                                let ratio_a = body_b.mass() / total_mass;
                                let ratio_b = body_a.mass() / total_mass;
                                body_a.set_position(body_a.position() + correction * ratio_a);
                                body_b.set_position(body_b.position() - correction * ratio_b);
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sable_core::body::BodyDesc;
    use sable_core::handle::{BodyHandle, ColliderId};
    use sable_core::shape::CollisionShape;

    fn sphere(collider: u64, position: Vec3, velocity: Vec3, restitution: f32) -> RigidBody {
        RigidBody::new(BodyDesc {
            collider: ColliderId(collider),
            shape: CollisionShape::Sphere { radius: 0.5 },
            position,
            velocity,
            restitution,
            gravity_enabled: false,
            ..Default::default()
        })
    }

    /// Head-on pair: a at -x moving right, b at +x moving left, touching
    /// at the origin. The contact normal points toward a (the primary).
    fn head_on_pair(restitution: f32) -> (BodyArena, ManifoldStore, BodyHandle, BodyHandle) {
        let mut arena = BodyArena::default();
        let a = arena.insert(sphere(
            1,
            Vec3::new(-0.45, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            restitution,
        ));
        let b = arena.insert(sphere(
            2,
            Vec3::new(0.45, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            restitution,
        ));

        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Dynamic(b),
            Contact {
                position: Vec3::ZERO,
                normal: -Vec3::X,
                penetration: 0.1,
            },
        );
        (arena, store, a, b)
    }

    #[test]
    fn test_elastic_head_on_reverses_and_conserves_momentum() {
        let (mut arena, store, a, b) = head_on_pair(1.0);
        let momentum_before = arena.get(a).unwrap().velocity() * arena.get(a).unwrap().mass()
            + arena.get(b).unwrap().velocity() * arena.get(b).unwrap().mass();

        CollisionResolver::new().resolve_collisions(&store, &mut arena, &SolverConfig::default());

        let va = arena.get(a).unwrap().velocity();
        let vb = arena.get(b).unwrap().velocity();
        // Equal masses, elastic: velocities swap.
        assert_relative_eq!(va.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(vb.x, 2.0, epsilon = 1e-5);

        let momentum_after = va * arena.get(a).unwrap().mass() + vb * arena.get(b).unwrap().mass();
        assert_relative_eq!(momentum_after.x, momentum_before.x, epsilon = 1e-5);
    }

    #[test]
    fn test_inelastic_contact_kills_normal_relative_velocity() {
        let (mut arena, store, a, b) = head_on_pair(0.0);
        CollisionResolver::new().resolve_collisions(&store, &mut arena, &SolverConfig::default());

        let rel = arena.get(a).unwrap().velocity() - arena.get(b).unwrap().velocity();
        assert_relative_eq!(rel.dot(-Vec3::X), 0.0, epsilon = 1e-5);
    }

    #[test]
    fn test_separating_contact_receives_no_impulse() {
        let mut arena = BodyArena::default();
        // Moving away from the static floor below; the lingering contact
        // report must not pull it back.
        let a = arena.insert(sphere(
            1,
            Vec3::new(0.0, 0.5, 0.0),
            Vec3::new(0.0, 3.0, 0.0),
            1.0,
        ));

        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Static,
            Contact {
                position: Vec3::ZERO,
                normal: Vec3::Y,
                penetration: 0.05,
            },
        );

        CollisionResolver::new().resolve_collisions(&store, &mut arena, &SolverConfig::default());
        assert_eq!(arena.get(a).unwrap().velocity(), Vec3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn test_static_bounce_reflects_velocity() {
        let mut arena = BodyArena::default();
        let a = arena.insert(sphere(
            1,
            Vec3::new(0.0, 0.45, 0.0),
            Vec3::new(0.0, -4.0, 0.0),
            1.0,
        ));

        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Static,
            Contact {
                position: Vec3::new(0.0, -0.05, 0.0),
                normal: Vec3::Y,
                penetration: 0.05,
            },
        );

        CollisionResolver::new().resolve_collisions(&store, &mut arena, &SolverConfig::default());
        // Central impact on an infinite mass with restitution 1.
        assert_relative_eq!(arena.get(a).unwrap().velocity().y, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn test_degenerate_denominator_is_skipped() {
        let mut arena = BodyArena::default();
        // Mass 0 is the static sentinel: inverse mass and inverse inertia
        // are all zero, so the effective mass denominator vanishes.
        let a = arena.insert(RigidBody::new(BodyDesc {
            collider: ColliderId(1),
            mass: 0.0,
            velocity: Vec3::new(0.0, -1.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        }));

        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Static,
            Contact {
                position: Vec3::ZERO,
                normal: Vec3::Y,
                penetration: 0.05,
            },
        );

        CollisionResolver::new().resolve_collisions(&store, &mut arena, &SolverConfig::default());
        assert_eq!(arena.get(a).unwrap().velocity(), Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_positional_correction_against_static() {
        let mut arena = BodyArena::default();
        let a = arena.insert(sphere(1, Vec3::new(0.0, 0.4, 0.0), Vec3::ZERO, 1.0));

        let penetration = 0.1;
        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Static,
            Contact {
                position: Vec3::new(0.0, -0.1, 0.0),
                normal: Vec3::Y,
                penetration,
            },
        );

        let config = SolverConfig::default();
        let before = arena.get(a).unwrap().position();
        CollisionResolver::new().apply_positional_corrections(&store, &mut arena, &config);
        let after = arena.get(a).unwrap().position();

        let expected = (penetration - config.position_slop()) * config.correction_percent();
        assert_relative_eq!(after.y - before.y, expected, epsilon = 1e-6);
        assert_relative_eq!(after.x, before.x);
    }

    #[test]
    fn test_positional_correction_splits_by_mass_ratio() {
        let mut arena = BodyArena::default();
        let a = arena.insert(RigidBody::new(BodyDesc {
            collider: ColliderId(1),
            mass: 1.0,
            position: Vec3::new(-0.4, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        }));
        let b = arena.insert(RigidBody::new(BodyDesc {
            collider: ColliderId(2),
            mass: 3.0,
            position: Vec3::new(0.4, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        }));

        let penetration = 0.2;
        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Dynamic(b),
            Contact {
                position: Vec3::ZERO,
                normal: -Vec3::X,
                penetration,
            },
        );

        let config = SolverConfig::default();
        CollisionResolver::new().apply_positional_corrections(&store, &mut arena, &config);

        let shift = (penetration - config.position_slop()) * config.correction_percent();
        // The light body (a) takes 3/4 of the correction, the heavy one 1/4.
        assert_relative_eq!(arena.get(a).unwrap().position().x, -0.4 - shift * 0.75, epsilon = 1e-6);
        assert_relative_eq!(arena.get(b).unwrap().position().x, 0.4 + shift * 0.25, epsilon = 1e-6);
    }

    #[test]
    fn test_positional_correction_never_moves_a_zero_mass_body() {
        let mut arena = BodyArena::default();
        let dynamic = arena.insert(RigidBody::new(BodyDesc {
            collider: ColliderId(1),
            mass: 1.0,
            position: Vec3::new(-0.4, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        }));
        // A registered body with the infinite-mass sentinel, not static
        // environment geometry: it still must behave as immovable.
        let sentinel = arena.insert(RigidBody::new(BodyDesc {
            collider: ColliderId(2),
            mass: 0.0,
            position: Vec3::new(0.4, 0.0, 0.0),
            gravity_enabled: false,
            ..Default::default()
        }));

        let penetration = 0.2;
        let mut store = ManifoldStore::new();
        store.push_contact(
            dynamic,
            CollisionPartner::Dynamic(sentinel),
            Contact {
                position: Vec3::ZERO,
                normal: -Vec3::X,
                penetration,
            },
        );

        let config = SolverConfig::default();
        CollisionResolver::new().apply_positional_corrections(&store, &mut arena, &config);

        let shift = (penetration - config.position_slop()) * config.correction_percent();
        // The finite-mass body takes the whole correction; the sentinel
        // stays exactly where it was.
        assert_relative_eq!(arena.get(dynamic).unwrap().position().x, -0.4 - shift, epsilon = 1e-6);
        assert_eq!(arena.get(sentinel).unwrap().position(), Vec3::new(0.4, 0.0, 0.0));
    }

    #[test]
    fn test_penetration_within_slop_is_left_alone() {
        let mut arena = BodyArena::default();
        let a = arena.insert(sphere(1, Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, 1.0));

        let mut store = ManifoldStore::new();
        store.push_contact(
            a,
            CollisionPartner::Static,
            Contact {
                position: Vec3::ZERO,
                normal: Vec3::Y,
                penetration: 0.005,
            },
        );

        let before = arena.get(a).unwrap().position();
        CollisionResolver::new().apply_positional_corrections(
            &store,
            &mut arena,
            &SolverConfig::default(),
        );
        assert_eq!(arena.get(a).unwrap().position(), before);
    }
}
