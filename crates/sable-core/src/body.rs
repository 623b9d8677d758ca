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

//! # Rigid Body
//!
//! State container and integrator for a single dynamic body: mass and
//! inertia, velocities, accumulated force/torque, and the transform whose
//! rotation pivot is the center of mass rather than the geometric origin.
//!
//! Invariants maintained by every mutation path:
//! - inverse mass and the inverse inertia tensor always match the latest
//!   mass and shape;
//! - the world-space inertia tensors always match the latest orientation.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::handle::ColliderId;
use crate::math::{Mat3, Quaternion, Transform, Vec3, EPSILON};
use crate::shape::CollisionShape;

/// Linear kinetic energy (`0.5 m |v|²`) below which a body's linear
/// velocity is zeroed during integration, preventing jitter from residual
/// numerical energy.
pub const MIN_LINEAR_KINETIC_ENERGY: f32 = 0.01;

/// Angular kinetic energy (`0.5 ω·(I·ω)`) below which a body's angular
/// velocity is zeroed during integration.
pub const MIN_ANGULAR_KINETIC_ENERGY: f32 = 0.01;

/// Description for registering a rigid body with a `PhysicsWorld`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyDesc {
    /// The host collider this body answers contact reports for.
    pub collider: ColliderId,
    /// Shape used for the inertia tensor.
    pub shape: CollisionShape,
    /// Initial position of the geometric origin.
    pub position: Vec3,
    /// Initial orientation.
    pub rotation: Quaternion,
    /// Mass in kg. `0.0` is the static/infinite-mass sentinel.
    pub mass: f32,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f32,
    /// Initial linear velocity.
    pub velocity: Vec3,
    /// Initial angular velocity.
    pub angular_velocity: Vec3,
    /// Per-body gravity vector.
    pub gravity: Vec3,
    /// Whether gravity is applied to this body each tick.
    pub gravity_enabled: bool,
    /// Center of mass in local coordinates.
    pub center_of_mass: Vec3,
    /// Collision layer bitmask this body belongs to.
    pub collision_layer: u32,
    /// Collision layers this body collides with.
    pub collision_mask: u32,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            collider: ColliderId(0),
            shape: CollisionShape::default(),
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            mass: 1.0,
            restitution: 1.0,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            gravity: Vec3::new(0.0, -9.8, 0.0),
            gravity_enabled: true,
            center_of_mass: Vec3::ZERO,
            collision_layer: 1,
            collision_mask: 1,
        }
    }
}

/// A single dynamic rigid body.
#[derive(Debug, Clone)]
pub struct RigidBody {
    collider: ColliderId,
    shape: CollisionShape,

    transform: Transform,
    position: Vec3,
    old_position: Vec3,
    previous_basis: Mat3,

    velocity: Vec3,
    old_velocity: Vec3,
    angular_velocity: Vec3,

    forces: Vec3,
    torque: Vec3,

    mass: f32,
    inverse_mass: f32,
    restitution: f32,

    center_of_mass_local: Vec3,
    center_of_mass_global: Vec3,

    inertia_tensor: Mat3,
    inverse_inertia_tensor: Mat3,
    world_inertia_tensor: Mat3,
    inverse_world_inertia_tensor: Mat3,

    gravity: Vec3,
    gravity_enabled: bool,
    integrate_forces_enabled: bool,

    collision_layer: u32,
    collision_mask: u32,
}

impl RigidBody {
    /// Creates a body from a description, deriving all dependent state
    /// (inverse mass, local and world inertia tensors, global center of
    /// mass) so the consistency invariants hold from the first tick.
    pub fn new(desc: BodyDesc) -> Self {
        let transform = Transform::from_position_rotation(desc.position, desc.rotation);
        let mut body = Self {
            collider: desc.collider,
            shape: desc.shape,
            transform,
            position: transform.origin,
            old_position: transform.origin,
            previous_basis: transform.basis,
            velocity: desc.velocity,
            old_velocity: desc.velocity,
            angular_velocity: desc.angular_velocity,
            forces: Vec3::ZERO,
            torque: Vec3::ZERO,
            mass: desc.mass,
            inverse_mass: 0.0,
            restitution: desc.restitution.clamp(0.0, 1.0),
            center_of_mass_local: desc.center_of_mass,
            center_of_mass_global: transform.xform(desc.center_of_mass),
            inertia_tensor: Mat3::ZERO,
            inverse_inertia_tensor: Mat3::ZERO,
            world_inertia_tensor: Mat3::ZERO,
            inverse_world_inertia_tensor: Mat3::ZERO,
            gravity: desc.gravity,
            gravity_enabled: desc.gravity_enabled,
            integrate_forces_enabled: true,
            collision_layer: desc.collision_layer,
            collision_mask: desc.collision_mask,
        };
        body.set_mass(desc.mass);
        body
    }

    // --- Force / torque / impulse application ---

    /// Accumulates a force to be integrated on the next `integrate_forces`.
    #[inline]
    pub fn apply_force(&mut self, force: Vec3) {
        self.forces += force;
    }

    /// Accumulates a torque to be integrated on the next `integrate_forces`.
    #[inline]
    pub fn apply_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Applies an instantaneous impulse through the center of mass.
    /// Changes linear velocity immediately; no angular component.
    #[inline]
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    /// Applies an instantaneous impulse at a point offset from the center
    /// of mass.
    ///
    /// `rel_pos` is the vector from the center of mass to the application
    /// point. This is the primitive contact resolution is built on.
    pub fn apply_impulse_off_centre(&mut self, impulse: Vec3, rel_pos: Vec3) {
        self.velocity += impulse * self.inverse_mass;
        let angular_impulse = rel_pos.cross(impulse);
        self.angular_velocity += self.inverse_world_inertia_tensor * angular_impulse;
    }

    // --- Integration ---

    /// Advances the body state by `dt` seconds using semi-implicit Euler.
    ///
    /// Accumulated forces and torque are consumed and cleared. When
    /// integration is disabled the accumulators are still cleared but the
    /// body does not move.
    pub fn integrate_forces(&mut self, dt: f32) {
        if !self.integrate_forces_enabled {
            self.forces = Vec3::ZERO;
            self.torque = Vec3::ZERO;
            return;
        }

        self.old_position = self.position;
        self.old_velocity = self.velocity;

        let acceleration = self.forces * self.inverse_mass;
        let angular_acceleration = self.inverse_world_inertia_tensor * self.torque;

        self.velocity += acceleration * dt;
        self.angular_velocity += angular_acceleration * dt;

        // Energy-based rest heuristic: kill residual numerical energy so
        // settled bodies stop jittering.
        let linear_kinetic_energy = 0.5 * self.mass * self.velocity.length_squared();
        let angular_kinetic_energy =
            0.5 * self.angular_velocity.dot(self.inertia_tensor * self.angular_velocity);

        if linear_kinetic_energy.abs() < MIN_LINEAR_KINETIC_ENERGY {
            self.velocity = Vec3::ZERO;
        }
        if angular_kinetic_energy.abs() < MIN_ANGULAR_KINETIC_ENERGY {
            self.angular_velocity = Vec3::ZERO;
        }

        // The center of mass is the integration pivot; the geometric origin
        // is derived from it afterwards.
        self.center_of_mass_global += self.velocity * dt;

        let mut new_transform = self.transform;
        new_transform.origin =
            self.center_of_mass_global - self.transform.basis * self.center_of_mass_local;

        let rotation_amount = self.angular_velocity * dt;
        let angle = rotation_amount.length();
        if angle > 0.0 {
            let axis = rotation_amount / angle;
            let rotation = Mat3::from_axis_angle(axis, angle);
            // Re-orthonormalize to stop drift from repeated composition.
            new_transform.basis = (rotation * self.transform.basis).orthonormalized();
        }

        self.set_transform(new_transform);

        self.forces = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    // --- Inertia ---

    /// Recomputes the local inertia tensor and its inverse from the current
    /// mass and shape.
    pub fn update_inertia_tensor(&mut self) {
        let diagonal = self.shape.inertia_diagonal(self.mass);
        self.inertia_tensor = Mat3::from_diagonal(diagonal);
        // Zero moments (the static sentinel) invert to zero: infinite
        // rotational inertia, mirroring inverse mass.
        self.inverse_inertia_tensor = Mat3::from_diagonal(Vec3::new(
            if diagonal.x.abs() > EPSILON { 1.0 / diagonal.x } else { 0.0 },
            if diagonal.y.abs() > EPSILON { 1.0 / diagonal.y } else { 0.0 },
            if diagonal.z.abs() > EPSILON { 1.0 / diagonal.z } else { 0.0 },
        ));
    }

    /// Recomputes the world-space inertia tensors from the current
    /// orientation: `I_world = R · I_local · Rᵀ`.
    pub fn update_world_inertia_tensor(&mut self) {
        let rotation = self.transform.basis;
        self.world_inertia_tensor = rotation * self.inertia_tensor * rotation.transpose();
        self.inverse_world_inertia_tensor =
            rotation * self.inverse_inertia_tensor * rotation.transpose();
    }

    // --- Transform ---

    /// Sets the body transform, updating the geometric position, the global
    /// center of mass and, if the basis changed, the world inertia tensors.
    pub fn set_transform(&mut self, new_transform: Transform) {
        self.transform = new_transform;
        self.position = new_transform.origin;
        self.center_of_mass_global = new_transform.xform(self.center_of_mass_local);

        if self.transform.basis != self.previous_basis {
            self.update_world_inertia_tensor();
            self.previous_basis = self.transform.basis;
        }
    }

    /// Moves the geometric origin, keeping the orientation.
    pub fn set_position(&mut self, new_position: Vec3) {
        let mut transform = self.transform;
        transform.origin = new_position;
        self.set_transform(transform);
    }

    /// Returns the current transform.
    #[inline]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the current geometric position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the geometric position from before the last integration step.
    #[inline]
    pub fn old_position(&self) -> Vec3 {
        self.old_position
    }

    // --- Mass / restitution ---

    /// Sets the mass and retriggers the inertia recomputation (local and
    /// world) so the tensors never go stale.
    ///
    /// A mass of `0.0` is the static sentinel: inverse mass becomes zero
    /// and the body no longer responds to impulses.
    pub fn set_mass(&mut self, new_mass: f32) {
        self.mass = new_mass;
        self.inverse_mass = if new_mass != 0.0 { 1.0 / new_mass } else { 0.0 };
        self.update_inertia_tensor();
        self.update_world_inertia_tensor();
    }

    /// Returns the mass in kg.
    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Returns the inverse mass, `0.0` for the static sentinel.
    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        self.inverse_mass
    }

    /// Sets the coefficient of restitution, clamped into `[0, 1]`.
    pub fn set_restitution(&mut self, new_restitution: f32) {
        self.restitution = new_restitution.clamp(0.0, 1.0);
    }

    /// Returns the coefficient of restitution.
    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Replaces the collision shape and retriggers inertia recomputation.
    pub fn set_shape(&mut self, shape: CollisionShape) {
        self.shape = shape;
        self.update_inertia_tensor();
        self.update_world_inertia_tensor();
    }

    /// Returns the collision shape.
    #[inline]
    pub fn shape(&self) -> CollisionShape {
        self.shape
    }

    // --- Velocities ---

    /// Returns the linear velocity.
    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Sets the linear velocity.
    #[inline]
    pub fn set_velocity(&mut self, new_velocity: Vec3) {
        self.velocity = new_velocity;
    }

    /// Returns the linear velocity from before the last integration step.
    #[inline]
    pub fn old_velocity(&self) -> Vec3 {
        self.old_velocity
    }

    /// Returns the angular velocity.
    #[inline]
    pub fn angular_velocity(&self) -> Vec3 {
        self.angular_velocity
    }

    /// Sets the angular velocity.
    #[inline]
    pub fn set_angular_velocity(&mut self, new_angular_velocity: Vec3) {
        self.angular_velocity = new_angular_velocity;
    }

    // --- Center of mass ---

    /// Sets the center of mass in local coordinates and refreshes the
    /// world-space one.
    pub fn set_center_of_mass_local(&mut self, center_of_mass: Vec3) {
        self.center_of_mass_local = center_of_mass;
        self.center_of_mass_global = self.transform.xform(center_of_mass);
    }

    /// Returns the center of mass in local coordinates.
    #[inline]
    pub fn center_of_mass_local(&self) -> Vec3 {
        self.center_of_mass_local
    }

    /// Returns the center of mass in world coordinates.
    #[inline]
    pub fn center_of_mass_global(&self) -> Vec3 {
        self.center_of_mass_global
    }

    // --- Inertia tensor accessors ---

    /// Returns the local inertia tensor.
    #[inline]
    pub fn inertia_tensor(&self) -> &Mat3 {
        &self.inertia_tensor
    }

    /// Returns the inverse of the local inertia tensor.
    #[inline]
    pub fn inverse_inertia_tensor(&self) -> &Mat3 {
        &self.inverse_inertia_tensor
    }

    /// Returns the world-space inertia tensor.
    #[inline]
    pub fn world_inertia_tensor(&self) -> &Mat3 {
        &self.world_inertia_tensor
    }

    /// Returns the world-space inverse inertia tensor, the one the contact
    /// solver consumes.
    #[inline]
    pub fn inverse_world_inertia_tensor(&self) -> &Mat3 {
        &self.inverse_world_inertia_tensor
    }

    // --- Gravity / integration toggles ---

    /// Returns this body's gravity vector.
    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Sets this body's gravity vector.
    #[inline]
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Returns whether gravity is applied to this body.
    #[inline]
    pub fn is_gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    /// Enables or disables gravity for this body.
    #[inline]
    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.gravity_enabled = enabled;
    }

    /// Returns whether force integration is enabled.
    #[inline]
    pub fn is_integrate_forces_enabled(&self) -> bool {
        self.integrate_forces_enabled
    }

    /// Enables or disables force integration. While disabled, accumulated
    /// forces and torque are discarded every tick and the transform stays
    /// frozen.
    #[inline]
    pub fn set_integrate_forces_enabled(&mut self, enabled: bool) {
        self.integrate_forces_enabled = enabled;
    }

    // --- Host identity / collision filtering ---

    /// Returns the host collider id this body is bound to.
    #[inline]
    pub fn collider(&self) -> ColliderId {
        self.collider
    }

    /// Returns the 32-bit collision layer bitmask.
    #[inline]
    pub fn collision_layer(&self) -> u32 {
        self.collision_layer
    }

    /// Sets the entire collision layer bitmask.
    #[inline]
    pub fn set_collision_layer(&mut self, layer: u32) {
        self.collision_layer = layer;
    }

    /// Returns the 32-bit collision mask bitmask.
    #[inline]
    pub fn collision_mask(&self) -> u32 {
        self.collision_mask
    }

    /// Sets the entire collision mask bitmask.
    #[inline]
    pub fn set_collision_mask(&mut self, mask: u32) {
        self.collision_mask = mask;
    }

    /// Sets a single collision layer bit. `layer_number` is 1-based, as in
    /// host editors.
    pub fn set_collision_layer_value(&mut self, layer_number: u32, value: bool) -> Result<(), PhysicsError> {
        let bit = Self::layer_bit(layer_number)?;
        if value {
            self.collision_layer |= bit;
        } else {
            self.collision_layer &= !bit;
        }
        Ok(())
    }

    /// Reads a single collision layer bit. `layer_number` is 1-based.
    pub fn get_collision_layer_value(&self, layer_number: u32) -> Result<bool, PhysicsError> {
        Ok(self.collision_layer & Self::layer_bit(layer_number)? != 0)
    }

    /// Sets a single collision mask bit. `layer_number` is 1-based.
    pub fn set_collision_mask_value(&mut self, layer_number: u32, value: bool) -> Result<(), PhysicsError> {
        let bit = Self::layer_bit(layer_number)?;
        if value {
            self.collision_mask |= bit;
        } else {
            self.collision_mask &= !bit;
        }
        Ok(())
    }

    /// Reads a single collision mask bit. `layer_number` is 1-based.
    pub fn get_collision_mask_value(&self, layer_number: u32) -> Result<bool, PhysicsError> {
        Ok(self.collision_mask & Self::layer_bit(layer_number)? != 0)
    }

    fn layer_bit(layer_number: u32) -> Result<u32, PhysicsError> {
        if !(1..=32).contains(&layer_number) {
            return Err(PhysicsError::LayerOutOfRange {
                layer: layer_number,
            });
        }
        Ok(1 << (layer_number - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn falling_sphere() -> RigidBody {
        RigidBody::new(BodyDesc {
            collider: ColliderId(1),
            shape: CollisionShape::Sphere { radius: 0.5 },
            position: Vec3::new(0.0, 100.0, 0.0),
            ..Default::default()
        })
    }

    #[test]
    fn test_free_fall_matches_closed_form() {
        let mut body = falling_sphere();
        let dt = 1.0 / 60.0;
        let g = body.gravity();
        let steps = 120;

        for _ in 0..steps {
            // Gravity accumulated as a force, as the world driver does.
            body.apply_force(g * body.mass());
            body.integrate_forces(dt);
        }

        // Semi-implicit Euler: v_n = g n dt, y_n = y0 + g dt^2 n(n+1)/2.
        let n = steps as f32;
        let expected_v = g.y * n * dt;
        let expected_y = 100.0 + g.y * dt * dt * n * (n + 1.0) / 2.0;
        assert_relative_eq!(body.velocity().y, expected_v, epsilon = 1e-3);
        assert_relative_eq!(body.position().y, expected_y, epsilon = 1e-2);
        assert_relative_eq!(body.velocity().x, 0.0);
        assert_relative_eq!(body.velocity().z, 0.0);
    }

    #[test]
    fn test_sleep_heuristic_zeroes_tiny_velocities() {
        let mut body = falling_sphere();
        body.set_gravity_enabled(false);
        // 0.5 * 1 * 0.1^2 = 0.005 < 0.01 threshold.
        body.set_velocity(Vec3::new(0.1, 0.0, 0.0));
        body.set_angular_velocity(Vec3::new(0.05, 0.0, 0.0));
        body.integrate_forces(1.0 / 60.0);
        assert_eq!(body.velocity(), Vec3::ZERO);
        assert_eq!(body.angular_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_fast_velocities_survive_the_sleep_check() {
        let mut body = falling_sphere();
        body.set_velocity(Vec3::new(5.0, 0.0, 0.0));
        body.integrate_forces(1.0 / 60.0);
        assert!(body.velocity().x > 4.9);
    }

    #[test]
    fn test_mass_round_trip_and_inertia_retrigger() {
        let mut body = RigidBody::new(BodyDesc {
            shape: CollisionShape::Sphere { radius: 1.0 },
            ..Default::default()
        });

        body.set_mass(4.0);
        assert_relative_eq!(body.inverse_mass(), 0.25);
        // Solid sphere: 2/5 * 4 * 1 = 1.6 on the diagonal.
        assert_relative_eq!(body.inertia_tensor().diagonal().x, 1.6);
        assert_relative_eq!(body.inverse_inertia_tensor().diagonal().x, 1.0 / 1.6);

        // Static sentinel.
        body.set_mass(0.0);
        assert_relative_eq!(body.inverse_mass(), 0.0);
        assert_eq!(body.inverse_inertia_tensor().diagonal(), Vec3::ZERO);
    }

    #[test]
    fn test_impulse_off_centre_adds_spin() {
        let mut body = RigidBody::new(BodyDesc {
            shape: CollisionShape::Sphere { radius: 1.0 },
            mass: 2.0,
            ..Default::default()
        });

        // Impulse along +Y applied at +X of the center of mass: expect
        // linear velocity +Y and angular velocity about +Z (r x j).
        body.apply_impulse_off_centre(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert_relative_eq!(body.velocity().y, 0.5);
        assert!(body.angular_velocity().z > 0.0);
        assert_relative_eq!(body.angular_velocity().x, 0.0);
        assert_relative_eq!(body.angular_velocity().y, 0.0);
    }

    #[test]
    fn test_disabled_integration_discards_accumulators() {
        let mut body = falling_sphere();
        body.set_integrate_forces_enabled(false);
        body.apply_force(Vec3::new(100.0, 0.0, 0.0));
        body.apply_torque(Vec3::new(0.0, 10.0, 0.0));
        let before = body.position();

        body.integrate_forces(1.0 / 60.0);
        assert_eq!(body.position(), before);
        assert_eq!(body.velocity(), Vec3::ZERO);

        // Re-enabling must not integrate the stale force: it was cleared.
        body.set_integrate_forces_enabled(true);
        body.integrate_forces(1.0 / 60.0);
        assert_eq!(body.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_tumbling_keeps_basis_orthonormal() {
        let mut body = RigidBody::new(BodyDesc {
            shape: CollisionShape::Box {
                size: Vec3::new(1.0, 2.0, 3.0),
            },
            gravity_enabled: false,
            ..Default::default()
        });
        body.set_angular_velocity(Vec3::new(3.0, 5.0, 2.0));

        for _ in 0..600 {
            body.integrate_forces(1.0 / 60.0);
        }

        let basis = body.transform().basis;
        assert_relative_eq!(basis.cols[0].length(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(basis.cols[1].length(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(basis.cols[2].length(), 1.0, epsilon = 1e-4);
        assert_relative_eq!(basis.cols[0].dot(basis.cols[1]), 0.0, epsilon = 1e-4);
        assert_relative_eq!(basis.determinant(), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rotation_refreshes_world_inertia_tensor() {
        let mut body = RigidBody::new(BodyDesc {
            shape: CollisionShape::Box {
                size: Vec3::new(1.0, 2.0, 3.0),
            },
            mass: 12.0,
            ..Default::default()
        });
        let before = *body.inverse_world_inertia_tensor();

        let mut t = body.transform();
        t.basis = Mat3::from_axis_angle(Vec3::Y, crate::math::FRAC_PI_2);
        body.set_transform(t);

        let after = *body.inverse_world_inertia_tensor();
        assert!(before != after);
        // 90 degrees around Y swaps the X and Z moments.
        assert_relative_eq!(after.diagonal().x, before.diagonal().z, epsilon = 1e-4);
        assert_relative_eq!(after.diagonal().z, before.diagonal().x, epsilon = 1e-4);
    }

    #[test]
    fn test_layer_bit_helpers_validate_range() {
        let mut body = falling_sphere();
        assert!(body.set_collision_layer_value(0, true).is_err());
        assert!(body.set_collision_layer_value(33, true).is_err());

        body.set_collision_layer_value(3, true).unwrap();
        assert!(body.get_collision_layer_value(3).unwrap());
        assert_eq!(body.collision_layer(), 0b101);

        body.set_collision_mask_value(1, false).unwrap();
        assert!(!body.get_collision_mask_value(1).unwrap());
        assert_eq!(body.collision_mask(), 0);
    }

    #[test]
    fn test_restitution_is_clamped() {
        let mut body = falling_sphere();
        body.set_restitution(1.5);
        assert_relative_eq!(body.restitution(), 1.0);
        body.set_restitution(-0.2);
        assert_relative_eq!(body.restitution(), 0.0);
    }
}
