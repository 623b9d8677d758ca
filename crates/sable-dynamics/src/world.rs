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

//! # Physics World
//!
//! The explicitly constructed simulation world: body registry, manifold
//! store, detector, resolver, and solver configuration, driven by a
//! single-threaded fixed-timestep [`PhysicsWorld::step`]. Multiple worlds
//! can coexist; nothing here is global.
//!
//! Registration must not happen concurrently with a tick; the `&mut self`
//! receivers make that structural.

use std::collections::HashMap;

use sable_core::body::{BodyDesc, RigidBody};
use sable_core::error::PhysicsError;
use sable_core::handle::{BodyHandle, ColliderId};
use sable_core::manifold::ManifoldStore;

use crate::config::SolverConfig;
use crate::detector::CollisionDetector;
use crate::host::{ContactQuery, TransformSink};
use crate::resolver::CollisionResolver;

/// Slot-indexed storage of rigid bodies. Handles are slot indices; freed
/// slots are reused by later registrations.
#[derive(Debug, Default)]
pub struct BodyArena {
    slots: Vec<Option<RigidBody>>,
    free: Vec<u32>,
}

impl BodyArena {
    pub(crate) fn insert(&mut self, body: RigidBody) -> BodyHandle {
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(body);
                BodyHandle(index)
            }
            None => {
                self.slots.push(Some(body));
                BodyHandle((self.slots.len() - 1) as u32)
            }
        }
    }

    pub(crate) fn remove(&mut self, handle: BodyHandle) -> Option<RigidBody> {
        let slot = self.slots.get_mut(handle.index())?;
        let body = slot.take()?;
        self.free.push(handle.0);
        Some(body)
    }

    /// Returns the body behind a handle, if it is live.
    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.slots.get(handle.index())?.as_ref()
    }

    /// Mutable access to the body behind a handle.
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.slots.get_mut(handle.index())?.as_mut()
    }

    /// Mutable access to two distinct bodies at once, as the resolver
    /// needs for dynamic pairs. Returns `None` if the handles are equal or
    /// either body is dead.
    pub fn get_pair_mut(
        &mut self,
        a: BodyHandle,
        b: BodyHandle,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }
        let (first, second) = if ia < ib {
            let (left, right) = self.slots.split_at_mut(ib);
            (left[ia].as_mut()?, right[0].as_mut()?)
        } else {
            let (left, right) = self.slots.split_at_mut(ia);
            let second = right[0].as_mut()?;
            (second, left[ib].as_mut()?)
        };
        // `first` is always the body behind `a`.
        Some((first, second))
    }

    /// Iterates live bodies with their handles, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|body| (BodyHandle(i as u32), body)))
    }

    /// Mutable iteration over live bodies with their handles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut RigidBody)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|body| (BodyHandle(i as u32), body)))
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns `true` when no bodies are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An independent rigid-body simulation.
#[derive(Debug, Default)]
pub struct PhysicsWorld {
    bodies: BodyArena,
    id_map: HashMap<ColliderId, BodyHandle>,
    manifolds: ManifoldStore,
    detector: CollisionDetector,
    resolver: CollisionResolver,
    config: SolverConfig,
}

impl PhysicsWorld {
    /// Creates a world with the default solver configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a world with a specific solver configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // --- Registry ---

    /// Registers a body and returns its handle.
    ///
    /// Each host collider id maps to at most one body; registering the
    /// same id twice reports `PhysicsError::DuplicateCollider`.
    pub fn register_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        if self.id_map.contains_key(&desc.collider) {
            return Err(PhysicsError::DuplicateCollider {
                collider: desc.collider,
            });
        }
        let collider = desc.collider;
        let handle = self.bodies.insert(RigidBody::new(desc));
        self.id_map.insert(collider, handle);
        log::debug!("Registered body {handle:?} for collider {collider:?}");
        Ok(handle)
    }

    /// Removes a body from the world, releasing its slot and collider
    /// mapping. The returned body can be re-registered elsewhere.
    pub fn deregister_body(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        let body = self
            .bodies
            .remove(handle)
            .ok_or(PhysicsError::InvalidBody { handle })?;
        self.id_map.remove(&body.collider());
        log::debug!("Deregistered body {handle:?}");
        Ok(body)
    }

    /// Shared access to a body.
    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.bodies
            .get(handle)
            .ok_or(PhysicsError::InvalidBody { handle })
    }

    /// Mutable access to a body.
    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies
            .get_mut(handle)
            .ok_or(PhysicsError::InvalidBody { handle })
    }

    /// Resolves a host collider id to the handle of its registered body.
    pub fn body_by_collider(&self, collider: ColliderId) -> Option<BodyHandle> {
        self.id_map.get(&collider).copied()
    }

    /// Iterates all live bodies with their handles.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies.iter()
    }

    /// Number of registered bodies.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    // --- Configuration ---

    /// The solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Mutable solver configuration.
    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// Sets the positional correction fraction. See
    /// [`SolverConfig::set_correction_percent`].
    pub fn set_correction_percent(&mut self, value: f32) {
        self.config.set_correction_percent(value);
    }

    /// Sets the penetration slop. See [`SolverConfig::set_position_slop`].
    pub fn set_position_slop(&mut self, value: f32) {
        self.config.set_position_slop(value);
    }

    /// Sets the impulse denominator guard. See [`SolverConfig::set_epsilon`].
    pub fn set_epsilon(&mut self, value: f32) {
        self.config.set_epsilon(value);
    }

    /// Sets the solver iteration count. See
    /// [`SolverConfig::set_impulse_iterations`].
    pub fn set_impulse_iterations(&mut self, value: u32) {
        self.config.set_impulse_iterations(value);
    }

    // --- Diagnostics ---

    /// The manifolds accumulated by the most recent tick.
    pub fn manifolds(&self) -> &ManifoldStore {
        &self.manifolds
    }

    // --- Simulation ---

    /// Advances the simulation by one fixed timestep.
    ///
    /// Phase order: clear manifolds, accumulate gravity, detect contacts,
    /// resolve velocities, integrate motion, sync transforms to the host,
    /// apply positional correction, sync again. Every phase is a bounded
    /// synchronous pass; a tick always runs to completion.
    pub fn step(&mut self, dt: f32, host: &dyn ContactQuery, sink: &mut dyn TransformSink) {
        self.manifolds.clear();
        self.apply_gravity_forces();
        self.detector
            .detect(&mut self.manifolds, &self.bodies, &self.id_map, host);
        self.resolver
            .resolve_collisions(&self.manifolds, &mut self.bodies, &self.config);

        for (_, body) in self.bodies.iter_mut() {
            body.integrate_forces(dt);
        }
        self.sync_transforms(sink);

        self.resolver
            .apply_positional_corrections(&self.manifolds, &mut self.bodies, &self.config);
        self.sync_transforms(sink);

        log::trace!(
            "Tick complete: {} bodies, {} manifolds",
            self.bodies.len(),
            self.manifolds.len()
        );
    }

    /// Accumulates `g * m` as a force on every gravity-enabled body.
    fn apply_gravity_forces(&mut self) {
        for (_, body) in self.bodies.iter_mut() {
            if body.is_gravity_enabled() && body.mass() > 0.0 {
                let force = body.gravity() * body.mass();
                body.apply_force(force);
            }
        }
    }

    /// Pushes every body's transform to the host. A per-body sink failure
    /// is logged and skipped; the rest of the sync proceeds.
    fn sync_transforms(&mut self, sink: &mut dyn TransformSink) {
        for (handle, body) in self.bodies.iter() {
            if let Err(err) = sink.push_transform(body.collider(), &body.transform()) {
                log::warn!("Transform sync failed for body {handle:?}: {err}");
            }
        }
    }
}
