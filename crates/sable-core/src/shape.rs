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

//! Collision shapes and their inertia tensors.
//!
//! The pipeline consumes shape geometry from the host for exactly one
//! purpose: computing the local inertia tensor of a body. Broad/narrow
//! phase queries against these shapes are the host's job.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// The primitive shape attached to a rigid body, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionShape {
    /// A solid sphere with the given radius.
    Sphere {
        /// Radius of the sphere.
        radius: f32,
    },
    /// A box with the given **full** extents (not half-extents).
    Box {
        /// Full size of the box along each local axis.
        size: Vec3,
    },
    /// A shape kind the pipeline has no inertia formula for.
    ///
    /// Bodies carrying it fall back to an identity tensor scaled by mass,
    /// which behaves like a unit sphere of the same mass. The fallback is
    /// explicit so an unrecognized host shape can never leave a stale
    /// tensor from a previous shape in place.
    Unknown,
}

impl CollisionShape {
    /// Computes the diagonal of the local inertia tensor for a body of the
    /// given mass carrying this shape.
    ///
    /// Solid sphere: `I = 2/5 m r²` on every axis. Box of full extents
    /// `(sx, sy, sz)`: `Ix = 1/12 m (sy² + sz²)` and cyclically for the
    /// other axes. `Unknown` yields `m` on every axis.
    pub fn inertia_diagonal(&self, mass: f32) -> Vec3 {
        match *self {
            CollisionShape::Sphere { radius } => {
                let i = (2.0 / 5.0) * mass * radius * radius;
                Vec3::splat(i)
            }
            CollisionShape::Box { size } => {
                let one_twelfth = 1.0 / 12.0;
                Vec3::new(
                    one_twelfth * mass * (size.y * size.y + size.z * size.z),
                    one_twelfth * mass * (size.x * size.x + size.z * size.z),
                    one_twelfth * mass * (size.x * size.x + size.y * size.y),
                )
            }
            CollisionShape::Unknown => {
                log::warn!("No inertia formula for shape {self:?}; using identity scaled by mass");
                Vec3::splat(mass)
            }
        }
    }
}

impl Default for CollisionShape {
    /// Returns a unit sphere.
    fn default() -> Self {
        CollisionShape::Sphere { radius: 1.0 }
    }
}
