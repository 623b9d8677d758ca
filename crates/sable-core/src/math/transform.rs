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

//! Defines the rigid `Transform` type: a rotation basis plus a translation.

use serde::{Deserialize, Serialize};

use super::{Mat3, Quaternion, Vec3};

/// A rigid transform combining an orientation basis and an origin.
///
/// The basis is expected to stay orthonormal; the integrator enforces this
/// after every incremental rotation. Unlike a general affine transform there
/// is no scale or shear component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Transform {
    /// The orientation of the body as a rotation matrix.
    pub basis: Mat3,
    /// The translation (geometric origin) of the body in world space.
    pub origin: Vec3,
}

impl Transform {
    /// The identity transform: no rotation, origin at the world origin.
    pub const IDENTITY: Self = Self {
        basis: Mat3::IDENTITY,
        origin: Vec3::ZERO,
    };

    /// Creates a transform from a basis and an origin.
    #[inline]
    pub const fn new(basis: Mat3, origin: Vec3) -> Self {
        Self { basis, origin }
    }

    /// Creates a transform with the identity basis at the given origin.
    #[inline]
    pub const fn from_origin(origin: Vec3) -> Self {
        Self {
            basis: Mat3::IDENTITY,
            origin,
        }
    }

    /// Creates a transform from a position and a rotation quaternion.
    ///
    /// This is the constructor host engines typically use, since they
    /// exchange orientations as quaternions.
    #[inline]
    pub fn from_position_rotation(position: Vec3, rotation: Quaternion) -> Self {
        Self {
            basis: Mat3::from_quat(rotation),
            origin: position,
        }
    }

    /// Transforms a point from local space into world space.
    #[inline]
    pub fn xform(&self, point: Vec3) -> Vec3 {
        self.basis * point + self.origin
    }

    /// Transforms a world-space point into local space.
    ///
    /// Relies on the basis being orthonormal (transpose == inverse).
    #[inline]
    pub fn xform_inv(&self, point: Vec3) -> Vec3 {
        self.basis.transpose() * (point - self.origin)
    }

    /// Returns the orientation of this transform as a quaternion.
    #[inline]
    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_mat3(&self.basis)
    }
}

impl Default for Transform {
    /// Returns the identity transform.
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}
