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

//! # Host Engine Boundary
//!
//! Traits the host engine implements to feed the pipeline and receive its
//! results. The pipeline owns no broad or narrow phase: contact generation
//! is the host's job, consumed here as per-body [`ContactReport`] lists.

use sable_core::error::PhysicsError;
use sable_core::handle::ColliderId;
use sable_core::math::{Transform, Vec3};

/// How the host classifies the other party of a contact.
///
/// Classification happens once, at this boundary. Anything the host cannot
/// identify arrives as `Unknown` and is treated conservatively as static
/// geometry by the detector, so ambiguous contacts are never dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderClass {
    /// A collider the host knows to be a dynamic physics body.
    Dynamic,
    /// Recognized static environment geometry.
    StaticGeometry,
    /// The host could not classify the collider.
    Unknown,
}

/// One contact entry from the host's narrow phase, for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactReport {
    /// World-space contact point on the reporting body's surface.
    pub position: Vec3,
    /// Contact normal pointing from the other collider toward the
    /// reporting body (the direction the body must move to separate).
    /// Need not be exactly unit length; the detector normalizes it.
    pub normal: Vec3,
    /// World-space contact point on the other collider's surface.
    pub other_position: Vec3,
    /// The other collider's host id.
    pub other: ColliderId,
    /// The host's classification of the other collider.
    pub other_class: ColliderClass,
}

/// Read access to the host's per-body contact state.
pub trait ContactQuery {
    /// Returns the current contact list for a collider, or `None` when the
    /// host has no physics state for it (destroyed or not yet created).
    /// The `None` case is non-fatal; the detector skips the body.
    fn body_contacts(&self, collider: ColliderId) -> Option<Vec<ContactReport>>;
}

/// Write access to the host's body transforms.
///
/// The world pushes every body's transform after integration and again
/// after positional correction. A sink failure for one body is logged and
/// skipped; it never aborts the tick.
pub trait TransformSink {
    /// Pushes an updated transform for a collider to the host.
    ///
    /// A host with no live state for the collider reports
    /// [`PhysicsError::MissingBodyState`].
    fn push_transform(
        &mut self,
        collider: ColliderId,
        transform: &Transform,
    ) -> Result<(), PhysicsError>;
}
