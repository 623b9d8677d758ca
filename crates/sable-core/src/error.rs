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

//! Defines the error types of the physics pipeline.
//!
//! Errors only surface from registry-level operations. Per-contact
//! degeneracies (a near-zero impulse denominator, a zero-length contact
//! normal) are deliberately *not* errors: they represent physically
//! negligible contacts and are skipped inside the solver.

use crate::handle::{BodyHandle, ColliderId};
use std::fmt;

/// An error produced by the physics pipeline's registry or host-sync operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicsError {
    /// The handle does not refer to a live body in this world.
    InvalidBody {
        /// The offending handle.
        handle: BodyHandle,
    },
    /// A body is already registered for this host collider id.
    DuplicateCollider {
        /// The collider id that is already mapped.
        collider: ColliderId,
    },
    /// The host has no physics state for this collider (destroyed or never created).
    MissingBodyState {
        /// The collider id the host could not resolve.
        collider: ColliderId,
    },
    /// A collision layer or mask bit index outside the valid `1..=32` range.
    LayerOutOfRange {
        /// The rejected layer number.
        layer: u32,
    },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidBody { handle } => {
                write!(f, "No live body for handle {handle:?}")
            }
            PhysicsError::DuplicateCollider { collider } => {
                write!(f, "A body is already registered for collider {collider:?}")
            }
            PhysicsError::MissingBodyState { collider } => {
                write!(f, "Host reports no physics state for collider {collider:?}")
            }
            PhysicsError::LayerOutOfRange { layer } => {
                write!(f, "Layer number {layer} outside the valid range 1..=32")
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
