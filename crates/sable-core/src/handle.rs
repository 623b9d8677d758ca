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

//! Stable handles identifying bodies and host colliders.
//!
//! Manifold keys hash and compare these integer handles rather than
//! pointers, so pair identity stays well defined across serialization or
//! relocation of the body storage.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// Handle to a rigid body registered in a `PhysicsWorld`.
///
/// The value is the body's slot index in the world's arena. Handles are only
/// meaningful for the world that issued them; operations on stale handles
/// report `PhysicsError::InvalidBody`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    /// Returns the arena slot index of this handle.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Opaque identifier of a collider resource owned by the host engine.
///
/// This is the id the host's collision system reports contacts against;
/// the pipeline never interprets the value, it only maps it back to
/// registered bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode)]
pub struct ColliderId(pub u64);
