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

//! # Sable Core
//!
//! Foundational crate of the Sable physics pipeline: math primitives,
//! rigid-body state and integration, collision shapes with their inertia
//! tensors, and the per-tick contact manifold store.
//!
//! The pipeline driver (detection, impulse resolution, world orchestration)
//! lives in `sable-dynamics`; this crate holds the types it operates on.

#![warn(missing_docs)]

pub mod body;
pub mod error;
pub mod handle;
pub mod manifold;
pub mod math;
pub mod shape;

pub use body::{BodyDesc, RigidBody};
pub use error::PhysicsError;
pub use handle::{BodyHandle, ColliderId};
pub use manifold::{CollisionPartner, Contact, Manifold, ManifoldKey, ManifoldStore};
pub use shape::CollisionShape;
