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

//! # Sable Dynamics
//!
//! The pipeline half of the Sable physics engine: it consumes contact
//! reports from a host engine's collision system, builds manifolds,
//! resolves them with sequential impulses plus positional correction, and
//! integrates body motion, pushing the resulting transforms back to the
//! host.
//!
//! The entry point is [`PhysicsWorld`]; hosts plug in by implementing the
//! [`host::ContactQuery`] and [`host::TransformSink`] traits.

#![warn(missing_docs)]

pub mod config;
pub mod detector;
pub mod host;
pub mod resolver;
pub mod world;

pub use config::SolverConfig;
pub use detector::CollisionDetector;
pub use host::{ColliderClass, ContactQuery, ContactReport, TransformSink};
pub use resolver::CollisionResolver;
pub use world::{BodyArena, PhysicsWorld};

pub use sable_core::{
    BodyDesc, BodyHandle, ColliderId, CollisionPartner, CollisionShape, Contact, Manifold,
    ManifoldStore, PhysicsError, RigidBody,
};
