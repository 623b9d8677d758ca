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

//! # Contact Manifolds
//!
//! Per-pair contact accumulation for one simulation tick. A manifold
//! groups every contact point reported between one body and one partner
//! (another dynamic body, or the static environment as a whole) so the
//! solver can resolve them together.
//!
//! Keys are canonical: a pair of dynamic bodies always maps to a single
//! manifold regardless of which side reported the contact, with the
//! contact normal flipped to the canonical orientation on insertion.

use std::collections::HashMap;

use crate::handle::BodyHandle;
use crate::math::Vec3;

/// A single contact point between two colliding objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Contact position in world space.
    pub position: Vec3,
    /// Unit contact normal in world space, pointing from the partner
    /// toward the manifold's primary body. This is the direction the
    /// primary body must move to separate.
    pub normal: Vec3,
    /// Penetration depth along the normal, in meters. Positive means
    /// overlap.
    pub penetration: f32,
}

/// The other side of a contact pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionPartner {
    /// Another registered rigid body.
    Dynamic(BodyHandle),
    /// Static environment geometry. All static contacts of a body share
    /// one manifold; the solver never moves this side.
    Static,
}

/// Canonical identity of a contact pair for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManifoldKey {
    /// The primary dynamic body of the pair.
    pub body: BodyHandle,
    /// The partner the body is in contact with.
    pub partner: CollisionPartner,
}

impl ManifoldKey {
    /// Builds the canonical key for a pair and reports whether the caller's
    /// orientation was flipped to reach it.
    ///
    /// For dynamic pairs the lower handle is always the primary body, so
    /// `(a, b)` and `(b, a)` collapse to the same manifold. When the input
    /// is flipped, contact normals must be negated before insertion.
    pub fn canonical(body: BodyHandle, partner: CollisionPartner) -> (Self, bool) {
        match partner {
            CollisionPartner::Dynamic(other) if other < body => (
                Self {
                    body: other,
                    partner: CollisionPartner::Dynamic(body),
                },
                true,
            ),
            _ => (Self { body, partner }, false),
        }
    }
}

/// All contact points between one body and one partner for the current tick.
#[derive(Debug, Clone)]
pub struct Manifold {
    /// The primary body. For dynamic pairs this is the lower handle.
    pub body: BodyHandle,
    /// The partner of the pair.
    pub partner: CollisionPartner,
    /// Accumulated contact points, normals oriented partner -> body.
    pub contacts: Vec<Contact>,
}

impl Manifold {
    fn new(key: ManifoldKey) -> Self {
        Self {
            body: key.body,
            partner: key.partner,
            contacts: Vec::new(),
        }
    }
}

/// Tick-scoped storage of manifolds, keyed by canonical pair identity.
///
/// Iteration order is insertion order, so a tick with the same contact
/// reports always resolves in the same order.
#[derive(Debug, Default)]
pub struct ManifoldStore {
    manifolds: HashMap<ManifoldKey, Manifold>,
    order: Vec<ManifoldKey>,
}

impl ManifoldStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all manifolds. Called at the start of every tick; manifolds
    /// never persist across ticks.
    pub fn clear(&mut self) {
        self.manifolds.clear();
        self.order.clear();
    }

    /// Accumulates a contact into the pair's manifold, creating the
    /// manifold on first touch.
    ///
    /// `contact.normal` is interpreted as pointing from `partner` toward
    /// `body`; if the canonical key swaps the pair, the stored normal is
    /// negated so it stays oriented partner -> primary.
    pub fn push_contact(&mut self, body: BodyHandle, partner: CollisionPartner, contact: Contact) {
        let (key, flipped) = ManifoldKey::canonical(body, partner);
        let stored = if flipped {
            Contact {
                normal: -contact.normal,
                ..contact
            }
        } else {
            contact
        };

        let manifold = self.manifolds.entry(key).or_insert_with(|| {
            self.order.push(key);
            Manifold::new(key)
        });
        manifold.contacts.push(stored);
    }

    /// Looks up the manifold for a pair, if any contact was reported for it
    /// this tick. The lookup canonicalizes, so either orientation finds it.
    pub fn get(&self, body: BodyHandle, partner: CollisionPartner) -> Option<&Manifold> {
        let (key, _) = ManifoldKey::canonical(body, partner);
        self.manifolds.get(&key)
    }

    /// Iterates manifolds in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Manifold> {
        self.order.iter().filter_map(|key| self.manifolds.get(key))
    }

    /// Number of distinct contact pairs this tick.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` when no contacts were reported this tick.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
