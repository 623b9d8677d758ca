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

//! # Collision Detection Ingestion
//!
//! The detector does no geometric queries of its own. It pulls the host's
//! per-body contact lists, classifies the other party of each contact, and
//! accumulates manifolds for the resolver. It touches nothing but the
//! manifold store.

use std::collections::HashMap;

use sable_core::handle::{BodyHandle, ColliderId};
use sable_core::manifold::{CollisionPartner, Contact, ManifoldStore};
use sable_core::math::Vec3;

use crate::host::{ColliderClass, ContactQuery};
use crate::world::BodyArena;

/// Builds contact manifolds from host contact reports.
#[derive(Debug, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    /// Creates a detector.
    pub fn new() -> Self {
        Self
    }

    /// Queries the host for every registered body's contacts and
    /// accumulates them into `store`.
    ///
    /// The other party of each contact is resolved in order: a collider id
    /// registered in `id_map` is a dynamic body; otherwise recognized
    /// static geometry, and anything still ambiguous, is treated as static
    /// so the contact is never dropped.
    ///
    /// Bodies the host has no contact state for are skipped. Penetration
    /// is the projection onto the normal of the separation between the two
    /// reported surface points, positive when overlapping.
    pub fn detect(
        &self,
        store: &mut ManifoldStore,
        bodies: &BodyArena,
        id_map: &HashMap<ColliderId, BodyHandle>,
        host: &dyn ContactQuery,
    ) {
        for (handle, body) in bodies.iter() {
            let Some(reports) = host.body_contacts(body.collider()) else {
                log::debug!("No host contact state for body {handle:?}; skipping");
                continue;
            };

            for report in reports {
                let normal = report.normal.normalize();
                if normal == Vec3::ZERO {
                    log::trace!("Degenerate contact normal for body {handle:?}; skipping contact");
                    continue;
                }

                let partner = match id_map.get(&report.other) {
                    Some(&other) => CollisionPartner::Dynamic(other),
                    None => {
                        if report.other_class == ColliderClass::Unknown {
                            log::trace!(
                                "Unclassified collider {:?}; treating as static",
                                report.other
                            );
                        }
                        CollisionPartner::Static
                    }
                };

                let penetration = normal.dot(report.other_position - report.position);
                store.push_contact(
                    handle,
                    partner,
                    Contact {
                        position: report.position,
                        normal,
                        penetration,
                    },
                );
            }
        }
    }
}
