// ara-core: pheromone-based ant routing core for on-demand MANET route discovery
// Copyright (C) 2024  ara-core contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! The pheromone routing table.

use crate::address::{Address, InterfaceId};
use crate::packet::Packet;
use crate::routing::EvaporationPolicy;
use log::trace;
use std::collections::HashMap;
use std::time::Duration;

/// One `(destination, next_hop, interface)` edge and its pheromone value.
///
/// `(destination, next_hop, interface)` is the uniqueness key: a
/// [`RoutingTable`] never holds two entries with the same key. A pheromone
/// of `0.0` is indistinguishable from the entry's absence.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingTableEntry {
    /// Destination this edge routes towards.
    pub destination: Address,
    /// Next hop to forward towards on this edge.
    pub next_hop: Address,
    /// Interface this edge is reachable over.
    pub interface: InterfaceId,
    /// Current pheromone value, always `>= 0`.
    pub pheromone: f32,
}

type Key = (Address, Address, InterfaceId);

#[derive(Debug, Clone)]
struct StoredEntry {
    pheromone: f32,
    inserted_seq: u64,
}

/// The pheromone-weighted routing table.
///
/// Maps `(destination, next_hop, interface)` to a pheromone value `phi`.
/// Pheromones never go negative; an entry whose pheromone decays to `<= 0`
/// is removed outright rather than kept at zero.
#[derive(Debug)]
pub struct RoutingTable {
    entries: HashMap<Key, StoredEntry>,
    insertion_counter: u64,
    evaporation_policy: Box<dyn EvaporationPolicy>,
    last_evaporation: Duration,
}

impl RoutingTable {
    /// Builds an empty routing table governed by `evaporation_policy`.
    /// `now` seeds the evaporation clock so the first
    /// [`RoutingTable::trigger_evaporation`] call ages entries from
    /// construction time, not from the Unix epoch.
    pub fn new(evaporation_policy: Box<dyn EvaporationPolicy>, now: Duration) -> Self {
        RoutingTable {
            entries: HashMap::new(),
            insertion_counter: 0,
            evaporation_policy,
            last_evaporation: now,
        }
    }

    /// Creates or overwrites the pheromone value of `(destination, next_hop,
    /// interface)`. Not additive: the stored value always becomes exactly
    /// `phi`.
    pub fn update(&mut self, destination: Address, next_hop: Address, interface: InterfaceId, phi: f32) {
        let phi = phi.max(0.0);
        let key = (destination, next_hop, interface);
        if phi <= 0.0 {
            self.entries.remove(&key);
            return;
        }
        let inserted_seq = match self.entries.get(&key) {
            Some(existing) => existing.inserted_seq,
            None => {
                let seq = self.insertion_counter;
                self.insertion_counter += 1;
                seq
            }
        };
        self.entries.insert(key, StoredEntry { pheromone: phi, inserted_seq });
    }

    /// True iff no entry exists yet for `(destination, next_hop,
    /// interface)`.
    pub fn is_new_route(&self, destination: &Address, next_hop: &Address, interface: InterfaceId) -> bool {
        !self.exists(destination, next_hop, interface)
    }

    /// True iff an entry exists for `(destination, next_hop, interface)`.
    pub fn exists(&self, destination: &Address, next_hop: &Address, interface: InterfaceId) -> bool {
        self.entries.contains_key(&Self::key(destination, next_hop, interface))
    }

    /// Removes the entry for `(destination, next_hop, interface)`, if any.
    pub fn remove_entry(&mut self, destination: &Address, next_hop: &Address, interface: InterfaceId) {
        self.entries.remove(&Self::key(destination, next_hop, interface));
    }

    /// Returns the pheromone value of `(destination, next_hop, interface)`,
    /// or `0.0` if no such entry exists.
    pub fn pheromone(&self, destination: &Address, next_hop: &Address, interface: InterfaceId) -> f32 {
        self.entries
            .get(&Self::key(destination, next_hop, interface))
            .map(|e| e.pheromone)
            .unwrap_or(0.0)
    }

    /// All entries for `packet.destination()` whose `next_hop` is neither
    /// `packet.source()` nor `packet.sender()` (loop avoidance). Entries are
    /// returned in insertion order so that callers breaking ties by
    /// insertion order (the reference [`ForwardingPolicy`](super::ForwardingPolicy))
    /// get a stable, deterministic pick; this crate otherwise makes no
    /// promise about ordering.
    pub fn possible_next_hops(&self, packet: &Packet) -> Vec<RoutingTableEntry> {
        self.matching_entries(packet.destination(), |key| {
            key.1 != *packet.source() && key.1 != *packet.sender()
        })
    }

    /// Every entry for `destination`, without the sender/source exclusion
    /// `possible_next_hops` applies. Used by the route-deletion cascade and
    /// the broken-link handler, which reason about a destination in the
    /// abstract rather than about a specific in-flight packet.
    pub fn entries_for_destination(&self, destination: &Address) -> Vec<RoutingTableEntry> {
        self.matching_entries(destination, |_| true)
    }

    fn matching_entries(
        &self,
        destination: &Address,
        filter: impl Fn(&Key) -> bool,
    ) -> Vec<RoutingTableEntry> {
        let mut matches: Vec<(&Key, &StoredEntry)> = self
            .entries
            .iter()
            .filter(|(key, _)| key.0 == *destination && filter(key))
            .collect();
        matches.sort_by_key(|(_, stored)| stored.inserted_seq);
        matches
            .into_iter()
            .map(|(key, stored)| RoutingTableEntry {
                destination: key.0.clone(),
                next_hop: key.1.clone(),
                interface: key.2,
                pheromone: stored.pheromone,
            })
            .collect()
    }

    /// True iff `packet` has at least one usable next hop.
    pub fn is_deliverable(&self, packet: &Packet) -> bool {
        !self.possible_next_hops(packet).is_empty()
    }

    /// Every `(destination, entry)` pair whose `next_hop == hop`.
    pub fn routes_leading_over(&self, hop: &Address) -> Vec<(Address, RoutingTableEntry)> {
        let mut matches: Vec<(&Key, &StoredEntry)> =
            self.entries.iter().filter(|(key, _)| key.1 == *hop).collect();
        matches.sort_by_key(|(_, stored)| stored.inserted_seq);
        matches
            .into_iter()
            .map(|(key, stored)| {
                (
                    key.0.clone(),
                    RoutingTableEntry {
                        destination: key.0.clone(),
                        next_hop: key.1.clone(),
                        interface: key.2,
                        pheromone: stored.pheromone,
                    },
                )
            })
            .collect()
    }

    /// Applies the evaporation policy based on the real time elapsed since
    /// the last application, advancing the internal clock by whole
    /// intervals only. Idempotent: two calls with no time advancing between
    /// them produce identical pheromone values. Entries decaying to `<= 0`
    /// are removed.
    pub fn trigger_evaporation(&mut self, now: Duration) {
        let interval = self.evaporation_policy.time_interval();
        if interval.is_zero() || now <= self.last_evaporation {
            return;
        }
        let elapsed = now - self.last_evaporation;
        let periods = (elapsed.as_nanos() / interval.as_nanos().max(1)) as u32;
        if periods == 0 {
            return;
        }
        let aged_by = interval * periods;
        self.last_evaporation += aged_by;

        let policy = &self.evaporation_policy;
        self.entries.retain(|key, stored| {
            let decayed = policy.decay(stored.pheromone, aged_by);
            if decayed <= 0.0 {
                trace!("evaporated route {:?} -> {:?} on {} to zero", key.0, key.1, key.2);
                false
            } else {
                stored.pheromone = decayed;
                true
            }
        });
    }

    fn key(destination: &Address, next_hop: &Address, interface: InterfaceId) -> Key {
        (destination.clone(), next_hop.clone(), interface)
    }
}
