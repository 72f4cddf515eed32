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

//! Per-source sequence-number and known-intermediate-hop memory, used for
//! loop and replay detection.

use crate::address::Address;
use crate::packet::Packet;
use std::collections::{HashMap, HashSet};

/// Remembers, per source address, every sequence number ever seen and
/// every intermediate hop (sender and previous-hop) ever observed.
#[derive(Debug, Default)]
pub struct DuplicateFilter {
    seen: HashMap<Address, HashSet<u32>>,
    known_hops: HashMap<Address, HashSet<Address>>,
}

impl DuplicateFilter {
    /// Builds an empty filter.
    pub fn new() -> Self {
        DuplicateFilter::default()
    }

    /// True iff `packet.sequence_number()` has already been registered for
    /// `packet.source()`.
    pub fn has_seen(&self, packet: &Packet) -> bool {
        self.seen
            .get(packet.source())
            .map(|seqs| seqs.contains(&packet.sequence_number()))
            .unwrap_or(false)
    }

    /// Registers `packet` as seen: records its sequence number, and records
    /// its sender and (if distinct) previous hop as known intermediate hops
    /// for its source.
    pub fn register(&mut self, packet: &Packet) {
        self.seen
            .entry(packet.source().clone())
            .or_insert_with(HashSet::new)
            .insert(packet.sequence_number());

        let hops = self.known_hops.entry(packet.source().clone()).or_insert_with(HashSet::new);
        hops.insert(packet.sender().clone());
        if packet.previous_hop() != packet.sender() {
            hops.insert(packet.previous_hop().clone());
        }
    }

    /// Clears the known-intermediate-hop set for `destination`, without
    /// touching the sequence-number memory. Called when a fresh discovery
    /// round begins so stale hop knowledge from a previous attempt cannot
    /// suppress a legitimately new route.
    pub fn forget_hops(&mut self, destination: &Address) {
        if let Some(hops) = self.known_hops.get_mut(destination) {
            hops.clear();
        }
    }

    /// True iff `packet.sender()` or `packet.previous_hop()` has already
    /// been recorded as a known intermediate hop for `packet.source()`.
    pub fn has_previous_node_been_seen(&self, packet: &Packet) -> bool {
        self.known_hops
            .get(packet.source())
            .map(|hops| hops.contains(packet.sender()) || hops.contains(packet.previous_hop()))
            .unwrap_or(false)
    }
}
