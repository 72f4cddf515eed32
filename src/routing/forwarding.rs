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

//! Next-hop selection policy.

use crate::packet::Packet;
use crate::routing::{RoutingTable, RoutingTableEntry};
use std::fmt::Debug;

/// Behavior object selecting which next hop to forward a deliverable
/// packet over.
pub trait ForwardingPolicy: Debug {
    /// Chooses a next hop for `packet` among `table.possible_next_hops(packet)`.
    /// Returns `None` if and only if the table is not deliverable for this
    /// packet (callers are expected to have already checked
    /// [`RoutingTable::is_deliverable`]).
    fn choose(&self, packet: &Packet, table: &RoutingTable) -> Option<RoutingTableEntry>;
}

/// Reference "best pheromone" policy: selects the entry with the highest
/// `phi` among the possible next hops, breaking ties by insertion order
/// (the table returns candidates in insertion order already, so the first
/// strictly-greater entry encountered wins).
#[derive(Debug, Clone, Copy, Default)]
pub struct BestPheromoneForwardingPolicy;

impl ForwardingPolicy for BestPheromoneForwardingPolicy {
    fn choose(&self, packet: &Packet, table: &RoutingTable) -> Option<RoutingTableEntry> {
        let mut best: Option<RoutingTableEntry> = None;
        for candidate in table.possible_next_hops(packet) {
            match &best {
                Some(current) if candidate.pheromone <= current.pheromone => {}
                _ => best = Some(candidate),
            }
        }
        best
    }
}
