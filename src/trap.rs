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

//! The packet trap: a holding area for packets awaiting a route.

use crate::address::Address;
use crate::packet::Packet;
use crate::routing::RoutingTable;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Holds packets that cannot yet be forwarded, keyed by destination, until
/// the routing table becomes deliverable for that destination.
///
/// The trap keeps a back-reference to the routing table it checks
/// deliverability against: the [`AraClient`](crate::client::AraClient) owns
/// the canonical [`RoutingTable`], and hands the trap a cheap
/// [`Rc`]/[`RefCell`] handle to it rather than the trap owning a second copy.
#[derive(Debug)]
pub struct PacketTrap {
    trapped: HashMap<Address, VecDeque<Packet>>,
    routing_table: Rc<RefCell<RoutingTable>>,
}

impl PacketTrap {
    /// Builds an empty trap bound to `routing_table`.
    pub fn new(routing_table: Rc<RefCell<RoutingTable>>) -> Self {
        PacketTrap { trapped: HashMap::new(), routing_table }
    }

    /// Replaces the routing table this trap checks deliverability against.
    pub fn set_routing_table(&mut self, routing_table: Rc<RefCell<RoutingTable>>) {
        self.routing_table = routing_table;
    }

    /// Appends `packet` to the queue for its destination.
    pub fn trap(&mut self, packet: Packet) {
        self.trapped.entry(packet.destination().clone()).or_insert_with(VecDeque::new).push_back(packet);
    }

    /// Removes and returns, in FIFO order, every trapped packet for
    /// `destination` that is currently deliverable against this trap's
    /// routing table.
    ///
    /// Packets that remain undeliverable stay trapped, in their original
    /// relative order, for a future call.
    pub fn untrap_deliverable(&mut self, destination: &Address) -> Vec<Packet> {
        let table = self.routing_table.borrow();
        let queue = match self.trapped.get_mut(destination) {
            Some(queue) => queue,
            None => return Vec::new(),
        };
        let mut deliverable = Vec::new();
        let mut remaining = VecDeque::with_capacity(queue.len());
        while let Some(packet) = queue.pop_front() {
            if table.is_deliverable(&packet) {
                deliverable.push(packet);
            } else {
                remaining.push_back(packet);
            }
        }
        *queue = remaining;
        deliverable
    }

    /// Removes and returns every trapped packet for `destination`,
    /// regardless of deliverability, in FIFO order. Used when route
    /// discovery has permanently failed for that destination.
    pub fn remove_for(&mut self, destination: &Address) -> Vec<Packet> {
        self.trapped.remove(destination).map(Vec::from).unwrap_or_default()
    }

    /// Number of packets currently trapped for `destination`.
    pub fn count(&self, destination: &Address) -> usize {
        self.trapped.get(destination).map(VecDeque::len).unwrap_or(0)
    }

    /// Drains every trapped packet across every destination, in FIFO order
    /// per destination, handing each to `on_drained`. Used at teardown so
    /// no packet remains trapped across shutdown.
    pub fn drain_all(&mut self, mut on_drained: impl FnMut(Packet)) {
        for (_, queue) in self.trapped.drain() {
            for packet in queue {
                on_drained(packet);
            }
        }
    }
}
