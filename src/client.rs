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

//! The orchestrator tying every collaborator together: [`AraClient`].
//!
//! A host application drives an `AraClient` with exactly three kinds of
//! events — [`AraClient::send_packet`] for a packet submitted locally,
//! [`AraClient::receive_packet`] for a packet an interface delivered, and
//! [`AraClient::on_timer_expired`] for a `Clock` callback — and never calls
//! back into it re-entrantly from inside one of those three.

use crate::address::{Address, InterfaceId};
use crate::clock::Clock;
use crate::clock::TimerId;
use crate::config::AraConfig;
use crate::discovery::{DeliveryTimeout, DiscoveryDriver, DiscoveryTimeout};
use crate::duplicate_filter::DuplicateFilter;
use crate::host::Host;
use crate::interfaces::NetworkInterface;
use crate::packet::{Packet, PacketFactory, PacketType};
use crate::routing::{EvaporationPolicy, ForwardingPolicy, PathReinforcementPolicy, RoutingTable};
use crate::sequence::SequenceCounter;
use crate::trap::PacketTrap;
use log::{debug, error, trace, warn};
use std::cell::RefCell;
use std::rc::Rc;

/// The ARA routing core for a single node.
///
/// Owns the canonical [`RoutingTable`] (shared with its [`PacketTrap`]
/// through an `Rc<RefCell<_>>`, per the ownership graph this crate's data
/// model is built around), the [`DiscoveryDriver`], the [`DuplicateFilter`],
/// the node's [`SequenceCounter`], and every external collaborator handed to
/// it at construction.
pub struct AraClient {
    config: AraConfig,
    routing_table: Rc<RefCell<RoutingTable>>,
    trap: PacketTrap,
    discovery: DiscoveryDriver,
    duplicate_filter: DuplicateFilter,
    interfaces: Vec<Box<dyn NetworkInterface>>,
    clock: Box<dyn Clock>,
    host: Box<dyn Host>,
    packet_factory: Box<dyn PacketFactory>,
    forwarding_policy: Box<dyn ForwardingPolicy>,
    reinforcement_policy: Box<dyn PathReinforcementPolicy>,
    sequence: SequenceCounter,
}

impl AraClient {
    /// Builds a client over the given interfaces and collaborators.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: AraConfig,
        interfaces: Vec<Box<dyn NetworkInterface>>,
        mut clock: Box<dyn Clock>,
        host: Box<dyn Host>,
        packet_factory: Box<dyn PacketFactory>,
        evaporation_policy: Box<dyn EvaporationPolicy>,
        reinforcement_policy: Box<dyn PathReinforcementPolicy>,
        forwarding_policy: Box<dyn ForwardingPolicy>,
    ) -> Self {
        let now = clock.now();
        let routing_table = Rc::new(RefCell::new(RoutingTable::new(evaporation_policy, now)));
        let trap = PacketTrap::new(Rc::clone(&routing_table));
        AraClient {
            config,
            routing_table,
            trap,
            discovery: DiscoveryDriver::new(),
            duplicate_filter: DuplicateFilter::new(),
            interfaces,
            clock,
            host,
            packet_factory,
            forwarding_policy,
            reinforcement_policy,
            sequence: SequenceCounter::new(),
        }
    }

    /// A clone of the `Rc` handle to the canonical routing table, for
    /// callers (tests, diagnostics) that want to inspect it without going
    /// through the client's own operations.
    pub fn routing_table(&self) -> Rc<RefCell<RoutingTable>> {
        Rc::clone(&self.routing_table)
    }

    /// Number of packets currently trapped awaiting a route to `destination`.
    pub fn trapped_packet_count(&self, destination: &Address) -> usize {
        self.trap.count(destination)
    }

    /// True iff route discovery is currently in flight (discovering or
    /// delivering) for `destination`.
    pub fn is_discovering(&self, destination: &Address) -> bool {
        self.discovery.is_discovering(destination)
    }

    /// Submits `packet` for transmission: if discovery for its destination
    /// is already running, traps it; if the routing table is already
    /// deliverable, forwards it immediately; otherwise, if it originates
    /// locally, starts a fresh discovery round, and if not, advertises a
    /// ROUTE_FAILURE and drops it.
    pub fn send_packet(&mut self, packet: Packet) {
        self.trigger_evaporation();

        if packet.ttl() == 0 {
            warn!("dropping packet {} to {:?}: TTL exhausted before transmission", packet.sequence_number(), packet.destination());
            return;
        }

        let destination = packet.destination().clone();

        if self.discovery.is_discovering(&destination) {
            trace!("discovery for {:?} already running, trapping packet {}", destination, packet.sequence_number());
            self.trap.trap(packet);
            return;
        }

        let deliverable = self.routing_table.borrow().is_deliverable(&packet);
        if deliverable {
            self.forward_packet(packet);
            return;
        }

        if self.is_local_address(packet.source()) {
            debug!("no route to {:?}, starting discovery for packet {}", destination, packet.sequence_number());
            self.trap.trap(packet.clone());
            self.start_discovery(packet);
        } else {
            warn!("no route to {:?} and packet did not originate here, advertising ROUTE_FAILURE", destination);
            self.broadcast_route_failure(&destination);
        }
    }

    /// Handles `packet` as delivered by `interface`: updates routing
    /// knowledge from its observed path, decrements its TTL, and either
    /// treats it as a duplicate or dispatches it by type.
    pub fn receive_packet(&mut self, mut packet: Packet, interface: InterfaceId) {
        self.update_routing_from(&packet, interface);
        packet.decrease_ttl();

        if self.duplicate_filter.has_seen(&packet) {
            self.handle_duplicate(packet, interface);
        } else {
            self.duplicate_filter.register(&packet);
            self.dispatch(packet, interface);
        }
    }

    /// Handles the expiry of `timer`, dispatching it to whichever of the
    /// discovery or delivery timer tables recognizes it. Logs and otherwise
    /// ignores a `timer` neither table recognizes.
    pub fn on_timer_expired(&mut self, timer: TimerId) {
        match self.discovery.on_discovery_timeout(
            timer,
            &mut self.interfaces,
            self.packet_factory.as_ref(),
            &mut self.duplicate_filter,
            &mut self.trap,
            self.clock.as_mut(),
            &mut self.sequence,
            &self.config,
        ) {
            DiscoveryTimeout::Retried => return,
            DiscoveryTimeout::Exhausted(undeliverable) => {
                for packet in undeliverable {
                    self.host.packet_not_deliverable(packet);
                }
                return;
            }
            DiscoveryTimeout::Unknown => {}
        }

        match self.discovery.on_delivery_timeout(timer, &mut self.trap) {
            DeliveryTimeout::Deliver(packets) => {
                for packet in packets {
                    self.send_packet(packet);
                }
            }
            DeliveryTimeout::Unknown => {
                error!("expired timer {} matches neither a discovery nor a delivery timer", timer);
            }
        }
    }

    /// Deletes the routing entry for `(destination, next_hop, interface)`;
    /// a no-op if no such entry exists. If exactly one entry for
    /// `destination` remains after deletion, advertises a
    /// ROUTE_FAILURE back over that entry's own next hop. If none remain,
    /// broadcasts a ROUTE_FAILURE on every interface.
    pub fn delete_route(&mut self, destination: &Address, next_hop: &Address, interface: InterfaceId) {
        if !self.routing_table.borrow().exists(destination, next_hop, interface) {
            return;
        }
        self.routing_table.borrow_mut().remove_entry(destination, next_hop, interface);
        debug!("deleted route to {:?} via {:?} on {}", destination, next_hop, interface);

        let remaining = self.routing_table.borrow().entries_for_destination(destination);
        match remaining.len() {
            0 => self.broadcast_route_failure(destination),
            1 => {
                let last = &remaining[0];
                if let Some(iface) = self.interfaces.iter_mut().find(|i| i.id() == last.interface) {
                    let local_sender = iface.local_address();
                    let sequence_number = self.sequence.next();
                    let failure =
                        self.packet_factory.make_route_failure(destination.clone(), local_sender, sequence_number);
                    if let Err(e) = iface.send(&failure, &last.next_hop) {
                        warn!("failed to send ROUTE_FAILURE for {:?} via {}: {}", destination, last.interface, e);
                    }
                }
            }
            _ => {}
        }
    }

    /// Reacts to `broken_hop` becoming unreachable while carrying `packet`,
    /// as reported by `interface`: deletes every route this node has
    /// through `broken_hop`, then reconsiders `packet` exactly as
    /// `send_packet` would, except that it never starts a second discovery
    /// round if one for its destination is already running.
    pub fn on_broken_link(&mut self, packet: Packet, broken_hop: &Address, interface: InterfaceId) {
        debug!("link to {:?} reported broken by {}", broken_hop, interface);
        let routes = self.routing_table.borrow().routes_leading_over(broken_hop);
        for (destination, entry) in routes {
            self.delete_route(&destination, broken_hop, entry.interface);
        }

        let destination = packet.destination().clone();
        let deliverable = self.routing_table.borrow().is_deliverable(&packet);
        if deliverable {
            self.send_packet(packet);
            return;
        }

        if !self.is_local_address(packet.source()) {
            return;
        }

        if self.discovery.is_discovering(&destination) {
            self.trap.trap(packet);
        } else {
            self.trap.trap(packet.clone());
            self.start_discovery(packet);
        }
    }

    /// Drains every trapped packet, reporting each to
    /// [`Host::packet_not_deliverable`]. Called when this client is being
    /// torn down so no packet remains silently trapped.
    pub fn shutdown(&mut self) {
        let trap = &mut self.trap;
        let host = &mut self.host;
        trap.drain_all(|packet| host.packet_not_deliverable(packet));
    }

    fn start_discovery(&mut self, packet: Packet) {
        self.discovery.start_discovery(
            packet,
            &mut self.interfaces,
            self.packet_factory.as_ref(),
            &mut self.duplicate_filter,
            self.clock.as_mut(),
            &mut self.sequence,
            &self.config,
        );
    }

    fn forward_packet(&mut self, mut packet: Packet) {
        let hop = {
            let table = self.routing_table.borrow();
            self.forwarding_policy.choose(&packet, &table)
        };
        let hop = match hop {
            Some(hop) => hop,
            None => {
                error!("forwarding policy found no next hop for a packet reported deliverable");
                return;
            }
        };
        let interface = match self.interfaces.iter_mut().find(|i| i.id() == hop.interface) {
            Some(interface) => interface,
            None => {
                error!("routing table names unknown interface {}", hop.interface);
                return;
            }
        };

        packet.set_previous_hop(packet.sender().clone());
        packet.set_sender(interface.local_address());

        let phi = self.reinforce(&hop.destination, &hop.next_hop, hop.interface);
        trace!(
            "forwarding packet {} to {:?} via {:?} on {} (phi={})",
            packet.sequence_number(), hop.destination, hop.next_hop, hop.interface, phi
        );
        if let Err(e) = interface.send(&packet, &hop.next_hop) {
            warn!("failed to send packet {} via {:?}: {}", packet.sequence_number(), hop.next_hop, e);
        }
    }

    fn reinforce(&mut self, destination: &Address, next_hop: &Address, interface: InterfaceId) -> f32 {
        let current = self.routing_table.borrow().pheromone(destination, next_hop, interface);
        let reinforced = self.reinforcement_policy.calculate(current);
        self.routing_table.borrow_mut().update(destination.clone(), next_hop.clone(), interface, reinforced);
        reinforced
    }

    fn update_routing_from(&mut self, packet: &Packet, interface: InterfaceId) {
        if self.is_local_address(packet.previous_hop()) {
            return;
        }
        self.trigger_evaporation();

        let source = packet.source();
        let sender = packet.sender();
        let is_new = self.routing_table.borrow().is_new_route(source, sender, interface);
        if is_new {
            if !self.duplicate_filter.has_previous_node_been_seen(packet) {
                let phi_init = self.config.alpha * packet.ttl() as f32 + self.config.initial_pheromone_value;
                self.routing_table.borrow_mut().update(source.clone(), sender.clone(), interface, phi_init);
                trace!("new route to {:?} via {:?} on {} (phi={})", source, sender, interface, phi_init);
            }
        } else {
            self.reinforce(source, sender, interface);
        }
    }

    fn handle_duplicate(&mut self, packet: Packet, interface: InterfaceId) {
        if packet.is_data() {
            self.send_duplicate_warning(&packet, interface);
        } else if packet.packet_type() == PacketType::Bant && self.is_local_address(packet.destination()) {
            debug!(
                "duplicate BANT {} for {:?} from {:?}, already handled",
                packet.sequence_number(), packet.destination(), packet.source()
            );
        }
    }

    fn send_duplicate_warning(&mut self, packet: &Packet, interface: InterfaceId) {
        let interface = match self.interfaces.iter_mut().find(|i| i.id() == interface) {
            Some(interface) => interface,
            None => {
                error!("cannot send DUPLICATE_WARNING: unknown interface {}", interface);
                return;
            }
        };
        let local_sender = interface.local_address();
        let sequence_number = self.sequence.next();
        let warning = self.packet_factory.make_duplicate_warning(packet, local_sender, sequence_number);
        warn!(
            "routing loop detected for packet {} from {:?}, notifying {:?}",
            packet.sequence_number(), packet.source(), packet.sender()
        );
        if let Err(e) = interface.send(&warning, packet.sender()) {
            warn!("failed to send DUPLICATE_WARNING to {:?}: {}", packet.sender(), e);
        }
    }

    fn dispatch(&mut self, packet: Packet, interface: InterfaceId) {
        match packet.packet_type() {
            PacketType::Data => self.handle_data(packet),
            PacketType::Fant | PacketType::Bant => self.handle_ant(packet),
            PacketType::DuplicateWarning => {
                let destination = packet.destination().clone();
                let next_hop = packet.sender().clone();
                self.delete_route(&destination, &next_hop, interface);
            }
            PacketType::RouteFailure => {
                let destination = packet.destination().clone();
                let next_hop = packet.sender().clone();
                self.delete_route(&destination, &next_hop, interface);
            }
        }
    }

    fn handle_data(&mut self, packet: Packet) {
        if self.is_local_address(packet.destination()) {
            self.host.deliver_to_system(packet);
        } else {
            self.send_packet(packet);
        }
    }

    fn handle_ant(&mut self, packet: Packet) {
        if self.is_local_address(packet.source()) {
            return;
        }

        if self.is_local_address(packet.destination()) {
            match packet.packet_type() {
                PacketType::Fant => {
                    let sequence_number = self.sequence.next();
                    let bant = self.packet_factory.make_bant(&packet, sequence_number, self.config.initial_ttl);
                    debug!("FANT {} from {:?} reached this node, broadcasting BANT", packet.sequence_number(), packet.source());
                    self.broadcast_clone(&bant);
                }
                PacketType::Bant => {
                    let destination = packet.source().clone();
                    let trapped = self.trap.count(&destination);
                    self.discovery.on_first_bant(&destination, trapped, self.clock.as_mut(), &self.config);
                }
                _ => unreachable!("handle_ant is only called for FANT/BANT packets"),
            }
        } else if packet.ttl() > 0 {
            self.broadcast_clone(&packet);
        }
    }

    fn broadcast_clone(&mut self, packet: &Packet) {
        for interface in self.interfaces.iter_mut() {
            let mut clone = self.packet_factory.clone_packet(packet);
            clone.set_previous_hop(packet.sender().clone());
            clone.set_sender(interface.local_address());
            if let Err(e) = interface.broadcast(&clone) {
                warn!("failed to broadcast packet {} on {}: {}", clone.sequence_number(), interface.id(), e);
            }
        }
    }

    fn broadcast_route_failure(&mut self, destination: &Address) {
        for interface in self.interfaces.iter_mut() {
            let local_sender = interface.local_address();
            let sequence_number = self.sequence.next();
            let failure = self.packet_factory.make_route_failure(destination.clone(), local_sender, sequence_number);
            if let Err(e) = interface.broadcast(&failure) {
                warn!("failed to broadcast ROUTE_FAILURE for {:?} on {}: {}", destination, interface.id(), e);
            }
        }
    }

    fn is_local_address(&self, address: &Address) -> bool {
        self.interfaces.iter().any(|interface| interface.local_address() == *address)
    }

    fn trigger_evaporation(&mut self) {
        let now = self.clock.now();
        self.routing_table.borrow_mut().trigger_evaporation(now);
    }
}
