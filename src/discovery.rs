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

//! The route discovery driver: owns per-destination discovery and delivery
//! timers, retry counters, and drives the FANT/BANT protocol's timing.

use crate::address::Address;
use crate::clock::{Clock, TimerId};
use crate::config::AraConfig;
use crate::duplicate_filter::DuplicateFilter;
use crate::interfaces::NetworkInterface;
use crate::packet::{Packet, PacketFactory};
use crate::sequence::SequenceCounter;
use crate::trap::PacketTrap;
use log::{debug, info, warn};
use std::collections::HashMap;

/// Per-destination discovery bookkeeping: how many retries have been spent,
/// and the packet that originally triggered this discovery round (kept so
/// its destination and TTL preferences are available to a retry).
#[derive(Debug, Clone)]
struct DiscoveryState {
    retries_used: u32,
    original_packet: Packet,
}

/// Owns the two disjoint timer tables (discovery and delivery) and the
/// "who currently owns this destination" index.
#[derive(Debug, Default)]
pub struct DiscoveryDriver {
    discovery_timers: HashMap<TimerId, DiscoveryState>,
    delivery_timers: HashMap<TimerId, Address>,
    active_discoveries: HashMap<Address, TimerId>,
}

/// Outcome of a discovery timer's expiry.
#[derive(Debug)]
pub enum DiscoveryTimeout {
    /// The discovery round was retried; FANTs were re-broadcast.
    Retried,
    /// Retries were exhausted; these packets will never be delivered and
    /// must be reported via `Host::packet_not_deliverable`.
    Exhausted(Vec<Packet>),
    /// `timer` was not a live discovery timer (already cancelled, or never
    /// one to begin with).
    Unknown,
}

/// Outcome of a delivery timer's expiry.
#[derive(Debug)]
pub enum DeliveryTimeout {
    /// The trapped packets now deliverable for the destination, in FIFO
    /// order, to be resubmitted through `AraClient::send_packet`.
    Deliver(Vec<Packet>),
    /// `timer` was not a live delivery timer.
    Unknown,
}

impl DiscoveryDriver {
    /// Builds an empty driver with no in-flight discoveries.
    pub fn new() -> Self {
        DiscoveryDriver::default()
    }

    /// True iff `destination` has a live discovery or delivery timer.
    pub fn is_discovering(&self, destination: &Address) -> bool {
        self.active_discoveries.contains_key(destination)
    }

    /// Starts a fresh discovery round for `original_packet.destination()`:
    /// clears stale known-hop memory, arms a discovery timer, and broadcasts
    /// one freshly-sequenced FANT per interface.
    #[allow(clippy::too_many_arguments)]
    pub fn start_discovery(
        &mut self,
        original_packet: Packet,
        interfaces: &mut [Box<dyn NetworkInterface>],
        packet_factory: &dyn PacketFactory,
        duplicate_filter: &mut DuplicateFilter,
        clock: &mut dyn Clock,
        sequence: &mut SequenceCounter,
        config: &AraConfig,
    ) {
        let destination = original_packet.destination().clone();
        duplicate_filter.forget_hops(&destination);

        let timer = clock.new_timer();
        clock.run(timer, config.route_discovery_timeout);
        self.discovery_timers.insert(
            timer,
            DiscoveryState { retries_used: 0, original_packet },
        );
        self.active_discoveries.insert(destination.clone(), timer);

        broadcast_fants(&destination, interfaces, packet_factory, sequence, config);
        debug!("started route discovery for {:?} on timer {}", destination, timer);
    }

    /// Handles the expiry of `timer`. If it is a live discovery timer and
    /// retries remain, re-broadcasts FANTs and re-arms the same timer. If
    /// retries are exhausted, tears the discovery down and returns every
    /// packet that was trapped for the destination.
    #[allow(clippy::too_many_arguments)]
    pub fn on_discovery_timeout(
        &mut self,
        timer: TimerId,
        interfaces: &mut [Box<dyn NetworkInterface>],
        packet_factory: &dyn PacketFactory,
        duplicate_filter: &mut DuplicateFilter,
        trap: &mut PacketTrap,
        clock: &mut dyn Clock,
        sequence: &mut SequenceCounter,
        config: &AraConfig,
    ) -> DiscoveryTimeout {
        let state = match self.discovery_timers.get_mut(&timer) {
            Some(state) => state,
            None => return DiscoveryTimeout::Unknown,
        };
        let destination = state.original_packet.destination().clone();
        info!("route discovery for {:?} timed out", destination);

        if state.retries_used < config.max_route_discovery_retries {
            state.retries_used += 1;
            let retries_used = state.retries_used;
            duplicate_filter.forget_hops(&destination);
            broadcast_fants(&destination, interfaces, packet_factory, sequence, config);
            clock.run(timer, config.route_discovery_timeout);
            debug!(
                "restarting discovery for {:?} ({}/{})",
                destination, retries_used, config.max_route_discovery_retries
            );
            DiscoveryTimeout::Retried
        } else {
            self.discovery_timers.remove(&timer);
            self.active_discoveries.remove(&destination);
            duplicate_filter.forget_hops(&destination);
            let undeliverable = trap.remove_for(&destination);
            warn!(
                "route discovery for {:?} unsuccessful, dropping {} packet(s)",
                destination,
                undeliverable.len()
            );
            DiscoveryTimeout::Exhausted(undeliverable)
        }
    }

    /// Handles the first BANT to reach this node for an in-flight
    /// discovery, provided the trap still holds at least one packet for
    /// `destination`. Cancels the discovery timer and arms a delivery
    /// timer in its place, keeping the destination marked as in-discovery
    /// across the delay.
    ///
    /// If `destination` is already in the DELIVERING phase (its live timer
    /// has already moved to the delivery table) or is not being discovered
    /// at all, this is a late/duplicate BANT: it is logged and otherwise
    /// ignored.
    pub fn on_first_bant(
        &mut self,
        destination: &Address,
        trapped_packet_count: usize,
        clock: &mut dyn Clock,
        config: &AraConfig,
    ) {
        let timer = match self.active_discoveries.get(destination) {
            Some(&timer) => timer,
            None => {
                debug!("BANT for {:?} arrived with no active discovery; ignoring", destination);
                return;
            }
        };

        if !self.discovery_timers.contains_key(&timer) {
            debug!("late BANT for {:?} arrived while already delivering; ignoring", destination);
            return;
        }

        if trapped_packet_count == 0 {
            warn!("BANT for {:?} arrived but no packets are trapped for it", destination);
            return;
        }

        clock.interrupt(timer);
        self.discovery_timers.remove(&timer);

        let delivery_timer = clock.new_timer();
        clock.run(delivery_timer, config.packet_delivery_delay);
        self.delivery_timers.insert(delivery_timer, destination.clone());
        self.active_discoveries.insert(destination.clone(), delivery_timer);
        debug!(
            "first BANT for {:?}, waiting {:?} before delivering trapped packets",
            destination, config.packet_delivery_delay
        );
    }

    /// Handles the expiry of a delivery timer: tears down the discovery
    /// entirely and returns every now-deliverable trapped packet for the
    /// destination, in FIFO order, for the caller to resubmit.
    pub fn on_delivery_timeout(&mut self, timer: TimerId, trap: &mut PacketTrap) -> DeliveryTimeout {
        let destination = match self.delivery_timers.remove(&timer) {
            Some(destination) => destination,
            None => return DeliveryTimeout::Unknown,
        };
        self.active_discoveries.remove(&destination);
        let deliverable = trap.untrap_deliverable(&destination);
        debug!("delivering {} trapped packet(s) for {:?}", deliverable.len(), destination);
        DeliveryTimeout::Deliver(deliverable)
    }
}

fn broadcast_fants(
    destination: &Address,
    interfaces: &mut [Box<dyn NetworkInterface>],
    packet_factory: &dyn PacketFactory,
    sequence: &mut SequenceCounter,
    config: &AraConfig,
) {
    for interface in interfaces.iter_mut() {
        let fant = packet_factory.make_fant(
            interface.local_address(),
            destination.clone(),
            sequence.next(),
            config.initial_ttl,
        );
        if let Err(e) = interface.broadcast(&fant) {
            warn!("failed to broadcast FANT for {:?} on {}: {}", destination, interface.id(), e);
        }
    }
}
