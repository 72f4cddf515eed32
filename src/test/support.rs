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

//! Mock collaborators shared by the scenario tests under `src/test/`.

use crate::address::{Address, InterfaceId};
use crate::clock::{Clock, TimerId};
use crate::error::AraError;
use crate::host::Host;
use crate::interfaces::NetworkInterface;
use crate::packet::{Packet, PacketFactory, PacketType};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

/// Builds an [`Address`] from a short human-readable name, for tests only.
pub fn addr(name: &str) -> Address {
    Address::from(name)
}

/// One outbound transmission observed on a [`MockInterface`].
#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceEvent {
    /// A unicast `send` to the given next hop.
    Send(Packet, Address),
    /// A `broadcast` to every neighbor.
    Broadcast(Packet),
}

/// A [`NetworkInterface`] that never actually transmits anything: it only
/// appends every `send`/`broadcast` call to a shared, test-visible log.
#[derive(Debug, Clone)]
pub struct MockInterface {
    id: InterfaceId,
    local_address: Address,
    log: Rc<RefCell<Vec<InterfaceEvent>>>,
}

impl MockInterface {
    /// Builds a new mock interface and its independent event log.
    pub fn new(id: u32, local_address: &str) -> (Self, Rc<RefCell<Vec<InterfaceEvent>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let interface = MockInterface { id: InterfaceId(id), local_address: addr(local_address), log: Rc::clone(&log) };
        (interface, log)
    }
}

impl NetworkInterface for MockInterface {
    fn id(&self) -> InterfaceId {
        self.id
    }

    fn local_address(&self) -> Address {
        self.local_address.clone()
    }

    fn send(&mut self, packet: &Packet, next_hop: &Address) -> Result<(), AraError> {
        self.log.borrow_mut().push(InterfaceEvent::Send(packet.clone(), next_hop.clone()));
        Ok(())
    }

    fn broadcast(&mut self, packet: &Packet) -> Result<(), AraError> {
        self.log.borrow_mut().push(InterfaceEvent::Broadcast(packet.clone()));
        Ok(())
    }
}

/// A manually-driven [`Clock`]: time only advances when a test calls
/// [`MockClock::advance`], and timers only "fire" when a test calls
/// [`MockClock::due_timers`] and feeds the results back into
/// `AraClient::on_timer_expired`.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Duration,
    next_id: u64,
    armed: HashMap<TimerId, Duration>,
}

impl MockClock {
    /// Builds a clock starting at time zero.
    pub fn new() -> Self {
        MockClock::default()
    }

    /// Advances the clock by `by`.
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Removes and returns every armed timer whose deadline is at or before
    /// the current time, in deadline order.
    pub fn due_timers(&mut self) -> Vec<TimerId> {
        let now = self.now;
        let mut due: Vec<(TimerId, Duration)> =
            self.armed.iter().filter(|(_, &deadline)| deadline <= now).map(|(&t, &d)| (t, d)).collect();
        due.sort_by_key(|(timer, deadline)| (*deadline, *timer));
        for (timer, _) in &due {
            self.armed.remove(timer);
        }
        due.into_iter().map(|(timer, _)| timer).collect()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn new_timer(&mut self) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn run(&mut self, timer: TimerId, duration: Duration) {
        self.armed.insert(timer, self.now + duration);
    }

    fn interrupt(&mut self, timer: TimerId) {
        self.armed.remove(&timer);
    }
}

/// A handle to a shared [`MockClock`], so a test can drive time and timer
/// expiry for a [`Clock`] that has already been moved into an `AraClient`.
#[derive(Debug, Clone)]
pub struct SharedClock(Rc<RefCell<MockClock>>);

impl SharedClock {
    /// Builds a fresh shared clock starting at time zero.
    pub fn new() -> Self {
        SharedClock(Rc::new(RefCell::new(MockClock::new())))
    }

    /// Advances the underlying clock by `by`.
    pub fn advance(&self, by: Duration) {
        self.0.borrow_mut().advance(by);
    }

    /// Removes and returns every timer due at the current time.
    pub fn due_timers(&self) -> Vec<TimerId> {
        self.0.borrow_mut().due_timers()
    }
}

impl Clock for SharedClock {
    fn now(&self) -> Duration {
        self.0.borrow().now()
    }

    fn new_timer(&mut self) -> TimerId {
        self.0.borrow_mut().new_timer()
    }

    fn run(&mut self, timer: TimerId, duration: Duration) {
        self.0.borrow_mut().run(timer, duration);
    }

    fn interrupt(&mut self, timer: TimerId) {
        self.0.borrow_mut().interrupt(timer);
    }
}

/// A [`Host`] that records every packet it is handed, rather than doing
/// anything with it.
#[derive(Debug, Clone, Default)]
pub struct MockHost {
    delivered: Rc<RefCell<Vec<Packet>>>,
    undeliverable: Rc<RefCell<Vec<Packet>>>,
}

impl MockHost {
    /// Builds an empty host and the two shared logs it writes to.
    pub fn new() -> (Self, Rc<RefCell<Vec<Packet>>>, Rc<RefCell<Vec<Packet>>>) {
        let host = MockHost::default();
        let delivered = Rc::clone(&host.delivered);
        let undeliverable = Rc::clone(&host.undeliverable);
        (host, delivered, undeliverable)
    }
}

impl Host for MockHost {
    fn deliver_to_system(&mut self, packet: Packet) {
        self.delivered.borrow_mut().push(packet);
    }

    fn packet_not_deliverable(&mut self, packet: Packet) {
        self.undeliverable.borrow_mut().push(packet);
    }
}

/// A deterministic [`PacketFactory`] with no wire-format concerns: every
/// control packet carries no payload and the TTLs/addresses the core
/// passes in.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestPacketFactory;

impl PacketFactory for TestPacketFactory {
    fn make_fant(&self, source: Address, destination: Address, sequence_number: u32, ttl: u32) -> Packet {
        Packet::new(source, destination, PacketType::Fant, sequence_number, ttl, None)
    }

    fn make_bant(&self, fant: &Packet, sequence_number: u32, ttl: u32) -> Packet {
        Packet::new(fant.destination().clone(), fant.source().clone(), PacketType::Bant, sequence_number, ttl, None)
    }

    fn make_duplicate_warning(&self, original: &Packet, local_sender: Address, sequence_number: u32) -> Packet {
        Packet::new(local_sender, original.sender().clone(), PacketType::DuplicateWarning, sequence_number, 1, None)
    }

    fn make_route_failure(&self, destination: Address, local_sender: Address, sequence_number: u32) -> Packet {
        Packet::new(local_sender, destination, PacketType::RouteFailure, sequence_number, 1, None)
    }
}
