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

//! The packet data model and the wire-codec-adjacent factory this core
//! consumes to build control packets.
//!
//! The exact byte layout of any packet type is the external codec's
//! concern (out of scope here); this module only fixes the semantic fields
//! the routing core reads and mutates.

use crate::address::{Address, InterfaceId};

/// The five wire packet types this core understands.
///
/// Represented as a closed enum discriminant on one concrete [`Packet`]
/// struct rather than as a trait-object hierarchy: a small fixed header
/// shared by all variants, dispatched on with an exhaustive `match`. This
/// also means there is no "unknown packet type" runtime error class in this
/// crate — an unrecognized type tag simply cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// Carries payload between endpoints.
    Data,
    /// Forward ANT: emitted by a source to discover a route.
    Fant,
    /// Backward ANT: emitted by a destination in response to a FANT.
    Bant,
    /// Emitted back to a sender when a DATA packet already seen arrives
    /// again (loop detected).
    DuplicateWarning,
    /// Advertised when routes to a destination collapse.
    RouteFailure,
}

/// A routing packet.
///
/// `source`, `destination`, `packet_type` and `sequence_number` are fixed at
/// construction. `sender`, `previous_hop` and `ttl` are mutated along the
/// forwarding path; `payload` is only meaningful for [`PacketType::Data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    source: Address,
    destination: Address,
    packet_type: PacketType,
    sequence_number: u32,
    sender: Address,
    previous_hop: Address,
    ttl: u32,
    payload: Option<Vec<u8>>,
}

impl Packet {
    /// Builds a packet freshly originated by `source` (the local node): its
    /// `sender` and `previous_hop` both start out equal to `source`, so that
    /// loop-avoidance lookups against an as-yet-untouched routing table
    /// behave sensibly.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: Address,
        destination: Address,
        packet_type: PacketType,
        sequence_number: u32,
        ttl: u32,
        payload: Option<Vec<u8>>,
    ) -> Self {
        Packet {
            sender: source.clone(),
            previous_hop: source.clone(),
            source,
            destination,
            packet_type,
            sequence_number,
            ttl,
            payload,
        }
    }

    /// The packet's immutable originating address.
    pub fn source(&self) -> &Address {
        &self.source
    }

    /// The packet's immutable destination address.
    pub fn destination(&self) -> &Address {
        &self.destination
    }

    /// The packet's type discriminant.
    pub fn packet_type(&self) -> PacketType {
        self.packet_type
    }

    /// The packet's unique-per-source sequence number.
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    /// The immediate transmitter of this packet as last observed.
    pub fn sender(&self) -> &Address {
        &self.sender
    }

    /// Sets the immediate transmitter of this packet.
    pub fn set_sender(&mut self, sender: Address) {
        self.sender = sender;
    }

    /// The hop observed immediately before the current sender.
    pub fn previous_hop(&self) -> &Address {
        &self.previous_hop
    }

    /// Sets the hop observed immediately before the current sender.
    pub fn set_previous_hop(&mut self, previous_hop: Address) {
        self.previous_hop = previous_hop;
    }

    /// Remaining hop budget.
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    /// Decrements the remaining hop budget by one, saturating at zero.
    pub fn decrease_ttl(&mut self) {
        self.ttl = self.ttl.saturating_sub(1);
    }

    /// The DATA payload, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// True for [`PacketType::Data`].
    pub fn is_data(&self) -> bool {
        self.packet_type == PacketType::Data
    }

    /// True for [`PacketType::Fant`] or [`PacketType::Bant`].
    pub fn is_ant(&self) -> bool {
        matches!(self.packet_type, PacketType::Fant | PacketType::Bant)
    }
}

/// Constructs the control packets this core originates, and clones data
/// packets for per-interface broadcast.
///
/// Implementations own sequencing of their own internal fields (e.g. any
/// wire-format specific metadata); the routing core always supplies the
/// sequence number itself so that monotonicity is a property of the core,
/// not of the factory.
pub trait PacketFactory {
    /// Builds a fresh FANT originated by `source` for `destination`.
    fn make_fant(
        &self,
        source: Address,
        destination: Address,
        sequence_number: u32,
        ttl: u32,
    ) -> Packet;

    /// Builds the BANT reply to a FANT that reached its destination.
    /// The FANT's `destination` (this node's matched local address)
    /// becomes the BANT's `source`; the FANT's `source` becomes the BANT's
    /// `destination`.
    fn make_bant(&self, fant: &Packet, sequence_number: u32, ttl: u32) -> Packet;

    /// Builds a DUPLICATE_WARNING in response to a DATA packet already seen,
    /// addressed back to that packet's current sender.
    fn make_duplicate_warning(
        &self,
        original: &Packet,
        local_sender: Address,
        sequence_number: u32,
    ) -> Packet;

    /// Builds a ROUTE_FAILURE advertisement for `destination`, originated by
    /// `local_sender`.
    fn make_route_failure(
        &self,
        destination: Address,
        local_sender: Address,
        sequence_number: u32,
    ) -> Packet;

    /// Clones `packet`'s immutable fields, preserving `sender` and
    /// `previous_hop` as a starting point for the caller to rewrite before
    /// re-transmission on a specific interface.
    fn clone_packet(&self, packet: &Packet) -> Packet {
        packet.clone()
    }
}
