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

//! The host-system ingress/egress abstraction consumed by this core.
//!
//! Out of scope per the purpose and scope of this crate: whatever sits
//! behind this trait (a TAP device, a local socket, an application queue) is
//! entirely the host's concern.

use crate::packet::Packet;

/// Callbacks into the local host system.
pub trait Host {
    /// A DATA packet destined for a local address has arrived and should be
    /// handed to whatever consumes traffic on this node.
    fn deliver_to_system(&mut self, packet: Packet);

    /// Route discovery for `packet`'s destination was exhausted without
    /// ever becoming deliverable; `packet` will not be retried.
    fn packet_not_deliverable(&mut self, packet: Packet);
}
