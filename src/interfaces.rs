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

//! The physical network interface abstraction consumed by this core.
//!
//! Out of scope per the purpose and scope of this crate: the wire codec,
//! the medium access, and the actual transmission are all the concern of
//! the implementing transport. The core only ever calls `send`, `broadcast`
//! and `local_address` on interfaces it was handed at construction time.

use crate::address::{Address, InterfaceId};
use crate::error::AraError;
use crate::packet::Packet;

/// A local network interface.
///
/// Sending and broadcasting are best-effort, non-blocking operations: they
/// return promptly and a failure is reported back as an [`AraError`] that
/// the core logs and otherwise ignores (per the concurrency model, handlers
/// run to completion and never suspend waiting on a transport).
pub trait NetworkInterface {
    /// This interface's stable identity within the owning node.
    fn id(&self) -> InterfaceId;

    /// The address this interface is reachable at.
    fn local_address(&self) -> Address;

    /// Unicasts `packet` to `next_hop` over this interface.
    fn send(&mut self, packet: &Packet, next_hop: &Address) -> Result<(), AraError>;

    /// Broadcasts `packet` to every neighbor reachable over this interface.
    fn broadcast(&mut self, packet: &Packet) -> Result<(), AraError>;
}
