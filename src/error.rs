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

//! Module containing all error types surfaced by the core.

use crate::address::{Address, InterfaceId};
use thiserror::Error;

/// Main error type of the routing core.
///
/// None of these variants are allowed to unwind out of
/// [`AraClient`](crate::client::AraClient)'s three public handlers
/// (`send_packet`, `receive_packet`, `on_timer_expired`). They are
/// constructed internally, logged at the appropriate level, and then
/// discarded; they exist as a type mainly so internal helpers can compose
/// with `?` rather than carrying failure out through return values.
#[derive(Debug, Error)]
pub enum AraError {
    /// A timer expired that is tracked by neither the discovery nor the
    /// delivery timer table. This indicates a bug in timer bookkeeping (a
    /// leaked or double-cancelled timer), not a condition a well-behaved
    /// `Clock` implementation should ever trigger.
    #[error("expired timer {0:?} is not tracked by any discovery state")]
    UnknownTimer(crate::clock::TimerId),
    /// A routing-table entry was looked up for deletion but does not exist.
    #[error("no routing entry for destination {destination:?} via {next_hop:?} on {interface}")]
    RouteNotFound {
        /// Destination of the missing entry.
        destination: Address,
        /// Next hop of the missing entry.
        next_hop: Address,
        /// Interface of the missing entry.
        interface: InterfaceId,
    },
    /// An outbound send or broadcast through a [`NetworkInterface`](crate::interfaces::NetworkInterface)
    /// failed. Surfaced only as a log line; the packet is still considered
    /// consumed.
    #[error("interface {interface} failed to transmit: {reason}")]
    TransmitFailed {
        /// Interface that failed the transmission.
        interface: InterfaceId,
        /// Human-readable failure reason from the transport.
        reason: String,
    },
}
