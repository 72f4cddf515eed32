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

//! # ara-core
//!
//! Routing core of an Ant-Routing-Algorithm (ARA) client for wireless
//! multi-hop (MANET) networks. This crate maintains a probabilistic,
//! pheromone-weighted routing table and drives the on-demand route
//! discovery, maintenance and repair protocol described by the ARA family
//! of algorithms.
//!
//! ## Structure
//!
//! - **[`routing`]**: the pheromone [`RoutingTable`](routing::RoutingTable),
//!   together with the injectable [`EvaporationPolicy`](routing::EvaporationPolicy),
//!   [`PathReinforcementPolicy`](routing::PathReinforcementPolicy) and
//!   [`ForwardingPolicy`](routing::ForwardingPolicy) behaviors.
//! - **[`trap`]**: the [`PacketTrap`](trap::PacketTrap) holding packets that
//!   await a usable route.
//! - **[`discovery`]**: the [`DiscoveryDriver`](discovery::DiscoveryDriver)
//!   that owns per-destination FANT/BANT timers and retry state.
//! - **[`duplicate_filter`]**: the [`DuplicateFilter`](duplicate_filter::DuplicateFilter)
//!   used for loop and replay detection.
//! - **[`client`]**: [`AraClient`](client::AraClient), the orchestrator that
//!   ties all of the above together and is the single entry point the host
//!   application drives.
//! - **[`packet`]**, **[`address`]**, **[`interfaces`]**, **[`clock`]**,
//!   **[`host`]**: the data model and the external collaborator traits this
//!   core consumes but does not implement.
//! - **[`config`]**: [`AraConfig`](config::AraConfig), the typed
//!   configuration bag accepted at construction.
//!
//! ## Usage
//!
//! Host applications construct an [`AraClient`](client::AraClient) with a
//! set of [`NetworkInterface`](interfaces::NetworkInterface)s, a
//! [`Clock`](clock::Clock), a [`Host`](host::Host) and a
//! [`PacketFactory`](packet::PacketFactory), and then feed it exactly three
//! kinds of events: a data packet submitted by the local host
//! ([`AraClient::send_packet`](client::AraClient::send_packet)), a packet
//! delivered by an interface
//! ([`AraClient::receive_packet`](client::AraClient::receive_packet)), and a
//! timer expiry
//! ([`AraClient::on_timer_expired`](client::AraClient::on_timer_expired)).

#![deny(missing_docs)]

pub mod address;
pub mod client;
pub mod clock;
pub mod config;
pub mod discovery;
pub mod duplicate_filter;
pub mod error;
pub mod host;
pub mod interfaces;
pub mod packet;
pub mod routing;
mod sequence;
pub mod trap;

#[cfg(test)]
mod test;

pub use address::Address;
pub use client::AraClient;
pub use config::AraConfig;
pub use error::AraError;
pub use packet::{Packet, PacketType};
