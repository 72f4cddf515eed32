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

//! Typed configuration accepted by [`AraClient`](crate::client::AraClient)
//! at construction, preferred here over stringly-typed or global settings.

use std::time::Duration;

/// Routing-core configuration.
///
/// The three behavior objects (evaporation, reinforcement, forwarding
/// policy) are supplied separately at [`AraClient`](crate::client::AraClient)
/// construction rather than stored here, since they are trait objects, not
/// plain data.
#[derive(Debug, Clone, PartialEq)]
pub struct AraConfig {
    /// Pheromone value assigned to a brand new routing-table entry, beyond
    /// the TTL-proportional term (`alpha * ttl`). Must be greater than 0.
    pub initial_pheromone_value: f32,
    /// The `alpha` coefficient used when computing a new route's initial
    /// pheromone value: `alpha * packet.ttl + initial_pheromone_value`.
    /// Default `1.0`.
    pub alpha: f32,
    /// Maximum number of times a route discovery timeout may restart the
    /// discovery before it is abandoned.
    pub max_route_discovery_retries: u32,
    /// How long to wait for a BANT after broadcasting FANTs before retrying
    /// or abandoning discovery.
    pub route_discovery_timeout: Duration,
    /// How long to wait, after the first usable BANT, before releasing
    /// trapped packets — gives other, possibly better, BANTs a chance to
    /// arrive and reinforce alternate routes first.
    pub packet_delivery_delay: Duration,
    /// TTL stamped on FANTs originated by this node.
    pub initial_ttl: u32,
    /// Interval at which neighbor activity should be checked. `None`
    /// disables the check (wire value `0`). Accepted for configuration
    /// compatibility but not wired into any dispatch path in this core: a
    /// liveness probe is a transport-level concern, not a routing decision.
    pub neighbor_activity_check_interval: Option<Duration>,
    /// Maximum time a neighbor may go unobserved before being considered
    /// inactive. `None` disables the check (wire value `UINT_MAX`). Accepted
    /// for configuration compatibility but not wired into any dispatch path
    /// in this core, for the same reason as `neighbor_activity_check_interval`.
    pub max_neighbor_inactivity: Option<Duration>,
}

impl Default for AraConfig {
    fn default() -> Self {
        AraConfig {
            initial_pheromone_value: 1.0,
            alpha: 1.0,
            max_route_discovery_retries: 2,
            route_discovery_timeout: Duration::from_millis(1000),
            packet_delivery_delay: Duration::from_millis(5),
            initial_ttl: 32,
            neighbor_activity_check_interval: None,
            max_neighbor_inactivity: None,
        }
    }
}
