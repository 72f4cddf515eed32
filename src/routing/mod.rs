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

//! # Routing
//!
//! The pheromone-weighted routing table and the three small behavior
//! objects that parameterize how it ages, reinforces and is read from:
//! [`EvaporationPolicy`], [`PathReinforcementPolicy`], [`ForwardingPolicy`].

mod evaporation;
mod forwarding;
mod reinforcement;
mod table;

pub use evaporation::{EvaporationPolicy, ExponentialEvaporationPolicy};
pub use forwarding::{BestPheromoneForwardingPolicy, ForwardingPolicy};
pub use reinforcement::{LinearReinforcementPolicy, PathReinforcementPolicy};
pub use table::{RoutingTable, RoutingTableEntry};
