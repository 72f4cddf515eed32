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

//! Pheromone evaporation policy.

use std::fmt::Debug;
use std::time::Duration;

/// Behavior object controlling how pheromone values decay over time.
///
/// Injected into a [`RoutingTable`](super::RoutingTable) at construction as
/// a small interface with two methods, rather than a hard-coded decay
/// formula.
pub trait EvaporationPolicy: Debug {
    /// The nominal interval this policy ages entries by. `RoutingTable`
    /// only ever calls [`EvaporationPolicy::decay`] with whole multiples of
    /// this interval, so two evaporations with no elapsed time are no-ops.
    fn time_interval(&self) -> Duration;

    /// Returns the decayed pheromone value after `elapsed` real time has
    /// passed, given a current value of `phi`.
    fn decay(&self, phi: f32, elapsed: Duration) -> f32;
}

/// Reference exponential decay policy: `phi' = phi * q^(elapsed/interval)`,
/// snapping to zero once the result drops below a configured threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialEvaporationPolicy {
    interval: Duration,
    q: f32,
    threshold: f32,
}

impl ExponentialEvaporationPolicy {
    /// Builds a new exponential evaporation policy.
    ///
    /// `q` is the per-interval decay factor and must lie in `(0, 1)`;
    /// `threshold` is the pheromone value below which an entry snaps to
    /// zero (and is subsequently removed by the routing table).
    pub fn new(interval: Duration, q: f32, threshold: f32) -> Self {
        debug_assert!(q > 0.0 && q < 1.0, "decay factor q must lie in (0, 1)");
        ExponentialEvaporationPolicy { interval, q, threshold }
    }
}

impl EvaporationPolicy for ExponentialEvaporationPolicy {
    fn time_interval(&self) -> Duration {
        self.interval
    }

    fn decay(&self, phi: f32, elapsed: Duration) -> f32 {
        if self.interval.is_zero() {
            return phi;
        }
        let periods = elapsed.as_secs_f32() / self.interval.as_secs_f32();
        let decayed = phi * self.q.powf(periods);
        if decayed < self.threshold {
            0.0
        } else {
            decayed
        }
    }
}
