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

//! The wall-clock and timer source consumed by this core.
//!
//! Both are contract-only collaborators: the core never reads the system
//! clock directly, so that tests can drive discovery timeouts and
//! evaporation deterministically through an injected, mockable clock rather
//! than a process-wide clock accessor.

use std::fmt;
use std::time::Duration;

/// Opaque handle to a one-shot timer, minted by a [`Clock`].
///
/// `TimerId` is used as the key of the [`DiscoveryDriver`](crate::discovery::DiscoveryDriver)'s
/// `discovery_timers` / `delivery_timers` tables, standing in for pointer
/// identity the way an opaque handle usually does when the real resource
/// must not be named by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A monotonic wall-clock and timer factory.
///
/// Implementations are expected to eventually call back into
/// [`AraClient::on_timer_expired`](crate::client::AraClient::on_timer_expired)
/// with the `TimerId` returned by [`Clock::new_timer`] once `run` has been
/// called and the requested duration has elapsed, unless the timer was
/// cancelled first via [`Clock::interrupt`]. A cancelled timer must never
/// fire afterwards, or the listener must tolerate an unknown id as a no-op —
/// this core chooses the former and logs the latter defensively (see
/// [`crate::error::AraError::UnknownTimer`]).
pub trait Clock {
    /// Returns the current monotonic time.
    fn now(&self) -> Duration;

    /// Mints a fresh, not-yet-armed timer and returns its identity.
    fn new_timer(&mut self) -> TimerId;

    /// Arms (or re-arms) `timer` to expire `duration` from now.
    fn run(&mut self, timer: TimerId, duration: Duration);

    /// Cancels any pending expiry of `timer`. A no-op if the timer already
    /// fired or was already cancelled.
    fn interrupt(&mut self, timer: TimerId);
}
