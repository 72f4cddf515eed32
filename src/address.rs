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

//! Opaque node and interface addressing.

use std::fmt;
use std::sync::Arc;

/// An opaque network address, compared and hashed by content rather than by
/// identity.
///
/// `Address` wraps an immutable byte buffer behind an [`Arc`] so that
/// cloning an address (which happens on every packet field mutation along a
/// forwarding path) is cheap, while equality and hashing are always
/// performed on the underlying bytes, never on the pointer.
#[derive(Clone, Eq)]
pub struct Address(Arc<[u8]>);

impl Address {
    /// Builds an address from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Address(Arc::from(bytes.into().into_boxed_slice()))
    }

    /// Returns the address' raw byte representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_ref() == other.0.as_ref()
    }
}

impl std::hash::Hash for Address {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.as_ref().hash(state);
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Address::new(s.as_bytes().to_vec())
    }
}

impl From<u32> for Address {
    fn from(v: u32) -> Self {
        Address::new(v.to_be_bytes().to_vec())
    }
}

/// A stable local identifier for a [`NetworkInterface`](crate::interfaces::NetworkInterface).
///
/// Interfaces are identity-compared within a node: two `InterfaceId`s are
/// equal iff they were minted to name the same interface, never by any
/// relationship between the addresses the interfaces happen to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InterfaceId(pub u32);

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if{}", self.0)
    }
}
