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

use crate::duplicate_filter::DuplicateFilter;
use crate::packet::{Packet, PacketType};
use crate::test::support::addr;

fn packet(source: &str, sender: &str, previous_hop: &str, sequence_number: u32) -> Packet {
    let mut p = Packet::new(addr(source), addr("Z"), PacketType::Data, sequence_number, 32, None);
    p.set_sender(addr(sender));
    p.set_previous_hop(addr(previous_hop));
    p
}

#[test]
fn unseen_sequence_numbers_are_not_duplicates() {
    let filter = DuplicateFilter::new();
    let p = packet("A", "A", "A", 1);
    assert!(!filter.has_seen(&p));
}

#[test]
fn registering_a_packet_makes_its_sequence_number_seen_for_its_source_only() {
    let mut filter = DuplicateFilter::new();
    let p = packet("A", "B", "B", 5);
    filter.register(&p);

    assert!(filter.has_seen(&packet("A", "B", "B", 5)));
    assert!(!filter.has_seen(&packet("A", "B", "B", 6)));
    assert!(!filter.has_seen(&packet("C", "B", "B", 5)));
}

#[test]
fn known_hops_track_both_sender_and_previous_hop() {
    let mut filter = DuplicateFilter::new();
    filter.register(&packet("A", "B", "C", 1));

    let probe = packet("A", "X", "X", 99);
    assert!(filter.has_previous_node_been_seen(&packet("A", "B", "B", 2)));
    assert!(filter.has_previous_node_been_seen(&packet("A", "X", "C", 2)));
    assert!(!filter.has_previous_node_been_seen(&probe));
}

#[test]
fn forget_hops_clears_known_hops_but_not_sequence_memory() {
    let mut filter = DuplicateFilter::new();
    let p = packet("A", "B", "B", 1);
    filter.register(&p);
    assert!(filter.has_seen(&p));
    assert!(filter.has_previous_node_been_seen(&packet("A", "B", "B", 2)));

    filter.forget_hops(&addr("A"));

    assert!(filter.has_seen(&p));
    assert!(!filter.has_previous_node_been_seen(&packet("A", "B", "B", 2)));
}
