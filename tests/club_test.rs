// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Club public API integration tests.

use chrono::TimeDelta;
use club_ledger::{
    Action, ClientId, Club, Event, Rejection, TableId, TimeOfDay, Transition, WaitQueue,
    WaitingList,
};
use rust_decimal_macros::dec;

// === Helper Functions ===

fn at(hour: u32, minute: u32) -> TimeOfDay {
    TimeOfDay::from_hm(hour, minute).unwrap()
}

fn client(name: &str) -> ClientId {
    name.parse().unwrap()
}

fn club_with_seated(tables: u32, seated: &[(&str, u32)]) -> Club {
    let mut club = Club::new(tables);
    for (name, table) in seated {
        club.arrive(&client(name)).unwrap();
        club.sit(&client(name), TableId(*table), at(10, 0)).unwrap();
    }
    club
}

// === Arrive ===

#[test]
fn arrive_registers_unseated_client() {
    let mut club = Club::new(2);
    club.arrive(&client("alice")).unwrap();
    assert!(club.is_present(&client("alice")));
    assert_eq!(club.table_of(&client("alice")), None);
    assert_eq!(club.free_tables(), 2);
}

#[test]
fn arrive_twice_is_rejected() {
    let mut club = Club::new(2);
    club.arrive(&client("alice")).unwrap();
    assert_eq!(club.arrive(&client("alice")), Err(Rejection::YouShallNotPass));
    assert_eq!(club.present_count(), 1);
}

// === Sit ===

#[test]
fn sit_occupies_table() {
    let club = club_with_seated(3, &[("alice", 2)]);
    assert_eq!(club.table_of(&client("alice")), Some(TableId(2)));
    assert_eq!(club.free_tables(), 2);
    assert_eq!(club.occupied_tables(), 1);
    assert_eq!(club.ledger().usage(TableId(2)), Some(TimeDelta::zero()));
}

#[test]
fn sit_on_busy_table_changes_nothing() {
    let mut club = club_with_seated(2, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();

    let result = club.sit(&client("bob"), TableId(1), at(10, 30));
    assert_eq!(result, Err(Rejection::PlaceIsBusy));
    assert_eq!(club.table_of(&client("bob")), None);
    assert_eq!(club.table_of(&client("alice")), Some(TableId(1)));
    assert_eq!(club.free_tables(), 1);
}

#[test]
fn sit_unknown_client_is_rejected() {
    let mut club = Club::new(1);
    let result = club.sit(&client("ghost"), TableId(1), at(10, 0));
    assert_eq!(result, Err(Rejection::ClientUnknown));
    assert_eq!(club.free_tables(), 1);
}

#[test]
fn sit_on_missing_table_is_busy() {
    let mut club = Club::new(1);
    club.arrive(&client("alice")).unwrap();
    let result = club.sit(&client("alice"), TableId(5), at(10, 0));
    assert_eq!(result, Err(Rejection::PlaceIsBusy));
}

#[test]
fn switching_tables_releases_previous() {
    let mut club = club_with_seated(2, &[("alice", 1)]);
    club.sit(&client("alice"), TableId(2), at(11, 15)).unwrap();

    assert_eq!(club.table_of(&client("alice")), Some(TableId(2)));
    assert!(!club.tables().is_occupied(TableId(1)));
    assert_eq!(club.free_tables(), 1);
    assert_eq!(club.ledger().usage(TableId(1)), Some(TimeDelta::minutes(75)));
}

// === Join Queue ===

#[test]
fn join_queue_with_free_table_is_rejected() {
    let mut club = club_with_seated(2, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    assert_eq!(club.join_queue(&client("bob")), Err(Rejection::ICanWaitNoLonger));
    assert_eq!(club.waiting(), 0);
}

#[test]
fn join_queue_when_full_house() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    assert_eq!(club.join_queue(&client("bob")), Ok(None));
    assert!(club.is_waiting(&client("bob")));
    assert_eq!(club.waiting(), 1);
}

#[test]
fn join_queue_beyond_capacity_forces_exit() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    club.arrive(&client("carol")).unwrap();
    club.join_queue(&client("bob")).unwrap();

    let result = club.join_queue(&client("carol"));
    assert_eq!(result, Ok(Some(Transition::ForcedExit(client("carol")))));
    assert!(!club.is_present(&client("carol")));
    assert_eq!(club.waiting(), 1);
}

#[test]
fn join_queue_twice_is_ignored() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    club.join_queue(&client("bob")).unwrap();
    assert_eq!(club.join_queue(&client("bob")), Ok(None));
    assert_eq!(club.waiting(), 1);
}

#[test]
fn join_queue_unknown_client_is_rejected() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    assert_eq!(club.join_queue(&client("ghost")), Err(Rejection::ClientUnknown));
    assert!(!club.is_waiting(&client("ghost")));
    assert_eq!(club.waiting(), 0);
}

#[test]
fn seated_client_cannot_queue() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    assert_eq!(club.join_queue(&client("alice")), Ok(None));
    assert_eq!(club.waiting(), 0);
}

// === Leave ===

#[test]
fn leave_records_usage_and_frees_table() {
    let mut club = club_with_seated(2, &[("alice", 1)]);
    assert_eq!(club.leave(&client("alice"), at(12, 33)), Ok(None));
    assert!(!club.is_present(&client("alice")));
    assert_eq!(club.free_tables(), 2);
    assert_eq!(club.ledger().usage(TableId(1)), Some(TimeDelta::minutes(153)));
}

#[test]
fn leave_hands_table_to_first_waiting_client() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    club.join_queue(&client("bob")).unwrap();

    let result = club.leave(&client("alice"), at(11, 0));
    assert_eq!(
        result,
        Ok(Some(Transition::QueuePopped {
            client: client("bob"),
            table: TableId(1),
        }))
    );
    assert_eq!(club.table_of(&client("bob")), Some(TableId(1)));
    assert_eq!(club.free_tables(), 0);
    assert_eq!(club.waiting(), 0);
    assert_eq!(club.tables().occupant(TableId(1)).unwrap().since, at(11, 0));
}

#[test]
fn leave_unknown_client_is_rejected() {
    let mut club = Club::new(1);
    assert_eq!(club.leave(&client("ghost"), at(10, 0)), Err(Rejection::ClientUnknown));
}

#[test]
fn waiting_client_leaving_gives_up_place() {
    let mut club = club_with_seated(1, &[("alice", 1)]);
    club.arrive(&client("bob")).unwrap();
    club.join_queue(&client("bob")).unwrap();

    assert_eq!(club.leave(&client("bob"), at(10, 30)), Ok(None));
    assert!(!club.is_waiting(&client("bob")));
    assert_eq!(club.leave(&client("alice"), at(11, 0)), Ok(None));
    assert_eq!(club.free_tables(), 1);
}

// === Apply & Close ===

#[test]
fn apply_dispatches_by_action() {
    let mut club = Club::new(1);
    let alice = client("alice");
    club.apply(&Event::new(at(9, 0), alice.clone(), Action::Arrive)).unwrap();
    club.apply(&Event::new(at(9, 5), alice.clone(), Action::SitAtTable(TableId(1))))
        .unwrap();
    assert_eq!(club.table_of(&alice), Some(TableId(1)));

    let result = club.apply(&Event::new(at(9, 10), alice.clone(), Action::Arrive));
    assert_eq!(result, Err(Rejection::YouShallNotPass));

    club.apply(&Event::new(at(9, 20), alice.clone(), Action::Leave)).unwrap();
    assert!(!club.is_present(&alice));
}

#[test]
fn close_forces_everyone_out_sorted() {
    let mut club = club_with_seated(2, &[("zoe", 1), ("adam", 2)]);
    club.arrive(&client("mia")).unwrap();
    club.join_queue(&client("mia")).unwrap();

    let forced = club.close(at(19, 0));
    assert_eq!(forced, vec![client("adam"), client("mia"), client("zoe")]);
    assert_eq!(club.present_count(), 0);
    assert_eq!(club.waiting(), 0);
    assert_eq!(club.free_tables(), 2);
    assert_eq!(club.ledger().usage(TableId(1)), Some(TimeDelta::minutes(540)));
}

#[test]
fn billing_covers_used_tables_only() {
    let mut club = club_with_seated(3, &[("alice", 3)]);
    club.leave(&client("alice"), at(11, 31)).unwrap();

    let billing = club.billing(dec!(10));
    assert_eq!(billing.len(), 1);
    assert_eq!(billing[0].table, TableId(3));
    assert_eq!(billing[0].amount, dec!(30));
    assert_eq!(billing[0].usage, TimeDelta::minutes(91));
}

/// Last-in first-out waiting list, to exercise the `WaitingList` seam.
#[derive(Default)]
struct Stack(Vec<ClientId>);

impl WaitingList for Stack {
    fn enqueue(&mut self, client: ClientId) {
        self.0.push(client);
    }

    fn dequeue(&mut self) -> Option<ClientId> {
        self.0.pop()
    }

    fn withdraw(&mut self, client: &ClientId) -> bool {
        let before = self.0.len();
        self.0.retain(|waiting| waiting != client);
        self.0.len() != before
    }

    fn contains(&self, client: &ClientId) -> bool {
        self.0.contains(client)
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

#[test]
fn club_follows_custom_waiting_list_order() {
    let mut club = Club::with_queue(2, Stack::default());
    for (name, table) in [("alice", 1), ("dan", 2)] {
        club.arrive(&client(name)).unwrap();
        club.sit(&client(name), TableId(table), at(10, 0)).unwrap();
    }
    for name in ["bob", "carol"] {
        club.arrive(&client(name)).unwrap();
        club.join_queue(&client(name)).unwrap();
    }

    let result = club.leave(&client("alice"), at(11, 0));
    assert_eq!(
        result,
        Ok(Some(Transition::QueuePopped {
            client: client("carol"),
            table: TableId(1),
        }))
    );
    assert!(club.is_waiting(&client("bob")));
}

#[test]
fn default_waiting_list_is_fifo() {
    let mut queue = WaitQueue::new();
    queue.enqueue(client("first"));
    queue.enqueue(client("second"));
    assert_eq!(queue.dequeue(), Some(client("first")));
}
