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

//! Club state machine.
//!
//! [`Club`] owns all mutable state of a session: table occupancy, present
//! clients, the waiting list and the usage ledger. Each action kind has one
//! transition; every check runs before the first mutation so a rejected
//! event leaves the club untouched.
//!
//! # Example
//!
//! ```
//! use club_ledger::{Action, Club, Event, Rejection, TableId, TimeOfDay};
//!
//! let mut club = Club::new(1);
//! let at = TimeOfDay::from_hm(10, 0).unwrap();
//! let alice = "alice".parse().unwrap();
//!
//! club.apply(&Event::new(at, alice, Action::Arrive)).unwrap();
//! let bob = "bob".parse().unwrap();
//! let result = club.apply(&Event::new(at, bob, Action::SitAtTable(TableId(1))));
//! assert_eq!(result, Err(Rejection::ClientUnknown));
//! ```

use crate::base::{ClientId, TableId, TimeOfDay};
use crate::error::Rejection;
use crate::event::{Action, Event};
use crate::ledger::{Billing, UsageLedger};
use crate::pool::TablePool;
use crate::registry::ClientRegistry;
use crate::wait_queue::{WaitQueue, WaitingList};
use rust_decimal::Decimal;
use tracing::trace;

/// Synthesized consequence of an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Client had to leave because the waiting list was full.
    ForcedExit(ClientId),
    /// Next waiting client took the table that was just vacated.
    QueuePopped { client: ClientId, table: TableId },
}

/// Owned aggregate of all club state for one session.
///
/// # Invariants
///
/// - A client is absent, waiting, or holding exactly one table.
/// - Every occupied table belongs to exactly one present client and the
///   registry points back at that table.
/// - The waiting list never grows beyond the number of tables.
#[derive(Debug, Clone)]
pub struct Club<Q = WaitQueue> {
    tables: TablePool,
    clients: ClientRegistry,
    queue: Q,
    ledger: UsageLedger,
}

impl Club<WaitQueue> {
    pub fn new(tables: u32) -> Self {
        Self::with_queue(tables, WaitQueue::new())
    }
}

impl<Q: WaitingList> Club<Q> {
    /// Creates a club with `tables` free tables using `queue` as waiting list.
    pub fn with_queue(tables: u32, queue: Q) -> Self {
        Self {
            tables: TablePool::new(tables),
            clients: ClientRegistry::new(),
            queue,
            ledger: UsageLedger::new(),
        }
    }

    fn assert_invariants(&self) {
        debug_assert!(
            self.queue.len() <= self.tables.total() as usize,
            "Invariant violated: waiting list longer than table count"
        );
        debug_assert!(
            self.tables
                .occupied()
                .all(|(table, held)| self.clients.table_of(&held.client) == Some(table)),
            "Invariant violated: occupied table not mirrored in registry"
        );
        debug_assert_eq!(
            self.clients.seated().count(),
            self.tables.occupied_count() as usize,
            "Invariant violated: seated clients differ from occupied tables"
        );
    }

    /// Applies one in-hours event.
    ///
    /// | Action | Rejections | Transition |
    /// |--------|------------|------------|
    /// | Arrive | `YouShallNotPass` | - |
    /// | SitAtTable | `ClientUnknown`, `PlaceIsBusy` | - |
    /// | JoinQueue | `ClientUnknown`, `ICanWaitNoLonger` | `ForcedExit` when the list is full |
    /// | Leave | `ClientUnknown` | `QueuePopped` when someone was waiting |
    pub fn apply(&mut self, event: &Event) -> Result<Option<Transition>, Rejection> {
        let result = match event.action {
            Action::Arrive => self.arrive(&event.client).map(|()| None),
            Action::SitAtTable(table) => self.sit(&event.client, table, event.time).map(|()| None),
            Action::JoinQueue => self.join_queue(&event.client),
            Action::Leave => self.leave(&event.client, event.time),
        };
        self.assert_invariants();
        result
    }

    pub fn arrive(&mut self, client: &ClientId) -> Result<(), Rejection> {
        if !self.clients.register(client.clone()) {
            return Err(Rejection::YouShallNotPass);
        }
        trace!(%client, "client arrived");
        Ok(())
    }

    /// Seats `client` at `table`. A client already holding another table
    /// moves, and the time spent at the old table goes to the ledger.
    pub fn sit(
        &mut self,
        client: &ClientId,
        table: TableId,
        time: TimeOfDay,
    ) -> Result<(), Rejection> {
        if !self.clients.is_present(client) {
            return Err(Rejection::ClientUnknown);
        }
        if self.tables.is_occupied(table) {
            return Err(Rejection::PlaceIsBusy);
        }

        if let Some(previous) = self.clients.unassign(client) {
            let held = self.tables.release(previous, time);
            self.ledger.record(previous, held);
            trace!(%client, table = %previous, minutes = held.num_minutes(), "client switched tables");
        }
        self.queue.withdraw(client);

        self.tables.occupy(table, client.clone(), time);
        self.ledger.open(table);
        self.clients.assign(client.clone(), table);
        trace!(%client, %table, "client seated");
        Ok(())
    }

    /// Puts `client` on the waiting list.
    ///
    /// Waiting is refused while any table is free. When the list already
    /// holds as many clients as there are tables, the client leaves instead.
    ///
    /// A client who never arrived is refused with `ClientUnknown`, the same
    /// as for sitting and leaving, so the list only ever holds present
    /// clients. The base rules for this action list only `ICanWaitNoLonger`
    /// and the forced exit; this check is an addition to them.
    pub fn join_queue(&mut self, client: &ClientId) -> Result<Option<Transition>, Rejection> {
        if !self.clients.is_present(client) {
            return Err(Rejection::ClientUnknown);
        }
        if self.tables.free_count() > 0 {
            return Err(Rejection::ICanWaitNoLonger);
        }
        if self.clients.table_of(client).is_some() || self.queue.contains(client) {
            return Ok(None);
        }
        if self.queue.len() >= self.tables.total() as usize {
            self.clients.unregister(client);
            trace!(%client, "waiting list full, client left");
            return Ok(Some(Transition::ForcedExit(client.clone())));
        }
        self.queue.enqueue(client.clone());
        trace!(%client, waiting = self.queue.len(), "client waiting");
        Ok(None)
    }

    /// Removes `client` from the club. A vacated table goes to the first
    /// waiting client, starting at `time`.
    pub fn leave(
        &mut self,
        client: &ClientId,
        time: TimeOfDay,
    ) -> Result<Option<Transition>, Rejection> {
        if !self.clients.is_present(client) {
            return Err(Rejection::ClientUnknown);
        }

        let transition = match self.clients.unregister(client) {
            Some(table) => {
                let held = self.tables.release(table, time);
                self.ledger.record(table, held);
                trace!(%client, %table, minutes = held.num_minutes(), "client left table");
                self.seat_next(table, time)
            }
            None => {
                self.queue.withdraw(client);
                trace!(%client, "client left without a table");
                None
            }
        };
        Ok(transition)
    }

    fn seat_next(&mut self, table: TableId, time: TimeOfDay) -> Option<Transition> {
        let next = self.queue.dequeue()?;
        self.tables.occupy(table, next.clone(), time);
        self.ledger.open(table);
        self.clients.assign(next.clone(), table);
        trace!(client = %next, %table, "waiting client seated");
        Some(Transition::QueuePopped {
            client: next,
            table,
        })
    }

    /// Forces every remaining client out at `time`, in name order, and
    /// returns them. Held tables are released into the ledger.
    pub fn close(&mut self, time: TimeOfDay) -> Vec<ClientId> {
        let remaining = self.clients.clients_sorted();
        for client in &remaining {
            if let Some(table) = self.clients.unregister(client) {
                let held = self.tables.release(table, time);
                self.ledger.record(table, held);
            }
        }
        while self.queue.dequeue().is_some() {}
        self.assert_invariants();
        remaining
    }

    pub fn billing(&self, hourly_rate: Decimal) -> Vec<Billing> {
        self.ledger.billing(hourly_rate)
    }

    pub fn is_present(&self, client: &ClientId) -> bool {
        self.clients.is_present(client)
    }

    pub fn table_of(&self, client: &ClientId) -> Option<TableId> {
        self.clients.table_of(client)
    }

    pub fn is_waiting(&self, client: &ClientId) -> bool {
        self.queue.contains(client)
    }

    pub fn present_count(&self) -> usize {
        self.clients.len()
    }

    pub fn total_tables(&self) -> u32 {
        self.tables.total()
    }

    pub fn free_tables(&self) -> u32 {
        self.tables.free_count()
    }

    pub fn occupied_tables(&self) -> u32 {
        self.tables.occupied_count()
    }

    pub fn waiting(&self) -> usize {
        self.queue.len()
    }

    pub fn tables(&self) -> &TablePool {
        &self.tables
    }

    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }
}
