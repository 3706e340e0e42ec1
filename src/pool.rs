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

//! Table occupancy tracking.

use crate::base::{ClientId, TableId, TimeOfDay};
use chrono::TimeDelta;

/// Who holds a table and since when.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    pub client: ClientId,
    pub since: TimeOfDay,
}

/// Fixed set of tables `1..=N` with a maintained free-table counter.
///
/// # Invariants
///
/// - `free_count() + occupied_count() == total()`.
/// - The free counter never goes negative.
#[derive(Debug, Clone)]
pub struct TablePool {
    slots: Vec<Option<Occupancy>>,
    free: u32,
}

impl TablePool {
    pub fn new(tables: u32) -> Self {
        Self {
            slots: vec![None; tables as usize],
            free: tables,
        }
    }

    fn index(&self, table: TableId) -> Option<usize> {
        let index = (table.0 as usize).checked_sub(1)?;
        (index < self.slots.len()).then_some(index)
    }

    fn assert_invariants(&self) {
        debug_assert_eq!(
            self.free as usize,
            self.slots.iter().filter(|slot| slot.is_none()).count(),
            "Invariant violated: free counter out of sync with table slots"
        );
    }

    pub fn total(&self) -> u32 {
        self.slots.len() as u32
    }

    pub fn free_count(&self) -> u32 {
        self.free
    }

    pub fn occupied_count(&self) -> u32 {
        self.total() - self.free
    }

    /// A table outside the pool counts as occupied, so it can never be taken.
    pub fn is_occupied(&self, table: TableId) -> bool {
        match self.index(table) {
            Some(index) => self.slots[index].is_some(),
            None => true,
        }
    }

    pub fn occupant(&self, table: TableId) -> Option<&Occupancy> {
        self.index(table).and_then(|index| self.slots[index].as_ref())
    }

    /// Marks `table` as held by `client` from `time`.
    ///
    /// Returns `false` and changes nothing if the table is already occupied
    /// or does not exist.
    pub fn occupy(&mut self, table: TableId, client: ClientId, time: TimeOfDay) -> bool {
        let Some(index) = self.index(table) else {
            return false;
        };
        if self.slots[index].is_some() {
            return false;
        }
        self.slots[index] = Some(Occupancy {
            client,
            since: time,
        });
        self.free -= 1;
        self.assert_invariants();
        true
    }

    /// Frees `table` and returns how long it was held up to `time`.
    ///
    /// Releasing a table with no recorded start is a no-op returning zero.
    pub fn release(&mut self, table: TableId, time: TimeOfDay) -> TimeDelta {
        let Some(index) = self.index(table) else {
            return TimeDelta::zero();
        };
        let Some(occupancy) = self.slots[index].take() else {
            return TimeDelta::zero();
        };
        self.free += 1;
        self.assert_invariants();
        time.since(occupancy.since).max(TimeDelta::zero())
    }

    /// Iterates over occupied tables in ascending table order.
    pub fn occupied(&self) -> impl Iterator<Item = (TableId, &Occupancy)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.as_ref()
                .map(|occupancy| (TableId(index as u32 + 1), occupancy))
        })
    }
}
