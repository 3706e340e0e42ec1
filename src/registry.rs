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

//! Clients currently inside the club.

use crate::base::{ClientId, TableId};
use std::collections::HashMap;

/// Maps each present client to the table it holds, if any.
#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    clients: HashMap<ClientId, Option<TableId>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_present(&self, client: &ClientId) -> bool {
        self.clients.contains_key(client)
    }

    /// Table held by `client`. `None` if absent or unseated.
    pub fn table_of(&self, client: &ClientId) -> Option<TableId> {
        self.clients.get(client).copied().flatten()
    }

    /// Adds `client` as present and unseated. Returns `false` if already present.
    pub fn register(&mut self, client: ClientId) -> bool {
        if self.clients.contains_key(&client) {
            return false;
        }
        self.clients.insert(client, None);
        true
    }

    /// Records that `client` now holds `table`, registering it if needed.
    pub fn assign(&mut self, client: ClientId, table: TableId) {
        self.clients.insert(client, Some(table));
    }

    /// Marks a present client as unseated. Returns the table it held.
    pub fn unassign(&mut self, client: &ClientId) -> Option<TableId> {
        self.clients.get_mut(client).and_then(Option::take)
    }

    /// Removes `client`, returning the table it held.
    pub fn unregister(&mut self, client: &ClientId) -> Option<TableId> {
        self.clients.remove(client).flatten()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Present clients in lexicographic order.
    pub fn clients_sorted(&self) -> Vec<ClientId> {
        let mut clients: Vec<ClientId> = self.clients.keys().cloned().collect();
        clients.sort();
        clients
    }

    pub fn seated(&self) -> impl Iterator<Item = (&ClientId, TableId)> {
        self.clients
            .iter()
            .filter_map(|(client, table)| table.map(|table| (client, table)))
    }
}
