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

//! Waiting list of clients with no free table.
//!
//! The queue is unaware of capacity; the caller decides when it is full.

use crate::base::ClientId;
use std::collections::VecDeque;

/// Ordered waiting list of clients.
pub trait WaitingList {
    /// Appends `client` at the back.
    fn enqueue(&mut self, client: ClientId);

    /// Takes the client that has waited longest.
    fn dequeue(&mut self) -> Option<ClientId>;

    /// Removes `client` wherever it stands. Returns `false` if it was not waiting.
    fn withdraw(&mut self, client: &ClientId) -> bool;

    fn contains(&self, client: &ClientId) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO [`WaitingList`] backed by a ring buffer.
#[derive(Debug, Clone, Default)]
pub struct WaitQueue {
    clients: VecDeque<ClientId>,
}

impl WaitQueue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WaitingList for WaitQueue {
    fn enqueue(&mut self, client: ClientId) {
        self.clients.push_back(client);
    }

    fn dequeue(&mut self) -> Option<ClientId> {
        self.clients.pop_front()
    }

    fn withdraw(&mut self, client: &ClientId) -> bool {
        match self.clients.iter().position(|waiting| waiting == client) {
            Some(index) => self.clients.remove(index).is_some(),
            None => false,
        }
    }

    fn contains(&self, client: &ClientId) -> bool {
        self.clients.contains(client)
    }

    fn len(&self) -> usize {
        self.clients.len()
    }
}
