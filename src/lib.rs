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

//! # Club Ledger
//!
//! This library replays a day of computer club events (arrivals, seating,
//! waiting and departures) against a fixed set of tables and produces the
//! annotated event log together with per-table revenue.
//!
//! ## Core Components
//!
//! - [`Session`]: Replays events in order and assembles the output log
//! - [`Club`]: State machine owning tables, clients, the waiting list and usage
//! - [`Schedule`]: Table count, working hours and hourly rate
//! - [`Rejection`]: Reasons an event is refused, rendered as `13` lines
//! - [`parse_input`]: Reads the text log format into a schedule and events
//!
//! ## Example
//!
//! ```
//! use club_ledger::{parse_input, replay};
//! use std::io::Cursor;
//!
//! let text = "1\n09:00 18:00\n10\n09:10 1 alice\n09:15 2 alice 1\n10:20 4 alice\n";
//! let input = parse_input(Cursor::new(text)).unwrap();
//! let lines: Vec<String> = replay(&input.schedule, input.events)
//!     .iter()
//!     .map(ToString::to_string)
//!     .collect();
//!
//! assert_eq!(lines.first().map(String::as_str), Some("09:00"));
//! assert_eq!(lines.last().map(String::as_str), Some("1 20 01:05"));
//! ```
//!
//! ## Execution Model
//!
//! A session is single-threaded and owns all of its state; independent
//! sessions share nothing and can run side by side.

mod base;
pub mod club;
mod engine;
pub mod error;
mod event;
mod input;
pub mod ledger;
pub mod pool;
pub mod registry;
mod schedule;
pub mod wait_queue;

pub use base::{ClientId, TableId, TimeOfDay};
pub use club::{Club, Transition};
pub use engine::{Session, replay};
pub use error::{FieldError, InputError, Rejection};
pub use event::{Action, ActionCode, Event, OutputLine};
pub use input::{ClubInput, parse_input};
pub use ledger::{Billing, UsageLedger};
pub use schedule::Schedule;
pub use wait_queue::{WaitQueue, WaitingList};
