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

//! Input events and output log lines.
//!
//! Incoming action codes:
//! - `1` client arrives
//! - `2` client sits at a table
//! - `3` client joins the wait queue
//! - `4` client leaves
//!
//! Synthesized action codes:
//! - `11` client forced out (queue full or closing time)
//! - `12` queued client seated at a vacated table
//! - `13` error annotation for the preceding event

use crate::base::{ClientId, HoursMinutes, TableId, TimeOfDay};
use crate::error::{FieldError, Rejection};
use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Action code carried on an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "u8")]
pub enum ActionCode {
    Arrive = 1,
    SitAtTable = 2,
    JoinQueue = 3,
    Leave = 4,
}

impl TryFrom<u8> for ActionCode {
    type Error = FieldError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Arrive),
            2 => Ok(Self::SitAtTable),
            3 => Ok(Self::JoinQueue),
            4 => Ok(Self::Leave),
            other => Err(FieldError::UnknownAction(other)),
        }
    }
}

/// What a client did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Arrive,
    SitAtTable(TableId),
    JoinQueue,
    Leave,
}

impl Action {
    pub fn code(&self) -> u8 {
        match self {
            Self::Arrive => ActionCode::Arrive as u8,
            Self::SitAtTable(_) => ActionCode::SitAtTable as u8,
            Self::JoinQueue => ActionCode::JoinQueue as u8,
            Self::Leave => ActionCode::Leave as u8,
        }
    }
}

/// A single parsed input event.
///
/// Keeps the text it was read from, so echoing the event reproduces the
/// input line as written (`09:11 +2 a 01` stays `09:11 +2 a 01`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub time: TimeOfDay,
    pub client: ClientId,
    pub action: Action,
    source: String,
}

impl Event {
    /// Builds an event whose source text is its canonical form,
    /// `HH:MM ACTION CLIENT [TABLE]`.
    pub fn new(time: TimeOfDay, client: ClientId, action: Action) -> Self {
        let mut source = format!("{time} {} {client}", action.code());
        if let Action::SitAtTable(table) = action {
            source.push(' ');
            source.push_str(&table.to_string());
        }
        Self {
            time,
            client,
            action,
            source,
        }
    }

    /// Replaces the source text with the line the event was parsed from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// The input line this event came from.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Renders the event's source line.
impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// One line of the output log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    /// Opening or closing time.
    Clock(TimeOfDay),
    /// Input event echoed verbatim.
    Echo(Event),
    /// `11`: client forced to leave.
    ForcedExit { time: TimeOfDay, client: ClientId },
    /// `12`: client taken from the queue and seated.
    QueuePopped {
        time: TimeOfDay,
        client: ClientId,
        table: TableId,
    },
    /// `13`: the preceding event was rejected.
    Error { time: TimeOfDay, rejection: Rejection },
    /// Per-table revenue and total occupied time.
    Billing {
        table: TableId,
        amount: Decimal,
        usage: TimeDelta,
    },
}

impl OutputLine {
    pub const FORCED_EXIT: u8 = 11;
    pub const QUEUE_POPPED: u8 = 12;
    pub const ERROR: u8 = 13;
}

impl fmt::Display for OutputLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock(time) => write!(f, "{time}"),
            Self::Echo(event) => write!(f, "{event}"),
            Self::ForcedExit { time, client } => {
                write!(f, "{time} {} {client}", Self::FORCED_EXIT)
            }
            Self::QueuePopped {
                time,
                client,
                table,
            } => write!(f, "{time} {} {client} {table}", Self::QUEUE_POPPED),
            Self::Error { time, rejection } => write!(f, "{time} {} {rejection}", Self::ERROR),
            Self::Billing {
                table,
                amount,
                usage,
            } => write!(f, "{table} {amount} {}", HoursMinutes(*usage)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn at(hour: u32, minute: u32) -> TimeOfDay {
        TimeOfDay::from_hm(hour, minute).unwrap()
    }

    fn client(name: &str) -> ClientId {
        name.parse().unwrap()
    }

    #[test]
    fn echo_reproduces_input_form() {
        let sit = Event::new(at(9, 54), client("client1"), Action::SitAtTable(TableId(1)));
        assert_eq!(OutputLine::Echo(sit).to_string(), "09:54 2 client1 1");

        let leave = Event::new(at(12, 33), client("client1"), Action::Leave);
        assert_eq!(OutputLine::Echo(leave).to_string(), "12:33 4 client1");
    }

    #[test]
    fn echo_keeps_source_text() {
        let sit = Event::new(at(9, 11), client("a"), Action::SitAtTable(TableId(1)))
            .with_source("09:11 +2 a 01");
        assert_eq!(sit.source(), "09:11 +2 a 01");
        assert_eq!(OutputLine::Echo(sit).to_string(), "09:11 +2 a 01");
    }

    #[test]
    fn synthesized_lines_use_output_codes() {
        let forced = OutputLine::ForcedExit {
            time: at(19, 0),
            client: client("client3"),
        };
        assert_eq!(forced.to_string(), "19:00 11 client3");

        let popped = OutputLine::QueuePopped {
            time: at(12, 33),
            client: client("client4"),
            table: TableId(1),
        };
        assert_eq!(popped.to_string(), "12:33 12 client4 1");

        let error = OutputLine::Error {
            time: at(8, 48),
            rejection: Rejection::NotOpenYet,
        };
        assert_eq!(error.to_string(), "08:48 13 NotOpenYet");
    }

    #[test]
    fn billing_line_shows_amount_and_usage() {
        let line = OutputLine::Billing {
            table: TableId(1),
            amount: dec!(70),
            usage: TimeDelta::minutes(358),
        };
        assert_eq!(line.to_string(), "1 70 05:58");
    }

    #[test]
    fn action_codes_round_trip_through_try_from() {
        assert_eq!(ActionCode::try_from(2), Ok(ActionCode::SitAtTable));
        assert_eq!(ActionCode::try_from(0), Err(FieldError::UnknownAction(0)));
        assert_eq!(Action::SitAtTable(TableId(3)).code(), 2);
        assert_eq!(Action::Leave.code(), 4);
    }
}
