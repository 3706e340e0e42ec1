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

//! Input log parsing.
//!
//! The input is a space separated text log:
//!
//! ```text
//! 3
//! 09:00 19:00
//! 10
//! 08:48 1 client1
//! 09:54 2 client1 1
//! ```
//!
//! The first three lines are the table count, the working hours and the
//! hourly rate. Every following line is an event `HH:MM ACTION CLIENT [TABLE]`.
//! Parsing is all-or-nothing: the first malformed line aborts with an
//! [`InputError`] naming that line.

use crate::base::{ClientId, TableId, TimeOfDay};
use crate::error::InputError;
use crate::event::{Action, ActionCode, Event};
use crate::schedule::Schedule;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::iter::Zip;
use std::ops::RangeFrom;
use tracing::debug;

/// Parsed input: the day's schedule and its events in input order.
#[derive(Debug, Clone)]
pub struct ClubInput {
    pub schedule: Schedule,
    pub events: Vec<Event>,
}

/// Reads a complete input log.
///
/// # Errors
///
/// - [`InputError::MissingHeader`] - fewer than three header lines.
/// - [`InputError::Malformed`] - wrong field count or unparsable field.
/// - [`InputError::InvalidSchedule`] - zero tables or opening not before closing.
/// - [`InputError::TableOutOfRange`] - event names a table the club lacks.
/// - [`InputError::OutOfOrder`] - event earlier than its predecessor.
/// - [`InputError::Csv`] - the underlying reader failed.
/// - [`InputError::Io`] - the input could not be read as UTF-8 text.
pub fn parse_input<R: Read>(mut reader: R) -> Result<ClubInput, InputError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if let Some(line) = first_blank_line(&text) {
        return Err(InputError::Malformed {
            line,
            reason: "blank line".to_owned(),
        });
    }

    let rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false) // The schedule header is not a CSV header row
        .flexible(true) // Header and event lines differ in width
        .quoting(false)
        .from_reader(text.as_bytes());
    // With no blank lines left, record n sits on line n.
    let mut records = rdr.into_records().zip(1u64..);

    let (tables,): (u32,) = header(&mut records, "table count", 1)?;
    let (opens, closes): (TimeOfDay, TimeOfDay) = header(&mut records, "working hours", 2)?;
    let (rate,): (u64,) = header(&mut records, "hourly rate", 1)?;
    let schedule = Schedule::new(tables, opens, closes, Decimal::from(rate))?;

    let mut events = Vec::new();
    let mut previous: Option<TimeOfDay> = None;
    for (result, line) in records {
        let record = result?;
        let event = parse_event(&record, line)?;

        if let Action::SitAtTable(table) = event.action {
            if !schedule.has_table(table) {
                return Err(InputError::TableOutOfRange {
                    line,
                    table: table.0,
                    tables: schedule.tables(),
                });
            }
        }
        if previous.is_some_and(|previous| event.time < previous) {
            return Err(InputError::OutOfOrder {
                line,
                time: event.time.to_string(),
            });
        }
        previous = Some(event.time);
        events.push(event);
    }

    debug!(
        tables = schedule.tables(),
        events = events.len(),
        "input parsed"
    );
    Ok(ClubInput { schedule, events })
}

/// 1-based number of the first empty line, if any.
///
/// The csv reader skips empty lines without reporting them, so they are
/// caught here. A single trailing newline does not count as a line.
fn first_blank_line(text: &str) -> Option<u64> {
    text.lines()
        .zip(1u64..)
        .find(|(line, _)| line.is_empty())
        .map(|(_, number)| number)
}

type NumberedRecords<'a> = Zip<StringRecordsIntoIter<&'a [u8]>, RangeFrom<u64>>;

fn header<T: DeserializeOwned>(
    records: &mut NumberedRecords<'_>,
    name: &'static str,
    width: usize,
) -> Result<T, InputError> {
    let (record, line) = records.next().ok_or(InputError::MissingHeader(name))?;
    let record = record?;
    if record.len() != width {
        return Err(InputError::Malformed {
            line,
            reason: format!("invalid {name}: expected {width} fields, found {}", record.len()),
        });
    }
    deserialize(&record).map_err(|reason| InputError::Malformed {
        line,
        reason: format!("invalid {name}: {reason}"),
    })
}

fn parse_event(record: &StringRecord, line: u64) -> Result<Event, InputError> {
    let malformed = |reason: String| InputError::Malformed { line, reason };

    let (time, code, client): (TimeOfDay, ActionCode, ClientId) = match record.len() {
        3 => deserialize(record).map_err(malformed)?,
        4 => {
            let (time, code, client, table): (TimeOfDay, ActionCode, ClientId, TableId) =
                deserialize(record).map_err(malformed)?;
            if code != ActionCode::SitAtTable {
                return Err(malformed(format!(
                    "action {} takes no table",
                    code as u8
                )));
            }
            let event = Event::new(time, client, Action::SitAtTable(table));
            return Ok(event.with_source(source(record)));
        }
        n => return Err(malformed(format!("expected 3 or 4 fields, found {n}"))),
    };

    let action = match code {
        ActionCode::Arrive => Action::Arrive,
        ActionCode::JoinQueue => Action::JoinQueue,
        ActionCode::Leave => Action::Leave,
        ActionCode::SitAtTable => {
            return Err(malformed("action 2 requires a table".to_owned()));
        }
    };
    Ok(Event::new(time, client, action).with_source(source(record)))
}

/// The record's fields joined back into the line they were split from.
fn source(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(" ")
}

/// Deserializes a whole record into `T`, reporting just the field problem.
fn deserialize<T: DeserializeOwned>(record: &StringRecord) -> Result<T, String> {
    record.deserialize(None).map_err(|err| match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    })
}
