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

//! Error types for input parsing and event replay.

use thiserror::Error;

/// Semantic rejection of a single event during replay.
///
/// Rejections never stop the replay; each one becomes a `13` line whose
/// trailing code is the `Display` form of the variant.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Client arrived while already inside the club
    #[error("YouShallNotPass")]
    YouShallNotPass,

    /// Event names a client that is not inside the club
    #[error("ClientUnknown")]
    ClientUnknown,

    /// Requested table is already occupied
    #[error("PlaceIsBusy")]
    PlaceIsBusy,

    /// Event happened outside working hours
    #[error("NotOpenYet")]
    NotOpenYet,

    /// Client asked to wait while a table is free
    #[error("ICanWaitNoLonger")]
    ICanWaitNoLonger,
}

/// Invalid value in a single input field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// Time is not a valid `HH:MM`
    #[error("invalid time {0:?} (expected HH:MM)")]
    InvalidTime(String),

    /// Client name contains characters outside `a-z0-9_-`
    #[error("invalid client name {0:?}")]
    InvalidClientName(String),

    /// Action code is not one of 1-4
    #[error("unknown action {0}")]
    UnknownAction(u8),
}

/// Fatal input errors. Any of these aborts the whole run before output.
#[derive(Error, Debug)]
pub enum InputError {
    /// Input ended before the schedule header was complete
    #[error("missing {0}")]
    MissingHeader(&'static str),

    /// A line could not be parsed
    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },

    /// Table id outside `1..=tables`
    #[error("line {line}: table {table} does not exist (club has {tables} tables)")]
    TableOutOfRange { line: u64, table: u32, tables: u32 },

    /// Event timestamp earlier than the previous event
    #[error("line {line}: event at {time} is earlier than the previous event")]
    OutOfOrder { line: u64, time: String },

    /// Schedule header values are inconsistent
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}
