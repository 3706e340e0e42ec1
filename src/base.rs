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

//! Core identifier and time types for clients, tables and the club clock.

use crate::error::FieldError;
use chrono::{NaiveTime, TimeDelta, Timelike};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Name of a club client.
///
/// Names are non-empty and restricted to `a-z`, `0-9`, `_` and `-`, so they
/// can be echoed into the space separated output log unchanged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ClientId(String);

impl ClientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClientId {
    type Error = FieldError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        let valid = !name.is_empty()
            && name
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        if valid {
            Ok(ClientId(name))
        } else {
            Err(FieldError::InvalidClientName(name))
        }
    }
}

impl FromStr for ClientId {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClientId::try_from(s.to_owned())
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Table number, `1..=N` for a club with `N` tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wall-clock time within the club day, minute resolution.
///
/// Parsed from and rendered as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Returns `None` if `hour` or `minute` is out of range.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(TimeOfDay)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Elapsed time from `earlier` to `self`. Negative if `earlier` is later.
    pub fn since(&self, earlier: TimeOfDay) -> TimeDelta {
        self.0.signed_duration_since(earlier.0)
    }
}

impl FromStr for TimeOfDay {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts single-digit hours; the log format does not.
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 5
            && bytes[2] == b':'
            && [0usize, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if !shaped {
            return Err(FieldError::InvalidTime(s.to_owned()));
        }
        NaiveTime::parse_from_str(s, "%H:%M")
            .map(TimeOfDay)
            .map_err(|_| FieldError::InvalidTime(s.to_owned()))
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = FieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

/// Renders a non-negative duration as `HH:MM`.
pub(crate) struct HoursMinutes(pub TimeDelta);

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.0.num_minutes().max(0);
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
