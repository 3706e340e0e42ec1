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

//! Club working hours, capacity and price.

use crate::base::{TableId, TimeOfDay};
use crate::error::InputError;
use rust_decimal::Decimal;

/// Static configuration of a club session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    tables: u32,
    opens: TimeOfDay,
    closes: TimeOfDay,
    hourly_rate: Decimal,
}

impl Schedule {
    /// Builds a schedule, checking that the club has at least one table,
    /// opens strictly before it closes and charges a non-negative rate.
    pub fn new(
        tables: u32,
        opens: TimeOfDay,
        closes: TimeOfDay,
        hourly_rate: Decimal,
    ) -> Result<Self, InputError> {
        if tables == 0 {
            return Err(InputError::InvalidSchedule(
                "club must have at least one table".to_owned(),
            ));
        }
        if opens >= closes {
            return Err(InputError::InvalidSchedule(format!(
                "opening time {opens} is not before closing time {closes}"
            )));
        }
        if hourly_rate.is_sign_negative() {
            return Err(InputError::InvalidSchedule(format!(
                "hourly rate {hourly_rate} is negative"
            )));
        }
        Ok(Self {
            tables,
            opens,
            closes,
            hourly_rate,
        })
    }

    pub fn tables(&self) -> u32 {
        self.tables
    }

    pub fn opens(&self) -> TimeOfDay {
        self.opens
    }

    pub fn closes(&self) -> TimeOfDay {
        self.closes
    }

    pub fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    pub fn has_table(&self, table: TableId) -> bool {
        (1..=self.tables).contains(&table.0)
    }

    pub fn is_before_opening(&self, time: TimeOfDay) -> bool {
        time < self.opens
    }

    pub fn is_after_closing(&self, time: TimeOfDay) -> bool {
        time > self.closes
    }
}
