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

//! Per-table usage accounting and billing.
//!
//! Usage is billed per started hour with a 30 minute grace period: for a
//! total of `h` hours and `m` leftover minutes the table earns `h + 1` hours
//! when `m <= 30` and `h + 2` hours otherwise.
//!
//! # Example
//!
//! ```
//! use chrono::TimeDelta;
//! use club_ledger::ledger::bill;
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(bill(TimeDelta::minutes(90), dec!(10)), dec!(20));
//! assert_eq!(bill(TimeDelta::minutes(91), dec!(10)), dec!(30));
//! ```

use crate::base::TableId;
use crate::event::OutputLine;
use chrono::TimeDelta;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

const GRACE_MINUTES: i64 = 30;

/// Amount charged for `usage` at `hourly_rate`.
pub fn bill(usage: TimeDelta, hourly_rate: Decimal) -> Decimal {
    let minutes = usage.num_minutes().max(0);
    let hours = minutes / 60;
    let leftover = minutes % 60;
    let billed_hours = if leftover <= GRACE_MINUTES {
        hours + 1
    } else {
        hours + 2
    };
    Decimal::from(billed_hours) * hourly_rate
}

/// Summary entry for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Billing {
    pub table: TableId,
    pub amount: Decimal,
    pub usage: TimeDelta,
}

impl From<Billing> for OutputLine {
    fn from(billing: Billing) -> Self {
        OutputLine::Billing {
            table: billing.table,
            amount: billing.amount,
            usage: billing.usage,
        }
    }
}

/// Cumulative occupied time per table.
///
/// A table gets an entry the first time it is occupied and keeps it for
/// the whole session, even if its total stays at zero.
#[derive(Debug, Clone, Default)]
pub struct UsageLedger {
    usage: BTreeMap<TableId, TimeDelta>,
}

impl UsageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an entry for `table` if it has none.
    pub fn open(&mut self, table: TableId) {
        self.usage.entry(table).or_insert_with(TimeDelta::zero);
    }

    /// Adds `elapsed` to the total of `table`. Negative values are ignored.
    pub fn record(&mut self, table: TableId, elapsed: TimeDelta) {
        let total = self.usage.entry(table).or_insert_with(TimeDelta::zero);
        *total += elapsed.max(TimeDelta::zero());
    }

    pub fn usage(&self, table: TableId) -> Option<TimeDelta> {
        self.usage.get(&table).copied()
    }

    /// Billing for every table with an entry, ascending by table id.
    pub fn billing(&self, hourly_rate: Decimal) -> Vec<Billing> {
        self.usage
            .iter()
            .map(|(&table, &usage)| Billing {
                table,
                amount: bill(usage, hourly_rate),
                usage,
            })
            .collect()
    }

    /// Sum of all table totals.
    pub fn total_usage(&self) -> TimeDelta {
        self.usage
            .values()
            .fold(TimeDelta::zero(), |acc, &usage| acc + usage)
    }
}
