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

//! Event replay engine.
//!
//! A [`Session`] replays one club day. It echoes every event into the
//! output log, filters events outside working hours, hands the rest to the
//! [`Club`] state machine and turns rejections and transitions into log
//! lines right after the event that caused them.
//!
//! # Output Order
//!
//! 1. Opening time.
//! 2. Each event, followed by its error or synthesized line if any.
//! 3. Forced exits at closing time, in client name order.
//! 4. Closing time.
//! 5. One billing line per used table, ascending by table id.
//! 6. Events after closing time, each followed by `NotOpenYet`.

use crate::club::{Club, Transition};
use crate::error::Rejection;
use crate::event::{Event, OutputLine};
use crate::schedule::Schedule;
use crate::wait_queue::{WaitQueue, WaitingList};
use tracing::{debug, info};

/// Replays `events` against `schedule` and returns the full output log.
///
/// # Example
///
/// ```
/// use club_ledger::{Action, Event, Schedule, TimeOfDay, replay};
/// use rust_decimal_macros::dec;
///
/// let at = |h, m| TimeOfDay::from_hm(h, m).unwrap();
/// let schedule = Schedule::new(1, at(9, 0), at(18, 0), dec!(10)).unwrap();
/// let events = vec![Event::new(at(8, 0), "early".parse().unwrap(), Action::Arrive)];
///
/// let lines: Vec<String> = replay(&schedule, events).iter().map(ToString::to_string).collect();
/// assert_eq!(lines, ["09:00", "08:00 1 early", "08:00 13 NotOpenYet", "18:00"]);
/// ```
pub fn replay<I>(schedule: &Schedule, events: I) -> Vec<OutputLine>
where
    I: IntoIterator<Item = Event>,
{
    let mut session = Session::new(schedule.clone());
    for event in events {
        session.process(event);
    }
    session.close()
}

/// One club day in progress.
#[derive(Debug)]
pub struct Session<Q = WaitQueue> {
    schedule: Schedule,
    club: Club<Q>,
    output: Vec<OutputLine>,
    after_hours: Vec<OutputLine>,
}

impl Session<WaitQueue> {
    pub fn new(schedule: Schedule) -> Self {
        Self::with_queue(schedule, WaitQueue::new())
    }
}

impl<Q: WaitingList> Session<Q> {
    /// Starts a session; the opening time is the first output line.
    pub fn with_queue(schedule: Schedule, queue: Q) -> Self {
        let club = Club::with_queue(schedule.tables(), queue);
        let output = vec![OutputLine::Clock(schedule.opens())];
        Self {
            schedule,
            club,
            output,
            after_hours: Vec::new(),
        }
    }

    /// Replays a single event. Events are expected in non-decreasing time
    /// order and are never reordered.
    pub fn process(&mut self, event: Event) {
        let time = event.time;

        if self.schedule.is_before_opening(time) {
            debug!(%event, "event before opening");
            self.output.push(OutputLine::Echo(event));
            self.output.push(OutputLine::Error {
                time,
                rejection: Rejection::NotOpenYet,
            });
            return;
        }
        if self.schedule.is_after_closing(time) {
            debug!(%event, "event after closing, deferred");
            self.after_hours.push(OutputLine::Echo(event));
            self.after_hours.push(OutputLine::Error {
                time,
                rejection: Rejection::NotOpenYet,
            });
            return;
        }

        let outcome = self.club.apply(&event);
        let client = event.client.clone();
        self.output.push(OutputLine::Echo(event));

        match outcome {
            Ok(None) => {}
            Ok(Some(Transition::ForcedExit(client))) => {
                self.output.push(OutputLine::ForcedExit { time, client });
            }
            Ok(Some(Transition::QueuePopped { client, table })) => {
                self.output.push(OutputLine::QueuePopped {
                    time,
                    client,
                    table,
                });
            }
            Err(rejection) => {
                debug!(%client, %rejection, "event rejected");
                self.output.push(OutputLine::Error { time, rejection });
            }
        }
    }

    /// Current club state.
    pub fn club(&self) -> &Club<Q> {
        &self.club
    }

    /// Lines produced so far, excluding deferred after-hours lines.
    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    /// Ends the day: forced exits, closing time, billing, deferred lines.
    pub fn close(mut self) -> Vec<OutputLine> {
        let closes = self.schedule.closes();

        let remaining = self.club.close(closes);
        let forced = remaining.len();
        self.output.extend(
            remaining
                .into_iter()
                .map(|client| OutputLine::ForcedExit {
                    time: closes,
                    client,
                }),
        );
        self.output.push(OutputLine::Clock(closes));

        let billing = self.club.billing(self.schedule.hourly_rate());
        info!(
            forced_exits = forced,
            billed_tables = billing.len(),
            used_minutes = self.club.ledger().total_usage().num_minutes(),
            deferred_events = self.after_hours.len() / 2,
            "club closed"
        );
        self.output.extend(billing.into_iter().map(OutputLine::from));
        self.output.append(&mut self.after_hours);
        self.output
    }
}
