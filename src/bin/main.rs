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

use clap::Parser;
use club_ledger::{InputError, OutputLine, parse_input, replay};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Computer Club - Replay a day of club events
///
/// Reads the club schedule and event log from a file and prints the
/// annotated event log followed by per-table revenue to stdout.
#[derive(Parser, Debug)]
#[command(name = "club-ledger")]
#[command(about = "Replays a computer club event log and bills table usage", long_about = None)]
struct Args {
    /// Path to the event log
    ///
    /// Expected format: table count, "HH:MM HH:MM" working hours, hourly
    /// rate, then one "HH:MM ACTION CLIENT [TABLE]" event per line.
    /// Example: cargo run -- day.txt > report.txt
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    // Nothing is printed unless the whole input parses.
    let lines = match load(&args.input) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Error reading '{}': {}", args.input.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = write_lines(&lines, io::stdout().lock()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}

/// Opens `path` and replays it.
///
/// # Errors
///
/// [`InputError::Io`] if the file cannot be opened, otherwise as [`run`].
fn load(path: &Path) -> Result<Vec<OutputLine>, InputError> {
    let file = File::open(path)?;
    run(BufReader::new(file))
}

/// Parses the whole input and replays it.
///
/// # Errors
///
/// Returns the first [`InputError`] found; no events are replayed in that case.
fn run<R: Read>(reader: R) -> Result<Vec<OutputLine>, InputError> {
    let input = parse_input(reader)?;
    info!(
        tables = input.schedule.tables(),
        opens = %input.schedule.opens(),
        closes = %input.schedule.closes(),
        events = input.events.len(),
        "replaying club day"
    );
    Ok(replay(&input.schedule, input.events))
}

/// Writes one output line per entry.
fn write_lines<W: Write>(lines: &[OutputLine], writer: W) -> io::Result<()> {
    let mut out = BufWriter::new(writer);
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()
}
