//! The interactive explore-then-restart loop.
//!
//! Each iteration resolves a selection, loads the matching trips, prints the
//! four statistic sections, offers the raw-row viewer and finally asks
//! whether to start over.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use bikeshare_core::error::Result;
use bikeshare_core::filters::Selection;
use bikeshare_data::analysis::analyze;
use bikeshare_data::reader::load_dataset;
use bikeshare_ui::prompt::{resolve_selection, Console};
use bikeshare_ui::report_view::render_report;
use tracing::{error, info};

use crate::pager::run_viewer;

pub const RESTART_PROMPT: &str = "\nWould you like to restart? Enter yes or no.\n";

// ── Public types ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Done,
}

/// How one pass through the loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationOutcome {
    /// Statistics were shown for the selection.
    Analyzed { selection: Selection, trips: usize },
    /// The data file could not be loaded; the message was shown to the user.
    LoadFailed { selection: Selection, message: String },
    /// Input ended before a selection was complete.
    InputClosed,
}

/// What happened over a whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub iterations: Vec<IterationOutcome>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Drives the RUNNING → DONE state machine over one console.
pub struct Session<R, W> {
    console: Console<R, W>,
    data_dir: PathBuf,
    state: SessionState,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(console: Console<R, W>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            console,
            data_dir: data_dir.into(),
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Loop until the user declines to restart or input ends.
    ///
    /// Only console I/O failures are returned as errors; load failures are
    /// reported to the user and recorded in the summary.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        while self.state == SessionState::Running {
            let outcome = self.iterate()?;
            let input_closed = outcome == IterationOutcome::InputClosed;
            summary.iterations.push(outcome);

            if input_closed || !self.wants_restart()? {
                self.state = SessionState::Done;
            }
        }

        info!("session finished after {} iteration(s)", summary.iterations.len());
        Ok(summary)
    }

    /// Hand back the console once the session is over.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    // ── Private implementation ────────────────────────────────────────────

    fn iterate(&mut self) -> Result<IterationOutcome> {
        let Some(selection) = resolve_selection(&mut self.console)? else {
            info!("input closed before a selection was made");
            return Ok(IterationOutcome::InputClosed);
        };
        info!("selection: {}", selection);

        let dataset = match load_dataset(&self.data_dir, selection) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!("failed to load data for {}: {}", selection, e);
                let message = e.to_string();
                self.console
                    .say(&format!("\nSorry, the data could not be loaded: {}", message))?;
                return Ok(IterationOutcome::LoadFailed { selection, message });
            }
        };
        info!(
            "loaded {} of {} trips for {}",
            dataset.len(),
            dataset.source_rows,
            selection.city
        );

        let report = analyze(&dataset);
        self.console
            .say_all(&render_report(&report, selection.city))?;

        run_viewer(&mut self.console, &dataset)?;

        Ok(IterationOutcome::Analyzed {
            selection,
            trips: report.trips,
        })
    }

    fn wants_restart(&mut self) -> Result<bool> {
        // Only the bare token restarts; surrounding spaces do not.
        let answer = self.console.ask_exact(RESTART_PROMPT)?;
        Ok(answer.as_deref() == Some("yes"))
    }
}

/// Run a full session over `input` / `output`, reading city files from `data_dir`.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: W,
    data_dir: &Path,
) -> Result<SessionSummary> {
    Session::new(Console::new(input, output), data_dir).run()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
