//! Interactive prompt loop
//!
//! This module handles:
//! * Reading lines and dispatching them to the client, one at a time
//! * Rendering responses
//! * Interrupt handling: CTRL+C while idle quits, while busy it warns once
//!   and terminates on the second press

pub mod input;
pub mod interrupt;
pub mod output;
mod state;
pub mod terminal;

pub use input::{LineReader, ReadOutcome, TerminalReader};
pub use interrupt::{Escalation, Interrupt, InterruptReceiver, InterruptSender, PendingExit};
pub use output::format_response;
pub use state::PromptState;
pub use terminal::TerminalGuard;

use crate::client::{Client, Request};
use crate::metrics::{counters, labels};
use crate::Result;
use std::io::Write;

/// Command that ends the session
pub const EXIT_COMMAND: &str = "exit";

/// Warning printed on the first CTRL+C while a request is running
pub const BUSY_INTERRUPT_WARNING: &str = "Event loop is running... wait for a prompt and type \
     'exit' for a clean exit or press CTRL+C again if you really want quit now.";

/// How the prompt loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopOutcome {
    /// Exit command or end of input
    Exit,
    /// CTRL+C while idle
    Interrupted,
    /// Second CTRL+C while a request was running; the request was abandoned
    ForcedExit,
}

impl LoopOutcome {
    /// Process exit status for this outcome
    pub fn exit_code(&self) -> i32 {
        match self {
            LoopOutcome::Exit => crate::cli::EXIT_OK,
            LoopOutcome::Interrupted => crate::cli::EXIT_INTERRUPTED,
            LoopOutcome::ForcedExit => crate::cli::EXIT_FAILURE,
        }
    }
}

/// Counters kept over one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Requests handed to the client (or rejected before sending)
    pub requests: u64,
    /// Requests that ended in an error
    pub failures: u64,
    /// Busy-interrupt warnings emitted
    pub interrupt_warnings: u64,
}

enum Dispatch {
    Completed,
    Abandoned,
}

/// Read-dispatch-print loop
///
/// # Examples
///
/// ```ignore
/// let (tx, rx) = interrupt::channel();
/// interrupt::forward_ctrl_c(tx);
///
/// let reader = TerminalReader::spawn(Some(input::default_history_path()))?;
/// let mut prompt = PromptLoop::new(client, reader, rx, std::io::stdout());
/// let outcome = prompt.run().await?;
/// std::process::exit(outcome.exit_code());
/// ```
pub struct PromptLoop<C, R, W> {
    client: C,
    reader: R,
    interrupts: InterruptReceiver,
    out: W,
    prompt: String,
    state: PromptState,
    stats: LoopStats,
}

impl<C, R, W> PromptLoop<C, R, W>
where
    C: Client,
    R: LineReader,
    W: Write,
{
    /// Create a prompt loop with the default `> ` prompt
    pub fn new(client: C, reader: R, interrupts: InterruptReceiver, out: W) -> Self {
        Self {
            client,
            reader,
            interrupts,
            out,
            prompt: "> ".to_string(),
            state: PromptState::Idle,
            stats: LoopStats::default(),
        }
    }

    /// Set the prompt text
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Current state
    pub fn state(&self) -> PromptState {
        self.state
    }

    /// Session counters
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Give back the client, e.g. to close it
    pub fn into_client(self) -> C {
        self.client
    }

    /// Run until the user exits or an interrupt ends the session.
    ///
    /// Errors returned by requests are printed and do not end the loop; only
    /// output and input failures are returned as `Err`.
    pub async fn run(&mut self) -> Result<LoopOutcome> {
        loop {
            let read = tokio::select! {
                biased;
                Some(_) = self.interrupts.recv() => ReadOutcome::Interrupted,
                read = self.reader.read_line(&self.prompt) => read?,
            };

            let line = match read {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    counters::interrupt_received(labels::STATE_IDLE, "quit");
                    return self.finish(LoopOutcome::Interrupted);
                }
                ReadOutcome::Eof => return self.finish(LoopOutcome::Exit),
            };

            let text = line.trim();
            if text.is_empty() {
                continue;
            }
            self.reader.add_history(text);

            if text.eq_ignore_ascii_case(EXIT_COMMAND) {
                return self.finish(LoopOutcome::Exit);
            }

            self.state.transition(PromptState::Busy)?;
            match self.dispatch(text).await? {
                Dispatch::Completed => self.state.transition(PromptState::Idle)?,
                Dispatch::Abandoned => return self.finish(LoopOutcome::ForcedExit),
            }
        }
    }

    /// Send one line to the client and print the outcome.
    async fn dispatch(&mut self, text: &str) -> Result<Dispatch> {
        self.stats.requests += 1;

        let request = match Request::parse(text) {
            Ok(request) => request,
            Err(e) => {
                self.stats.failures += 1;
                writeln!(self.out, "{}", e)?;
                return Ok(Dispatch::Completed);
            }
        };
        let kind = request.kind();
        tracing::debug!(%kind, "dispatching request");

        let mut pending = PendingExit::default();
        let result = {
            let execution = self.client.execute(&request);
            tokio::pin!(execution);

            loop {
                tokio::select! {
                    biased;
                    Some(_) = self.interrupts.recv() => match pending.on_interrupt() {
                        Escalation::Warn => {
                            counters::interrupt_received(labels::STATE_BUSY, "warn");
                            self.stats.interrupt_warnings += 1;
                            tracing::warn!("{}", BUSY_INTERRUPT_WARNING);
                        }
                        Escalation::Terminate => {
                            counters::interrupt_received(labels::STATE_BUSY, "terminate");
                            counters::request_completed(kind.as_str(), labels::STATUS_ABANDONED);
                            tracing::debug!(%kind, "request abandoned");
                            return Ok(Dispatch::Abandoned);
                        }
                    },
                    result = &mut execution => break result,
                }
            }
        };

        match result {
            Ok(value) => {
                counters::request_completed(kind.as_str(), labels::STATUS_OK);
                let rendered = format_response(&value);
                if !rendered.is_empty() {
                    writeln!(self.out, "{}", rendered)?;
                }
            }
            Err(e) => {
                counters::request_completed(kind.as_str(), e.category());
                self.stats.failures += 1;
                writeln!(self.out, "{}", e)?;
            }
        }
        self.out.flush()?;
        Ok(Dispatch::Completed)
    }

    fn finish(&mut self, outcome: LoopOutcome) -> Result<LoopOutcome> {
        self.state.transition(PromptState::Terminal)?;
        self.out.flush()?;
        tracing::debug!(?outcome, stats = ?self.stats, "prompt loop finished");
        Ok(outcome)
    }
}
