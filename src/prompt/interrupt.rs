//! Interrupt delivery and escalation
//!
//! Interrupts reach the prompt loop as messages on a channel. The signal
//! forwarder only sends; the loop decides what an interrupt means in its
//! current state.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One CTRL+C press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interrupt;

/// Sending half of the interrupt channel
pub type InterruptSender = mpsc::UnboundedSender<Interrupt>;

/// Receiving half of the interrupt channel, owned by the prompt loop
pub type InterruptReceiver = mpsc::UnboundedReceiver<Interrupt>;

/// Create an interrupt channel
pub fn channel() -> (InterruptSender, InterruptReceiver) {
    mpsc::unbounded_channel()
}

/// Forward process CTRL+C signals into `tx` until the receiver is dropped.
///
/// Once this is running, SIGINT no longer terminates the process on its own.
pub fn forward_ctrl_c(tx: InterruptSender) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "cannot listen for CTRL+C");
                break;
            }
            if tx.send(Interrupt).is_err() {
                break;
            }
        }
    })
}

/// What to do with an interrupt received while a request is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escalation {
    /// First interrupt: keep waiting, warn the user
    Warn,
    /// Repeated interrupt: abandon the request and exit
    Terminate,
}

/// Pending-exit marker for one Busy period
#[derive(Debug, Default)]
pub struct PendingExit {
    requested: bool,
}

impl PendingExit {
    /// Register an interrupt
    pub fn on_interrupt(&mut self) -> Escalation {
        if self.requested {
            Escalation::Terminate
        } else {
            self.requested = true;
            Escalation::Warn
        }
    }

    /// Whether an exit has been requested once
    pub fn is_requested(&self) -> bool {
        self.requested
    }
}
