//! Line input
//!
//! The rustyline editor blocks while reading, so it lives on its own thread.
//! The prompt loop sends it read requests and awaits the answers, which keeps
//! the loop free to notice interrupts in the meantime.

use crate::{Error, Result};
use futures::future::BoxFuture;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tokio::sync::{mpsc, oneshot};

/// Result of reading one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line was entered (without trailing newline)
    Line(String),
    /// CTRL+C was pressed while editing
    Interrupted,
    /// Input stream closed (CTRL+D or end of piped input)
    Eof,
}

/// Source of prompt lines
pub trait LineReader {
    /// Show `prompt` and read one line
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>>;

    /// Remember a submitted line
    fn add_history(&mut self, _line: &str) {}
}

impl<R: LineReader + ?Sized> LineReader for &mut R {
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>> {
        (**self).read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        (**self).add_history(line)
    }
}

/// Default location of the history file
pub fn default_history_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("siridb-prompt").join("history.txt"))
        .unwrap_or_else(|| PathBuf::from(".siridb_prompt_history"))
}

enum Command {
    Read {
        prompt: String,
        reply: oneshot::Sender<Result<ReadOutcome>>,
    },
    History(String),
}

/// Terminal line reader backed by rustyline
pub struct TerminalReader {
    commands: mpsc::UnboundedSender<Command>,
}

impl TerminalReader {
    /// Start the input thread.
    ///
    /// With a history path, previous entries are loaded and every new entry
    /// is saved right away. History problems are logged, never fatal.
    pub fn spawn(history: Option<PathBuf>) -> Result<Self> {
        let (commands, mut rx) = mpsc::unbounded_channel::<Command>();
        let (ready_tx, ready_rx) = std::sync::mpsc::channel::<Result<()>>();

        std::thread::Builder::new()
            .name("prompt-input".into())
            .spawn(move || {
                let mut editor = match DefaultEditor::new() {
                    Ok(editor) => editor,
                    Err(e) => {
                        let _ = ready_tx.send(Err(Error::Input(e.to_string())));
                        return;
                    }
                };
                if let Some(path) = &history {
                    load_history(&mut editor, path);
                }
                let _ = ready_tx.send(Ok(()));

                while let Some(command) = rx.blocking_recv() {
                    match command {
                        Command::Read { prompt, reply } => {
                            let _ = reply.send(read(&mut editor, &prompt));
                        }
                        Command::History(line) => {
                            let _ = editor.add_history_entry(line);
                            if let Some(path) = &history {
                                if let Err(e) = editor.save_history(path) {
                                    tracing::debug!(error = %e, "failed to save history");
                                }
                            }
                        }
                    }
                }
            })?;

        ready_rx.recv().map_err(|_| input_gone())??;
        Ok(Self { commands })
    }
}

impl LineReader for TerminalReader {
    fn read_line<'a>(&'a mut self, prompt: &'a str) -> BoxFuture<'a, Result<ReadOutcome>> {
        Box::pin(async move {
            let (reply, response) = oneshot::channel();
            self.commands
                .send(Command::Read {
                    prompt: prompt.to_string(),
                    reply,
                })
                .map_err(|_| input_gone())?;
            response.await.map_err(|_| input_gone())?
        })
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.commands.send(Command::History(line.to_string()));
    }
}

fn read(editor: &mut DefaultEditor, prompt: &str) -> Result<ReadOutcome> {
    match editor.readline(prompt) {
        Ok(line) => Ok(ReadOutcome::Line(line)),
        Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
        Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
        Err(e) => Err(Error::Input(e.to_string())),
    }
}

fn load_history(editor: &mut DefaultEditor, path: &Path) {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = editor.load_history(path) {
        tracing::debug!(path = %path.display(), error = %e, "no history loaded");
    }
}

fn input_gone() -> Error {
    Error::Input("input thread exited".into())
}
