//! Credential prompting

use crate::{Error, Result};
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{ColorMode, DefaultEditor, Editor, Helper};
use std::borrow::Cow;

/// Interactive source for missing credentials
pub trait CredentialSource {
    /// Ask for a visible value
    fn prompt(&mut self, label: &str) -> Result<String>;

    /// Ask for a value without echoing it
    fn prompt_secret(&mut self, label: &str) -> Result<String>;
}

/// Draws every typed character as `*`
#[derive(Debug, Default, Clone, Copy)]
struct MaskedInput;

impl Highlighter for MaskedInput {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned("*".repeat(line.chars().count()))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Completer for MaskedInput {
    type Candidate = String;
}

impl Hinter for MaskedInput {
    type Hint = String;
}

impl Validator for MaskedInput {}

impl Helper for MaskedInput {}

/// Prompts on the controlling terminal.
///
/// Both visible and secret values are read with rustyline, which owns the
/// terminal while reading. CTRL+C or end of input yields `Error::Interrupted`.
#[derive(Default)]
pub struct TerminalCredentials {
    editor: Option<DefaultEditor>,
    secret_editor: Option<Editor<MaskedInput, DefaultHistory>>,
}

impl TerminalCredentials {
    /// Create a terminal source; the line editors are set up on first use
    pub fn new() -> Self {
        Self::default()
    }

    fn editor(&mut self) -> Result<&mut DefaultEditor> {
        if self.editor.is_none() {
            let editor = DefaultEditor::new().map_err(|e| Error::Input(e.to_string()))?;
            self.editor = Some(editor);
        }
        self.editor
            .as_mut()
            .ok_or_else(|| Error::Input("line editor unavailable".into()))
    }

    fn secret_editor(&mut self) -> Result<&mut Editor<MaskedInput, DefaultHistory>> {
        if self.secret_editor.is_none() {
            let mut editor: Editor<MaskedInput, DefaultHistory> =
                Editor::new().map_err(|e| Error::Input(e.to_string()))?;
            editor.set_helper(Some(MaskedInput));
            // mask even when the terminal reports no color support
            editor.set_color_mode(ColorMode::Forced);
            editor.set_auto_add_history(false);
            self.secret_editor = Some(editor);
        }
        self.secret_editor
            .as_mut()
            .ok_or_else(|| Error::Input("line editor unavailable".into()))
    }
}

impl CredentialSource for TerminalCredentials {
    fn prompt(&mut self, label: &str) -> Result<String> {
        readline_answer(self.editor()?.readline(label))
    }

    fn prompt_secret(&mut self, label: &str) -> Result<String> {
        readline_answer(self.secret_editor()?.readline(label))
    }
}

fn readline_answer(read: std::result::Result<String, ReadlineError>) -> Result<String> {
    match read {
        Ok(line) => Ok(line),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Err(Error::Interrupted),
        Err(e) => Err(Error::Input(e.to_string())),
    }
}

/// Resolved login details
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub user: String,
    /// Password
    pub password: String,
    /// Database name
    pub database: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .finish()
    }
}

/// Fill in whatever was not given on the command line.
///
/// The username prompt offers the operating-system user as default. Password
/// and database name are asked until a non-empty value is entered.
pub fn resolve_credentials(
    user: Option<String>,
    password: Option<String>,
    database: Option<String>,
    source: &mut dyn CredentialSource,
) -> Result<Credentials> {
    let user = match non_empty(user) {
        Some(user) => user,
        None => {
            let default = whoami::username();
            let answer = source.prompt(&format!("Username [{}]: ", default))?;
            non_empty(Some(answer)).unwrap_or(default)
        }
    };

    let password = match non_empty(password) {
        Some(password) => password,
        None => ask_until_given(|| source.prompt_secret("Password: "))?,
    };

    let database = match non_empty(database) {
        Some(database) => database,
        None => ask_until_given(|| source.prompt("Database name: "))?,
    };

    Ok(Credentials {
        user,
        password,
        database,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn ask_until_given(mut ask: impl FnMut() -> Result<String>) -> Result<String> {
    loop {
        if let Some(answer) = non_empty(Some(ask()?)) {
            return Ok(answer);
        }
    }
}
