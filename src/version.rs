//! Build metadata printed by `--version`

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Project home page
pub const HOME_PAGE: &str = "http://siridb.net";

const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

/// Maintainer name, taken from the first package author
pub fn maintainer() -> &'static str {
    split_author(first_author()).0
}

/// Maintainer email, taken from the first package author
pub fn email() -> &'static str {
    split_author(first_author()).1
}

fn first_author() -> &'static str {
    AUTHORS.split(':').next().unwrap_or_default()
}

/// Split `Name <email>` into its parts
fn split_author(author: &str) -> (&str, &str) {
    match author.split_once('<') {
        Some((name, rest)) => (name.trim(), rest.trim_end_matches('>').trim()),
        None => (author.trim(), ""),
    }
}

/// Text printed for `--version`
pub fn banner() -> String {
    format!(
        "SiriDB Prompt {}\nMaintainer: {} <{}>\nHome-page: {}",
        VERSION,
        maintainer(),
        email(),
        HOME_PAGE
    )
}
