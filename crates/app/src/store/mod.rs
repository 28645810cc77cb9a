//! Persistence backends shared by the domain repositories.

use serde::Serialize;

mod error;
mod json_file;

pub use error::StoreError;
pub use json_file::{JsonCollection, JsonFileStore};

/// Attempts made to claim a "current maximum + 1" identifier before giving up.
pub(crate) const NEXT_ID_ATTEMPTS: usize = 5;

/// Case-insensitive substring pattern for `ILIKE ... ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);

    pattern.push('%');

    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

/// Backend the application context is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Postgres document store.
    Postgres,

    /// Flat JSON files, used when Postgres is not configured or unreachable.
    File,
}

impl StoreBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::File => "file",
        }
    }
}
