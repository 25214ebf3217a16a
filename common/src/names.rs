//! Collection name rules
//!
//! A collection name becomes both a table name and a backup file name, so
//! some names and characters are off limits.

use thiserror::Error;

/// Registry table name
pub const INFO_TABLE: &str = "collection_info";

/// Prefix SQLite keeps for its own tables
const SQLITE_PREFIX: &str = "sqlite_";

/// Stand-in for '/' in backup file names
pub const SLASH_ESCAPE: &str = "_SL_";

const FORBIDDEN_CHARS: [char; 3] = ['[', ']', ','];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("{0} is reserved")]
    Reserved(String),

    #[error("{name} contains '{found}'")]
    ForbiddenChar { name: String, found: char },

    #[error("{name} contains '{token}'")]
    ForbiddenToken { name: String, token: &'static str },
}

/// Checks a name on its own, without looking at other collections
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    let lower = name.to_lowercase();
    if lower == INFO_TABLE || lower.starts_with(SQLITE_PREFIX) {
        return Err(NameError::Reserved(name.to_string()));
    }
    if let Some(found) = name.chars().find(|c| FORBIDDEN_CHARS.contains(c)) {
        return Err(NameError::ForbiddenChar {
            name: name.to_string(),
            found,
        });
    }
    // "a/b" and "a_SL_b" would share a backup file
    if name.contains(SLASH_ESCAPE) {
        return Err(NameError::ForbiddenToken {
            name: name.to_string(),
            token: SLASH_ESCAPE,
        });
    }
    Ok(())
}
