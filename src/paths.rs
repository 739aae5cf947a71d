//! Default locations for the store file.

use std::path::PathBuf;

pub const STORE_FILE_NAME: &str = "todolist.json";

/// `$HOME/.todolist/todolist.json`, or `./todolist.json` when HOME is unset.
/// The `TODO_FILE` override is applied by the CLI layer before this is consulted.
pub fn default_store_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home)
            .join(".todolist")
            .join(STORE_FILE_NAME),
        _ => PathBuf::from(STORE_FILE_NAME),
    }
}

pub fn resolve_store_path(cli_file: Option<PathBuf>) -> PathBuf {
    cli_file.unwrap_or_else(default_store_path)
}
