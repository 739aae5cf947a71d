use std::collections::BTreeMap;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::model::{Task, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username '{0}' already exists")]
    DuplicateUser(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unknown user '{0}'")]
    UnknownUser(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no task at index {0}")]
    TaskNotFound(usize),

    #[error("not logged in")]
    NotLoggedIn,

    #[error("store file {} is corrupt", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode store")]
    Encode(#[source] serde_json::Error),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// On-disk shape of one user. The username is the key of the enclosing map.
#[derive(Deserialize)]
struct UserRecord {
    password: String,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct UserRecordRef<'a> {
    password: &'a str,
    tasks: &'a [Task],
}

/// All users, backed by a single JSON file that is rewritten after every mutation.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    users: BTreeMap<String, User>,
}

impl Store {
    /// Loads the store at `path`. A missing or blank file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let users = load_users(&path)?;
        info!("loaded {} user(s) from {}", users.len(), path.display());
        Ok(Self { path, users })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn register(&mut self, username: &str, password: &str) -> Result<(), StoreError> {
        if username.trim().is_empty() {
            return Err(StoreError::InvalidInput("username must not be empty".into()));
        }
        if self.users.contains_key(username) {
            return Err(StoreError::DuplicateUser(username.to_string()));
        }
        self.users
            .insert(username.to_string(), User::new(username, password));
        if let Err(e) = self.save() {
            self.users.remove(username);
            return Err(e);
        }
        info!("registered user '{username}'");
        Ok(())
    }

    /// Unknown users and wrong passwords produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<&User, StoreError> {
        match self.users.get(username) {
            Some(user) if user.password_matches(password) => Ok(user),
            _ => {
                warn!("failed login for '{username}'");
                Err(StoreError::InvalidCredentials)
            }
        }
    }

    pub fn add_task(&mut self, username: &str, description: &str) -> Result<(), StoreError> {
        self.mutate(username, |user| user.add_task(description))
    }

    pub fn complete_task(&mut self, username: &str, index: usize) -> Result<(), StoreError> {
        self.mutate(username, |user| {
            user.task_mut(index)?.mark_completed();
            Ok(())
        })
    }

    pub fn mark_important(&mut self, username: &str, index: usize) -> Result<(), StoreError> {
        self.mutate(username, |user| {
            user.task_mut(index)?.mark_important();
            Ok(())
        })
    }

    pub fn set_reminder(
        &mut self,
        username: &str,
        index: usize,
        text: &str,
    ) -> Result<(), StoreError> {
        self.mutate(username, |user| {
            user.task_mut(index)?.set_reminder(text);
            Ok(())
        })
    }

    /// Returns whether a task was removed; out-of-range indices are not an error.
    pub fn delete_task(&mut self, username: &str, index: usize) -> Result<bool, StoreError> {
        self.mutate(username, |user| Ok(user.delete_task(index)))
    }

    /// Applies `f` to the named user and flushes the whole store. If the
    /// flush fails the user's tasks are restored, so memory matches the file.
    fn mutate<T>(
        &mut self,
        username: &str,
        f: impl FnOnce(&mut User) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let user = self
            .users
            .get_mut(username)
            .ok_or_else(|| StoreError::UnknownUser(username.to_string()))?;
        let snapshot = user.tasks.clone();
        let out = f(user)?;
        if let Err(e) = self.save() {
            if let Some(user) = self.users.get_mut(username) {
                user.tasks = snapshot;
            }
            return Err(e);
        }
        Ok(out)
    }

    /// Writes every user to a temp file next to the target, then renames it into place.
    pub fn save(&self) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_error(dir))?;

        let records: BTreeMap<&str, UserRecordRef<'_>> = self
            .users
            .iter()
            .map(|(name, user)| {
                (
                    name.as_str(),
                    UserRecordRef {
                        password: &user.password,
                        tasks: &user.tasks,
                    },
                )
            })
            .collect();

        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        records.serialize(&mut ser).map_err(StoreError::Encode)?;
        buf.push(b'\n');

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error(dir))?;
        tmp.write_all(&buf).map_err(io_error(&self.path))?;
        tmp.as_file().sync_all().map_err(io_error(&self.path))?;
        tmp.persist(&self.path)
            .map_err(|e| io_error(&self.path)(e.error))?;

        debug!("saved {} user(s) to {}", self.users.len(), self.path.display());
        Ok(())
    }
}

fn load_users(path: &Path) -> Result<BTreeMap<String, User>, StoreError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path).map_err(io_error(path))?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let records: BTreeMap<String, UserRecord> =
        serde_json::from_str(&content).map_err(|source| StoreError::CorruptStore {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records
        .into_iter()
        .map(|(username, record)| {
            let user = User {
                username: username.clone(),
                password: record.password,
                tasks: record.tasks,
            };
            (username, user)
        })
        .collect())
}
