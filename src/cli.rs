use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = "Personal to-do lists, one per user")]
pub struct Cli {
    /// Path to the store file [default: ~/.todolist/todolist.json]
    #[arg(long, env = "TODO_FILE", global = true)]
    pub file: Option<PathBuf>,

    /// Username for task commands
    #[arg(short, long, env = "TODO_USER", global = true)]
    pub user: Option<String>,

    /// Password for task commands
    #[arg(short, long, env = "TODO_PASSWORD", global = true, hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new account
    Register {
        /// Username (must not already exist)
        username: String,
        /// Password (falls back to --password / TODO_PASSWORD)
        #[arg(value_name = "PASSWORD")]
        new_password: Option<String>,
    },

    /// List your tasks
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a task
    Add {
        /// Task description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// Mark a task as done
    Done {
        /// Task index as shown by `list`
        index: usize,
    },

    /// Mark a task as important
    Important {
        /// Task index as shown by `list`
        index: usize,
    },

    /// Set or replace a task's reminder
    Remind {
        /// Task index as shown by `list`
        index: usize,
        /// Reminder text, free-form
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a task (out-of-range indices are ignored)
    Rm {
        /// Task index as shown by `list`
        index: usize,
    },

    /// Launch the interactive terminal UI (default)
    Ui {
        /// Append log output to this file
        #[arg(long, env = "TODO_LOG_FILE")]
        log_file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn joins_multi_word_description() {
        let cli = Cli::try_parse_from(["todo", "-u", "alice", "-p", "pw", "add", "buy", "milk"])
            .unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        match cli.command {
            Some(Command::Add { description }) => assert_eq!(description, vec!["buy", "milk"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["todo", "--file", "/tmp/t.json"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/t.json")));
    }
}
