mod cli;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Command};
use todolist::logging::{self, LogTarget};
use todolist::{output, paths, tui, Session, Store};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

/// Credentials for one-shot commands; both must be supplied.
fn credentials(user: Option<String>, password: Option<String>) -> Result<(String, String)> {
    let user = user.context("--user is required (or set TODO_USER)")?;
    let password = password.context("--password is required (or set TODO_PASSWORD)")?;
    Ok((user, password))
}

fn login(store: &Store, user: Option<String>, password: Option<String>) -> Result<String> {
    let (user, password) = credentials(user, password)?;
    let session = Session::login(store, &user, &password)?;
    Ok(session.require_username()?.to_string())
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let store_path = paths::resolve_store_path(cli.file);
    let command = cli.command.unwrap_or_else(|| Command::Ui {
        log_file: std::env::var_os("TODO_LOG_FILE").map(PathBuf::from),
    });

    match &command {
        Command::Ui { log_file } => {
            logging::init(log_file.as_deref().map_or(LogTarget::Off, LogTarget::File))?
        }
        _ => logging::init(LogTarget::Stderr)?,
    }

    let mut store = Store::open(store_path.clone())
        .with_context(|| format!("failed to open store {}", store_path.display()))?;

    match command {
        Command::Register {
            username,
            new_password,
        } => {
            let password = new_password
                .or(cli.password)
                .context("a password is required (positional, --password, or TODO_PASSWORD)")?;
            store.register(&username, &password)?;
            eprintln!("Registered '{username}'");
        }

        Command::List { json } => {
            let username = login(&store, cli.user, cli.password)?;
            let user = store
                .user(&username)
                .context("user vanished after login")?;
            if json {
                println!("{}", output::format_task_json(user)?);
            } else {
                print!("{}", output::format_task_list(user));
            }
        }

        Command::Add { description } => {
            let username = login(&store, cli.user, cli.password)?;
            let description = description.join(" ");
            store.add_task(&username, &description)?;
            eprintln!("Added '{description}'");
        }

        Command::Done { index } => {
            let username = login(&store, cli.user, cli.password)?;
            store.complete_task(&username, index)?;
            eprintln!("Marked task {index} as done");
        }

        Command::Important { index } => {
            let username = login(&store, cli.user, cli.password)?;
            store.mark_important(&username, index)?;
            eprintln!("Marked task {index} as important");
        }

        Command::Remind { index, text } => {
            let username = login(&store, cli.user, cli.password)?;
            let text = text.join(" ");
            store.set_reminder(&username, index, &text)?;
            eprintln!("Set reminder on task {index}: {text}");
        }

        Command::Rm { index } => {
            let username = login(&store, cli.user, cli.password)?;
            if store.delete_task(&username, index)? {
                eprintln!("Deleted task {index}");
            } else {
                eprintln!("No task at index {index}; nothing deleted");
            }
        }

        Command::Ui { .. } => {
            tui::run(&mut store)?;
        }
    }

    Ok(())
}
