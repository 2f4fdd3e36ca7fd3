//! Command-line front end over [`NotesBoard`].
//!
//! Parsing and command execution live here so they can be exercised without
//! spawning a process; the `notes` binary only wires stdout and exit codes.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{DEFAULT_API_URL, HttpNotesApi, Note, NotesApi};
use crate::board::NotesBoard;
use crate::error::{ClientError, IdentityError};
use crate::identity::{FileIdentityStore, IdentityStore};

/// Default location of the identity file.
pub const DEFAULT_IDENTITY_FILE: &str = ".notes-anon-id";

/// Manage notes scoped to an anonymous identity.
#[derive(Debug, Parser)]
#[command(name = "notes", version, about)]
pub struct Cli {
    /// Base URL of the notes service.
    #[arg(long, env = "NOTES_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,
    /// File holding the anonymous identity.
    #[arg(long, env = "NOTES_IDENTITY_FILE", default_value = DEFAULT_IDENTITY_FILE)]
    pub identity_file: Utf8PathBuf,
    /// Action to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `notes` CLI.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List notes, newest first.
    List,
    /// Create a note.
    Add {
        /// Note title.
        #[arg(long)]
        title: String,
        /// Note body.
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Replace a note's title and content.
    Edit {
        /// Note identifier.
        id: i64,
        /// New title; keeps the current one when omitted.
        #[arg(long)]
        title: Option<String>,
        /// New body; keeps the current one when omitted.
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note.
    Delete {
        /// Note identifier.
        id: i64,
    },
    /// Forget the identity and start with an empty list.
    Reset,
    /// Print the identity in use.
    Whoami,
}

/// Errors surfaced by [`execute`].
#[derive(Debug, Error)]
pub enum CliError {
    /// A service or identity failure.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// Opening the identity store failed.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Run `cli` against the configured service and identity file.
///
/// # Errors
/// Returns [`CliError`] when the identity file cannot be opened or the command
/// fails.
pub async fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    let store = FileIdentityStore::open(&cli.identity_file)?;
    let board = NotesBoard::new(HttpNotesApi::new(cli.api_url), store);
    execute(board, cli.command, out).await
}

/// Execute `command` on a board, writing results to `out`.
///
/// # Errors
/// Returns [`CliError`] for identity failures, rejected writes, unknown note
/// ids, and output failures.
pub async fn execute<A, S>(
    mut board: NotesBoard<A, S>,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CliError>
where
    A: NotesApi,
    S: IdentityStore,
{
    board.mount().await?;
    match command {
        Command::List => {
            if board.notes().is_empty() {
                writeln!(out, "no notes")?;
            }
            for note in board.notes() {
                write_note(out, note)?;
            }
        }
        Command::Add { title, content } => {
            board.set_title(title);
            board.set_content(content);
            let note = board.submit().await?;
            write_note(out, &note)?;
        }
        Command::Edit { id, title, content } => {
            if !board.select(id) {
                return Err(ClientError::UnknownNote { id }.into());
            }
            if let Some(title) = title {
                board.set_title(title);
            }
            if let Some(content) = content {
                board.set_content(content);
            }
            let note = board.submit().await?;
            write_note(out, &note)?;
        }
        Command::Delete { id } => {
            board.delete(id).await?;
            writeln!(out, "deleted {id}")?;
        }
        Command::Reset => {
            board.reset_identity().await?;
            writeln!(out, "identity reset; {} notes", board.notes().len())?;
        }
        Command::Whoami => {
            writeln!(out, "{}", board.identity().unwrap_or_default())?;
        }
    }
    Ok(())
}

fn write_note(out: &mut impl Write, note: &Note) -> std::io::Result<()> {
    writeln!(out, "#{} {}", note.id, note.title)?;
    if !note.content.is_empty() {
        writeln!(out, "    {}", note.content)?;
    }
    Ok(())
}
