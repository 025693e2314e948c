use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lk", about = concat!("listkit v", env!("CARGO_PKG_VERSION"), " - your lists, plain JSON"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Use a different data directory
    #[arg(long = "data-dir", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the todo list
    Task(TaskCmd),
    /// Manage songs in the selected music list
    Music(MusicCmd),
    /// Manage music lists
    List(ListCmd),
    /// Print a share code for the selected music list
    Share,
    /// Import songs from a share code (or a legacy share URL)
    Import(ImportArgs),
}

// ---------------------------------------------------------------------------
// Task commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TaskCmd {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task (newest first)
    Add(TaskAddArgs),
    /// List tasks
    List(TaskListArgs),
    /// Toggle a task's completed flag
    Toggle(IdArg),
    /// Replace a task's text
    Edit(TaskEditArgs),
    /// Delete a task
    Rm(IdArg),
    /// Delete all completed tasks
    Clear,
    /// Search task texts by regex
    Search(SearchArgs),
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task text
    pub text: String,
}

#[derive(Args)]
pub struct TaskListArgs {
    /// View filter: all, active, completed
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct TaskEditArgs {
    /// Task id
    pub id: String,
    /// New text
    pub text: String,
}

// ---------------------------------------------------------------------------
// Music commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct MusicCmd {
    #[command(subcommand)]
    pub action: MusicAction,
}

#[derive(Subcommand)]
pub enum MusicAction {
    /// Add a song to the selected list (newest first)
    Add(MusicAddArgs),
    /// List songs in the selected list
    List(MusicListArgs),
    /// Toggle a song's favorite flag
    Fav(IdArg),
    /// Edit a song's title, artist, or cover
    Edit(MusicEditArgs),
    /// Delete a song
    Rm(IdArg),
    /// Delete all non-favorite songs
    Clear,
    /// Search song titles and artists by regex
    Search(SearchArgs),
}

#[derive(Args)]
pub struct MusicAddArgs {
    /// Song title
    pub title: String,
    /// Artist name
    pub artist: String,
    /// Cover image URL
    #[arg(long)]
    pub cover: Option<String>,
}

#[derive(Args)]
pub struct MusicListArgs {
    /// View filter: all, favorites, others
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args)]
pub struct MusicEditArgs {
    /// Song id
    pub id: String,
    /// New title (unchanged if omitted)
    #[arg(long)]
    pub title: Option<String>,
    /// New artist (unchanged if omitted)
    #[arg(long)]
    pub artist: Option<String>,
    /// New cover URL; pass an empty string to remove the cover
    #[arg(long)]
    pub cover: Option<String>,
}

// ---------------------------------------------------------------------------
// List management
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListCmd {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a music list and select it
    New(ListNewArgs),
    /// Delete a music list (the last one cannot be deleted)
    Rm(IdArg),
    /// Select a music list
    Use(IdArg),
    /// Show all music lists
    Show,
}

#[derive(Args)]
pub struct ListNewArgs {
    /// List name
    pub name: String,
}

// ---------------------------------------------------------------------------
// Shared args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdArg {
    /// Item id
    pub id: String,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Regex pattern to search for
    pub pattern: String,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Share code (musiclist_...) or legacy share URL
    pub code: String,
    /// Import without asking about duplicates
    #[arg(long, short)]
    pub yes: bool,
}
