use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::cli::render::{print_index, print_view};
use crate::export::{ExportDestination, ExportFormat, ExportOptions, deliver, export_transcript, format_timestamp};
use crate::indexer::build_session_index;
use crate::models::{SessionSummary, TokenUsage, find_session};
use crate::parsers::load_session_records;
use crate::resolver::resolve_session_view;
use crate::utils::{format_path_with_tilde, get_projects_dir};

#[derive(Parser)]
#[command(name = "transcript-explorer")]
#[command(version = "0.1.0")]
#[command(about = "Browse and export AI assistant session transcripts", long_about = None)]
pub struct Cli {
    /// Log root holding one directory per project (defaults to ~/.claude/projects)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about the indexed sessions
    Stats,
    /// List projects and their sessions, most recent first
    List {
        /// Print the index as JSON
        #[arg(long)]
        json: bool,
        /// Maximum sessions shown per project
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Show the resolved messages of a session
    Show {
        session_id: String,
        /// Print the resolved messages as JSON
        #[arg(long)]
        json: bool,
        /// Expand messages that start collapsed
        #[arg(long)]
        expand_all: bool,
    },
    /// Export a session transcript
    Export {
        session_id: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,
        /// Leave out records that contain tool calls or tool results
        #[arg(long)]
        no_tool_calls: bool,
        /// Include message timestamps
        #[arg(long)]
        timestamps: bool,
        /// Document title (defaults to the session's first prompt)
        #[arg(long)]
        title: Option<String>,
        /// Write the export to a file instead of stdout
        #[arg(long, short, value_name = "PATH", conflicts_with = "clipboard")]
        output: Option<PathBuf>,
        /// Copy the export to the system clipboard
        #[arg(long)]
        clipboard: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Stats) => show_stats(&resolve_root(&cli)?),
        Some(Commands::List { json, limit }) => list_sessions(&resolve_root(&cli)?, *json, *limit),
        Some(Commands::Show { session_id, json, expand_all }) => {
            show_session(&resolve_root(&cli)?, session_id, *json, *expand_all)
        }
        Some(Commands::Export { session_id, format, no_tool_calls, timestamps, title, output, clipboard }) => {
            let options =
                ExportOptions { format: *format, include_tool_calls: !no_tool_calls, include_timestamps: *timestamps };
            let destination = match (output, clipboard) {
                (Some(path), _) => Some(ExportDestination::File(path.clone())),
                (None, true) => Some(ExportDestination::Clipboard),
                (None, false) => None,
            };
            export_session(&resolve_root(&cli)?, session_id, title.as_deref(), &options, destination)
        }
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn resolve_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.root {
        Some(root) => Ok(root.clone()),
        None => get_projects_dir(),
    }
}

fn show_stats(root: &Path) -> Result<()> {
    let index = build_session_index(root);
    let sessions: Vec<&SessionSummary> = index.iter().flat_map(|p| p.sessions.iter()).collect();

    let lines: usize = sessions.iter().map(|s| s.message_count).sum();
    let mut usage = TokenUsage::default();
    for session in &sessions {
        usage.accumulate(&session.token_usage);
    }

    println!("Transcript Statistics");
    println!("=====================");
    println!("Projects: {}", index.len());
    println!("Sessions: {}", sessions.len());
    println!("Log lines: {}", lines);
    println!(
        "Tokens: {} (input {}, output {}, cache write {}, cache read {})",
        usage.total(),
        usage.input_tokens,
        usage.output_tokens,
        usage.cache_creation_input_tokens,
        usage.cache_read_input_tokens
    );
    println!();
    println!("Log root: {}", format_path_with_tilde(root));

    if let Some(oldest) = sessions.iter().filter_map(|s| s.first_message_timestamp).min() {
        println!("Oldest activity: {}", format_timestamp(&oldest));
    }
    if let Some(newest) = sessions.iter().filter_map(|s| s.last_message_timestamp).max() {
        println!("Newest activity: {}", format_timestamp(&newest));
    }

    Ok(())
}

fn list_sessions(root: &Path, json: bool, limit: Option<usize>) -> Result<()> {
    let mut index = build_session_index(root);
    if let Some(limit) = limit {
        for project in &mut index {
            project.sessions.truncate(limit);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&index).context("Failed to serialize index")?);
    } else {
        print_index(&index);
    }
    Ok(())
}

fn locate_session(root: &Path, session_id: &str) -> Result<SessionSummary> {
    let index = build_session_index(root);
    find_session(&index, session_id)
        .cloned()
        .with_context(|| format!("Session {} not found under {}", session_id, format_path_with_tilde(root)))
}

fn show_session(root: &Path, session_id: &str, json: bool, expand_all: bool) -> Result<()> {
    let session = locate_session(root, session_id)?;
    let records = load_session_records(&session.file_path)?;
    let views = resolve_session_view(&records);

    if json {
        println!("{}", serde_json::to_string_pretty(&views).context("Failed to serialize session view")?);
        return Ok(());
    }

    println!("Session {} ({})", session.session_id, format_path_with_tilde(&session.file_path));
    for view in &views {
        print_view(view, expand_all || view.expanded_by_default);
    }
    Ok(())
}

fn export_session(
    root: &Path,
    session_id: &str,
    title: Option<&str>,
    options: &ExportOptions,
    destination: Option<ExportDestination>,
) -> Result<()> {
    let session = locate_session(root, session_id)?;
    let records = load_session_records(&session.file_path)?;
    let title = title.unwrap_or(&session.first_user_message_preview);

    let result = export_transcript(&records, title, options);
    let result = match &destination {
        Some(destination) => deliver(result, destination),
        None => result,
    };

    if !result.success {
        anyhow::bail!(
            "Export failed after {} messages: {}",
            result.message_count,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    match destination {
        None => print!("{}", result.content.unwrap_or_default()),
        Some(ExportDestination::File(path)) => {
            println!("Exported {} messages to {}", result.message_count, format_path_with_tilde(&path));
        }
        Some(ExportDestination::Clipboard) => {
            println!("Copied {} messages to the clipboard", result.message_count);
        }
    }
    Ok(())
}
