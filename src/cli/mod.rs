//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod auth;
pub mod cases;
pub mod config;
pub mod context;
pub mod deadlines;
pub mod device;
pub mod docs;
pub mod handlers;
pub mod notes;
pub mod status;
pub mod summary;

pub use args::{
    CaseFilterArgs, NoteFilterArgs, OutputFormat, PaginationArgs, PlatformArg,
};
pub use context::CommandContext;

use crate::deadlines::DeadlineFilter;

/// APP LEGAL CLI - companion for the legal case-management backend
#[derive(Parser, Debug)]
#[command(name = "applegal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "APPLEGAL_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "APPLEGAL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "APPLEGAL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Main backend URL (overrides config)
    #[arg(long, global = true, env = "APPLEGAL_API_URL", hide_env = true)]
    pub api_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, env = "APPLEGAL_TIMEOUT_MS", hide_env = true)]
    pub timeout_ms: Option<u64>,

    /// Keep the session token in memory only (nothing written to disk)
    #[arg(long, global = true)]
    pub ephemeral: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        /// Account email
        #[arg(long, short = 'e')]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long, env = "APPLEGAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Create a client account
    Register {
        /// Client id issued by the firm
        #[arg(long = "client-id")]
        client_id: i64,

        #[arg(long, short = 'e')]
        email: String,

        /// Phone number (digits only)
        #[arg(long)]
        phone: String,

        /// Password (prompted when omitted)
        #[arg(long, env = "APPLEGAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Forget the stored session token
    Logout,

    /// Show configuration and session status
    Status,

    /// Display version information
    Version,

    /// Documents attached to your case files
    #[command(subcommand)]
    Docs(DocsCommands),

    /// Your case files (expedientes)
    #[command(subcommand)]
    Cases(CasesCommands),

    /// Deadlines (plazos) of a case file
    #[command(subcommand)]
    Deadlines(DeadlinesCommands),

    /// Notes on your case files
    #[command(subcommand)]
    Notes(NotesCommands),

    /// Push notification devices
    #[command(subcommand)]
    Device(DeviceCommands),

    /// AI document summaries
    #[command(subcommand)]
    Summary(SummaryCommands),

    /// Local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   applegal completion bash > /etc/bash_completion.d/applegal
  zsh:    applegal completion zsh > \"${fpath[1]}/_applegal\"
  fish:   applegal completion fish > ~/.config/fish/completions/applegal.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Document subcommands
#[derive(Subcommand, Debug)]
pub enum DocsCommands {
    /// List your documents
    #[command(visible_alias = "ls")]
    List,

    /// Print the public URL of a document
    Url {
        /// Document id
        doc_id: String,
    },

    /// Download a document
    #[command(after_help = "EXAMPLES:\n  \
            applegal docs download 64f1c2                 # Saved under its listed name\n  \
            applegal docs download 64f1c2 -o demanda.pdf  # Explicit file")]
    Download {
        /// Document id
        doc_id: String,

        /// Output file (defaults to the document's file name)
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Upload a PDF to a case file
    Upload {
        /// PDF file to upload
        file: String,

        /// Case file id
        #[arg(long = "case", short = 'c')]
        case_id: i64,
    },
}

/// Case file subcommands
#[derive(Subcommand, Debug)]
pub enum CasesCommands {
    /// List your case files
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: CaseFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Deadline subcommands
#[derive(Subcommand, Debug)]
pub enum DeadlinesCommands {
    /// List deadlines of a case file
    #[command(
        visible_alias = "ls",
        after_help = "EXAMPLES:\n  \
            applegal deadlines list                     # Pick a case file, pending deadlines\n  \
            applegal deadlines list --case 12           # Case file 12\n  \
            applegal deadlines list -s divorcio         # Choose among matching case files\n  \
            applegal deadlines list -c 12 -f overdue    # Only overdue\n  \
            applegal deadlines list -c 12 -f all --format json"
    )]
    List {
        /// Case file id (prompted when omitted)
        #[arg(long = "case", short = 'c')]
        case_id: Option<i64>,

        /// Narrow the case file selector by id or title
        #[arg(long, short = 's', conflicts_with = "case_id")]
        search: Option<String>,

        /// Which deadlines to show
        #[arg(long, short = 'f', value_enum, default_value = "pending")]
        filter: DeadlineFilter,
    },

    /// Mark a deadline as completed
    Complete {
        /// Deadline id
        deadline_id: i64,
    },

    /// Delete a deadline
    Delete {
        /// Deadline id
        deadline_id: i64,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Note subcommands
#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// List notes on your case files
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: NoteFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Listen for new notes and refresh the list as they arrive
    Watch {
        #[command(flatten)]
        filters: NoteFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,

        /// Client id (defaults to `client_id` in the config)
        #[arg(long = "client-id")]
        client_id: Option<i64>,
    },
}

/// Device subcommands
#[derive(Subcommand, Debug)]
pub enum DeviceCommands {
    /// Register a push token for note notifications
    Register {
        /// Expo push token
        push_token: String,

        #[arg(long, value_enum)]
        platform: PlatformArg,
    },
}

/// AI summary subcommands
#[derive(Subcommand, Debug)]
pub enum SummaryCommands {
    /// Summarize a photographed document (JPG or PNG)
    Create {
        /// Image file
        image: String,
    },

    /// List saved summaries
    #[command(visible_alias = "ls")]
    List,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Set the client id used by `notes watch`
    SetClient {
        client_id: i64,
    },

    /// Set a configuration value
    #[command(after_help = "KEYS:\n  \
            api_url, docs_url, ai_url, timeout_ms, format")]
    Set {
        key: String,
        value: String,
    },
}
