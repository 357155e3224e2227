//! Clap derive structures for the `seek` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// seek -- command-line client for the Seek learning platform
#[derive(Debug, Parser)]
#[command(
    name = "seek",
    version,
    about = "Browse Seek courses and assignments from the command line",
    long_about = "A command-line client for the Seek course and assignment platform.\n\n\
        Talks to the Seek REST API with the stored access token attached,\n\
        and resolves front-end URLs through the platform's route table.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// API base URL (overrides config; empty means the built-in default)
    #[arg(long, env = "SEEK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Where the access token is kept (overrides config)
    #[arg(long, env = "SEEK_TOKEN_STORE", global = true)]
    pub token_store: Option<TokenStoreArg>,

    /// Keep the access token in this file instead (implies --token-store file)
    #[arg(long, env = "SEEK_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SEEK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "SEEK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TokenStoreArg {
    /// System keyring
    Keyring,
    /// Plain file in the data directory
    File,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum RoleArg {
    #[default]
    Student,
    Admin,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect the front-end route table
    #[command(alias = "r")]
    Routes(RoutesArgs),

    /// Log in with email and password
    Login(LoginArgs),

    /// Log in (or sign up) with a Google identity token
    GoogleLogin(GoogleLoginArgs),

    /// Create an account with email and password
    Signup(SignupArgs),

    /// Log out and forget the stored access token
    Logout,

    /// Show the API endpoint and whether a token is stored
    Status,

    /// Browse course weeks
    #[command(alias = "w")]
    Weeks(WeeksArgs),

    /// Browse lectures
    Lectures(LecturesArgs),

    /// Browse assignments
    #[command(alias = "a")]
    Assignments(AssignmentsArgs),

    /// View programming assignments
    Programming(ProgrammingArgs),

    /// Ask the assistant to explain an error in a code snippet
    ExplainError(ExplainErrorArgs),

    /// Kia chatbot history
    Kia(KiaArgs),

    /// Send a raw authenticated request to the API
    Request(RequestArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Routes ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoutesArgs {
    #[command(subcommand)]
    pub command: RoutesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RoutesCommand {
    /// List every route in declaration order
    #[command(alias = "ls")]
    List,

    /// Resolve a URL to the view it mounts
    Resolve {
        /// Path or full URL, e.g. "/lecture?week_id=2&lecture_id=7"
        url: String,
    },

    /// Build the URL of a named route
    Href {
        /// Route name, e.g. "Assignment"
        name: String,

        /// Path parameter as key=value (repeatable)
        #[arg(long = "param", short = 'p', value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_owned(), value.to_owned()))
}

// ── Session ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted if omitted)
    #[arg(long, short = 'e', env = "SEEK_EMAIL")]
    pub email: Option<String>,

    /// Account password (prompted if omitted)
    #[arg(long, env = "SEEK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct GoogleLoginArgs {
    /// Google identity access token (prompted if omitted)
    #[arg(long, env = "SEEK_GOOGLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Create the account instead of logging in
    #[arg(long)]
    pub signup: bool,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    /// Display name
    #[arg(long, short = 'u')]
    pub username: String,

    /// Account email
    #[arg(long, short = 'e')]
    pub email: String,

    /// Account password (prompted if omitted)
    #[arg(long, env = "SEEK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Account role
    #[arg(long, default_value = "student")]
    pub role: RoleArg,
}

// ── Course content ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WeeksArgs {
    #[command(subcommand)]
    pub command: WeeksCommand,
}

#[derive(Debug, Subcommand)]
pub enum WeeksCommand {
    /// List all weeks
    #[command(alias = "ls")]
    List,

    /// Show one week with its lectures and assignments
    Get {
        /// Week ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct LecturesArgs {
    #[command(subcommand)]
    pub command: LecturesCommand,
}

#[derive(Debug, Subcommand)]
pub enum LecturesCommand {
    /// List all lectures
    #[command(alias = "ls")]
    List {
        /// Only lectures of this week
        #[arg(long)]
        week: Option<u64>,
    },

    /// Show one lecture
    Get {
        /// Lecture ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct AssignmentsArgs {
    #[command(subcommand)]
    pub command: AssignmentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum AssignmentsCommand {
    /// List all assignments
    #[command(alias = "ls")]
    List {
        /// Only assignments of this week
        #[arg(long)]
        week: Option<u64>,
    },

    /// Show one assignment with its questions
    Get {
        /// Assignment ID
        id: u64,
    },
}

#[derive(Debug, Args)]
pub struct ProgrammingArgs {
    #[command(subcommand)]
    pub command: ProgrammingCommand,
}

#[derive(Debug, Subcommand)]
pub enum ProgrammingCommand {
    /// Show a programming assignment's problem and public test cases
    Get {
        /// Assignment ID
        id: u64,
    },
}

// ── Assistant ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExplainErrorArgs {
    /// Code snippet to explain
    #[arg(long, short = 'c', conflicts_with = "file")]
    pub code: Option<String>,

    /// Read the snippet from a file ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct KiaArgs {
    #[command(subcommand)]
    pub command: KiaCommand,
}

#[derive(Debug, Subcommand)]
pub enum KiaCommand {
    /// Record one chatbot exchange in a user's history
    Save {
        /// User the exchange belongs to
        #[arg(long)]
        user_id: u64,

        /// What the user asked
        #[arg(long)]
        query: String,

        /// What Kia answered
        #[arg(long)]
        response: String,
    },
}

// ── Raw request ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method, e.g. GET or POST
    pub method: String,

    /// API path relative to the base URL, e.g. "/weeks/1"
    pub path: String,

    /// Inline JSON body
    #[arg(long, short = 'd', conflicts_with = "from_file")]
    pub data: Option<String>,

    /// Read the JSON body from a file
    #[arg(long, short = 'F')]
    pub from_file: Option<PathBuf>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key: api_url, timeout, token_store, google_client_id
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
