use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "CLI for the roster user directory", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the directory service
    #[arg(long, global = true, env = "ROSTER_API_URL")]
    pub api_url: Option<String>,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and save the session token
    Login,
    /// Sign out and remove the saved session
    Logout,
    /// Show the current session status
    Status,
    /// List directory entries
    List {
        /// Page to show (1-based)
        #[arg(long, short = 'p', default_value = "1")]
        page: u32,

        /// Filter by first or last name (case-insensitive)
        #[arg(long, short = 's')]
        search: Option<String>,
    },
    /// Edit an entry's name or email
    Edit {
        /// Entry id
        id: u64,

        /// New first name
        #[arg(long)]
        first_name: Option<String>,

        /// New last name
        #[arg(long)]
        last_name: Option<String>,

        /// New email
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry id
        id: u64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// Browse the directory interactively
    Browse,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
