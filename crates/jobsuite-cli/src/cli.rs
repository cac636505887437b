//! Command-line surface for the `jobsuite` binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "jobsuite", version, about = "JobSuite contractor toolbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Explicit config file path (defaults to the layered lookup)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the local HTTP gateway
    Serve(ServeArgs),
    /// Credential management
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Local entity cache inspection and control
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
    /// Estimates, read through the cache
    Estimates {
        #[command(subcommand)]
        action: EstimatesAction,
    },
    /// Clients, read through the cache
    Clients {
        #[command(subcommand)]
        action: ClientsAction,
    },
    /// Upload media onto an estimate
    Upload {
        #[command(subcommand)]
        action: UploadAction,
    },
    /// Document rendering
    Render {
        #[command(subcommand)]
        action: RenderAction,
    },
}

#[derive(Debug, clap::Args)]
pub struct ServeArgs {
    /// Listen host override
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port override
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Subcommand)]
pub enum AuthAction {
    /// Log in with the service account and store the token
    Login {
        /// Account email (defaults to `auth.email` from config)
        #[arg(long)]
        email: Option<String>,
        /// Account password (defaults to `auth.password` from config)
        #[arg(long)]
        password: Option<String>,
    },
    /// Remove stored credentials
    Logout,
    /// Show where the token comes from and when it expires
    Status,
}

#[derive(Debug, Subcommand)]
pub enum CacheAction {
    /// Print per-kind entry counts and snapshot ages
    Show,
    /// Delete every cache snapshot
    Clear,
    /// Force a refetch, for one kind or all of them
    Refresh {
        /// estimates, clients, or projects
        kind: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EstimatesAction {
    /// List cached estimates, refreshing first when stale
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<String>,
        /// Filter by client id
        #[arg(long)]
        client_id: Option<String>,
    },
    /// Print one estimate by id
    Get { id: String },
}

#[derive(Debug, Subcommand)]
pub enum ClientsAction {
    /// List cached clients
    List {
        /// Search upstream instead of the cache
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UploadAction {
    /// Presigned POST upload of an image
    Image(UploadArgs),
    /// Chunked multipart upload of a video
    Video(UploadArgs),
}

#[derive(Debug, clap::Args)]
pub struct UploadArgs {
    /// Estimate the file belongs to
    #[arg(long)]
    pub estimate: String,

    /// File to upload
    pub file: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum RenderAction {
    /// Render the proposal document from a JSON bundle
    Estimate {
        /// JSON file with estimate, client, line_items, resources, signatures
        #[arg(long)]
        input: PathBuf,

        /// Write the HTML here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Emit the embeddable fragment (styles + wrapped body)
        #[arg(long)]
        embed: bool,
    },
}
