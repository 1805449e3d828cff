use clap::{Parser, Subcommand};

use tubetitles::llm::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "tubetitles",
    about = "YouTube video lookup and AI title variations",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Show request details on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API and web page
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (also read from $PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Title generation backend
        #[arg(long, value_enum)]
        provider: Option<Provider>,
    },

    /// Look up a video through a running server
    Info {
        /// YouTube video URL (reads an interactive session from stdin if omitted)
        url: Option<String>,

        /// Also generate title variations for the video
        #[arg(short, long)]
        generate: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Server base URL
        #[arg(long)]
        api_base: Option<String>,
    },

    /// Generate title variations for a title through a running server
    Generate {
        /// Seed title
        title: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Server base URL
        #[arg(long)]
        api_base: Option<String>,
    },
}
