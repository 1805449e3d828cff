use std::io::{self, BufRead, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use eyre::{Result, WrapErr};
use log::{debug, info};

mod cli;

use cli::{Cli, Command, OutputFormat};
use tubetitles::client::ApiClient;
use tubetitles::config::{Config, Credentials, DEFAULT_HOST, DEFAULT_PORT};
use tubetitles::output::{render_json, render_variations, render_video};
use tubetitles::server::{self, AppState};
use tubetitles::session::{Session, parse_input};

fn setup_logging(to_file: bool) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);

    if to_file {
        let log_dir = log_dir();
        std::fs::create_dir_all(&log_dir)?;
        let log_file = log_dir.join("tubetitles.log");
        let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);
        builder.target(env_logger::Target::Pipe(target));
        builder.init();
        info!("Logging initialized: {}", log_file.display());
    } else {
        builder.init();
    }
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubetitles")
        .join("logs")
}

fn build_after_help() -> String {
    let log_path = log_dir().join("tubetitles.log");
    let config_path = tubetitles::config::config_path();

    format!(
        "\nENVIRONMENT:\n  YOUTUBE_API_KEY     YouTube Data API key\n  ANTHROPIC_API_KEY   Anthropic key (provider = anthropic)\n  GROQ_API_KEY        Groq key (provider = groq)\n\nConfig is read from: {}\nClient logs are written to: {}",
        config_path.display(),
        log_path.display()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cmd = <Cli as clap::CommandFactory>::command().after_help(build_after_help());
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    setup_logging(!matches!(cli.command, Command::Serve { .. }))?;

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Ignoring config file: {e}");
        Config::default()
    });

    if cli.verbose {
        let config_path = tubetitles::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
    }

    let client = reqwest::Client::new();

    match cli.command {
        Command::Serve { host, port, provider } => {
            let host = host
                .or_else(|| config.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string());
            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .or(config.port)
                .unwrap_or(DEFAULT_PORT);
            let provider = provider.or(config.provider).unwrap_or_default();

            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .wrap_err_with(|| format!("invalid listen address {host}:{port}"))?;

            let credentials = Credentials::from_env();
            credentials.warn_missing(provider);

            let state = AppState::new(client, &config, &credentials, provider);
            server::serve(addr, state).await?;
        }
        Command::Info {
            url,
            generate,
            format,
            api_base,
        } => {
            let api = ApiClient::new(client, api_base.unwrap_or_else(|| config.api_base()));
            match url {
                Some(url) => show_video(&api, &url, generate, format, cli.verbose).await?,
                None => run_session(&api, format).await?,
            }
        }
        Command::Generate {
            title,
            format,
            api_base,
        } => {
            let api = ApiClient::new(client, api_base.unwrap_or_else(|| config.api_base()));
            let variations = api.generate_titles(&title).await?;
            let rendered = match format {
                OutputFormat::Text => render_variations(&variations),
                OutputFormat::Json => render_json(None, Some(&variations)),
            };
            println!("{rendered}");
        }
    }

    Ok(())
}

async fn show_video(api: &ApiClient, url: &str, generate: bool, format: OutputFormat, verbose: bool) -> Result<()> {
    let video_id = parse_input(url)?;
    if verbose {
        eprintln!("Video ID: {video_id}");
    }

    let summary = api.fetch_video_info(&video_id).await?;
    let variations = if generate {
        Some(api.generate_titles(&summary.title).await?)
    } else {
        None
    };

    let rendered = match format {
        OutputFormat::Json => render_json(Some(&summary), variations.as_deref()),
        OutputFormat::Text => {
            let mut out = render_video(&summary);
            if let Some(ref variations) = variations {
                out.push_str("\n\n");
                out.push_str(&render_variations(variations));
            }
            out
        }
    };
    println!("{rendered}");
    Ok(())
}

/// Line-oriented session: a URL loads a video, `generate` asks for titles.
async fn run_session(api: &ApiClient, format: OutputFormat) -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();

        match line {
            "" => {}
            "quit" | "exit" => break,
            "generate" => match session.seed_title() {
                Ok(seed) => match api.generate_titles(seed).await {
                    Ok(variations) => println!(
                        "{}",
                        match format {
                            OutputFormat::Text => render_variations(&variations),
                            OutputFormat::Json => render_json(None, Some(&variations)),
                        }
                    ),
                    Err(e) => eprintln!("error: {e}"),
                },
                Err(e) => eprintln!("error: {e}"),
            },
            input => {
                let loaded = match parse_input(input) {
                    Ok(video_id) => api.fetch_video_info(&video_id).await,
                    Err(e) => Err(e),
                };
                match loaded {
                    Ok(summary) => {
                        let summary = session.load(summary);
                        debug!("Loaded {}", summary.title);
                        println!(
                            "{}",
                            match format {
                                OutputFormat::Text => render_video(summary),
                                OutputFormat::Json => render_json(Some(summary), None),
                            }
                        );
                    }
                    Err(e) => {
                        session.clear();
                        eprintln!("error: {e}");
                    }
                }
            }
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> io::Result<()> {
    eprint!("> ");
    io::stderr().flush()
}
