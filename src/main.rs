use anyhow::Result;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use replyr::ai::GeminiClient;
use replyr::app::App;
use replyr::config::Config;
use replyr::constants::API_KEY_ENV;
use replyr::shell;

fn setup_logging() {
    use std::fs::{self, OpenOptions};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,replyr=debug"));

    // The shell owns stdout, so logs go to a file in the config directory
    let log_file = Config::config_dir()
        .ok()
        .and_then(|dir| fs::create_dir_all(&dir).ok().map(|_| dir.join("replyr.log")))
        .and_then(|path| {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&path)
                .ok()
        });

    if let Some(file) = log_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
            .init();
    } else {
        // Fallback to stderr if file logging fails
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_usage() {
    eprintln!(
        r#"replyr - Draft email replies with Gemini

Usage: replyr [command]

Commands:
    (none)      Start the interactive session
    init        Write a default configuration file
    help        Show this help message

Configuration file: ~/.config/replyr/config.toml
API key: set {} or ai.api_key in the configuration file
"#,
        API_KEY_ENV
    );
}

fn run_init() -> Result<()> {
    use std::io::{self, Write};

    let config_path = Config::config_path()?;
    if config_path.exists() {
        print!("Configuration already exists. Overwrite? [y/N]: ");
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Init cancelled.");
            return Ok(());
        }
    }

    let path = Config::default().save()?;
    println!("Configuration saved to {}", path.display());
    println!("Set {} or edit ai.api_key before running 'replyr'.", API_KEY_ENV);
    Ok(())
}

async fn run_session() -> Result<()> {
    setup_logging();

    let config = Config::load()?;
    let client = match GeminiClient::from_config(&config.ai) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("\n  export {}='your-api-key'", API_KEY_ENV);
            eprintln!("  replyr");
            std::process::exit(1);
        }
    };
    tracing::info!(model = client.model(), "Starting session");

    let mut app = App::new(config, client);
    let stdin = std::io::stdin();
    shell::run(&mut app, stdin.lock(), std::io::stdout()).await?;

    tracing::info!("Session ended");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("init") => run_init(),
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => run_session().await,
    }
}
