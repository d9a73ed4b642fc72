mod cli; // Declare the cli module

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand}; // Use clap for argument parsing
use log::{debug, error, info};

use tessera_core::kernel::constants;
use tessera_core::{Application, FrameworkConfig};

/// Tessera: server-side event core for UI components
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for checking the binary
    #[arg(long)]
    ping: bool,

    /// Configuration file (JSON, YAML or TOML); defaults to $TESSERA_CONFIG or ./tessera.toml
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered event types
    Types {},
    /// Decode event requests and report the event each one becomes
    Decode {
        /// JSON file holding one request or an array of requests; `-` reads stdin
        input: String,
    },
}

fn init_logging(config: &FrameworkConfig) {
    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    let config = match FrameworkConfig::discover(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);
    debug!("Effective configuration: {:?}", config);

    let app = Application::with_config(config);

    match args.command {
        Some(Commands::Types {}) => {
            println!("Registered event types:");
            for descriptor in app.registry().descriptors() {
                println!("  - {}", cli::describe_descriptor(descriptor));
            }
            ExitCode::SUCCESS
        }
        Some(Commands::Decode { input }) => {
            let requests = match cli::read_requests(&input) {
                Ok(requests) => requests,
                Err(e) => {
                    error!("Could not read requests from '{}': {}", input, e);
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            };
            info!("Decoding {} request(s)", requests.len());

            let mut failures = 0;
            for (index, request) in requests.iter().enumerate() {
                match app.factory().create_from_request(request) {
                    Ok(Some(event)) => {
                        println!("[{}] {}", index, cli::describe_event(event.as_ref(), app.registry()));
                    }
                    Ok(None) => println!("[{}] no event could be built", index),
                    Err(e) => {
                        eprintln!("[{}] {}", index, e);
                        failures += 1;
                    }
                }
            }
            if failures > 0 { ExitCode::FAILURE } else { ExitCode::SUCCESS }
        }
        None => {
            println!("{} v{}", constants::APP_NAME, constants::APP_VERSION);
            println!(
                "{} event type(s) registered; generic fallback {}, replay on activate {}",
                app.registry().len(),
                on_off(app.config().dispatch.generic_fallback),
                on_off(app.config().dispatch.replay_on_activate),
            );
            ExitCode::SUCCESS
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
