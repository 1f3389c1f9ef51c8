use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "codeweave")]
#[command(
    version,
    about = "Chat-driven code generation service with code block extraction"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long, help = "Bind address (overrides server.host)")]
        host: Option<String>,
        #[arg(long, short, help = "Bind port (overrides server.port)")]
        port: Option<u16>,
    },

    /// Extract code blocks from saved model output
    Extract {
        #[arg(help = "Input file, or - for stdin (default: stdin)")]
        input: Option<PathBuf>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
        #[arg(long, help = "Write each block to this directory")]
        out_dir: Option<PathBuf>,
    },

    /// List built-in prompt templates
    Templates {
        #[arg(short, long, help = "Category: All, Frontend, Backend, Database, Security, DevOps, Testing")]
        category: Option<String>,
        #[arg(short, long, help = "Filter by title, description or tag")]
        search: Option<String>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mCodeweave encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    // Logs go to stderr so `extract --format json` output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let rt = Runtime::new()?;
            rt.block_on(codeweave::cli::commands::serve::run(host, port))?;
        }
        Commands::Extract {
            input,
            format,
            out_dir,
        } => {
            codeweave::cli::commands::extract::run(input.as_deref(), &format, out_dir)?;
        }
        Commands::Templates {
            category,
            search,
            format,
        } => {
            codeweave::cli::commands::templates::run(
                category.as_deref(),
                search.as_deref(),
                &format,
            )?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                codeweave::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                codeweave::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                codeweave::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
