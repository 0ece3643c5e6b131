//! TexGen CLI - generate textures from text prompts

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{asset, generate};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "texgen")]
#[command(about = "Generate texture assets from text prompts", long_about = None)]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a texture from a prompt and save it as an asset
    Generate {
        /// Text prompt describing the image
        prompt: String,

        /// Image size, e.g. 1024x1024 (defaults to config)
        #[arg(long)]
        size: Option<String>,

        /// Destination folder, e.g. /Game/Gen (defaults to config)
        #[arg(long)]
        path: Option<String>,

        /// Texture asset name (defaults to config)
        #[arg(long)]
        name: Option<String>,

        /// Transport to use (openai, mock)
        #[arg(long, default_value = "openai")]
        transport: String,

        /// Content directory holding asset packages (defaults to config)
        #[arg(long)]
        content_root: Option<String>,
    },

    /// Asset inspection operations
    #[command(subcommand)]
    Asset(asset::AssetCommands),

    /// List available transports
    Transports,
}

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "texgen_cli={level},texgen_pipeline={level},texgen_asset={level}",
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Generate {
            prompt,
            size,
            path,
            name,
            transport,
            content_root,
        } => generate::run(generate::GenerateArgs {
            prompt,
            size,
            path,
            name,
            transport,
            content_root,
        }),
        Commands::Asset(cmd) => asset::run(cmd),
        Commands::Transports => {
            for name in texgen_pipeline::available_transports() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}
