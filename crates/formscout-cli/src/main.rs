mod artifacts;
mod commands;
mod picker;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use formscout_explorer::FormProfile;

/// formscout -- decision-tree exploration of dynamic web questionnaires.
#[derive(Parser, Debug)]
#[command(name = "formscout", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Exhaustively explore the form and write the full decision tree
    Explore {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Walk the form once, answering interactively, and save the path
    Record {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Print the default profile as TOML (starting point for --profile)
    Profile,
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Path to a TOML form profile
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Override the form's start URL
    #[arg(long)]
    url: Option<String>,

    /// Override the artifact output directory
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

impl SessionArgs {
    /// Resolve the effective profile: file, then env, then flags.
    fn resolve(&self) -> anyhow::Result<FormProfile> {
        let mut profile = match &self.profile {
            Some(path) => {
                let content = std::fs::read_to_string(path)?;
                FormProfile::from_toml(&content)?
            }
            None => FormProfile::default(),
        };
        profile.apply_env();
        if let Some(url) = &self.url {
            profile.start_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            profile.data_dir = dir.clone();
        }
        Ok(profile)
    }
}

fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; default to the exploration trace.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Explore { session } => {
            let profile = session.resolve()?;
            runtime.block_on(commands::explore::run(profile))
        }
        Commands::Record { session } => {
            let profile = session.resolve()?;
            runtime.block_on(commands::record::run(profile))
        }
        Commands::Profile => {
            print!("{}", FormProfile::default().to_toml()?);
            Ok(())
        }
    }
}
