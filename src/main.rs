//! folio - Entry Point

use clap::Parser;
use folio::model::{Portfolio, SectionId};
use std::path::PathBuf;
use tracing::info;

/// folio - animated personal portfolio for the terminal
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Animated single-page personal portfolio for the terminal")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Portfolio content file (TOML) to show instead of the built-in one
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Show every section fully revealed and skip the typewriter
    #[arg(long)]
    pub no_animation: bool,

    /// Start scrolled to a section (hero, experience, skills, projects,
    /// philosophy, vision, contact, footer)
    #[arg(long, value_name = "NAME")]
    pub section: Option<SectionId>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = folio::config::load_config_with_precedence(args.config.clone())?;
        let merged = folio::config::merge_config(config_file)?;
        let with_env = folio::config::apply_env_overrides(merged);
        folio::config::apply_cli_overrides(with_env, args.content.clone(), args.no_animation)
    };

    folio::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let portfolio = Portfolio::load(config.content_path.as_deref())?;
    info!(
        name = %portfolio.profile.name,
        phrases = portfolio.profile.phrases.len(),
        contact_methods = portfolio.contact.methods.len(),
        "Portfolio loaded"
    );

    let cli_args = folio::view::CliArgs::new(args.no_color, args.section);
    folio::view::run_with_config(portfolio, &config, cli_args)?;

    Ok(())
}
