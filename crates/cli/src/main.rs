mod cmd;
mod completions;
mod logging;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::engine::ArgValueCompleter;
use clap_complete::{CompleteEnv, Shell};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "lgm", version, about = "Parse, filter and render localized markdown documents")]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/lingomark/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the attributes of a document
    Parse(ParseArgs),

    /// Print the body of a document filtered for some locales
    Body(BodyArgs),

    /// Render a document to HTML
    Render(RenderArgs),

    /// Validate configuration and print resolved settings
    Doctor(DoctorArgs),

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Document to read, or "-" for stdin
    pub file: PathBuf,

    /// Print the JSON export instead of a table
    #[arg(long)]
    pub json: bool,

    /// Leave a key out of the JSON export (repeatable)
    #[arg(long, value_name = "KEY")]
    pub exclude: Vec<String>,

    /// Leave null and empty values out of the JSON export
    #[arg(long)]
    pub exclude_empty: bool,

    /// Only show attribute values for these locales
    #[arg(long, short, add = ArgValueCompleter::new(completions::complete_locales))]
    pub locale: Vec<String>,

    /// Metadata (YAML) to use when the document's block cannot be decoded
    #[arg(long, value_name = "YAML")]
    pub default_metadata: Option<String>,

    /// Parsing engine to use
    #[arg(long, add = ArgValueCompleter::new(completions::complete_parsing_engines))]
    pub engine: Option<String>,
}

#[derive(Debug, Args)]
pub struct BodyArgs {
    /// Document to read, or "-" for stdin
    pub file: PathBuf,

    /// Locales to keep (defaults to the configured locale)
    #[arg(long, short, add = ArgValueCompleter::new(completions::complete_locales))]
    pub locale: Vec<String>,

    /// Parsing engine to use
    #[arg(long, add = ArgValueCompleter::new(completions::complete_parsing_engines))]
    pub engine: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document to read, or "-" for stdin
    pub file: PathBuf,

    /// Locales to render (defaults to the configured locale)
    #[arg(long, short, add = ArgValueCompleter::new(completions::complete_locales))]
    pub locale: Vec<String>,

    /// Filters to run instead of the default pipeline (comma separated)
    #[arg(
        long,
        value_delimiter = ',',
        add = ArgValueCompleter::new(completions::complete_filters)
    )]
    pub pipeline: Option<Vec<String>>,

    /// Rendering engine to use
    #[arg(long, add = ArgValueCompleter::new(completions::complete_rendering_engines))]
    pub engine: Option<String>,

    /// Skip the markdown filter
    #[arg(long)]
    pub no_markdown: bool,

    /// Skip heading anchors
    #[arg(long)]
    pub no_toc: bool,

    /// Skip autolinking of bare URLs
    #[arg(long)]
    pub no_links: bool,

    /// Skip emoji replacement
    #[arg(long)]
    pub no_emoji: bool,

    /// Skip image width limiting
    #[arg(long)]
    pub no_image_max_width: bool,
}

#[derive(Debug, Args)]
pub struct DoctorArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() -> color_eyre::Result<()> {
    CompleteEnv::with_factory(Cli::command).complete();
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Parse(args) => cmd::parse::run(config, &args),
        Commands::Body(args) => cmd::body::run(config, &args),
        Commands::Render(args) => cmd::render::run(config, &args),
        Commands::Doctor(args) => cmd::doctor::run(config, &args),
        Commands::Completions { shell } => {
            completions::print_script(shell);
            Ok(())
        }
    };

    logging::flush();
    result
}
