mod complete;
mod infer;

use clap::{Args, Parser, Subcommand};
use nsfill_core::InferenceConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nsfill",
    version,
    about = "Infers C# namespaces from project layout",
    long_about = "nsfill derives the namespace of a source file from the nearest project descriptor \
                  (*.csproj) above it and the folders in between. It can be queried directly or run \
                  as a language server that completes `namespace` declarations."
)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the namespace inferred for a file
    Infer {
        /// Source file (it does not need to exist yet)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print descriptor, root identifier and relative path as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the completion an editor would get for a line prefix
    #[command(
        long_about = "Runs the same checks as the language server: script files and lines that are not \
                      an unfinished `namespace` declaration produce no output."
    )]
    Complete {
        /// Source file being edited
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Text of the current line up to the cursor
        #[arg(long, allow_hyphen_values = true)]
        line: String,
    },
    /// Start the Language Server Protocol (LSP) server
    Lsp,
}

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// JSON file with inference settings (camelCase keys)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project descriptor extension
    #[arg(long, global = true, value_name = "EXT")]
    pub extension: Option<String>,

    /// Maximum number of directories searched for a descriptor
    #[arg(long, global = true, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Descriptor element holding the root namespace
    #[arg(long, global = true, value_name = "NAME")]
    pub root_element: Option<String>,
}

impl ConfigArgs {
    /// Defaults, then the config file, then individual flags.
    pub fn resolve(&self) -> nsfill_core::Result<InferenceConfig> {
        let mut config = match &self.config {
            Some(path) => InferenceConfig::from_file(path)?,
            None => InferenceConfig::default(),
        };
        if let Some(extension) = &self.extension {
            config.descriptor_extension = extension.clone();
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(root_element) = &self.root_element {
            config.root_element = root_element.clone();
        }
        Ok(config)
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Lsp => "lsp",
        _ => "cli",
    };
    let _guard = nsfill_core::logging::init_logging(component, !matches!(cli.command, Commands::Lsp));

    let config = cli.config.resolve()?;

    match cli.command {
        Commands::Infer { file, json } => infer::run(config, file, json),
        Commands::Complete { file, line } => complete::run(config, file, line),
        Commands::Lsp => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(nsfill_lsp::run_server(config))
        }
    }
}
