use super::commands;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, short = 'l', global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the alignment searches for a single-sequence FASTA query.
    Align {
        /// JSON file with the tool binaries and database paths.
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        fasta: PathBuf,
        /// Directory the alignment files are written to. Created if missing.
        #[arg(long)]
        output_dir: PathBuf,
    },
    /// Build features from a query and its precomputed alignments.
    Featurize {
        #[arg(long, required_unless_present = "structure", conflicts_with = "structure")]
        fasta: Option<PathBuf>,
        /// PDB or mmCIF file.
        #[arg(long)]
        structure: Option<PathBuf>,
        /// Chain to featurize. Defaults to the first chain of the structure.
        #[arg(long, requires = "structure")]
        chain: Option<String>,
        #[arg(long)]
        alignment_dir: PathBuf,
        /// Read the small BFD Stockholm file instead of the BFD/Uniclust30 A3M file.
        #[arg(long)]
        use_small_bfd: bool,
        /// Output safetensors file.
        #[arg(short, long)]
        output: PathBuf,
    },
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        TermLogger::init(
            self.log_level,
            Default::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )?;

        match self.command {
            Commands::Align {
                config,
                fasta,
                output_dir,
            } => commands::align::execute(config, fasta, output_dir),
            Commands::Featurize {
                fasta,
                structure,
                chain,
                alignment_dir,
                use_small_bfd,
                output,
            } => {
                let input = match (fasta, structure) {
                    (Some(fasta), _) => commands::featurize::Input::Fasta(fasta),
                    (None, Some(path)) => commands::featurize::Input::Structure { path, chain },
                    (None, None) => anyhow::bail!("one of --fasta or --structure is required"),
                };
                commands::featurize::execute(input, alignment_dir, use_small_bfd, output)
            }
        }
    }
}
