use anyhow::Context;
use ferritin_featurizers::{AlignmentConfig, AlignmentRunner};
use log::info;
use std::fs;
use std::path::PathBuf;

pub fn execute(config: PathBuf, fasta: PathBuf, output_dir: PathBuf) -> anyhow::Result<()> {
    let config = AlignmentConfig::from_json_file(&config)
        .with_context(|| format!("Failed to load alignment config {config:?}"))?;
    let runner = AlignmentRunner::from_config(&config)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory {output_dir:?}"))?;
    let branch = runner.branch();
    info!("Running alignments for {fasta:?} ({branch} deep search)");
    runner.run(&fasta, &output_dir)?;
    Ok(())
}
