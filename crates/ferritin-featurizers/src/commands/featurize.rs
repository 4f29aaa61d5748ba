use anyhow::Context;
use ferritin_core::PdbStructure;
use ferritin_featurizers::{DataPipeline, DeepSearchBranch, EmptyTemplateFeaturizer};
use log::info;
use std::path::PathBuf;

pub enum Input {
    Fasta(PathBuf),
    Structure { path: PathBuf, chain: Option<String> },
}

pub fn execute(
    input: Input,
    alignment_dir: PathBuf,
    use_small_bfd: bool,
    output: PathBuf,
) -> anyhow::Result<()> {
    let branch = DeepSearchBranch::from_use_small_bfd(use_small_bfd);
    let pipeline = DataPipeline::new(EmptyTemplateFeaturizer, branch);

    let features = match input {
        Input::Fasta(fasta) => pipeline
            .process_fasta(&fasta, &alignment_dir)
            .with_context(|| format!("Failed to featurize {fasta:?}"))?,
        Input::Structure { path, chain } => {
            let structure = PdbStructure::open(&path)
                .with_context(|| format!("Failed to read structure {path:?}"))?;
            pipeline
                .process_structure(&structure, &alignment_dir, chain.as_deref())
                .with_context(|| format!("Failed to featurize {path:?}"))?
        }
    };
    features.validate_dimensions()?;

    info!("Writing {} features to {output:?}", features.len());
    features
        .to_safetensors(&output)
        .with_context(|| format!("Failed to write {output:?}"))?;
    Ok(())
}
