use nsfill_core::{InferenceConfig, NamespaceEngine};
use std::path::PathBuf;
use tracing::info;

pub fn run(
    config: InferenceConfig,
    file: PathBuf,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = NamespaceEngine::new(config)?;

    match engine.infer(&file)? {
        Some(inference) if json => println!("{}", serde_json::to_string_pretty(&inference)?),
        Some(inference) => println!("{}", inference.namespace),
        None => info!(
            "No project descriptor (*{}) found above {}",
            engine.config().descriptor_suffix(),
            file.display()
        ),
    }

    Ok(())
}
