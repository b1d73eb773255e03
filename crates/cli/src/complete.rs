use nsfill_core::{InferenceConfig, NamespaceEngine};
use std::path::PathBuf;
use tracing::debug;

/// Prints what an editor would receive for `line` typed in `file`.
pub fn run(
    config: InferenceConfig,
    file: PathBuf,
    line: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = NamespaceEngine::new(config)?;

    match engine.suggest(&file, &line) {
        Some(suggestion) => println!("{}", serde_json::to_string_pretty(&suggestion)?),
        None => debug!("no suggestion for {:?} in {}", line, file.display()),
    }

    Ok(())
}
