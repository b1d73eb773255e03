use crate::config::InferenceConfig;
use crate::error::Result;
use regex::Regex;
use std::path::Path;

/// Decides whether a completion request should run namespace inference at all.
pub struct TriggerGate {
    declaration: Regex,
    script_extensions: Vec<String>,
}

impl TriggerGate {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let keyword = regex::escape(&config.keyword);
        let declaration = Regex::new(&format!(r"^\s*{keyword}\s+\w*$"))?;
        Ok(Self {
            declaration,
            script_extensions: config.script_extensions.clone(),
        })
    }

    /// True while the user is typing the name of a namespace declaration,
    /// e.g. `"  namespace Foo"`. Anything after the identifier (a dot, a brace)
    /// closes the window.
    pub fn is_namespace_declaration(&self, line_prefix: &str) -> bool {
        self.declaration.is_match(line_prefix)
    }

    /// Script documents are not namespace-scoped.
    pub fn is_script(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.script_extensions
                    .iter()
                    .any(|script| script.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }
}
