use super::ProjectDescriptor;
use crate::config::InferenceConfig;
use crate::error::Result;
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RootSource {
    /// Read from the root element inside the descriptor.
    Element,
    /// Derived from the descriptor's file name.
    FileName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootIdentifier {
    pub value: String,
    pub source: RootSource,
}

/// Resolves the identifier a project's namespaces start with.
pub struct RootNamespaceReader {
    element: Regex,
    suffix: String,
}

impl RootNamespaceReader {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let tag = regex::escape(&config.root_element);
        let element = Regex::new(&format!(r"<{tag}>\s*([\w.]+)\s*</{tag}>"))?;
        Ok(Self {
            element,
            suffix: config.descriptor_suffix(),
        })
    }

    /// Element value first, then the file name. `None` only when both are empty.
    pub fn resolve(&self, descriptor: &ProjectDescriptor) -> Option<RootIdentifier> {
        self.read_element(&descriptor.full_path)
            .map(|value| RootIdentifier {
                value,
                source: RootSource::Element,
            })
            .or_else(|| {
                self.file_stem(&descriptor.file_name)
                    .map(|value| RootIdentifier {
                        value,
                        source: RootSource::FileName,
                    })
            })
    }

    /// First root element value in `text`.
    pub fn extract(&self, text: &str) -> Option<String> {
        self.element
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// File name without the descriptor extension, `MyApp.csproj` -> `MyApp`.
    pub fn file_stem(&self, file_name: &str) -> Option<String> {
        let stem = file_name
            .strip_suffix(self.suffix.as_str())
            .or_else(|| Path::new(file_name).file_stem().and_then(|s| s.to_str()))
            .unwrap_or(file_name);

        (!stem.is_empty()).then(|| stem.to_string())
    }

    fn read_element(&self, path: &Path) -> Option<String> {
        match std::fs::read_to_string(path) {
            Ok(text) => self.extract(&text),
            Err(e) => {
                debug!(
                    descriptor = %path.display(),
                    error = %e,
                    "descriptor unreadable, falling back to its file name"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn reader() -> RootNamespaceReader {
        RootNamespaceReader::new(&InferenceConfig::default()).unwrap()
    }

    fn descriptor(dir: &Path, name: &str) -> ProjectDescriptor {
        ProjectDescriptor {
            file_name: name.to_string(),
            containing_directory: dir.to_path_buf(),
            full_path: dir.join(name),
        }
    }

    #[test]
    fn test_extract_root_namespace() {
        let text = r#"
<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <RootNamespace>Acme.App</RootNamespace>
  </PropertyGroup>
</Project>
"#;
        assert_eq!(reader().extract(text), Some("Acme.App".to_string()));
    }

    #[test]
    fn test_extract_tolerates_inner_whitespace() {
        let text = "<RootNamespace>\n    Acme.Core\n</RootNamespace>";
        assert_eq!(reader().extract(text), Some("Acme.Core".to_string()));
    }

    #[test]
    fn test_extract_rejects_non_identifier_values() {
        let text = "<RootNamespace>$(MSBuildProjectName)</RootNamespace>";
        assert_eq!(reader().extract(text), None);
        assert_eq!(reader().extract("<RootNamespace></RootNamespace>"), None);
    }

    #[test]
    fn test_custom_element() {
        let config = InferenceConfig {
            root_element: "AssemblyName".to_string(),
            ..InferenceConfig::default()
        };
        let reader = RootNamespaceReader::new(&config).unwrap();
        let text = "<RootNamespace>Ignored</RootNamespace><AssemblyName>Acme.Asm</AssemblyName>";
        assert_eq!(reader.extract(text), Some("Acme.Asm".to_string()));
    }

    #[test]
    fn test_file_stem() {
        let reader = reader();
        assert_eq!(reader.file_stem("MyApp.csproj"), Some("MyApp".to_string()));
        assert_eq!(reader.file_stem("My.App.csproj"), Some("My.App".to_string()));
        assert_eq!(reader.file_stem("Other.proj"), Some("Other".to_string()));
        assert_eq!(reader.file_stem(".csproj"), None);
    }

    #[test]
    fn test_resolve_prefers_element() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(
            temp.path().join("MyApp.csproj"),
            "<Project><RootNamespace>Acme.App</RootNamespace></Project>",
        )
        .unwrap();

        let root = reader()
            .resolve(&descriptor(temp.path(), "MyApp.csproj"))
            .unwrap();
        assert_eq!(root.value, "Acme.App");
        assert_eq!(root.source, RootSource::Element);
    }

    #[test]
    fn test_resolve_falls_back_to_file_name() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("MyApp.csproj"), "<Project />").unwrap();

        let root = reader()
            .resolve(&descriptor(temp.path(), "MyApp.csproj"))
            .unwrap();
        assert_eq!(root.value, "MyApp");
        assert_eq!(root.source, RootSource::FileName);
    }

    #[test]
    fn test_resolve_unreadable_descriptor_falls_back() {
        let missing = ProjectDescriptor {
            file_name: "Ghost.csproj".to_string(),
            containing_directory: PathBuf::from("/nonexistent"),
            full_path: PathBuf::from("/nonexistent/Ghost.csproj"),
        };
        let root = reader().resolve(&missing).unwrap();
        assert_eq!(root.value, "Ghost");
        assert_eq!(root.source, RootSource::FileName);
    }

    #[test]
    fn test_resolve_invalid_utf8_falls_back() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("Bin.csproj"), [0xff, 0xfe, 0x00]).unwrap();

        let root = reader()
            .resolve(&descriptor(temp.path(), "Bin.csproj"))
            .unwrap();
        assert_eq!(root.value, "Bin");
    }

    #[test]
    fn test_resolve_nameless_descriptor() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join(".csproj"), "<Project />").unwrap();
        assert!(reader().resolve(&descriptor(temp.path(), ".csproj")).is_none());

        std::fs::write(
            temp.path().join(".csproj"),
            "<RootNamespace>Named</RootNamespace>",
        )
        .unwrap();
        let root = reader()
            .resolve(&descriptor(temp.path(), ".csproj"))
            .unwrap();
        assert_eq!(root.value, "Named");
    }
}
