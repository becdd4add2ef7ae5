//! Namespace injection for YAML parameter files

use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

/// Wrap all top-level keys of a YAML document under a namespace key
///
/// `{a: 1, b: 2}` with namespace `ns` becomes `{ns: {a: 1, b: 2}}`.
pub fn push_namespace_str(namespace: &str, content: &str) -> Result<String, NamespaceError> {
    let document: Value = serde_yaml::from_str(content)?;

    let root = match document {
        Value::Mapping(root) => root,
        other => return Err(NamespaceError::NotAMapping(value_kind(&other))),
    };

    let mut wrapped = Mapping::new();
    wrapped.insert(Value::String(namespace.to_string()), Value::Mapping(root));

    Ok(serde_yaml::to_string(&Value::Mapping(wrapped))?)
}

/// Rewrite a YAML parameter file so its keys are nested under `namespace`
///
/// Always reads the original file and writes a fresh copy into `output_dir`,
/// so repeated calls with different namespaces never stack. Returns the path
/// of the generated file.
pub fn push_namespace(
    namespace: &str,
    yaml_path: &Path,
    output_dir: &Path,
) -> Result<PathBuf, NamespaceError> {
    let content = std::fs::read_to_string(yaml_path).map_err(|source| NamespaceError::Io {
        path: yaml_path.to_path_buf(),
        source,
    })?;

    let wrapped = push_namespace_str(namespace, &content)?;

    std::fs::create_dir_all(output_dir).map_err(|source| NamespaceError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let stem = yaml_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "params".to_string());
    let out_path = output_dir.join(format!("{}.{}.yaml", stem, namespace));

    std::fs::write(&out_path, wrapped).map_err(|source| NamespaceError::Io {
        path: out_path.clone(),
        source,
    })?;

    log::debug!(
        "Namespaced '{}' into '{}'",
        yaml_path.display(),
        out_path.display()
    );

    Ok(out_path)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged",
    }
}

/// Errors that can occur while namespacing a parameter file
#[derive(Debug, thiserror::Error)]
pub enum NamespaceError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse parameter file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Parameter file root must be a mapping, found {0}")]
    NotAMapping(&'static str),
}
