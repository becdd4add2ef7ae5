//! Process descriptor for a single launched node

use crate::config::ParamMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A (source-topic, target-topic) remapping pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remapping {
    pub from: String,
    pub to: String,
}

impl Remapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Source of node parameters: an inline map or a path to a parameter file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSource {
    Inline(ParamMap),
    File(PathBuf),
}

/// Where the launched process sends its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Forward to the launching terminal
    Screen,
    /// Framework log files only
    #[default]
    Log,
}

/// Describes one process for the host launch framework to spawn
///
/// Built once at assembly time and immutable afterwards. The descriptor
/// carries intent only; spawning, supervision, and shutdown belong to the
/// framework consuming it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescriptor {
    /// Package providing the executable
    pub package: String,
    /// Namespace the node runs under
    #[serde(default)]
    pub namespace: String,
    /// Executable name within the package
    pub executable: String,
    /// Human-readable node name
    pub name: String,
    /// Topic remappings, in declaration order
    #[serde(default)]
    pub remappings: Vec<Remapping>,
    /// Parameter sources, applied in order
    #[serde(default)]
    pub parameters: Vec<ParameterSource>,
    /// Output destination
    #[serde(default)]
    pub output: OutputMode,
    /// Positional arguments passed to the executable
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Allocate a pseudo-terminal so the process line-buffers its output
    #[serde(default)]
    pub emulate_tty: bool,
}

impl NodeDescriptor {
    /// Start building a descriptor; the node name defaults to the executable name
    pub fn builder(package: impl Into<String>, executable: impl Into<String>) -> NodeBuilder {
        let executable = executable.into();
        NodeBuilder {
            descriptor: NodeDescriptor {
                package: package.into(),
                namespace: String::new(),
                name: executable.clone(),
                executable,
                remappings: Vec::new(),
                parameters: Vec::new(),
                output: OutputMode::default(),
                arguments: Vec::new(),
                emulate_tty: false,
            },
        }
    }
}

/// Builder for [`NodeDescriptor`]
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    descriptor: NodeDescriptor,
}

impl NodeBuilder {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.descriptor.namespace = namespace.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.descriptor.name = name.into();
        self
    }

    pub fn with_remapping(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.descriptor.remappings.push(Remapping::new(from, to));
        self
    }

    pub fn with_inline_parameters(mut self, params: ParamMap) -> Self {
        self.descriptor.parameters.push(ParameterSource::Inline(params));
        self
    }

    pub fn with_parameter_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.descriptor.parameters.push(ParameterSource::File(path.into()));
        self
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.descriptor.output = output;
        self
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.descriptor.arguments.push(argument.into());
        self
    }

    pub fn with_emulated_tty(mut self) -> Self {
        self.descriptor.emulate_tty = true;
        self
    }

    pub fn build(self) -> NodeDescriptor {
        self.descriptor
    }
}

impl ParameterSource {
    /// Short rendering for plan output
    pub fn summary(&self) -> String {
        match self {
            ParameterSource::Inline(map) => format!("inline ({} keys)", map.len()),
            ParameterSource::File(path) => path.display().to_string(),
        }
    }

    /// The file path, if this source is file-based
    pub fn as_file(&self) -> Option<&Path> {
        match self {
            ParameterSource::Inline(_) => None,
            ParameterSource::File(path) => Some(path),
        }
    }
}
