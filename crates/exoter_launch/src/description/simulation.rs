//! Assembly of the simple-simulation launch description
//!
//! Mirrors the rover teleoperation pipeline: gamepad input feeds the
//! locomotion mode arbitration, which drives the joint simulation, whose
//! state is published for visualization.

use crate::config::{
    push_namespace, JointStatePublisherParams, NamespaceError, ParamError, ParamMap,
};
use crate::description::node::{NodeDescriptor, OutputMode};
use crate::index::{IndexError, PackageIndex};
use crate::urdf::{ConversionError, XacroConverter};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Namespace the rover nodes run under unless overridden
pub const DEFAULT_NAMESPACE: &str = "exoter";

/// Robot model expanded to URDF unless overridden
pub const DEFAULT_ROBOT_MODEL: &str = "exoter.xacro";

/// Everything the assembly steps need, passed explicitly instead of living
/// in module-level globals
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Namespace prefixed to topics and nested into parameter files
    pub namespace: String,
    /// Package index for source and share lookups
    pub index: PackageIndex,
    /// Directory receiving generated files (expanded URDF, namespaced YAML)
    pub output_dir: PathBuf,
    /// Command invoked for xacro expansion
    pub xacro_command: String,
    /// File name of the robot model under `rover_config/urdf/`
    pub robot_model: String,
    /// Joint-state publisher tuning
    pub joint_state: JointStatePublisherParams,
}

impl SimulationConfig {
    /// Defaults for a given package index; generated files go to a fresh
    /// per-invocation directory under the system temp dir
    pub fn new(index: PackageIndex) -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            index,
            output_dir: fresh_output_dir(),
            xacro_command: "xacro".to_string(),
            robot_model: DEFAULT_ROBOT_MODEL.to_string(),
            joint_state: JointStatePublisherParams::default(),
        }
    }

    /// Resolve everything the descriptors reference on disk
    ///
    /// Fails fast: a missing package or malformed file aborts before any
    /// descriptor is built, so the caller never sees a partial description.
    pub fn resolve(&self) -> Result<ResolvedInputs, LaunchError> {
        self.joint_state.validate()?;

        // Robot model: locate the xacro source and expand it to URDF
        let rover_config_share = self.index.share_dir("rover_config")?;
        let xacro_model_path = rover_config_share.join("urdf").join(&self.robot_model);
        let converter =
            XacroConverter::new(&self.output_dir).with_command(&self.xacro_command);
        let urdf_model_path = converter.convert(&xacro_model_path)?;

        // Per-node parameter files from the workspace source tree
        let gamepad_parser_config = self
            .index
            .source_dir("gamepad_parser")?
            .join("config")
            .join("gamepad_parser.yaml");
        let locomotion_manager_config = self
            .index
            .source_dir("locomotion_manager")?
            .join("config")
            .join("locomotion_manager.yaml");
        let rover_poses_config = self
            .index
            .source_dir("simple_rover_locomotion")?
            .join("config")
            .join("exoter_poses.yaml");
        let stop_mode_config = self
            .index
            .source_dir("locomotion_mode")?
            .join("config")
            .join("stop_mode.yaml");

        // Nest every file's keys under the runtime namespace
        let ns = &self.namespace;
        let gamepad_parser_params = push_namespace(ns, &gamepad_parser_config, &self.output_dir)?;
        let locomotion_manager_params =
            push_namespace(ns, &locomotion_manager_config, &self.output_dir)?;
        let rover_poses_params = push_namespace(ns, &rover_poses_config, &self.output_dir)?;
        let stop_mode_params = push_namespace(ns, &stop_mode_config, &self.output_dir)?;

        log::info!(
            "Resolved simulation inputs for namespace '{}' into '{}'",
            ns,
            self.output_dir.display()
        );

        Ok(ResolvedInputs {
            urdf_model_path,
            gamepad_parser_params,
            locomotion_manager_params,
            rover_poses_params,
            stop_mode_params,
        })
    }
}

/// Fresh per-invocation directory for generated files
fn fresh_output_dir() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    std::env::temp_dir().join(format!("exoter_launch_{}_{}", stamp, std::process::id()))
}

/// Paths produced by the side-effectful resolution phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInputs {
    /// Expanded robot description
    pub urdf_model_path: PathBuf,
    /// Namespaced gamepad parser parameters
    pub gamepad_parser_params: PathBuf,
    /// Namespaced locomotion manager parameters
    pub locomotion_manager_params: PathBuf,
    /// Namespaced rover pose table
    pub rover_poses_params: PathBuf,
    /// Namespaced stop mode parameters
    pub stop_mode_params: PathBuf,
}

/// Ordered, static collection of process descriptors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchDescription {
    pub nodes: Vec<NodeDescriptor>,
}

impl LaunchDescription {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Serialize the description as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Serialize the description as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Build the eight process descriptors of the teleoperation pipeline
///
/// Pure assembly: combines static identifiers with the resolved paths.
/// Order is fixed; the host framework owns start order and supervision.
pub fn build_description(config: &SimulationConfig, inputs: &ResolvedInputs) -> LaunchDescription {
    let ns = &config.namespace;

    let mut urdf_params = ParamMap::new();
    urdf_params.insert(
        "urdf_model_path".to_string(),
        inputs.urdf_model_path.as_path().into(),
    );

    let joint_state_params = config.joint_state.to_inline(
        &inputs.urdf_model_path,
        vec![format!("/{ns}/joint_states_sim")],
    );

    let nodes = vec![
        NodeDescriptor::builder("robot_state_publisher", "robot_state_publisher")
            .with_namespace(ns)
            .with_name("robot_state_publisher_node")
            .with_remapping("/joint_states", format!("/{ns}/joint_states"))
            .with_argument(inputs.urdf_model_path.display().to_string())
            .with_emulated_tty()
            .build(),
        NodeDescriptor::builder("joint_state_publisher", "joint_state_publisher")
            .with_namespace(ns)
            .with_name("joint_state_publisher_node")
            .with_remapping("/robot_description", format!("/{ns}/robot_description"))
            .with_output(OutputMode::Screen)
            .with_inline_parameters(joint_state_params)
            .build(),
        NodeDescriptor::builder("joy", "joy_node")
            .with_namespace(ns)
            .with_name("joy_node")
            .with_remapping("joy", "gamepad")
            .with_output(OutputMode::Screen)
            .with_emulated_tty()
            .build(),
        NodeDescriptor::builder("gamepad_parser", "gamepad_parser_node")
            .with_namespace(ns)
            .with_name("gamepad_parser_node")
            .with_output(OutputMode::Screen)
            .with_parameter_file(&inputs.gamepad_parser_params)
            .with_emulated_tty()
            .build(),
        NodeDescriptor::builder("locomotion_manager", "locomotion_manager_node")
            .with_namespace(ns)
            .with_name("locomotion_manager_node")
            .with_output(OutputMode::Screen)
            .with_parameter_file(&inputs.locomotion_manager_params)
            .with_emulated_tty()
            .build(),
        NodeDescriptor::builder("simple_rover_locomotion", "simple_rover_locomotion_node")
            .with_namespace(ns)
            .with_name("simple_rover_locomotion_node")
            .with_output(OutputMode::Screen)
            .with_emulated_tty()
            .with_inline_parameters(urdf_params.clone())
            .with_parameter_file(&inputs.rover_poses_params)
            .build(),
        NodeDescriptor::builder("locomotion_mode", "stop_mode_node")
            .with_namespace(ns)
            .with_name("stop_mode_node")
            .with_output(OutputMode::Screen)
            .with_emulated_tty()
            .with_inline_parameters(urdf_params)
            .with_parameter_file(&inputs.stop_mode_params)
            .build(),
        NodeDescriptor::builder("simple_joint_simulation", "simple_joint_simulation_node")
            .with_namespace(ns)
            .with_name("simple_joint_simulation_node")
            .with_output(OutputMode::Screen)
            .with_emulated_tty()
            .build(),
    ];

    LaunchDescription { nodes }
}

/// Errors from the resolution phase, aggregated for the caller
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Package lookup failed: {0}")]
    Index(#[from] IndexError),

    #[error("URDF conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Parameter file error: {0}")]
    Namespace(#[from] NamespaceError),

    #[error("Invalid parameters: {0}")]
    Params(#[from] ParamError),
}

impl std::fmt::Display for LaunchDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Launch Description")?;
        writeln!(f, "==================")?;

        for (i, node) in self.nodes.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "  {}. {} ({}/{})", i + 1, node.name, node.package, node.executable)?;

            if !node.namespace.is_empty() {
                writeln!(f, "     Namespace: /{}", node.namespace)?;
            }

            for remap in &node.remappings {
                writeln!(f, "     Remap: {} -> {}", remap.from, remap.to)?;
            }

            for source in &node.parameters {
                writeln!(f, "     Parameters: {}", source.summary())?;
            }

            if !node.arguments.is_empty() {
                writeln!(f, "     Arguments: {}", node.arguments.join(" "))?;
            }

            if node.output == OutputMode::Screen {
                writeln!(f, "     Output: screen")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParamValue;
    use crate::description::node::ParameterSource;
    use crate::test_support::fixture_dir;
    use std::path::Path;

    fn fake_inputs(root: &Path) -> ResolvedInputs {
        ResolvedInputs {
            urdf_model_path: root.join("exoter.urdf"),
            gamepad_parser_params: root.join("gamepad_parser.exoter.yaml"),
            locomotion_manager_params: root.join("locomotion_manager.exoter.yaml"),
            rover_poses_params: root.join("exoter_poses.exoter.yaml"),
            stop_mode_params: root.join("stop_mode.exoter.yaml"),
        }
    }

    fn test_config() -> SimulationConfig {
        SimulationConfig::new(PackageIndex::new("/nonexistent/ws/src"))
    }

    #[test]
    fn test_description_has_eight_nodes_in_pipeline_order() {
        let config = test_config();
        let description = build_description(&config, &fake_inputs(Path::new("/tmp/gen")));

        assert_eq!(description.len(), 8);
        let executables: Vec<_> = description
            .nodes
            .iter()
            .map(|n| n.executable.as_str())
            .collect();
        assert_eq!(
            executables,
            vec![
                "robot_state_publisher",
                "joint_state_publisher",
                "joy_node",
                "gamepad_parser_node",
                "locomotion_manager_node",
                "simple_rover_locomotion_node",
                "stop_mode_node",
                "simple_joint_simulation_node",
            ]
        );
    }

    #[test]
    fn test_every_node_runs_under_the_namespace() {
        let config = test_config();
        let description = build_description(&config, &fake_inputs(Path::new("/tmp/gen")));

        for node in &description.nodes {
            assert_eq!(node.namespace, "exoter", "node {}", node.name);
        }
    }

    #[test]
    fn test_namespace_flows_into_topics_and_source_list() {
        let mut config = test_config();
        config.namespace = "marta".to_string();
        let description = build_description(&config, &fake_inputs(Path::new("/tmp/gen")));

        let state_publisher = &description.nodes[0];
        assert_eq!(state_publisher.remappings[0].from, "/joint_states");
        assert_eq!(state_publisher.remappings[0].to, "/marta/joint_states");

        let joint_state = &description.nodes[1];
        let ParameterSource::Inline(params) = &joint_state.parameters[0] else {
            panic!("joint_state_publisher should carry inline parameters");
        };
        assert_eq!(
            params["source_list"],
            ParamValue::StringList(vec!["/marta/joint_states_sim".to_string()])
        );
    }

    #[test]
    fn test_mode_nodes_combine_inline_urdf_and_config_file() {
        let config = test_config();
        let inputs = fake_inputs(Path::new("/tmp/gen"));
        let description = build_description(&config, &inputs);

        for node in [&description.nodes[5], &description.nodes[6]] {
            assert_eq!(node.parameters.len(), 2, "node {}", node.name);
            let ParameterSource::Inline(params) = &node.parameters[0] else {
                panic!("first parameter source should be the inline URDF path");
            };
            assert_eq!(
                params["urdf_model_path"],
                ParamValue::from(inputs.urdf_model_path.as_path())
            );
            assert!(node.parameters[1].as_file().is_some());
        }
    }

    #[test]
    fn test_state_publisher_gets_urdf_as_positional_argument() {
        let config = test_config();
        let inputs = fake_inputs(Path::new("/tmp/gen"));
        let description = build_description(&config, &inputs);

        assert_eq!(
            description.nodes[0].arguments,
            vec![inputs.urdf_model_path.display().to_string()]
        );
    }

    #[test]
    fn test_missing_package_aborts_before_any_descriptor() {
        let ws = fixture_dir("sim_missing_pkg");
        let out = ws.join("generated");
        let mut config = SimulationConfig::new(PackageIndex::new(&ws));
        config.output_dir = out.clone();

        let result = config.resolve();
        assert!(matches!(result, Err(LaunchError::Index(_))));
        // Fail-fast: nothing was generated
        assert!(!out.exists());
    }

    #[test]
    fn test_rate_validation_happens_before_resolution() {
        let ws = fixture_dir("sim_bad_rate");
        let mut config = SimulationConfig::new(PackageIndex::new(&ws));
        config.joint_state.rate_hz = 0;

        assert!(matches!(config.resolve(), Err(LaunchError::Params(_))));
    }

    /// Full fixture: fake workspace, install prefix, and a pass-through
    /// expansion tool standing in for xacro.
    #[cfg(unix)]
    fn fixture_workspace() -> (PackageIndex, std::path::PathBuf) {
        let root = fixture_dir("sim_full");
        let ws = root.join("src");
        let prefix = root.join("install");

        for (package, config_file) in [
            ("gamepad_parser", "gamepad_parser.yaml"),
            ("locomotion_manager", "locomotion_manager.yaml"),
            ("simple_rover_locomotion", "exoter_poses.yaml"),
            ("locomotion_mode", "stop_mode.yaml"),
        ] {
            let dir = ws.join(package).join("config");
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(ws.join(package).join("package.xml"), "<package/>").unwrap();
            std::fs::write(dir.join(config_file), "rate: 10\n").unwrap();
        }

        let urdf_dir = prefix.join("share").join("rover_config").join("urdf");
        std::fs::create_dir_all(&urdf_dir).unwrap();
        std::fs::write(urdf_dir.join("exoter.xacro"), "<robot name=\"exoter\"/>").unwrap();

        (PackageIndex::new(&ws).with_prefix(&prefix), root)
    }

    #[cfg(unix)]
    #[test]
    fn test_resolution_is_deterministic_up_to_generated_paths() {
        let (index, root) = fixture_workspace();

        let mut first_config = SimulationConfig::new(index.clone());
        first_config.output_dir = root.join("gen_a");
        first_config.xacro_command = "cat".to_string();

        let mut second_config = SimulationConfig::new(index);
        second_config.output_dir = root.join("gen_b");
        second_config.xacro_command = "cat".to_string();

        let first = build_description(&first_config, &first_config.resolve().unwrap());
        let second = build_description(&second_config, &second_config.resolve().unwrap());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.nodes.iter().zip(&second.nodes) {
            assert_eq!(a.package, b.package);
            assert_eq!(a.namespace, b.namespace);
            assert_eq!(a.executable, b.executable);
            assert_eq!(a.name, b.name);
            assert_eq!(a.remappings, b.remappings);
            assert_eq!(a.output, b.output);
            assert_eq!(a.emulate_tty, b.emulate_tty);
            // Generated file paths differ only in their directory
            assert_eq!(a.parameters.len(), b.parameters.len());
            for (pa, pb) in a.parameters.iter().zip(&b.parameters) {
                match (pa, pb) {
                    (ParameterSource::File(fa), ParameterSource::File(fb)) => {
                        assert_eq!(fa.file_name(), fb.file_name());
                    }
                    (ParameterSource::Inline(ma), ParameterSource::Inline(mb)) => {
                        let keys_a: Vec<_> = ma.keys().collect();
                        let keys_b: Vec<_> = mb.keys().collect();
                        assert_eq!(keys_a, keys_b);
                    }
                    other => panic!("parameter source kind mismatch: {:?}", other),
                }
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_resolved_config_files_are_namespaced_copies() {
        let (index, root) = fixture_workspace();
        let mut config = SimulationConfig::new(index);
        config.output_dir = root.join("gen_ns");
        config.xacro_command = "cat".to_string();

        let inputs = config.resolve().unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(
            &std::fs::read_to_string(&inputs.stop_mode_params).unwrap(),
        )
        .unwrap();
        assert_eq!(doc["exoter"]["rate"], serde_yaml::Value::from(10));
    }

    #[test]
    fn test_description_serializes_and_round_trips() {
        let config = test_config();
        let description = build_description(&config, &fake_inputs(Path::new("/tmp/gen")));

        let yaml = description.to_yaml().unwrap();
        let back: LaunchDescription = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, description);

        // JSON dump stays available for non-YAML consumers
        assert!(description.to_json().unwrap().contains("robot_state_publisher"));
    }
}
