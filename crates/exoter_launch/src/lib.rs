//! ExoTeR Launch
//!
//! Launch-description assembly for a simulated rover's teleoperation
//! pipeline: gamepad input feeds locomotion mode arbitration, which drives
//! the joint simulation, whose state is published for visualization.
//!
//! # Overview
//!
//! The crate produces a static, ordered list of process descriptors:
//! - Resolve package source and share directories ([`PackageIndex`])
//! - Expand the xacro robot model to URDF ([`XacroConverter`])
//! - Nest YAML parameter files under the runtime namespace
//!   ([`config::push_namespace`])
//! - Assemble the eight node descriptors ([`description::build_description`])
//!
//! Spawning, supervision, and shutdown of the described processes belong to
//! the host launch framework consuming the description; this crate only
//! declares intent.
//!
//! # Example
//!
//! ```no_run
//! use exoter_launch::{build_description, PackageIndex, SimulationConfig};
//!
//! let index = PackageIndex::discover("ws/src");
//! let config = SimulationConfig::new(index);
//! let inputs = config.resolve()?;
//! let description = build_description(&config, &inputs);
//! println!("{description}");
//! # Ok::<(), exoter_launch::LaunchError>(())
//! ```

pub mod cli;
pub mod config;
pub mod description;
pub mod index;
#[cfg(test)]
pub(crate) mod test_support;
pub mod urdf;

pub use cli::LaunchArgs;
pub use config::{JointStatePublisherParams, NamespaceError, ParamMap, ParamValue};
pub use description::{
    build_description, LaunchDescription, LaunchError, NodeDescriptor, OutputMode,
    ParameterSource, Remapping, ResolvedInputs, SimulationConfig,
};
pub use index::{IndexError, PackageIndex};
pub use urdf::{ConversionError, XacroConverter};
