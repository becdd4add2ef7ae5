//! Command-line interface for exoter_launch

use argh::FromArgs;

/// Assemble the launch description for the ExoTeR rover simulation
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// path to the workspace source directory (default: src)
    #[argh(positional, default = "String::from(\"src\")")]
    pub workspace_src: String,

    /// namespace the rover nodes run under (default: exoter)
    #[argh(option, short = 'n', default = "String::from(\"exoter\")")]
    pub namespace: String,

    /// directory for generated files (default: fresh dir under the system temp dir)
    #[argh(option, short = 'o')]
    pub output_dir: Option<String>,

    /// additional install prefix searched for shared packages
    #[argh(option, short = 'p')]
    pub prefix: Vec<String>,

    /// command invoked for xacro expansion (default: xacro)
    #[argh(option, default = "String::from(\"xacro\")")]
    pub xacro: String,

    /// joint-state publication rate in Hz (default: 50)
    #[argh(option, default = "50")]
    pub rate: u32,

    /// write the assembled description as YAML to this path
    #[argh(option)]
    pub dump: Option<String>,

    /// emit the description as JSON on stdout instead of the plan
    #[argh(switch)]
    pub json: bool,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}
