//! ExoTeR launch CLI
//!
//! Usage:
//!   exoter_launch ws/src -p /opt/ros/foxy
//!   exoter_launch ws/src -n marta --rate 100
//!   exoter_launch ws/src --dump description.yaml

use exoter_launch::{build_description, LaunchArgs, PackageIndex, SimulationConfig};

fn main() {
    let args: LaunchArgs = argh::from_env();

    // Initialize logging
    let log_level = match args.log_level.to_lowercase().as_str() {
        "error" => "error",
        "warn" => "warn",
        "info" => "info",
        "debug" => "debug",
        "trace" => "trace",
        _ => "info",
    };
    let env = env_logger::Env::default().default_filter_or(log_level);
    env_logger::init_from_env(env);

    // Build the package index
    let mut index = PackageIndex::discover(&args.workspace_src);
    for prefix in &args.prefix {
        index = index.with_prefix(prefix);
    }

    // Assemble the simulation configuration
    let mut config = SimulationConfig::new(index);
    config.namespace = args.namespace.clone();
    config.xacro_command = args.xacro.clone();
    config.joint_state.rate_hz = args.rate;
    if let Some(ref output_dir) = args.output_dir {
        config.output_dir = output_dir.into();
    }

    // Resolve filesystem inputs, fail-fast on the first problem
    log::info!(
        "Assembling launch description for namespace '{}'",
        config.namespace
    );
    let inputs = match config.resolve() {
        Ok(inputs) => inputs,
        Err(e) => {
            log::error!("Failed to resolve launch inputs: {}", e);
            std::process::exit(1);
        }
    };

    let description = build_description(&config, &inputs);

    if args.json {
        match description.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                log::error!("Failed to serialize description: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("{}", description);
    }

    if let Some(ref dump_path) = args.dump {
        let yaml = match description.to_yaml() {
            Ok(yaml) => yaml,
            Err(e) => {
                log::error!("Failed to serialize description: {}", e);
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(dump_path, yaml) {
            log::error!("Failed to write '{}': {}", dump_path, e);
            std::process::exit(1);
        }
        log::info!("Wrote launch description to '{}'", dump_path);
    }
}
