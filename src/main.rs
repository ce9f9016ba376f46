use std::path::{Path, PathBuf};

use anyhow::Result;
use log::{info, warn};
use rusty_model_viewer::{
	config::{ViewerConfig, DEFAULT_CONFIG_PATH},
	viewer,
};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "model_viewer")]
struct CliArgs {
	/// Model to open, overrides the config file
	model: Option<String>,
	/// Config file
	#[structopt(short = "c", long = "config", parse(from_os_str))]
	config: Option<PathBuf>,
	/// Output debug info
	#[structopt(short = "v", long = "verbose")]
	verbose: bool,
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
	match path {
		Some(path) => Ok(ViewerConfig::parse(path)?),
		None => {
			let path = Path::new(DEFAULT_CONFIG_PATH);
			if !path.exists() {
				warn!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
				return Ok(ViewerConfig::default());
			}
			Ok(ViewerConfig::parse(path)?)
		},
	}
}

fn main() -> Result<()> {
	let args = CliArgs::from_args();

	let level = if args.verbose { "debug" } else { "info" };
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

	let mut config = load_config(args.config.as_deref())?;
	if let Some(model) = args.model {
		config.model.path = model;
	}
	info!("Opening {}", config.model.path);

	viewer::run(config)
}
