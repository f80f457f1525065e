use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments. Anything left unset here falls back to the
/// loaded config file, then to that field's built-in default.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
	/// Path to a config file. Created with defaults if it doesn't exist yet.
	#[arg(long, default_value = "./cgraphd.toml")]
	pub config: PathBuf,

	/// IP and port to bind to, overriding the config file.
	#[arg(long)]
	pub addr: Option<String>,

	/// Number of leader-follower worker threads, overriding the config file.
	#[arg(long)]
	pub threads: Option<usize>,
}
