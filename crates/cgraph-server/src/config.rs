//! This module contains the server's config defaults & deserializer.
//! A few notes:
//!
//! - All config fields that *can* have a default *should* have a default
//! - All config fields should be listed and documented in `default-config.toml`

use std::{
	error::Error,
	fmt::{self, Display},
	fs::File,
	io::Write,
	path::Path,
};

use serde::Deserialize;

/// Server configuration, loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
	/// Network settings
	#[serde(default)]
	pub network: NetworkConfig,

	/// Worker thread settings
	#[serde(default)]
	pub workers: WorkersConfig,

	/// Logging settings
	#[serde(default)]
	pub logging: LoggingConfig,
}

impl ServerConfig {
	const DEFAULT_CONFIG: &'static str = include_str!("../default-config.toml");

	/// Write the default config to the given path, overwriting if it already exists.
	pub fn create_default_config(path: &Path) -> Result<(), std::io::Error> {
		let mut file = File::create(path)?;
		file.write_all(Self::DEFAULT_CONFIG.as_bytes())?;
		Ok(())
	}

	/// Load a config from a file.
	pub fn load_from_file(config_path: &Path) -> Result<Self, Box<dyn Error>> {
		let config_string = std::fs::read_to_string(config_path)?;
		let config: Self = toml::from_str(&config_string)?;
		Ok(config)
	}
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			network: NetworkConfig::default(),
			workers: WorkersConfig::default(),
			logging: LoggingConfig::default(),
		}
	}
}

/// Network settings
#[derive(Debug, Deserialize)]
pub struct NetworkConfig {
	/// IP and port to bind to. Should look like `127.0.0.1:5555`.
	#[serde(default = "NetworkConfig::default_addr")]
	pub addr: String,
}

impl NetworkConfig {
	fn default_addr() -> String {
		"127.0.0.1:5555".to_string()
	}
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			addr: Self::default_addr(),
		}
	}
}

/// Worker thread settings
#[derive(Debug, Deserialize)]
pub struct WorkersConfig {
	/// How many leader-follower worker threads poll the listener and its
	/// connections. Each one may hold the leadership token at a time, so
	/// this also bounds how many sockets can be serviced concurrently.
	#[serde(default = "WorkersConfig::default_threads")]
	pub threads: usize,
}

impl WorkersConfig {
	fn default_threads() -> usize {
		std::thread::available_parallelism().map(|n| n.get()).unwrap_or(2).max(2)
	}
}

impl Default for WorkersConfig {
	fn default() -> Self {
		Self {
			threads: Self::default_threads(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub enum LogLevel {
	Trace,
	Debug,
	Info,
	Warn,
	Error,
}

impl Default for LogLevel {
	fn default() -> Self {
		Self::Info
	}
}

impl Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Trace => write!(f, "trace"),
			Self::Debug => write!(f, "debug"),
			Self::Info => write!(f, "info"),
			Self::Warn => write!(f, "warn"),
			Self::Error => write!(f, "error"),
		}
	}
}

/// Logging settings
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
	#[serde(default)]
	pub level: LogLevel,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self { level: LogLevel::default() }
	}
}

impl LoggingConfig {
	/// Convert this logging config to a tracing env filter.
	pub fn to_env_filter(&self) -> String {
		format!("cgraph_server={0},cgraph_pipeline={0},cgraph_queue={0},{0}", self.level)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Make sure the default config we ship with is valid
	#[test]
	fn default_config_is_valid() {
		let _x: ServerConfig = toml::from_str(ServerConfig::DEFAULT_CONFIG).unwrap();
	}
}
