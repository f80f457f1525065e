use clap::Parser;
use tracing::{debug, info};

use cgraph_server::{cli::Args, config::ServerConfig};

fn main() {
	let args = Args::parse();

	if !args.config.exists() {
		println!("Generating default config at {}", args.config.display());
		ServerConfig::create_default_config(&args.config).unwrap_or_else(|err| {
			eprintln!("Could not write default config: {err}");
			std::process::exit(1);
		});
	}

	let config = ServerConfig::load_from_file(&args.config).unwrap_or_else(|err| {
		eprintln!("Could not load config from {}: {err}", args.config.display());
		std::process::exit(1);
	});

	tracing_subscriber::fmt()
		.with_env_filter(config.logging.to_env_filter())
		.without_time()
		.with_ansi(true)
		.init();

	debug!(config_path = %args.config.display(), "loaded config");

	let addr = args.addr.unwrap_or(config.network.addr);
	let threads = args.threads.unwrap_or(config.workers.threads);

	info!("starting cgraphd");
	if let Err(err) = cgraph_server::run(&addr, threads) {
		eprintln!("cgraphd exited with error: {err}");
		std::process::exit(1);
	}
}
