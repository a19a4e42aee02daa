//! devrun CLI
//!
//! Usage:
//!   devrun
//!   devrun stack.yaml
//!   devrun stack.yaml -l debug

use devrun::runtime::supervisor;
use devrun::{config, Manifest, RunArgs};

#[tokio::main]
async fn main() {
    let args: RunArgs = argh::from_env();

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

    log::info!("Loading manifest: {}", args.manifest);
    let manifest = match Manifest::from_file(&args.manifest) {
        Ok(m) => m,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Environment must be in place before any service task is launched so
    // every child inherits it.
    if let Err(e) = config::load_env(manifest.env_file.as_deref()) {
        log::error!("{}", e);
        std::process::exit(1);
    }

    log::info!("Supervising {} services", manifest.services.len());
    if let Err(e) = supervisor::supervise(manifest.services).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
