//! Command-line interface for devrun

use argh::FromArgs;

/// Readiness-gated multi-service runner for local development stacks
#[derive(FromArgs, Debug)]
pub struct RunArgs {
    /// path to the service manifest (default: dev.yaml)
    #[argh(positional, default = "String::from(\"dev.yaml\")")]
    pub manifest: String,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}
