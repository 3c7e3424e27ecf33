//! Tracing setup for the CLI.
//!
//! Logs go to stderr so stdout stays clean for command output and `--json`.
//! `RUST_LOG` takes precedence over the built-in directives.

use tracing_subscriber::EnvFilter;

fn build_filter_directives(verbose: bool) -> Vec<&'static str> {
    if verbose {
        vec!["info", "dcloud_lib=debug", "dc_app=debug", "dc_infra=debug"]
    } else {
        vec!["warn", "dcloud_lib=info", "dc_app=info", "dc_infra=warn"]
    }
}

pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(verbose).join(",")));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize tracing: {err}"))
}
