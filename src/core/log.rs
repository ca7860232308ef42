//! Diagnostics go to stderr so stdout only carries conversion output.

use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

const APP_TARGET: &str = "fxconv";

/// Directives used when `RUST_LOG` is unset or unparseable. Verbose mode
/// keeps the HTTP stack quiet so provider retries stay readable.
fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{APP_TARGET}=debug,reqwest=warn,hyper_util=warn")
    } else {
        "off".to_string()
    }
}

fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. Logging stays off unless `verbose` is set
/// or `RUST_LOG` asks for it.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(build_filter(verbose, rust_log.as_deref()))
        .init();
}
