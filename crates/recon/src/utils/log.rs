use crate::Result;
use std::io;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Terminal logs go to stderr, stdout carries the results. With `log_dir`
/// the same events also land in `<log_dir>/<run_id>.log`. Verbosity comes
/// from `RUST_LOG`.
pub fn init_tracing_subscriber(log_dir: Option<&Path>, run_id: &str) -> Result<()> {
    tracing::subscriber::set_global_default(run_subscriber(log_dir, run_id))?;
    Ok(())
}

fn run_subscriber(
    log_dir: Option<&Path>,
    run_id: &str,
) -> impl Subscriber + Send + Sync + 'static {
    let stderr_layer = fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(io::stderr);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::NEVER, dir, format!("{run_id}.log"));
        fmt::layer()
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .with_target(false)
            .with_writer(appender)
    });

    Registry::default()
        .with(EnvFilter::from_default_env())
        .with(stderr_layer)
        .with(file_layer)
}
