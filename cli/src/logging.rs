use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber. Logs always go to stderr, since stdout carries the
/// rendered SQL; with `log_file` they are copied there as well.
pub(crate) fn init(log_file: Option<&Path>) -> io::Result<()> {
    match log_file {
        Some(path) => subscriber(io::stderr.and(open_log(path)?)).init(),
        None => subscriber(io::stderr).init(),
    }
    Ok(())
}

fn open_log(path: &Path) -> io::Result<Arc<File>> {
    File::create(path).map(Arc::new)
}

fn subscriber<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .finish()
}
