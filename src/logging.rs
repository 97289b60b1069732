use std::{env, fs::File, io, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::writer::BoxMakeWriter, layer::SubscriberExt,
    util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::err_file_open;

const DEFAULT_DIRECTIVES: &str = if cfg!(debug_assertions) {
    "warn,hashbench=debug,hashbench_cli=debug,"
} else {
    "warn,"
};

fn directives() -> String {
    String::from(DEFAULT_DIRECTIVES)
        + env::var("RUST_LOG")
            .or_else(|_| env::var("HASHBENCH_LOG"))
            .ok()
            .as_deref()
            .unwrap_or_default()
}

pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let (writer, ansi) = match log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| err_file_open!(path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_thread_names(true)
        .with_filter(EnvFilter::new(directives()));

    tracing_subscriber::registry()
        .with(layer)
        .with(ErrorLayer::default())
        .try_init()
        .context("failed to install the tracing subscriber")?;

    Ok(())
}
