//! Process-level helpers shared by the Rust API and the Python bindings.

use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::sync::Once;

use crate::error::CpsError;

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Info` level, once per process.
///
/// Records go to stderr, or are appended to `log_file` when one is given.
/// Later calls are no-ops, even with a different file.
pub fn enable_verbose_logging(log_file: Option<&str>) -> Result<(), CpsError> {
    let target: Option<File> = match log_file {
        Some(path) if !INIT_LOGGER.is_completed() => {
            Some(OpenOptions::new().append(true).create(true).open(path)?)
        }
        _ => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        install(builder);
    });
    Ok(())
}

/// Installs `builder` as the global logger. Returns `false` and reports through
/// the already-active logger when the host installed one first.
fn install(mut builder: env_logger::Builder) -> bool {
    match builder.try_init() {
        Ok(()) => true,
        Err(err) => {
            log::warn!("cps verbose logging not installed, a logger is already active: {}", err);
            false
        }
    }
}
