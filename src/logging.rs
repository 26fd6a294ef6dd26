/*!
 * Terminal logger.
 *
 * Every record goes to stderr with a local timestamp and a colour per level.
 * Stdout is left untouched so it can carry machine-readable output.
 */

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;

// @struct: Logger writing coloured lines to stderr
pub struct CustomLogger;

static LOGGER: CustomLogger = CustomLogger;

impl CustomLogger {
    // @initializes: Global logger; the level can be changed later with `set_level`
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger(&LOGGER)?;
        log::set_max_level(level);
        Ok(())
    }

    pub fn set_level(level: LevelFilter) {
        log::set_max_level(level);
    }

    // @returns: ANSI colour code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }

    fn format_line(record: &Record) -> String {
        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        format!(
            "\x1B[{}m{} {:<5} {}\x1B[0m",
            Self::color_for_level(record.level()),
            now,
            record.level(),
            record.args()
        )
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}", Self::format_line(record));
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
