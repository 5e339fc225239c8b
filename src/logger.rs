//! `log` backend printing through `esp-println`.

use log::{LevelFilter, Log, Metadata, Record};

/// Logger writing every record to the ESP32 console.
pub struct EspLogger;

static LOGGER: EspLogger = EspLogger;

impl Log for EspLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            esp_println::println!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install [`EspLogger`] as the global logger.
///
/// Does nothing if another logger is already installed.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
