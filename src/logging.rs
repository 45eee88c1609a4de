//! `log` backend for the browser console.
//!
//! | Level | WASM | Non-WASM |
//! |-------|------|----------|
//! | `Trace`, `Debug` | `console.debug` | `eprintln!` |
//! | `Info` | `console.info` | `eprintln!` |
//! | `Warn` | `console.warn` | `eprintln!` |
//! | `Error` | `console.error` | `eprintln!` |
//!
//! Call [`init`] once; later calls only adjust the level.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!("[{}] {}", record.target(), record.args());
        write(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn write(level: Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::info_1(&line),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn write(level: Level, line: &str) {
    eprintln!("[{level}] {line}");
}

/// Install the console logger at `level`.
pub fn init(level: LevelFilter) {
    // Another logger may already be installed by the host application.
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed, keeping it");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_init_twice_only_moves_level() {
        init(LevelFilter::Debug);
        init(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        assert!(!LOGGER.enabled(&Metadata::builder().level(Level::Info).build()));
        assert!(LOGGER.enabled(&Metadata::builder().level(Level::Error).build()));
    }
}
