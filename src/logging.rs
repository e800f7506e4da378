/// `log` backend that writes to the browser console.
///
/// Off wasm (native tests, tooling) records go to stderr instead.

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
        let line = format!("[{}] {}: {}", record.level(), record.target(), record.args());
        emit(record.level(), &line);
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let v = JsValue::from_str(line);
    match level {
        Level::Error => console::error_1(&v),
        Level::Warn => console::warn_1(&v),
        Level::Info => console::info_1(&v),
        Level::Debug | Level::Trace => console::debug_1(&v),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

/// Install the console logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    // a logger is already installed when this fails
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
