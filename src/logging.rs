//! log facade setup- forwards kernel log records to whatever debug output the
//! platform registers at boot

use core::fmt::{self, Write};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use spin::Once;

/// where log output ends up
type DebugSink = fn(&str);

static SINK: Once<DebugSink> = Once::new();

struct Logger;

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut writer = SinkWriter;
            if let Some(path) = record.module_path() {
                let _ = writeln!(writer, "[{} - {}] {}", record.level(), path, record.args());
            } else {
                let _ = writeln!(writer, "[{}] {}", record.level(), record.args());
            }
        }
    }

    fn flush(&self) {}
}

struct SinkWriter;

impl fmt::Write for SinkWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(puts) = SINK.get() {
            puts(s);
        }
        Ok(())
    }
}

static LOGGER: Logger = Logger;

pub fn init(sink: DebugSink) -> Result<(), SetLoggerError> {
    SINK.call_once(|| sink);
    log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace))
}
