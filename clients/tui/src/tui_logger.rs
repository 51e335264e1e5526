use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::{Arc, Mutex};

const LOG_CAPACITY: usize = 100;

/// Routes `log` records into a shared buffer the table drains into its log panel.
pub struct TuiLogger {
    level: LevelFilter,
    log_buffer: Arc<Mutex<Vec<String>>>,
}

impl TuiLogger {
    pub fn new(level: LevelFilter) -> (Self, Arc<Mutex<Vec<String>>>) {
        let log_buffer = Arc::new(Mutex::new(Vec::new()));
        (
            TuiLogger {
                level,
                log_buffer: log_buffer.clone(),
            },
            log_buffer,
        )
    }
}

impl Log for TuiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = match record.level() {
            Level::Error | Level::Warn => format!("{}: {}", record.level(), record.args()),
            _ => format!("{}", record.args()),
        };
        if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.push(msg);
            if buffer.len() > LOG_CAPACITY {
                buffer.remove(0);
            }
        }
    }

    fn flush(&self) {}
}
