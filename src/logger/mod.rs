//! Console log capture
//! A `log::Log` sink that stores records in a shared buffer so a console
//! front end can render them

use std::sync::{Arc, RwLock};

use time::OffsetDateTime;

/// One captured log record
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Position in the capture buffer, starting at 0
    pub idx: usize,
    pub text: String,
    pub level: log::Level,
    pub file: String,
    pub line: u32,
    pub module: String,
    pub target: String,
    pub timestamp: OffsetDateTime,
}

/// Handle to the capture buffer, shared between the logger and the front end
pub type SharedRecords = Arc<RwLock<Vec<LogRecord>>>;

/// In-memory log capture
pub struct ConsoleLogger {
    records: SharedRecords,
}

impl ConsoleLogger {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Clone the shared record buffer
    pub fn shared(&self) -> SharedRecords {
        self.records.clone()
    }

    /// Register this logger as the global `log` sink and return the shared
    /// record buffer. Fails if a global logger is already installed.
    pub fn install(
        self,
        level: log::LevelFilter,
    ) -> Result<SharedRecords, log::SetLoggerError> {
        let shared = self.shared();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(shared)
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        // A poisoned buffer means a panicking reader; drop the record rather
        // than propagate the panic out of the logging facade
        let Ok(mut records) = self.records.write() else {
            return;
        };
        let idx = records.len();
        records.push(LogRecord {
            idx,
            text: record.args().to_string(),
            level: record.level(),
            file: record.file().map(str::to_owned).unwrap_or_default(),
            line: record.line().unwrap_or_default(),
            module: record.module_path().map(str::to_owned).unwrap_or_default(),
            target: record.target().to_string(),
            timestamp: OffsetDateTime::now_local()
                .unwrap_or_else(|_| OffsetDateTime::now_utc()),
        });
    }

    fn flush(&self) {}
}

/// Install a process-wide capture exactly once and hand out its buffer.
/// The global logger cannot be replaced, so every test that asserts on
/// emitted records shares this one.
#[cfg(test)]
pub(crate) fn install_test_capture() -> SharedRecords {
    use std::sync::OnceLock;
    static CAPTURE: OnceLock<SharedRecords> = OnceLock::new();
    CAPTURE
        .get_or_init(|| {
            ConsoleLogger::new()
                .install(log::LevelFilter::Trace)
                .expect("no other global logger is installed in tests")
        })
        .clone()
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
