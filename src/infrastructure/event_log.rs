use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

use crate::domain::{ChangeSource, GenomicInterval};

pub const EVENT_VIEWPORT_COMMITTED: &str = "viewport.committed";
pub const EVENT_VIEWPORT_SUPPRESSED: &str = "viewport.suppressed";
pub const EVENT_VIEWPORT_SCHEDULED: &str = "viewport.scheduled";
pub const EVENT_RESOLVER_FALLBACK: &str = "resolver.fallback";
pub const EVENT_RESOLVER_UNRESOLVED: &str = "resolver.unresolved";
pub const EVENT_CONTEXT_RESET: &str = "context.reset";

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub ts: u64,
    pub name: String,
    pub data: Value,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            ts: now_millis(),
            name: name.into(),
            data: Value::Object(Map::new()),
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Value::Object(data) = &mut self.data {
            data.insert(key.into(), value);
        }
        self
    }

    pub fn with_interval(self, interval: &GenomicInterval) -> Self {
        self.with_data("ref_name", Value::from(interval.ref_name.clone()))
            .with_data("start", Value::from(interval.start))
            .with_data("end", Value::from(interval.end))
    }

    pub fn with_source(self, source: ChangeSource) -> Self {
        self.with_data("source", Value::from(source.label()))
    }

    pub fn to_json_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("ts".to_string(), Value::from(self.ts));
        object.insert("event".to_string(), Value::from(self.name.clone()));
        object.insert("data".to_string(), self.data.clone());
        Value::Object(object)
    }
}

fn now_millis() -> u64 {
    let Ok(duration) = SystemTime::now().duration_since(UNIX_EPOCH) else {
        return 0;
    };
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub trait EventLogger: Send {
    fn log(&self, event: Event);
}

pub struct NullEventLogger;

impl EventLogger for NullEventLogger {
    fn log(&self, _event: Event) {}
}

pub struct FileEventLogger {
    writer: Mutex<BufWriter<File>>,
}

impl FileEventLogger {
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
        })
    }
}

impl EventLogger for FileEventLogger {
    fn log(&self, event: Event) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        let Ok(line) = serde_json::to_string(&event.to_json_value()) else {
            return;
        };

        if writer.write_all(line.as_bytes()).is_err() {
            return;
        }
        if writer.write_all(b"\n").is_err() {
            return;
        }
        let _ = writer.flush();
    }
}
