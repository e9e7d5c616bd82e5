//! Ring Logger
//!
//! A `tracing` layer that echoes every event to the browser console (stderr
//! off wasm) and keeps the most recent records in a bounded buffer the UI can
//! read back.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;
use tracing_subscriber::Layer;

/// Errors raised while installing the logger
#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(String),
}

/// One captured log line
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} [{}] {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Shared circular buffer of recent records
#[derive(Debug, Clone)]
pub struct LogBuffer {
    records: Arc<Mutex<VecDeque<LogRecord>>>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            records: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, evicting the oldest once full
    pub fn push(&self, record: LogRecord) {
        if let Ok(mut records) = self.records.lock() {
            if records.len() == self.capacity {
                records.pop_front();
            }
            records.push_back(record);
        }
    }

    /// Copy of the buffered records, oldest first
    pub fn snapshot(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Buffered records at or above `level` severity, oldest first
    pub fn at_least(&self, level: Level) -> Vec<LogRecord> {
        // tracing orders levels by verbosity: ERROR < WARN < INFO
        self.snapshot()
            .into_iter()
            .filter(|record| record.level <= level)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }
}

/// Layer feeding a [`LogBuffer`]
pub struct RingLayer {
    buffer: LogBuffer,
    echo: bool,
}

impl RingLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer, echo: true }
    }

    /// Disable console echo (tests)
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let record = LogRecord {
            timestamp: Utc::now(),
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.finish(),
        };
        if self.echo {
            echo(&record);
        }
        self.buffer.push(record);
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<String>,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn echo(record: &LogRecord) {
    let line = wasm_bindgen::JsValue::from_str(&record.to_string());
    match record.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(record: &LogRecord) {
    eprintln!("{}", record);
}

/// Install the ring layer as the global subscriber.
///
/// Returns the buffer so the caller can surface recent records.
pub fn init(capacity: usize, max_level: Level) -> Result<LogBuffer, LoggerError> {
    let buffer = LogBuffer::new(capacity);
    let layer = RingLayer::new(buffer.clone()).with_filter(LevelFilter::from_level(max_level));

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| LoggerError::AlreadyInstalled(e.to_string()))?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            level: Level::INFO,
            target: "test".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let buffer = LogBuffer::new(2);
        buffer.push(record("one"));
        buffer.push(record("two"));
        buffer.push(record("three"));

        let messages: Vec<_> = buffer.snapshot().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let buffer = LogBuffer::new(0);
        buffer.push(record("a"));
        buffer.push(record("b"));
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = LogBuffer::new(8);
        let subscriber = tracing_subscriber::registry().with(RingLayer::new(buffer.clone()).quiet());

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(path = "/vehicles", "serving cached data");
            tracing::info!("plain");
        });

        let records = buffer.snapshot();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, Level::WARN);
        assert_eq!(records[0].message, "serving cached data path=/vehicles");
        assert_eq!(records[1].message, "plain");
    }

    #[test]
    fn test_at_least_filters_by_severity() {
        let buffer = LogBuffer::new(8);
        let subscriber = tracing_subscriber::registry().with(RingLayer::new(buffer.clone()).quiet());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("info");
            tracing::warn!("warn");
            tracing::error!("error");
        });

        let serious: Vec<_> = buffer.at_least(Level::WARN).into_iter().map(|r| r.message).collect();
        assert_eq!(serious, vec!["warn", "error"]);

        buffer.clear();
        assert!(buffer.is_empty());
    }
}
