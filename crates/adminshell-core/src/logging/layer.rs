//! Tracing layer that appends events to a daily JSONL file.

use std::fmt::Write as FmtWrite;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use super::entry::LogEntry;

/// File name prefix of the daily log files
pub const LOG_FILE_PREFIX: &str = "adminshell";

/// A tracing Layer that writes every event as one JSON line.
///
/// Files are named `adminshell-YYYY-MM-DD.jsonl` (local date) inside the
/// configured directory and opened in append mode.
pub struct JsonlLayer {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl JsonlLayer {
    /// Open (or create) today's log file under `logs_dir`.
    pub fn new(logs_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let logs_dir = logs_dir.as_ref();
        fs::create_dir_all(logs_dir)?;

        let date = chrono::Local::now().format("%Y-%m-%d");
        let path = logs_dir.join(format!("{}-{}.jsonl", LOG_FILE_PREFIX, date));

        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn log_path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entry: &LogEntry) -> std::io::Result<()> {
        let json = entry
            .to_json_line()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{}", json)?;
        writer.flush()
    }
}

impl<S> Layer<S> for JsonlLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = JsonVisitor::default();
        event.record(&mut visitor);

        let mut entry = LogEntry::new(
            metadata.level().as_str().to_lowercase(),
            metadata.target(),
            visitor.message.unwrap_or_default(),
        );

        if !visitor.fields.is_empty() {
            entry = entry.with_fields(serde_json::Value::Object(visitor.fields));
        }

        if let Some(scope) = ctx.event_scope(event) {
            let spans: Vec<&str> = scope.from_root().map(|span| span.name()).collect();
            if !spans.is_empty() {
                entry = entry.with_span(spans.join(" > "));
            }
        }

        // A logging failure must not take the caller down
        let _ = self.write(&entry);
    }
}

/// Collects the message and structured fields of an event.
#[derive(Default)]
struct JsonVisitor {
    message: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl JsonVisitor {
    fn insert(&mut self, field: &Field, value: serde_json::Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let mut buf = String::new();
        let _ = write!(&mut buf, "{:?}", value);

        if field.name() == "message" {
            self.message = Some(buf);
        } else {
            self.insert(field, serde_json::Value::String(buf));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.insert(field, serde_json::Value::String(value.to_string()));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.insert(field, serde_json::Value::Number(n));
        }
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.insert(field, serde_json::Value::String(value.to_string()));
    }
}

/// Read back every parseable entry of a JSONL log file.
///
/// Malformed lines (e.g. a torn final write) are skipped.
pub fn read_entries(path: impl AsRef<Path>) -> std::io::Result<Vec<LogEntry>> {
    let file = File::open(path)?;
    let mut entries = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if let Ok(entry) = LogEntry::from_json_line(&line) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_jsonl_layer_captures_events() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path().join("logs")).unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Theme initialized");
            tracing::warn!(count = 3, "Skipped routes");
        });

        let entries = read_entries(&log_path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].msg, "Theme initialized");
        assert_eq!(entries[0].level, "info");
        assert_eq!(entries[1].fields.as_ref().unwrap()["count"], 3);
    }

    #[test]
    fn test_palette_fallback_is_logged() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path()).unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            crate::color::generate_color_gradations("not-a-color");
        });

        let entries = read_entries(&log_path).unwrap();
        let entry = entries.iter().find(|e| e.level == "error").unwrap();
        assert_eq!(entry.fields.as_ref().unwrap()["base_color"], "not-a-color");
    }

    #[test]
    fn test_spans_are_recorded() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path()).unwrap();
        let log_path = layer.log_path().to_path_buf();

        let subscriber = tracing_subscriber::registry().with(layer);
        tracing::subscriber::with_default(subscriber, || {
            let outer = tracing::info_span!("startup");
            let _guard = outer.enter();
            tracing::info!("inside");
        });

        let entries = read_entries(&log_path).unwrap();
        assert_eq!(entries[0].span.as_deref(), Some("startup"));
    }

    #[test]
    fn test_log_file_name() {
        let temp = TempDir::new().unwrap();
        let layer = JsonlLayer::new(temp.path()).unwrap();
        let name = layer.log_path().file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("adminshell-"));
        assert!(name.ends_with(".jsonl"));
    }
}
