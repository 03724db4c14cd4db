//! Tracer provider that exports spans to a local OTLP JSON file.
//!
//! The plugin sandbox has no network path to a collector, so finished spans are
//! written synchronously (simple processor, no batching thread) through
//! [`FileWriter`].

use super::file_writer::{FileWriter, RotationPolicy};
use super::span_formatter::SpanFormatter;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::{Config, TracerProvider};
use std::path::PathBuf;

/// Where the trace file lives and how it is named in the output.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub file_path: PathBuf,
    pub rotation: RotationPolicy,
    /// Instrumentation scope written with every batch.
    pub scope_name: String,
}

#[derive(Debug)]
struct FileSpanExporter {
    writer: FileWriter,
    formatter: SpanFormatter,
    shut_down: bool,
}

impl SpanExporter for FileSpanExporter {
    /// Writes the batch as one OTLP JSON line.
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.shut_down {
            Err(TraceError::from("file exporter already shut down"))
        } else {
            let line = self.formatter.format_batch(&batch).to_string();
            self.writer
                .write_line(&line)
                .map_err(|e| TraceError::from(format!("failed to write spans: {e}")))
        };
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}

/// Builds a provider whose spans end up in `target.file_path`.
pub fn create_tracer_provider(target: ExportTarget, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        writer: FileWriter::new(target.file_path, target.rotation),
        formatter: SpanFormatter::new(resource.clone(), target.scope_name),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Span as _, Tracer as _, TracerProvider as _};
    use opentelemetry::KeyValue;

    #[test]
    fn finished_span_lands_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("eventboard-otlp.json");
        let target = ExportTarget {
            file_path: file_path.clone(),
            rotation: RotationPolicy::default(),
            scope_name: "eventboard-test".to_string(),
        };
        let provider = create_tracer_provider(
            target,
            Resource::new(vec![KeyValue::new("service.name", "Eventboard")]),
        );

        let mut span = provider.tracer("eventboard-test").start("list_events");
        span.set_attribute(KeyValue::new("request_id", 7_i64));
        span.end();

        let contents = std::fs::read_to_string(&file_path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
        let scope = &doc["resourceSpans"][0]["scopeSpans"][0];
        assert_eq!(scope["scope"]["name"], "eventboard-test");
        assert_eq!(scope["spans"][0]["name"], "list_events");
        assert_eq!(scope["spans"][0]["attributes"][0]["value"]["intValue"], "7");
    }
}
