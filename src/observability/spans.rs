//! Request-scoped span trees.
//!
//! One resolution owns one root span plus a child span per lookup call — a
//! flat tree of depth two, matching the discovery-then-fanout dependency
//! structure. A handle is mutable only while live: [`SpanHandle::end`]
//! consumes it, so use-after-end is unrepresentable, and dropping an un-ended
//! handle finishes it, so every exit path closes the span.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

use uuid::Uuid;

/// Identifier shared by every span of one resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Identifier of a single span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanId(u64);

impl SpanId {
    fn generate() -> Self {
        Self(rand::random())
    }
}

impl fmt::Display for SpanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Timed annotation attached to a span.
#[derive(Debug, Clone)]
pub struct SpanEvent {
    pub message: String,
    /// Offset from span start.
    pub elapsed: Duration,
}

/// An ended span, handed to the exporter. Immutable from here on.
#[derive(Debug, Clone)]
pub struct SpanRecord {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub parent_span_id: Option<SpanId>,
    pub name: String,
    pub start_time: SystemTime,
    pub end_time: SystemTime,
    pub duration: Duration,
    pub attributes: HashMap<String, String>,
    pub events: Vec<SpanEvent>,
}

/// Where ended spans go.
pub trait SpanExporter: Send + Sync {
    fn export(&self, span: SpanRecord);
}

/// Emits ended spans as structured log events.
#[derive(Debug, Default)]
pub struct LogExporter;

impl SpanExporter for LogExporter {
    fn export(&self, span: SpanRecord) {
        tracing::debug!(
            target: "price_resolver::spans",
            trace_id = %span.trace_id,
            span_id = %span.span_id,
            parent_span_id = %span
                .parent_span_id
                .map(|id| id.to_string())
                .unwrap_or_default(),
            name = %span.name,
            duration_ms = span.duration.as_millis() as u64,
            events = span.events.len(),
            "span ended"
        );
    }
}

/// Collects ended spans in memory. Used by tests and diagnostics.
#[derive(Debug, Default)]
pub struct InMemoryExporter {
    spans: Mutex<Vec<SpanRecord>>,
}

impl InMemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ended spans in export order.
    pub fn finished(&self) -> Vec<SpanRecord> {
        self.spans.lock().unwrap().clone()
    }
}

impl SpanExporter for InMemoryExporter {
    fn export(&self, span: SpanRecord) {
        self.spans.lock().unwrap().push(span);
    }
}

/// Hands out root spans bound to an exporter.
#[derive(Clone)]
pub struct Tracer {
    exporter: Arc<dyn SpanExporter>,
}

impl Tracer {
    pub fn new(exporter: Arc<dyn SpanExporter>) -> Self {
        Self { exporter }
    }

    /// Start the root span for one resolution.
    pub fn root(&self, name: impl Into<String>) -> SpanHandle {
        SpanHandle::start(self.exporter.clone(), TraceId::generate(), None, name.into())
    }
}

/// A live span.
pub struct SpanHandle {
    exporter: Arc<dyn SpanExporter>,
    trace_id: TraceId,
    span_id: SpanId,
    parent_span_id: Option<SpanId>,
    name: String,
    start_time: SystemTime,
    started: Instant,
    attributes: HashMap<String, String>,
    events: Vec<SpanEvent>,
    ended: bool,
}

impl SpanHandle {
    fn start(
        exporter: Arc<dyn SpanExporter>,
        trace_id: TraceId,
        parent_span_id: Option<SpanId>,
        name: String,
    ) -> Self {
        Self {
            exporter,
            trace_id,
            span_id: SpanId::generate(),
            parent_span_id,
            name,
            start_time: SystemTime::now(),
            started: Instant::now(),
            attributes: HashMap::new(),
            events: Vec::new(),
            ended: false,
        }
    }

    /// Start a child span. Children parent on this span directly.
    pub fn child(&self, name: impl Into<String>) -> SpanHandle {
        SpanHandle::start(
            self.exporter.clone(),
            self.trace_id,
            Some(self.span_id),
            name.into(),
        )
    }

    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    pub fn span_id(&self) -> SpanId {
        self.span_id
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl ToString) {
        self.attributes.insert(key.into(), value.to_string());
    }

    /// Append an annotation, stamped with the offset from span start.
    pub fn add_event(&mut self, message: impl Into<String>) {
        self.events.push(SpanEvent {
            message: message.into(),
            elapsed: self.started.elapsed(),
        });
    }

    /// End the span and hand it to the exporter.
    pub fn end(mut self) {
        self.finish();
    }

    fn finish(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        // End time is derived from the monotonic clock, so a parent ended
        // after its children always carries the later end time.
        let duration = self.started.elapsed();
        let record = SpanRecord {
            trace_id: self.trace_id,
            span_id: self.span_id,
            parent_span_id: self.parent_span_id,
            name: std::mem::take(&mut self.name),
            start_time: self.start_time,
            end_time: self.start_time + duration,
            duration,
            attributes: std::mem::take(&mut self.attributes),
            events: std::mem::take(&mut self.events),
        };
        self.exporter.export(record);
    }
}

impl Drop for SpanHandle {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracer() -> (Tracer, Arc<InMemoryExporter>) {
        let exporter = Arc::new(InMemoryExporter::new());
        (Tracer::new(exporter.clone()), exporter)
    }

    #[test]
    fn child_spans_link_to_the_root() {
        let (tracer, exporter) = tracer();

        let root = tracer.root("resolve:apple");
        let first = root.child("vendor_discovery");
        let second = root.child("price_lookup");
        let root_id = root.span_id();
        let trace_id = root.trace_id();

        first.end();
        second.end();
        root.end();

        let finished = exporter.finished();
        assert_eq!(finished.len(), 3);
        assert!(finished.iter().all(|s| s.trace_id == trace_id));

        let root_record = finished.iter().find(|s| s.name == "resolve:apple").unwrap();
        assert_eq!(root_record.parent_span_id, None);
        for child in finished.iter().filter(|s| s.span_id != root_id) {
            assert_eq!(child.parent_span_id, Some(root_id));
        }
    }

    #[test]
    fn parent_ends_no_earlier_than_children() {
        let (tracer, exporter) = tracer();

        let root = tracer.root("resolve:grape");
        for _ in 0..3 {
            let child = root.child("price_lookup");
            child.end();
        }
        root.end();

        let finished = exporter.finished();
        let root_record = finished.iter().find(|s| s.parent_span_id.is_none()).unwrap();
        for child in finished.iter().filter(|s| s.parent_span_id.is_some()) {
            assert!(root_record.end_time >= child.end_time);
        }
    }

    #[test]
    fn dropping_an_unended_handle_exports_it_once() {
        let (tracer, exporter) = tracer();

        {
            let mut span = tracer.root("resolve:fish");
            span.add_event("early return");
            // Dropped without an explicit end().
        }

        let finished = exporter.finished();
        assert_eq!(finished.len(), 1);
        assert_eq!(finished[0].events.len(), 1);
        assert_eq!(finished[0].events[0].message, "early return");
    }

    #[test]
    fn attributes_and_events_are_captured_in_order() {
        let (tracer, exporter) = tracer();

        let mut span = tracer.root("resolve:potato");
        span.set_attribute("food", "potato");
        span.set_attribute("vendor_count", 2);
        span.add_event("first");
        span.add_event("second");
        span.end();

        let record = &exporter.finished()[0];
        assert_eq!(record.attributes.get("food").unwrap(), "potato");
        assert_eq!(record.attributes.get("vendor_count").unwrap(), "2");
        let messages: Vec<_> = record.events.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
        assert!(record.events[0].elapsed <= record.events[1].elapsed);
        assert!(record.end_time >= record.start_time);
    }
}
