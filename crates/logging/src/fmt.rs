//! Render `tracing` events into concise logfmt strings.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};

/// Rendered fields extracted from a tracing Event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Severity level (e.g., INFO, WARN) for the event.
    pub level: String,
    /// Event target (typically the module path).
    pub target: String,
    /// Human-readable message, empty when the event has none.
    pub message: String,
    /// Remaining fields rendered as `key=value` pairs.
    pub fields: String,
}

impl RenderedLog {
    /// Full logfmt line: `level=.. target=.. msg=".." key=value ...`.
    pub fn line(&self) -> String {
        let mut out = format!("level={} target={}", self.level, self.target);
        if !self.message.is_empty() {
            let _ignored = write!(out, " msg={:?}", self.message);
        }
        if !self.fields.is_empty() {
            out.push(' ');
            out.push_str(&self.fields);
        }
        out
    }
}

/// Extract level, target, message and fields from a tracing Event.
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    struct MsgVisitor {
        /// Captured `message` field, if present.
        msg: Option<String>,
        /// Accumulated non-message fields rendered as `key=value`.
        fields: String,
    }
    impl MsgVisitor {
        fn sep(&mut self) {
            if !self.fields.is_empty() {
                self.fields.push(' ');
            }
        }
    }
    impl Visit for MsgVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "message" {
                self.msg = Some(value.to_string());
            } else {
                self.sep();
                let _ignored = write!(&mut self.fields, "{}={:?}", field.name(), value);
            }
        }
        fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
            if field.name() == "message" {
                self.msg = Some(format!("{:?}", value));
            } else {
                self.sep();
                let _ignored = write!(&mut self.fields, "{}={:?}", field.name(), value);
            }
        }
    }
    let meta: &Metadata<'_> = event.metadata();
    let mut vis = MsgVisitor {
        msg: None,
        fields: String::new(),
    };
    event.record(&mut vis);
    RenderedLog {
        level: meta.level().to_string(),
        target: meta.target().to_string(),
        message: vis.msg.unwrap_or_default(),
        fields: vis.fields,
    }
}
