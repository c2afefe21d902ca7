//! Record tracing events in memory.
//!
//! Install the [`CaptureLayer`] returned by [`capture`] in a subscriber and
//! inspect what was logged through the paired [`Captured`] handle:
//!
//! ```
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let (layer, captured) = logging::capture::capture();
//! let subscriber = tracing_subscriber::registry().with(layer);
//! tracing::subscriber::with_default(subscriber, || tracing::warn!(id = 7, "odd"));
//! assert!(captured.contains("odd"));
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use crate::fmt::{self, RenderedLog};

/// Shared event buffer.
type Buffer = Arc<Mutex<Vec<RenderedLog>>>;

/// Tracing layer that appends every event to a shared buffer.
#[derive(Debug, Clone)]
pub struct CaptureLayer {
    /// Destination buffer.
    buf: Buffer,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let r = fmt::render_event(event);
        self.buf.lock().push(r);
    }
}

/// Read side of a capture buffer.
#[derive(Debug, Clone, Default)]
pub struct Captured {
    /// Source buffer.
    buf: Buffer,
}

impl Captured {
    /// All captured events, oldest first.
    pub fn events(&self) -> Vec<RenderedLog> {
        self.buf.lock().clone()
    }

    /// Captured events as logfmt lines.
    pub fn lines(&self) -> Vec<String> {
        self.buf.lock().iter().map(RenderedLog::line).collect()
    }

    /// Captured events at exactly `level`.
    pub fn at_level(&self, level: Level) -> Vec<RenderedLog> {
        let want = level.to_string();
        self.buf
            .lock()
            .iter()
            .filter(|r| r.level == want)
            .cloned()
            .collect()
    }

    /// Whether any captured line contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.buf.lock().iter().any(|r| r.line().contains(needle))
    }

    /// Drop everything captured so far.
    pub fn clear(&self) {
        self.buf.lock().clear();
    }
}

/// Create a capture layer and its paired reader.
pub fn capture() -> (CaptureLayer, Captured) {
    let buf = Buffer::default();
    (CaptureLayer { buf: buf.clone() }, Captured { buf })
}
