//! Structured events emitted while loading LUTs.
//!
//! The parser never logs directly; it reports what it noticed to a
//! [`LutEventSink`]. [`TracingSink`] forwards events to `tracing`, which is
//! what the `read_*`/`parse_cube` convenience functions use. Tests and
//! embedders can pass their own sink to [`parse_cube_with`](crate::parse_cube_with).

use crate::Domain;

/// Something worth reporting about a LUT being loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum LutEvent {
    /// A table was parsed successfully.
    Loaded {
        /// Lattice size.
        size: usize,
        /// Declared title, if any.
        title: Option<String>,
    },
    /// The LUT declares a domain other than the unit cube.
    NonDefaultDomain(Domain),
    /// Load-time clipping changed stored values.
    Clipped {
        /// Number of components that were clamped.
        components: usize,
    },
}

/// Receiver for [`LutEvent`]s.
pub trait LutEventSink {
    /// Handles one event.
    fn event(&self, event: &LutEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LutEventSink for NullSink {
    fn event(&self, _event: &LutEvent) {}
}

/// Sink that forwards events to `tracing`.
///
/// `NonDefaultDomain` and `Clipped` are warnings; `Loaded` is debug.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    source: Option<String>,
}

impl TracingSink {
    /// Creates a sink that tags each event with the file it came from.
    pub fn for_source(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
        }
    }
}

impl LutEventSink for TracingSink {
    fn event(&self, event: &LutEvent) {
        let source = self.source.as_deref().unwrap_or("<memory>");
        match event {
            LutEvent::Loaded { size, title } => {
                tracing::debug!(source, size, title = title.as_deref().unwrap_or(""), "LUT loaded");
            }
            LutEvent::NonDefaultDomain(domain) => {
                tracing::warn!(
                    source,
                    min = ?domain.min,
                    max = ?domain.max,
                    "nonstandard domain for LUT, output may be wrong"
                );
            }
            LutEvent::Clipped { components } => {
                tracing::warn!(source, components, "LUT values clipped to domain");
            }
        }
    }
}

impl<F: Fn(&LutEvent)> LutEventSink for F {
    fn event(&self, event: &LutEvent) {
        self(event)
    }
}
