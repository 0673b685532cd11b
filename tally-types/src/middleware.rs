use serde::{Deserialize, Serialize};

/// One store middleware layer: its name and a free-form JSON configuration snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareLayer {
    /// Layer name (e.g., "`CachingStore`").
    pub name: String,
    /// Opaque configuration blob; concrete layers document their schema.
    pub config: serde_json::Value,
}

impl MiddlewareLayer {
    /// Convenience constructor.
    #[must_use]
    pub fn new<N: Into<String>>(name: N, config: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Ordered description of the wrappers around a raw store.
///
/// Convention: `layers[0]` is the OUTERMOST layer; the raw store itself is not listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MiddlewareStack {
    /// Ordered list of layers, outermost first.
    pub layers: Vec<MiddlewareLayer>,
}

impl MiddlewareStack {
    /// Create an empty stack.
    #[must_use]
    pub const fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Push a layer at the outermost position.
    pub fn push_outer(&mut self, layer: MiddlewareLayer) {
        self.layers.insert(0, layer);
    }
}
