use serde::{Deserialize, Serialize};


/// Render configuration.
///
/// Every field has a default, so options can be read from a partial
/// JSON or YAML document.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Fail with [ErrorKind::MissingParams](crate::ErrorKind::MissingParams)
    /// when a name cannot be resolved, instead of rendering nothing.
    pub strict_variables: bool,
    /// Fail when a partial cannot be found, instead of rendering nothing.
    pub strict_partials: bool,
    /// Limit on nested partial expansion. Unbounded when `None`.
    pub max_partial_depth: Option<usize>,
}

impl RenderOptions {
    pub fn strict() -> Self {
        RenderOptions {
            strict_variables: true,
            strict_partials: true,
            max_partial_depth: None
        }
    }

    pub fn with_max_partial_depth(mut self, depth: usize) -> Self {
        self.max_partial_depth = Some(depth);
        self
    }
}
