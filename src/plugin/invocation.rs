use std::collections::HashMap;

use serde_json::{Map, Value};

/// Caller-supplied function parameters.
pub type Parameters = Map<String, Value>;

/// Transport-level metadata (auth, tracing). Informational only.
pub type Headers = HashMap<String, Vec<String>>;

/// A single request to produce a function result. Read-only to the function.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    pub parameters: Parameters,
    /// Hint: the columns the caller wants. `None` means all of them.
    pub columns: Option<Vec<String>>,
    pub headers: Headers,
}

impl Invocation {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            parameters,
            ..Self::default()
        }
    }

    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn columns(&self) -> Option<&[String]> {
        self.columns.as_deref()
    }
}
