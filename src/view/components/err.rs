//! Errors surfaced by the view layer
use std::fmt;

use crate::providers::SourceError;

/// Error shown on the browse screen's error list.
#[derive(Debug, Clone)]
pub struct ComponentError {
    component: String,
    code: String,
    message: String,
}

impl ComponentError {
    pub fn new(component: String, message: String, code: String) -> ComponentError {
        ComponentError {
            component,
            message,
            code,
        }
    }

    /// Wraps a source error under the name of the provider that raised it.
    pub fn from_source(component: &str, err: SourceError) -> ComponentError {
        ComponentError {
            component: component.to_owned(),
            code: err.code().to_owned(),
            message: err.message().to_owned(),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} error [{}]: {}",
            &self.component, &self.code, &self.message
        )
    }
}
