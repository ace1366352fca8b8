//! Accumulated schema validation.

use crate::error::SchemaError;

/// Accumulates validation messages and converts them into a single
/// [`SchemaError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Consume the collector and return `Ok(())` if nothing was recorded.
    ///
    /// The `details` string joins all messages with `"; "`.
    pub(crate) fn finish(self) -> Result<(), SchemaError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Validation {
                count: self.errors.len(),
                details: self.errors.join("; "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collector_is_ok() {
        assert!(ValidationCollector::new().finish().is_ok());
    }

    #[test]
    fn messages_joined_in_order() {
        let mut c = ValidationCollector::new();
        c.push("first");
        c.push(String::from("second"));
        match c.finish().unwrap_err() {
            SchemaError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert_eq!(details, "first; second");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
