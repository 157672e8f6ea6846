//! Resolution diagnostics
//!
//! Configuration problems are never fatal: the resolver records a
//! diagnostic, logs it, and carries on with the fallback value. The host
//! can surface the collected diagnostics in its card editor.

use serde::Serialize;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// One message produced while resolving an entity's configuration
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub entity: String,
    pub message: String,
}

/// Collects diagnostics per resolution pass
#[derive(Debug, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, entity: &str, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Info => info!(entity = %entity, "{message}"),
            Severity::Warning => warn!(entity = %entity, "{message}"),
            Severity::Error => error!(entity = %entity, "{message}"),
        }
        self.entries.push(Diagnostic {
            severity,
            entity: entity.to_string(),
            message,
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Diagnostics recorded for one entity
    pub fn for_entity<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.entries.iter().filter(move |d| d.entity == entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_collects_in_order() {
        let mut log = DiagnosticLog::new();
        log.push(Severity::Warning, "cover.kitchen", "first");
        log.push(Severity::Error, "cover.kitchen", "second");

        let entries = log.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].severity, Severity::Error);
    }

    #[test]
    fn test_for_entity_filters() {
        let mut log = DiagnosticLog::new();
        log.push(Severity::Warning, "cover.a", "one");
        log.push(Severity::Warning, "cover.b", "two");
        log.push(Severity::Info, "cover.a", "three");

        assert_eq!(log.for_entity("cover.a").count(), 2);
        assert_eq!(log.for_entity("cover.c").count(), 0);
    }
}
