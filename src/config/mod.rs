//! Configuration resolution
//!
//! Raw host configuration comes in as JSON-shaped maps; resolution merges
//! builtin defaults, the selected preset and per-entity overrides, then
//! builds the typed [`CoverConfig`] the rest of the engine consumes.

pub mod cover;
pub mod keys;
pub mod messages;
pub mod presets;
pub mod resolver;

pub use cover::{ClosingDirection, CoverConfig};
pub use messages::{Diagnostic, DiagnosticLog, Severity};
pub use resolver::RawConfig;
