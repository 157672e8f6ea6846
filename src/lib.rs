//! Shutter position engine
//!
//! The geometry, configuration and gesture core behind a shutter card:
//! it maps cover positions between canonical percentages and on-screen
//! pixels, resolves layered raw configuration into typed per-entity
//! settings, tracks drag gestures against an immutable anchor, derives
//! display state, and emits typed commands through a host-supplied
//! sink. Rendering, localization strings and backend transport stay on
//! the host side.

#![forbid(unsafe_code)]

pub mod config;
pub mod constants;
pub mod dispatch;
pub mod engine;
pub mod entity;
pub mod geometry;
pub mod gesture;
pub mod position;
pub mod state;
pub mod transform;
pub mod viewport;

pub use config::{ClosingDirection, CoverConfig, Diagnostic, DiagnosticLog, RawConfig, Severity};
pub use dispatch::{CommandSink, CoverCommand};
pub use engine::{ShutterEngine, TextKey};
pub use entity::{CoverSnapshot, RawState, SupportedFeatures};
pub use gesture::{DragUpdate, GestureTracker, PointerSample};
pub use position::PositionModel;
pub use state::{ShutterState, classify};
pub use transform::TransformOp;
pub use viewport::{ButtonPosition, Orientation, ViewportContext};
