//! Outbound command boundary
//!
//! The engine never talks to the backend directly; it hands typed
//! commands to a [`CommandSink`] supplied by the host. Capability
//! checking beyond what the engine already gates on is the sink's job.

use anyhow::Result;
use serde::Serialize;

/// A cover service call, position argument already in the backend's
/// percentage convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum CoverCommand {
    Open,
    Close,
    Stop,
    SetPosition { position: u8 },
    OpenTilt,
    CloseTilt,
}

impl CoverCommand {
    /// Backend service name
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::Open => "open_cover",
            Self::Close => "close_cover",
            Self::Stop => "stop_cover",
            Self::SetPosition { .. } => "set_cover_position",
            Self::OpenTilt => "open_cover_tilt",
            Self::CloseTilt => "close_cover_tilt",
        }
    }

    pub fn position_arg(&self) -> Option<u8> {
        match self {
            Self::SetPosition { position } => Some(*position),
            _ => None,
        }
    }

    /// Swap open and close; other commands are unaffected
    pub fn invert_open_close(self) -> Self {
        match self {
            Self::Open => Self::Close,
            Self::Close => Self::Open,
            other => other,
        }
    }
}

/// Host-side executor for cover commands
pub trait CommandSink {
    fn dispatch(&mut self, entity_id: &str, command: CoverCommand) -> Result<()>;
}

/// Sink that records every dispatched command
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<(String, CoverCommand)>,
}

#[cfg(test)]
impl CommandSink for RecordingSink {
    fn dispatch(&mut self, entity_id: &str, command: CoverCommand) -> Result<()> {
        self.sent.push((entity_id.to_string(), command));
        Ok(())
    }
}
