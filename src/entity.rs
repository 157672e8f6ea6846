//! Host entity snapshot
//!
//! The engine never talks to the home-automation backend itself; the
//! host feeds it immutable snapshots of the cover entity's state,
//! reported position and capability bitmask.

use serde::Serialize;

use crate::config::CoverConfig;
use crate::constants::{feature, percent};

/// Typed view over the cover's capability bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportedFeatures(u16);

impl SupportedFeatures {
    /// Wrap the reported bitmask; a missing attribute means a basic
    /// cover without tilt support.
    pub fn from_bitmask(bits: Option<u32>) -> Self {
        match bits {
            Some(b) => Self((b & u32::from(feature::ALL)) as u16),
            None => Self(feature::NO_TILT),
        }
    }

    /// True when any of the given capability bits is present
    pub fn has(self, bits: u16) -> bool {
        self.0 & bits != 0
    }

    pub fn bits(self) -> u16 {
        self.0
    }
}

/// Raw state string reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RawState {
    Open,
    Closed,
    Opening,
    Closing,
    Unavailable,
    Unknown,
}

impl RawState {
    pub fn parse(state: Option<&str>) -> Self {
        match state {
            Some("open") => Self::Open,
            Some("closed") => Self::Closed,
            Some("opening") => Self::Opening,
            Some("closing") => Self::Closing,
            Some("unavailable") | None => Self::Unavailable,
            Some(_) => Self::Unknown,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unavailable | Self::Unknown)
    }
}

/// One observation of the cover entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoverSnapshot {
    pub state: RawState,
    /// Reported position in the backend's own percentage convention
    pub position: Option<u8>,
    pub features: SupportedFeatures,
}

impl CoverSnapshot {
    pub fn new(state: Option<&str>, position: Option<u8>, feature_bits: Option<u32>) -> Self {
        Self {
            state: RawState::parse(state),
            position,
            features: SupportedFeatures::from_bitmask(feature_bits),
        }
    }

    /// Snapshot for an entity the backend does not know about
    pub fn missing() -> Self {
        Self {
            state: RawState::Unavailable,
            position: None,
            features: SupportedFeatures::from_bitmask(None),
        }
    }

    /// Current position in canonical percent (100 = fully open)
    ///
    /// Covers without positioning support are mapped onto the binary
    /// endpoints from their reported state.
    pub fn current_position(&self, cfg: &CoverConfig) -> u8 {
        let position = if self.features.has(feature::SET_POSITION) {
            // backends transiently report positions above 100
            self.position.unwrap_or(0).min(percent::OPEN)
        } else if self.state == RawState::Open {
            percent::OPEN
        } else {
            percent::CLOSED
        };
        cfg.invert_pct(position)
    }
}
