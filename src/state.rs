//! Derived shutter state
//!
//! Never stored: recomputed on demand from the raw device state and the
//! canonical position, with the configured inversions applied.

use serde::Serialize;

use crate::config::CoverConfig;
use crate::constants::percent;
use crate::entity::RawState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutterState {
    Open,
    Closed,
    Opening,
    Closing,
    PartialOpen,
    Unavailable,
}

impl ShutterState {
    /// Swap the open/close semantics; an involution
    pub fn invert_open_close(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
            Self::Opening => Self::Closing,
            Self::Closing => Self::Opening,
            other => other,
        }
    }
}

fn endpoint(domain_pct: u8, cfg: &CoverConfig) -> ShutterState {
    let state = if domain_pct == percent::OPEN {
        ShutterState::Open
    } else {
        ShutterState::Closed
    };
    if cfg.invert_open_close {
        state.invert_open_close()
    } else {
        state
    }
}

/// Classify the cover from its raw state and canonical position
pub fn classify(raw: RawState, domain_pct: u8, cfg: &CoverConfig) -> ShutterState {
    if !raw.is_known() {
        return ShutterState::Unavailable;
    }

    match raw {
        // a device still reporting motion after arriving at an endpoint
        // is stale; reclassify as the endpoint itself
        RawState::Opening if domain_pct == percent::OPEN => endpoint(domain_pct, cfg),
        RawState::Closing if domain_pct == percent::CLOSED => endpoint(domain_pct, cfg),

        RawState::Opening | RawState::Closing => {
            let mut state = if raw == RawState::Opening {
                ShutterState::Opening
            } else {
                ShutterState::Closing
            };
            if cfg.invert_open_close {
                state = state.invert_open_close();
            }
            // right/up run against the default travel convention
            if cfg.closing_direction.reversed() {
                state = state.invert_open_close();
            }
            state
        }

        _ if domain_pct != percent::OPEN && domain_pct != percent::CLOSED => {
            ShutterState::PartialOpen
        }
        _ => endpoint(domain_pct, cfg),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagnosticLog;
    use serde_json::json;

    fn cfg(entry: serde_json::Value) -> CoverConfig {
        let mut log = DiagnosticLog::new();
        CoverConfig::resolve(&entry, &mut log)
    }

    #[test]
    fn test_invert_open_close_is_involution() {
        let all = [
            ShutterState::Open,
            ShutterState::Closed,
            ShutterState::Opening,
            ShutterState::Closing,
            ShutterState::PartialOpen,
            ShutterState::Unavailable,
        ];
        for state in all {
            assert_eq!(state.invert_open_close().invert_open_close(), state);
        }
        assert_eq!(
            ShutterState::PartialOpen.invert_open_close(),
            ShutterState::PartialOpen
        );
    }

    #[test]
    fn test_resting_positions() {
        let cfg = cfg(json!({"entity": "cover.a"}));
        assert_eq!(classify(RawState::Open, 100, &cfg), ShutterState::Open);
        assert_eq!(classify(RawState::Closed, 0, &cfg), ShutterState::Closed);
        assert_eq!(classify(RawState::Open, 55, &cfg), ShutterState::PartialOpen);
    }

    #[test]
    fn test_unknown_states_are_unavailable() {
        let cfg = cfg(json!({"entity": "cover.a"}));
        assert_eq!(
            classify(RawState::Unavailable, 50, &cfg),
            ShutterState::Unavailable
        );
        assert_eq!(
            classify(RawState::Unknown, 100, &cfg),
            ShutterState::Unavailable
        );
    }

    #[test]
    fn test_stale_opening_at_full_open_reclassifies() {
        let cfg = cfg(json!({"entity": "cover.a"}));
        assert_eq!(classify(RawState::Opening, 100, &cfg), ShutterState::Open);
        assert_eq!(classify(RawState::Closing, 0, &cfg), ShutterState::Closed);
        // mid-travel motion is untouched
        assert_eq!(classify(RawState::Opening, 60, &cfg), ShutterState::Opening);
    }

    #[test]
    fn test_open_close_inversion() {
        let cfg = cfg(json!({"entity": "cover.a", "invert_open_close": true}));
        assert_eq!(classify(RawState::Open, 100, &cfg), ShutterState::Closed);
        assert_eq!(classify(RawState::Opening, 50, &cfg), ShutterState::Closing);
        assert_eq!(
            classify(RawState::Open, 50, &cfg),
            ShutterState::PartialOpen
        );
    }

    #[test]
    fn test_reversed_direction_swaps_motion() {
        let reversed = cfg(json!({"entity": "cover.a", "closing_direction": "right"}));
        assert_eq!(
            classify(RawState::Opening, 50, &reversed),
            ShutterState::Closing
        );

        // inversion and direction swap cancel out
        let both = cfg(json!({
            "entity": "cover.a",
            "closing_direction": "up",
            "invert_open_close": true,
        }));
        assert_eq!(classify(RawState::Opening, 50, &both), ShutterState::Opening);
    }
}
