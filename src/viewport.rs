//! Viewport-dependent layout resolution
//!
//! The host passes the visible area of the surface it renders into; all
//! orientation-sensitive decisions flow through an explicit
//! [`ViewportContext`] instead of shared mutable state, so two cards in
//! differently-sized containers resolve independently.

use serde::Serialize;

/// Landscape when the visible width clearly dominates the height
const LANDSCAPE_RATIO: f64 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

/// Snapshot of the host viewport at layout time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportContext {
    pub visible_width: f64,
    pub visible_height: f64,
}

impl ViewportContext {
    pub fn from_visible_area(visible_width: f64, visible_height: f64) -> Self {
        Self {
            visible_width,
            visible_height,
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.visible_width * LANDSCAPE_RATIO > self.visible_height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

/// Where the control buttons sit relative to the shutter window
///
/// The `auto*` variants defer to the viewport orientation and collapse
/// to one of the four fixed sides via [`ButtonPosition::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPosition {
    Left,
    Right,
    Top,
    Bottom,
    Auto,
    AutoTopLeft,
    AutoTopRight,
    AutoBottomLeft,
    AutoBottomRight,
    None,
}

impl ButtonPosition {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "auto" => Some(Self::Auto),
            "auto-top-left" => Some(Self::AutoTopLeft),
            "auto-top-right" => Some(Self::AutoTopRight),
            "auto-bottom-left" => Some(Self::AutoBottomLeft),
            "auto-bottom-right" => Some(Self::AutoBottomRight),
            "none" => Some(Self::None),
            _ => Option::None,
        }
    }

    /// Collapse `auto*` variants to a fixed side for the given viewport
    pub fn resolve(self, viewport: ViewportContext) -> Self {
        let top_or_left = match self {
            Self::Auto | Self::AutoTopLeft | Self::AutoBottomLeft => true,
            Self::AutoTopRight | Self::AutoBottomRight => false,
            fixed => return fixed,
        };
        match viewport.orientation() {
            Orientation::Landscape => {
                if top_or_left {
                    Self::Left
                } else {
                    Self::Right
                }
            }
            Orientation::Portrait => {
                if top_or_left {
                    Self::Top
                } else {
                    Self::Bottom
                }
            }
        }
    }
}
