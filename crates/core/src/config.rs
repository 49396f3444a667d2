//! Renderer configuration.
//!
//! Defaults reproduce the fixed quad used by the visual tests: half-width 150
//! at depth 100, fed by a 1920x1080 camera stream at 60 fps.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::feed::FpsMode;
use crate::params::{param_f32, param_str, param_u32};

/// Default quad half-width in view units.
pub const DEFAULT_HALF_WIDTH: f32 = 150.0;
/// Default distance of the quad in front of the eye.
pub const DEFAULT_DEPTH: f32 = 100.0;
/// Default camera buffer width.
pub const DEFAULT_FEED_WIDTH: u32 = 1920;
/// Default camera buffer height.
pub const DEFAULT_FEED_HEIGHT: u32 = 1080;

/// Size and placement of the textured quad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadConfig {
    pub half_width: f32,
    pub depth: f32,
}

impl Default for QuadConfig {
    fn default() -> Self {
        Self {
            half_width: DEFAULT_HALF_WIDTH,
            depth: DEFAULT_DEPTH,
        }
    }
}

impl QuadConfig {
    /// Reads `half_width` and `depth` from a params object, keeping defaults
    /// for anything missing or malformed.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            half_width: param_f32(params, "half_width", defaults.half_width),
            depth: param_f32(params, "depth", defaults.depth),
        }
    }
}

/// Camera stream settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub width: u32,
    pub height: u32,
    pub fps: FpsMode,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FEED_WIDTH,
            height: DEFAULT_FEED_HEIGHT,
            fps: FpsMode::default(),
        }
    }
}

impl FeedConfig {
    /// Reads `width`, `height` and `fps` from a params object. Unknown fps names
    /// fall back to the default mode.
    pub fn from_json(params: &Value) -> Self {
        let defaults = Self::default();
        let fps = FpsMode::from_name(param_str(params, "fps", "")).unwrap_or(defaults.fps);
        Self {
            width: param_u32(params, "width", defaults.width),
            height: param_u32(params, "height", defaults.height),
            fps,
        }
    }
}

/// Top-level settings: `{"quad": {...}, "feed": {...}}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraQuadConfig {
    pub quad: QuadConfig,
    pub feed: FeedConfig,
}

impl CameraQuadConfig {
    /// Lenient parse of a params object. Never fails.
    pub fn from_json(params: &Value) -> Self {
        let null = Value::Null;
        Self {
            quad: QuadConfig::from_json(params.get("quad").unwrap_or(&null)),
            feed: FeedConfig::from_json(params.get("feed").unwrap_or(&null)),
        }
    }
}
