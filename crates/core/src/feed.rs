//! Live camera feed that backs the external texture.
//!
//! A [`CameraFeed`] drives a platform [`CameraDevice`] through its
//! open/pause/close lifecycle and latches frames on demand. The device itself
//! is responsible for pushing each latched frame into whichever external
//! texture is currently bound.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::FeedConfig;

/// Errors reported by a camera device.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// No camera exists, or another client holds it.
    #[error("camera not available or is in use")]
    Unavailable,

    /// The device rejected a request.
    #[error("camera device error: {0}")]
    Device(String),
}

/// Preview frame-rate mode requested from the device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FpsMode {
    Fps30,
    #[default]
    Fps60,
    Fps120,
}

impl FpsMode {
    /// Parses `"fps30"`/`"30"` style names.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fps30" | "30" => Some(FpsMode::Fps30),
            "fps60" | "60" => Some(FpsMode::Fps60),
            "fps120" | "120" => Some(FpsMode::Fps120),
            _ => None,
        }
    }

    /// Vendor "fast fps" ordinal for this mode.
    pub fn ordinal(self) -> u8 {
        match self {
            FpsMode::Fps30 => 0,
            FpsMode::Fps60 => 1,
            FpsMode::Fps120 => 2,
        }
    }

    /// Fixed preview range in thousandths of a frame per second.
    pub fn preview_fps_range(self) -> (u32, u32) {
        let rate = match self {
            FpsMode::Fps30 => 30_000,
            FpsMode::Fps60 => 60_000,
            FpsMode::Fps120 => 120_000,
        };
        (rate, rate)
    }
}

/// Optional features a device may advertise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCapabilities {
    pub optical_stabilization: bool,
    pub vr_mode: bool,
}

/// Focus mode requested for the preview stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMode {
    Infinity,
}

/// Everything a device needs to start previewing into the external texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSettings {
    pub width: u32,
    pub height: u32,
    pub fps_range: (u32, u32),
    pub fast_fps_mode: u8,
    pub recording_hint: bool,
    pub focus: FocusMode,
    pub video_stabilization: bool,
    /// Centre optical stabilisation; only set when the device supports it.
    pub optical_stabilization: bool,
    /// Low-latency VR preview; only set when the device supports it.
    pub vr_mode: bool,
}

impl PreviewSettings {
    /// Derives preview settings from the feed config and what the device supports.
    pub fn for_device(config: &FeedConfig, caps: DeviceCapabilities) -> Self {
        Self {
            width: config.width,
            height: config.height,
            fps_range: config.fps.preview_fps_range(),
            fast_fps_mode: config.fps.ordinal(),
            recording_hint: false,
            focus: FocusMode::Infinity,
            video_stabilization: false,
            optical_stabilization: caps.optical_stabilization,
            vr_mode: caps.vr_mode,
        }
    }
}

/// A platform camera that can stream into an external texture.
pub trait CameraDevice {
    /// Features this device supports. Defaults to none.
    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities::default()
    }

    /// Opens the camera and starts the preview stream.
    fn open(&mut self, settings: &PreviewSettings) -> Result<(), FeedError>;

    /// Stops the preview and releases the camera.
    fn close(&mut self);

    /// Pushes the newest frame into the bound external texture and returns its
    /// timestamp. Re-latches the previous frame if nothing new arrived.
    fn latch_frame(&mut self) -> u64;
}

/// Placeholder device for contexts without a camera. Never opens.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCamera;

impl CameraDevice for NoCamera {
    fn open(&mut self, _settings: &PreviewSettings) -> Result<(), FeedError> {
        Err(FeedError::Unavailable)
    }

    fn close(&mut self) {}

    fn latch_frame(&mut self) -> u64 {
        0
    }
}

/// Open/pause/close state machine around a [`CameraDevice`].
#[derive(Debug)]
pub struct CameraFeed<D> {
    device: D,
    config: FeedConfig,
    open: bool,
    paused: bool,
}

impl<D: CameraDevice> CameraFeed<D> {
    /// Wraps a closed device.
    pub fn new(device: D, config: FeedConfig) -> Self {
        Self {
            device,
            config,
            open: false,
            paused: false,
        }
    }

    /// Opens the device if needed and unpauses the feed.
    ///
    /// The feed is unpaused even when opening fails, so a later `resume`
    /// retries the open.
    ///
    /// # Errors
    ///
    /// Returns the device's error if it could not be opened.
    pub fn resume(&mut self) -> Result<(), FeedError> {
        let opened = self.open_device();
        self.paused = false;
        opened
    }

    /// Starts the feed for a freshly bound texture.
    ///
    /// Unlike [`resume`](Self::resume), a device that cannot be opened yet is
    /// only logged; the feed stays unpaused so the next `resume` retries.
    pub fn attach(&mut self) {
        if self.resume().is_err() {
            log::debug!("camera feed attached closed; waiting for resume");
        }
    }

    /// Pauses the feed and releases the device.
    pub fn pause(&mut self) {
        self.paused = true;
        self.close_device();
    }

    /// Releases the device without changing the paused flag.
    pub fn close(&mut self) {
        self.close_device();
    }

    /// Latches the newest frame and returns its timestamp, or 0 while paused
    /// or closed.
    pub fn update(&mut self) -> u64 {
        if self.paused || !self.open {
            return 0;
        }
        self.device.latch_frame()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    fn open_device(&mut self) -> Result<(), FeedError> {
        if self.open {
            return Ok(());
        }
        let settings = PreviewSettings::for_device(&self.config, self.device.capabilities());
        match self.device.open(&settings) {
            Ok(()) => {
                log::debug!(
                    "camera opened at {}x{}, fps range {:?}",
                    settings.width,
                    settings.height,
                    settings.fps_range
                );
                if settings.vr_mode {
                    log::debug!("camera supports VR preview mode");
                }
                self.open = true;
                Ok(())
            }
            Err(e) => {
                log::warn!("{e}");
                Err(e)
            }
        }
    }

    fn close_device(&mut self) {
        if !self.open {
            return;
        }
        self.device.close();
        self.open = false;
        log::debug!("camera closed");
    }
}
