//=========================================================================
// Video Subsystem Contract
//=========================================================================
//
// The device never renders. It only picks a driver through the
// `DriverFactory`, tells the driver about resizes, and hands the window
// to the driver's constructor. Real backends (OpenGL, Direct3D, software
// rasterizers) live outside this crate and register themselves with the
// factory; the null driver ships here so that headless tools work.
//
// Components:
// - `DriverType`: the driver switch carried in `CreationParams`
// - `VideoDriver`: what the device needs from a driver
// - `factory`: driver registry keyed by `DriverType`
// - `modes`: video modes reported by the monitors
// - `null_driver`: the always-available no-op driver
//
//=========================================================================

//=== Submodules ==========================================================

pub mod factory;
pub mod modes;
pub mod null_driver;

//=== Public API ==========================================================

pub use factory::{DriverConstructor, DriverFactory};
pub use modes::{VideoMode, VideoModeList};
pub use null_driver::NullDriver;

//=== External Crates =====================================================

use std::fmt;

use serde::{Deserialize, Serialize};

//=== DriverType ==========================================================

/// Graphics driver selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriverType {
    /// No rendering and no window; useful for tools and tests.
    Null,
    Software,
    BurningsVideo,
    OpenGl,
    OpenGlEs2,
    Direct3D9,
}

impl DriverType {
    pub const ALL: [DriverType; 6] = [
        Self::Null,
        Self::Software,
        Self::BurningsVideo,
        Self::OpenGl,
        Self::OpenGlEs2,
        Self::Direct3D9,
    ];

    /// Drivers other than `Null` render into an OS window.
    pub const fn needs_window(self) -> bool {
        !matches!(self, Self::Null)
    }
}

impl fmt::Display for DriverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Null => "Null",
            Self::Software => "Software",
            Self::BurningsVideo => "Burning's Video",
            Self::OpenGl => "OpenGL",
            Self::OpenGlEs2 => "OpenGL ES 2",
            Self::Direct3D9 => "Direct3D 9",
        };
        f.write_str(name)
    }
}

//=== ColorFormat =========================================================

/// Pixel layout of the window's back buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    A1R5G5B5,
    R5G6B5,
    R8G8B8,
    A8R8G8B8,
}

impl ColorFormat {
    /// Chooses the back-buffer format for a colour depth.
    pub const fn from_depth(bits: u8, with_alpha: bool) -> Self {
        match (bits <= 16, with_alpha) {
            (true, false) => Self::R5G6B5,
            (true, true) => Self::A1R5G5B5,
            (false, false) => Self::R8G8B8,
            (false, true) => Self::A8R8G8B8,
        }
    }

    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::A1R5G5B5 | Self::R5G6B5 => 16,
            Self::R8G8B8 => 24,
            Self::A8R8G8B8 => 32,
        }
    }
}

//=== VideoDriver =========================================================

/// What the device needs from a graphics driver.
pub trait VideoDriver {
    fn driver_type(&self) -> DriverType;

    /// Human-readable driver name for logs and window titles.
    fn name(&self) -> &str;

    /// Called whenever the client area changes size (never with 0x0).
    fn on_resize(&mut self, width: u32, height: u32);

    /// Current render target size.
    fn screen_size(&self) -> (u32, u32);
}

//=========================================================================
// Unit Tests
//=========================================================================
