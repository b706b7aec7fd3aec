//=========================================================================
// Device Errors
//=========================================================================
//
// Errors surfaced by device construction and device operations.
//
// Recoverable conditions (unknown driver type, channel disconnect, missing
// joystick backend on a platform) are logged instead of returned; only
// conditions that leave the device unusable or a request that cannot be
// honoured end up here.
//
//=========================================================================

//=== External Crates =====================================================

use thiserror::Error;

//=== Internal Imports ====================================================

use super::config::ConfigError;
use super::video::DriverType;

//=== DeviceError =========================================================

/// Device-level error type.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Event loop could not be created (OS-level issue, or a second loop).
    #[error("Event loop creation failed: {0}")]
    EventLoopCreation(#[from] winit::error::EventLoopError),

    /// The OS refused to create the window.
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    /// Event loop exited before a window was created.
    #[error("Event loop exited with code {0} before the window was created")]
    EarlyExit(i32),

    /// Creation parameters could not be loaded or saved.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A registered driver constructor failed.
    #[error("Could not create {driver} driver: {reason}")]
    DriverCreation { driver: DriverType, reason: String },

    /// Joystick backend failed to initialize.
    #[error("Joystick error: {0}")]
    Joystick(String),

    /// Operation not available with the winit backend.
    #[error("Not supported by this device: {0}")]
    Unsupported(&'static str),

    /// Operation needs a window but the device runs without one.
    #[error("No window (device created with the null driver)")]
    NoWindow,

    /// Image handed to `present` does not hold width * height pixels.
    #[error("Image of {len} pixels does not match {width}x{height}")]
    InvalidImage { width: u32, height: u32, len: usize },

    /// The window surface could not be created or presented.
    #[error("Present failed: {0}")]
    Present(String),
}

/// Result type alias using [`DeviceError`].
pub type Result<T> = std::result::Result<T, DeviceError>;

//=========================================================================
// Unit Tests
//=========================================================================
