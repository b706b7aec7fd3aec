//=========================================================================
// Creation Parameters
//=========================================================================
//
// Everything the device needs to know before it opens a window and picks a
// driver. Parameters can be set through `DeviceBuilder`, or loaded from a
// TOML file so that tools and games can ship a `device.toml` next to the
// executable.
//
// Example file:
// ```toml
// driver_type = "OpenGl"
// window_size = [1280, 720]
// fullscreen = false
// bits = 32
// anti_alias = 4
// ```
//
//=========================================================================

//=== External Crates =====================================================

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== Internal Imports ====================================================

use super::video::DriverType;

//=== ConfigError =========================================================

/// Errors raised while loading or saving creation parameters.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Only `.toml` files are understood.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Parsed, but a value is out of range.
    #[error("Invalid parameter: {0}")]
    Invalid(String),
}

//=== CreationParams ======================================================

/// Parameters used to create the device.
///
/// Missing fields in a config file fall back to [`CreationParams::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreationParams {
    /// Graphics driver requested from the driver factory.
    pub driver_type: DriverType,

    /// Client area size in physical pixels.
    pub window_size: (u32, u32),

    /// Window title shown until `set_window_caption` is called.
    pub window_title: String,

    /// Borderless fullscreen on the current monitor.
    pub fullscreen: bool,

    /// Allow the user to resize the window.
    pub resizable: bool,

    /// Colour depth in bits per pixel (16 or 32).
    pub bits: u8,

    /// Request an alpha channel in the back buffer.
    pub with_alpha_channel: bool,

    /// Depth buffer size in bits.
    pub z_buffer_bits: u8,

    /// Stencil buffer requested from the driver.
    pub stencil_buffer: bool,

    pub doublebuffer: bool,

    pub stereobuffer: bool,

    /// Multisample count; values <= 1 disable anti-aliasing.
    pub anti_alias: u8,

    pub vsync: bool,

    /// Maximum delay between presses counted as a double click.
    pub double_click_time_ms: u32,
}

impl Default for CreationParams {
    fn default() -> Self {
        Self {
            driver_type: DriverType::Software,
            window_size: (800, 600),
            window_title: "Aetheric Device".to_string(),
            fullscreen: false,
            resizable: false,
            bits: 32,
            with_alpha_channel: false,
            z_buffer_bits: 24,
            stencil_buffer: true,
            doublebuffer: true,
            stereobuffer: false,
            anti_alias: 0,
            vsync: false,
            double_click_time_ms: 500,
        }
    }
}

impl CreationParams {
    //--- TOML I/O ---------------------------------------------------------

    /// Parses and validates parameters from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Serializes parameters to a pretty-printed TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Loads parameters from a `.toml` file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        Self::check_extension(path)?;

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Writes parameters to a `.toml` file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        Self::check_extension(path)?;

        let contents = self.to_toml_string()?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    //--- Validation -------------------------------------------------------

    /// Checks the ranges the builder setters assert on.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = self.window_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window_size must be non-zero, got {}x{}",
                width, height
            )));
        }
        if self.bits != 16 && self.bits != 32 {
            return Err(ConfigError::Invalid(format!("bits must be 16 or 32, got {}", self.bits)));
        }
        if self.double_click_time_ms == 0 {
            return Err(ConfigError::Invalid("double_click_time_ms must be positive".into()));
        }
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn check_extension(path: &Path) -> Result<(), ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(()),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
