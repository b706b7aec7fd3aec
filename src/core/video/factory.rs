//=========================================================================
// Driver Factory
//=========================================================================
//
// Registry of driver constructors keyed by `DriverType`. Backends register
// at start-up; the device asks the factory for whatever `CreationParams`
// requests. A type nobody registered behaves like a driver that was not
// compiled in: the request is logged and the device runs without a driver.
//
//=========================================================================

//=== External Crates =====================================================

use std::collections::HashMap;

use log::{debug, error, info, warn};
use winit::window::Window;

//=== Internal Imports ====================================================

use super::{DriverType, NullDriver, VideoDriver};
use crate::core::config::CreationParams;
use crate::core::error::{DeviceError, Result};

//=== DriverConstructor ===================================================

/// Builds a driver for the given parameters and (unless `Null`) window.
///
/// The window is created without a graphics context; the constructor sets
/// up its own from the frame-buffer fields of [`CreationParams`]: `bits`,
/// `with_alpha_channel`, `z_buffer_bits`, `stencil_buffer`,
/// `doublebuffer`, `stereobuffer`, `anti_alias` and `vsync`. Returning an
/// error while `anti_alias > 1` makes the factory retry with fewer samples.
pub type DriverConstructor =
    Box<dyn Fn(&CreationParams, Option<&Window>) -> Result<Box<dyn VideoDriver>>>;

//=== DriverFactory =======================================================

pub struct DriverFactory {
    constructors: HashMap<DriverType, DriverConstructor>,
}

impl DriverFactory {
    /// Creates a factory with only the null driver registered.
    pub fn new() -> Self {
        let mut factory = Self { constructors: HashMap::new() };
        factory.register(
            DriverType::Null,
            Box::new(|params: &CreationParams, _window: Option<&Window>| {
                let (width, height) = params.window_size;
                Ok(Box::new(NullDriver::new(width, height)) as Box<dyn VideoDriver>)
            }),
        );
        factory
    }

    /// Registers (or replaces) the constructor for `driver`.
    pub fn register(&mut self, driver: DriverType, constructor: DriverConstructor) {
        if self.constructors.insert(driver, constructor).is_some() {
            info!(target: "device::video", "Replaced {} driver constructor", driver);
        }
    }

    pub fn is_available(&self, driver: DriverType) -> bool {
        self.constructors.contains_key(&driver)
    }

    /// Builds the driver requested by `params`.
    ///
    /// A constructor that fails while multisampling is requested is retried
    /// with fewer samples, then with anti-aliasing off; `params.anti_alias`
    /// is left at the value that worked. Returns `None` (after logging) when
    /// the driver is unavailable or every attempt fails.
    pub fn create(
        &self,
        params: &mut CreationParams,
        window: Option<&Window>,
    ) -> Option<Box<dyn VideoDriver>> {
        let driver = params.driver_type;
        info!(target: "device::video", "Creating {} driver", driver);

        let Some(constructor) = self.constructors.get(&driver) else {
            error!(
                target: "device::video",
                "{} driver was not compiled into this build. Try another one.",
                driver
            );
            return None;
        };

        let requested_anti_alias = params.anti_alias;
        loop {
            match constructor(&*params, window) {
                Ok(video_driver) => {
                    if params.anti_alias != requested_anti_alias {
                        warn!(
                            target: "device::video",
                            "Anti-aliasing lowered from {}x to {}x",
                            requested_anti_alias,
                            params.anti_alias
                        );
                    }
                    return Some(video_driver);
                }
                Err(e) if params.anti_alias > 1 => {
                    debug!(
                        target: "device::video",
                        "{} driver failed with {}x anti-aliasing: {}",
                        driver,
                        params.anti_alias,
                        e
                    );
                    params.anti_alias = match params.anti_alias - 1 {
                        1 => 0,
                        samples => samples,
                    };
                    if params.anti_alias == 0 {
                        warn!(target: "device::video", "Anti-aliasing disabled due to lack of support");
                    }
                }
                Err(e) => {
                    let e = match e {
                        e @ DeviceError::DriverCreation { .. } => e,
                        other => DeviceError::DriverCreation { driver, reason: other.to_string() },
                    };
                    error!(target: "device::video", "{}", e);
                    return None;
                }
            }
        }
    }
}

impl Default for DriverFactory {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
