//=========================================================================
// Null Driver
//
// Draws nothing. Tracks the screen size so resize handling and tools that
// only need a driver object behave consistently.
//=========================================================================

use super::{DriverType, VideoDriver};

#[derive(Debug)]
pub struct NullDriver {
    screen_size: (u32, u32),
}

impl NullDriver {
    pub fn new(width: u32, height: u32) -> Self {
        Self { screen_size: (width, height) }
    }
}

impl VideoDriver for NullDriver {
    fn driver_type(&self) -> DriverType {
        DriverType::Null
    }

    fn name(&self) -> &str {
        "Null Driver"
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        self.screen_size = (width, height);
    }

    fn screen_size(&self) -> (u32, u32) {
        self.screen_size
    }
}
