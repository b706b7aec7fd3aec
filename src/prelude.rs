//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_device::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Device
pub use crate::device::{Device, DeviceBuilder, DeviceType};

// Configuration and errors
pub use crate::core::{CreationParams, DeviceError, DriverType};

// Events and receivers
pub use crate::core::{
    Event, EventReceiver, KeyCode, KeyInput, Modifiers, MouseButton, MouseEventKind, MouseInput,
    UserEventSender,
};

// Video
pub use crate::core::VideoDriver;
