//=========================================================================
// Aetheric Device: Library Root
//
// This crate defines the public API surface of the Aetheric Device: one
// window, its input events, cursor, joysticks and the graphics driver
// chosen for it.
//
// Responsibilities:
// - Expose the device facade (`DeviceBuilder`, `Device`)
// - Keep the winit integration (`platform`) hidden from end users
// - Separate backend-neutral types (`core`) from OS integration
//
// Typical usage:
// ```no_run
// use aetheric_device::DeviceBuilder;
//
// fn main() -> Result<(), aetheric_device::core::DeviceError> {
//     let mut device = DeviceBuilder::new().build()?;
//     while device.run() {}
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the backend-neutral types: events, key codes,
// receivers, configuration, timer and the video driver contract. It is
// public so collaborator subsystems can implement `EventReceiver` and
// `VideoDriver`.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the winit integration (window, event translation,
// key map, gamepads) and is not part of the public API surface.
//
// `device` defines the device entry point and its builder.
//
mod device;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use device::{Device, DeviceBuilder, DeviceType, GammaRamp};
