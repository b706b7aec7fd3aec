//=========================================================================
// Device Core
//
// Backend-neutral half of the device: event types, key codes, receivers,
// timing, cursor and joystick types, video contract and configuration.
//
// Nothing in here talks to the OS directly except through a borrowed
// `winit::window::Window` (cursor control, driver constructors), so the
// whole module can be exercised headless.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod clicks;
pub mod config;
pub mod cursor;
pub mod error;
pub mod event;
pub mod joystick;
pub mod keycode;
pub mod receiver;
pub mod timer;
pub mod video;
pub mod window_state;

pub(crate) mod platform_bridge;

//=== Re-exports ==========================================================

pub use config::{ConfigError, CreationParams};
pub use cursor::CursorControl;
pub use error::{DeviceError, Result};
pub use event::{
    Event, JoystickEvent, KeyInput, Modifiers, MouseButton, MouseButtons, MouseEventKind,
    MouseInput, MultiTouchInput, TouchEventKind, UserEvent,
};
pub use joystick::{JoystickInfo, PovHat};
pub use keycode::KeyCode;
pub use platform_bridge::UserEventSender;
pub use receiver::{EventDispatcher, EventReceiver};
pub use timer::DeviceTimer;
pub use video::{
    ColorFormat, DriverConstructor, DriverFactory, DriverType, NullDriver, VideoDriver, VideoMode,
    VideoModeList,
};
pub use window_state::WindowState;
