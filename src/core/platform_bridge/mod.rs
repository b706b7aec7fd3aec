//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges the platform layer (winit) with the core side of the device.
//
// The platform produces `PlatformEvent`s while the windowing library is
// pumped; the router consumes them afterwards. Keeping the two ends apart
// lets every routing rule be tested without a display.
//
// Components:
// - `interface`: event types crossing the channel, user event sender
// - `event_router`: core-side draining, click detection and dispatch
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_router;
pub(crate) mod interface;

//=== Internal API ========================================================

pub(crate) use event_router::{EventRouter, TickControl};
pub(crate) use interface::PlatformEvent;
pub use interface::UserEventSender;
