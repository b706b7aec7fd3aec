//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Messages the platform layer sends to the core side of the device.
//
// The platform translates windowing events as they arrive during a pump;
// the core drains the channel afterwards and dispatches in arrival order.
//
//=========================================================================

//=== External Crates =====================================================

use crossbeam_channel::Sender;
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::event::{Event, UserEvent};

//=== PlatformEvent =======================================================

/// Events sent from the platform layer (or user threads) to the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum PlatformEvent {
    /// A translated engine event, ready for dispatch.
    Input(Event),

    /// Mouse event synthesized from touch. Dispatched like `Input` but
    /// never counted towards double/triple clicks.
    EmulatedInput(Event),

    /// Client area changed to a non-zero size.
    Resized { width: u32, height: u32 },

    /// User closed the window or the OS destroyed it.
    CloseRequested,
}

//=== UserEventSender =====================================================

/// Posts [`UserEvent`]s into the device from any thread.
///
/// Events are delivered on the next `Device::run()`. Sending after the
/// device has been dropped logs a warning and does nothing.
#[derive(Debug, Clone)]
pub struct UserEventSender {
    sender: Sender<PlatformEvent>,
}

impl UserEventSender {
    pub(crate) fn new(sender: Sender<PlatformEvent>) -> Self {
        Self { sender }
    }

    pub fn send(&self, data1: i32, data2: i32) {
        let event = PlatformEvent::Input(Event::User(UserEvent { data1, data2 }));
        if self.sender.send(event).is_err() {
            warn!(target: "device::input", "Device gone, dropping user event ({}, {})", data1, data2);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
