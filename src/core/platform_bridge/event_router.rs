//=========================================================================
// Event Router
//=========================================================================
//
// Core-side end of the platform channel. Once per `Device::run()` it
// drains every pending `PlatformEvent`, in order, and:
// - dispatches input events along the receiver chain
// - follows button presses with double/triple click events, except for
//   presses emulated from touch
// - forwards resizes to the video driver
// - stops at a close request, leaving later events undelivered
//
// Architecture:
//   Receiver<PlatformEvent> → route_pending() → EventDispatcher / VideoDriver
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use super::PlatformEvent;
use crate::core::clicks::SuccessiveClicks;
use crate::core::event::{Event, MouseEventKind};
use crate::core::receiver::EventDispatcher;
use crate::core::video::VideoDriver;

//=== TickControl =========================================================

/// Device loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TickControl {
    Continue,
    Exit,
}

//=== EventRouter =========================================================

pub(crate) struct EventRouter {
    receiver: Receiver<PlatformEvent>,
    clicks: SuccessiveClicks,
}

impl EventRouter {
    pub(crate) fn new(receiver: Receiver<PlatformEvent>, double_click_time_ms: u32) -> Self {
        Self {
            receiver,
            clicks: SuccessiveClicks::new(double_click_time_ms),
        }
    }

    pub(crate) fn clicks(&self) -> &SuccessiveClicks {
        &self.clicks
    }

    pub(crate) fn clicks_mut(&mut self) -> &mut SuccessiveClicks {
        &mut self.clicks
    }

    /// Routes everything queued so far. `now_ms` timestamps click detection.
    pub(crate) fn route_pending(
        &mut self,
        dispatcher: &mut EventDispatcher,
        driver: &mut Option<Box<dyn VideoDriver>>,
        now_ms: u32,
    ) -> TickControl {
        let mut routed = 0usize;

        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    routed += 1;
                    if self.route(event, dispatcher, driver, now_ms) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => break,
            }
        }

        if routed > 0 {
            trace!(target: "device::input", "Routed {} platform events", routed);
        }

        TickControl::Continue
    }

    //--- Internal Helpers -------------------------------------------------

    fn route(
        &mut self,
        event: PlatformEvent,
        dispatcher: &mut EventDispatcher,
        driver: &mut Option<Box<dyn VideoDriver>>,
        now_ms: u32,
    ) -> TickControl {
        match event {
            PlatformEvent::Input(event) => {
                dispatcher.dispatch(&event);
                if let Some(follow_up) = self.successive_click(&event, now_ms) {
                    dispatcher.dispatch(&follow_up);
                }
                TickControl::Continue
            }

            PlatformEvent::EmulatedInput(event) => {
                dispatcher.dispatch(&event);
                TickControl::Continue
            }

            PlatformEvent::Resized { width, height } => {
                if let Some(driver) = driver.as_mut() {
                    debug!(target: "device::video", "Resizing {} to {}x{}", driver.name(), width, height);
                    driver.on_resize(width, height);
                }
                TickControl::Continue
            }

            PlatformEvent::CloseRequested => {
                info!(target: "device", "Close requested");
                TickControl::Exit
            }
        }
    }

    /// Double/triple click event to post after a button press, if any.
    fn successive_click(&mut self, event: &Event, now_ms: u32) -> Option<Event> {
        let Event::Mouse(input) = event else {
            return None;
        };
        let MouseEventKind::Pressed(button) = input.kind else {
            return None;
        };

        let kind = match self.clicks.register(button, input.x, input.y, now_ms) {
            2 => MouseEventKind::DoubleClick(button),
            3 => MouseEventKind::TripleClick(button),
            _ => return None,
        };

        let mut follow_up = *input;
        follow_up.kind = kind;
        Some(Event::Mouse(follow_up))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
