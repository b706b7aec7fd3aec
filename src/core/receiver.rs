//=========================================================================
// Event Receivers
//=========================================================================
//
// Collaborator subsystems (GUI, scene manager, game code) receive device
// events through `EventReceiver`. The dispatcher offers each event to the
// user receiver first, then to every registered subsystem in registration
// order, and stops at the first receiver that consumes it.
//
// Architecture:
//   Event → user receiver ──(not consumed)──> subsystem[0] → subsystem[1] …
//
//=========================================================================

use log::trace;

use super::event::Event;

//=== EventReceiver =======================================================

/// Anything that wants device events.
pub trait EventReceiver {
    /// Handles `event`. Returning `true` marks it consumed, so receivers
    /// later in the chain do not see it.
    fn on_event(&mut self, event: &Event) -> bool;
}

/// Closures work as receivers, which keeps small tools and tests short.
impl<F> EventReceiver for F
where
    F: FnMut(&Event) -> bool,
{
    fn on_event(&mut self, event: &Event) -> bool {
        self(event)
    }
}

//=== EventDispatcher =====================================================

#[derive(Default)]
pub struct EventDispatcher {
    user: Option<Box<dyn EventReceiver>>,
    subsystems: Vec<(String, Box<dyn EventReceiver>)>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the user receiver, returning the previous one.
    pub fn set_user_receiver(
        &mut self,
        receiver: Option<Box<dyn EventReceiver>>,
    ) -> Option<Box<dyn EventReceiver>> {
        std::mem::replace(&mut self.user, receiver)
    }

    pub fn has_user_receiver(&self) -> bool {
        self.user.is_some()
    }

    /// Appends a named subsystem to the end of the chain.
    pub fn add_subsystem(&mut self, name: impl Into<String>, receiver: Box<dyn EventReceiver>) {
        self.subsystems.push((name.into(), receiver));
    }

    /// Removes the first subsystem registered under `name`.
    pub fn remove_subsystem(&mut self, name: &str) -> Option<Box<dyn EventReceiver>> {
        let index = self.subsystems.iter().position(|(n, _)| n == name)?;
        Some(self.subsystems.remove(index).1)
    }

    pub fn subsystem_count(&self) -> usize {
        self.subsystems.len()
    }

    /// Offers `event` along the chain; returns `true` if someone consumed it.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        if let Some(user) = self.user.as_mut() {
            if user.on_event(event) {
                trace!(target: "device::input", "{} event consumed by user receiver", event.kind_name());
                return true;
            }
        }

        for (name, receiver) in &mut self.subsystems {
            if receiver.on_event(event) {
                trace!(target: "device::input", "{} event consumed by '{}'", event.kind_name(), name);
                return true;
            }
        }

        false
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::UserEvent;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn user_event(data1: i32) -> Event {
        Event::User(UserEvent { data1, data2: 0 })
    }

    /// Receiver that records what it saw and consumes according to a flag.
    fn recorder(log: Rc<RefCell<Vec<&'static str>>>, name: &'static str, consume: bool) -> Box<dyn EventReceiver> {
        Box::new(move |_: &Event| {
            log.borrow_mut().push(name);
            consume
        })
    }

    #[test]
    fn empty_dispatcher_consumes_nothing() {
        let mut dispatcher = EventDispatcher::new();
        assert!(!dispatcher.dispatch(&user_event(1)));
    }

    #[test]
    fn user_receiver_runs_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_subsystem("gui", recorder(log.clone(), "gui", false));
        dispatcher.set_user_receiver(Some(recorder(log.clone(), "user", false)));

        assert!(!dispatcher.dispatch(&user_event(1)));
        assert_eq!(*log.borrow(), vec!["user", "gui"]);
    }

    #[test]
    fn consumed_event_stops_chain() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_subsystem("gui", recorder(log.clone(), "gui", true));
        dispatcher.add_subsystem("scene", recorder(log.clone(), "scene", false));

        assert!(dispatcher.dispatch(&user_event(1)));
        assert_eq!(*log.borrow(), vec!["gui"]);
    }

    #[test]
    fn user_receiver_can_swallow_everything() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_subsystem("gui", recorder(log.clone(), "gui", false));
        dispatcher.set_user_receiver(Some(recorder(log.clone(), "user", true)));

        assert!(dispatcher.dispatch(&user_event(1)));
        assert_eq!(*log.borrow(), vec!["user"]);
    }

    #[test]
    fn set_user_receiver_returns_previous() {
        let mut dispatcher = EventDispatcher::new();
        assert!(dispatcher.set_user_receiver(Some(Box::new(|_: &Event| true))).is_none());
        assert!(dispatcher.has_user_receiver());

        let previous = dispatcher.set_user_receiver(None);
        assert!(previous.is_some());
        assert!(!dispatcher.has_user_receiver());
    }

    #[test]
    fn remove_subsystem_by_name() {
        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_subsystem("gui", Box::new(|_: &Event| false));
        dispatcher.add_subsystem("scene", Box::new(|_: &Event| false));

        assert!(dispatcher.remove_subsystem("gui").is_some());
        assert!(dispatcher.remove_subsystem("gui").is_none());
        assert_eq!(dispatcher.subsystem_count(), 1);
    }
}
