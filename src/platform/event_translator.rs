//=========================================================================
// Event Translator
//=========================================================================
//
// Converts winit window events into engine `Event`s.
//
// Architecture:
//   WindowEvent → EventTranslator → Event / PlatformEvent → channel
//
// The translator owns the `WindowState` the rest of the device queries:
// every conversion updates mouse position, button mask, focus, minimized
// flag and size before the resulting event is produced, so receivers
// observe state consistent with the event they are handling.
//
// Stateful modifier tracking: modifier state cached from
// `ModifiersChanged` is applied to all subsequent key and mouse events.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::trace;
use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase},
    keyboard::{ModifiersState, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use super::key_map::KeyMap;
use crate::core::event::{
    Event, KeyInput, Modifiers, MouseButton, MouseButtons, MouseEventKind, MouseInput,
    MultiTouchInput, TouchEventKind,
};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::window_state::WindowState;

//=== Constants ===========================================================

/// Pixel scroll deltas are divided by this to approximate lines.
const PIXELS_PER_WHEEL_LINE: f64 = 100.0;

//=== EventTranslator =====================================================

pub(crate) struct EventTranslator {
    state: WindowState,
    current_modifiers: Modifiers,
    key_map: KeyMap,

    /// Last position per finger, for `MultiTouchInput::prev_x/prev_y`.
    touches: HashMap<u64, (i32, i32)>,

    //--- Minimized sources, OR-ed into `state.minimized` ------------------
    occluded: bool,
    iconified: bool,
    zero_size: bool,
}

impl EventTranslator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(width: u32, height: u32, resizable: bool) -> Self {
        let mut state = WindowState::new(width, height);
        state.resizable = resizable;

        Self {
            state,
            current_modifiers: Modifiers::NONE,
            key_map: KeyMap::new(),
            touches: HashMap::new(),
            occluded: false,
            iconified: false,
            zero_size: false,
        }
    }

    //--- State Access -----------------------------------------------------

    pub(crate) fn state(&self) -> &WindowState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut WindowState {
        &mut self.state
    }

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, modifiers_state: ModifiersState) {
        self.current_modifiers = Modifiers::from(modifiers_state);
    }

    //--- Mouse ------------------------------------------------------------

    pub(crate) fn translate_cursor_moved(&mut self, x: f64, y: f64) -> Event {
        self.state.mouse_x = x as i32;
        self.state.mouse_y = y as i32;
        self.mouse_event(MouseEventKind::Moved, 0.0)
    }

    /// Press or release; `None` for buttons beyond the five tracked ones.
    pub(crate) fn translate_mouse_button(
        &mut self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<Event> {
        let Some(button) = map_mouse_button(button) else {
            trace!(target: "device::input", "Ignoring extra mouse button {:?}", button);
            return None;
        };

        let kind = match state {
            ElementState::Pressed => {
                self.state.mouse_buttons.insert(button.mask());
                MouseEventKind::Pressed(button)
            }
            ElementState::Released => {
                self.state.mouse_buttons.remove(button.mask());
                MouseEventKind::Released(button)
            }
        };

        Some(self.mouse_event(kind, 0.0))
    }

    pub(crate) fn translate_wheel(&mut self, delta: MouseScrollDelta) -> Event {
        let wheel = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_WHEEL_LINE) as f32,
        };
        self.mouse_event(MouseEventKind::Wheel, wheel)
    }

    //--- Keyboard ---------------------------------------------------------

    /// Key press or release. Unmapped keys are posted as `Unidentified`
    /// so the produced character still reaches text input.
    pub(crate) fn translate_key(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Event {
        let pressed_down = state.is_pressed();
        let char = if pressed_down {
            text.and_then(|t| t.chars().next())
        } else {
            None
        };

        Event::Key(KeyInput {
            key: self.key_map.lookup(physical_key),
            char,
            pressed_down,
            modifiers: self.current_modifiers,
        })
    }

    //--- Touch ------------------------------------------------------------

    /// Touch event followed by the left-button mouse event it emulates.
    /// The platform posts the second as `PlatformEvent::EmulatedInput`.
    pub(crate) fn translate_touch(&mut self, phase: TouchPhase, x: f64, y: f64, id: u64) -> [Event; 2] {
        let (x, y) = (x as i32, y as i32);

        let (prev_x, prev_y) = match phase {
            TouchPhase::Started => (x, y),
            _ => self.touches.get(&id).copied().unwrap_or((x, y)),
        };

        let (kind, touched) = match phase {
            TouchPhase::Started => (TouchEventKind::PressedDown, true),
            TouchPhase::Moved => (TouchEventKind::Moved, true),
            TouchPhase::Ended | TouchPhase::Cancelled => (TouchEventKind::LeftUp, false),
        };

        if touched {
            self.touches.insert(id, (x, y));
        } else {
            self.touches.remove(&id);
        }

        let touch = Event::MultiTouch(MultiTouchInput { kind, id, x, y, prev_x, prev_y, touched });

        self.state.mouse_x = x;
        self.state.mouse_y = y;
        let mouse_kind = match kind {
            TouchEventKind::PressedDown => {
                self.state.mouse_buttons.insert(MouseButtons::LEFT);
                MouseEventKind::Pressed(MouseButton::Left)
            }
            TouchEventKind::Moved => MouseEventKind::Moved,
            TouchEventKind::LeftUp => {
                self.state.mouse_buttons.remove(MouseButtons::LEFT);
                MouseEventKind::Released(MouseButton::Left)
            }
        };

        [touch, self.mouse_event(mouse_kind, 0.0)]
    }

    //--- Window -----------------------------------------------------------

    pub(crate) fn focus(&mut self, focused: bool) {
        self.state.focused = focused;
    }

    pub(crate) fn occluded(&mut self, occluded: bool) {
        self.occluded = occluded;
        self.refresh_minimized();
    }

    /// Iconified state as reported by the OS; `None` where the platform
    /// cannot tell (Wayland), which keeps the last known value.
    pub(crate) fn os_minimized(&mut self, minimized: Option<bool>) {
        if let Some(minimized) = minimized {
            self.iconified = minimized;
            self.refresh_minimized();
        }
    }

    /// Size change. A zero size marks the window minimized and is not
    /// forwarded; anything else clears that mark and yields a resize for
    /// the video driver.
    pub(crate) fn resized(&mut self, width: u32, height: u32) -> Option<PlatformEvent> {
        self.zero_size = width == 0 || height == 0;
        self.refresh_minimized();
        if self.zero_size {
            return None;
        }

        if (width, height) == (self.state.width, self.state.height) {
            return None;
        }

        self.state.width = width;
        self.state.height = height;
        Some(PlatformEvent::Resized { width, height })
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.current_modifiers
    }

    //--- Internal Helpers -------------------------------------------------

    fn refresh_minimized(&mut self) {
        self.state.minimized = self.occluded || self.iconified || self.zero_size;
    }

    fn mouse_event(&self, kind: MouseEventKind, wheel: f32) -> Event {
        Event::Mouse(MouseInput {
            kind,
            x: self.state.mouse_x,
            y: self.state.mouse_y,
            wheel,
            button_states: self.state.mouse_buttons,
            modifiers: self.current_modifiers,
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts winit ModifiersState to engine Modifiers.
///
/// Winit normalizes platform keys (macOS Cmd → Ctrl, Option → Alt).
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
        }
    }
}

fn map_mouse_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Right => Some(MouseButton::Right),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Back => Some(MouseButton::Back),
        WinitMouseButton::Forward => Some(MouseButton::Forward),
        WinitMouseButton::Other(_) => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keycode::KeyCode;
    use winit::dpi::PhysicalPosition;
    use winit::keyboard::KeyCode as WinitKeyCode;

    //=====================================================================
    // Test Helpers
    //=====================================================================

    fn translator() -> EventTranslator {
        EventTranslator::new(800, 600, false)
    }

    fn make_modifiers(shift: bool, ctrl: bool, alt: bool) -> ModifiersState {
        let mut state = ModifiersState::empty();
        if shift {
            state |= ModifiersState::SHIFT;
        }
        if ctrl {
            state |= ModifiersState::CONTROL;
        }
        if alt {
            state |= ModifiersState::ALT;
        }
        state
    }

    fn mouse(event: Event) -> MouseInput {
        match event {
            Event::Mouse(m) => m,
            other => panic!("Expected mouse event, got {:?}", other),
        }
    }

    fn key(event: Event) -> KeyInput {
        match event {
            Event::Key(k) => k,
            other => panic!("Expected key event, got {:?}", other),
        }
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn cursor_move_updates_position() {
        let mut t = translator();
        let m = mouse(t.translate_cursor_moved(120.7, 45.2));

        assert_eq!(m.kind, MouseEventKind::Moved);
        assert_eq!((m.x, m.y), (120, 45));
        assert_eq!((t.state().mouse_x, t.state().mouse_y), (120, 45));
    }

    #[test]
    fn release_clears_only_its_own_bit() {
        let mut t = translator();
        t.translate_mouse_button(WinitMouseButton::Left, ElementState::Pressed);
        t.translate_mouse_button(WinitMouseButton::Right, ElementState::Pressed);

        let m = mouse(
            t.translate_mouse_button(WinitMouseButton::Left, ElementState::Released)
                .unwrap(),
        );

        assert_eq!(m.kind, MouseEventKind::Released(MouseButton::Left));
        assert_eq!(m.button_states, MouseButtons::RIGHT);
        assert!(m.is_pressed(MouseButton::Right));
    }

    #[test]
    fn side_buttons_use_extra_bits() {
        let mut t = translator();
        t.translate_mouse_button(WinitMouseButton::Back, ElementState::Pressed);
        t.translate_mouse_button(WinitMouseButton::Forward, ElementState::Pressed);

        assert_eq!(t.state().mouse_buttons, MouseButtons::EXTRA1 | MouseButtons::EXTRA2);
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut t = translator();
        assert!(t
            .translate_mouse_button(WinitMouseButton::Other(9), ElementState::Pressed)
            .is_none());
        assert!(t.state().mouse_buttons.is_empty());
    }

    #[test]
    fn move_carries_held_buttons() {
        let mut t = translator();
        t.translate_mouse_button(WinitMouseButton::Middle, ElementState::Pressed);
        let m = mouse(t.translate_cursor_moved(1.0, 1.0));
        assert_eq!(m.button_states, MouseButtons::MIDDLE);
    }

    #[test]
    fn wheel_lines_pass_through() {
        let mut t = translator();
        let m = mouse(t.translate_wheel(MouseScrollDelta::LineDelta(0.0, -2.0)));
        assert_eq!(m.kind, MouseEventKind::Wheel);
        assert_eq!(m.wheel, -2.0);
    }

    #[test]
    fn wheel_pixels_are_scaled() {
        let mut t = translator();
        let m = mouse(t.translate_wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 250.0))));
        assert_eq!(m.wheel, 2.5);
    }

    #[test]
    fn mouse_events_carry_modifiers() {
        let mut t = translator();
        t.update_modifiers(make_modifiers(false, true, false));
        let m = mouse(t.translate_cursor_moved(0.0, 0.0));
        assert_eq!(m.modifiers, Modifiers::CTRL);
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_press_carries_first_char() {
        let t = translator();
        let k = key(t.translate_key(
            PhysicalKey::Code(WinitKeyCode::KeyA),
            ElementState::Pressed,
            Some("ab"),
        ));

        assert_eq!(k.key, KeyCode::KeyA);
        assert_eq!(k.char, Some('a'));
        assert!(k.pressed_down);
    }

    #[test]
    fn key_release_has_no_char() {
        let t = translator();
        let k = key(t.translate_key(
            PhysicalKey::Code(WinitKeyCode::KeyA),
            ElementState::Released,
            Some("a"),
        ));

        assert!(!k.pressed_down);
        assert_eq!(k.char, None);
    }

    #[test]
    fn unmapped_key_keeps_its_text() {
        let t = translator();
        let k = key(t.translate_key(
            PhysicalKey::Code(WinitKeyCode::IntlRo),
            ElementState::Pressed,
            Some("ろ"),
        ));

        assert_eq!(k.key, KeyCode::Unidentified);
        assert_eq!(k.char, Some('ろ'));
    }

    #[test]
    fn modifiers_are_sticky() {
        let mut t = translator();
        t.update_modifiers(make_modifiers(true, false, true));

        let k = key(t.translate_key(PhysicalKey::Code(WinitKeyCode::Tab), ElementState::Pressed, None));
        assert_eq!(k.modifiers, Modifiers { shift: true, ctrl: false, alt: true });

        t.update_modifiers(make_modifiers(false, false, false));
        assert_eq!(t.current_modifiers(), Modifiers::NONE);
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    #[test]
    fn touch_start_emulates_left_press() {
        let mut t = translator();
        let [touch, emulated] = t.translate_touch(TouchPhase::Started, 10.0, 20.0, 4);

        assert_eq!(
            touch,
            Event::MultiTouch(MultiTouchInput {
                kind: TouchEventKind::PressedDown,
                id: 4,
                x: 10,
                y: 20,
                prev_x: 10,
                prev_y: 20,
                touched: true,
            })
        );
        let m = mouse(emulated);
        assert_eq!(m.kind, MouseEventKind::Pressed(MouseButton::Left));
        assert_eq!(m.button_states, MouseButtons::LEFT);
    }

    #[test]
    fn touch_move_reports_previous_position() {
        let mut t = translator();
        t.translate_touch(TouchPhase::Started, 10.0, 20.0, 1);
        let [touch, emulated] = t.translate_touch(TouchPhase::Moved, 15.0, 25.0, 1);

        match touch {
            Event::MultiTouch(m) => {
                assert_eq!((m.prev_x, m.prev_y), (10, 20));
                assert_eq!((m.x, m.y), (15, 25));
            }
            other => panic!("Expected touch event, got {:?}", other),
        }
        let m = mouse(emulated);
        assert_eq!(m.kind, MouseEventKind::Moved);
        assert_eq!(m.button_states, MouseButtons::LEFT);
    }

    #[test]
    fn touch_end_releases_left() {
        let mut t = translator();
        t.translate_touch(TouchPhase::Started, 1.0, 1.0, 2);
        let [touch, emulated] = t.translate_touch(TouchPhase::Cancelled, 3.0, 3.0, 2);

        match touch {
            Event::MultiTouch(m) => {
                assert_eq!(m.kind, TouchEventKind::LeftUp);
                assert!(!m.touched);
            }
            other => panic!("Expected touch event, got {:?}", other),
        }
        assert_eq!(mouse(emulated).kind, MouseEventKind::Released(MouseButton::Left));
        assert!(t.state().mouse_buttons.is_empty());
        assert_eq!((t.state().mouse_x, t.state().mouse_y), (3, 3));
    }

    //=====================================================================
    // Window Tests
    //=====================================================================

    #[test]
    fn zero_resize_minimizes_without_event() {
        let mut t = translator();
        assert!(t.resized(0, 0).is_none());
        assert!(t.state().minimized);
        assert_eq!((t.state().width, t.state().height), (800, 600));
    }

    #[test]
    fn resize_restores_and_updates_size() {
        let mut t = translator();
        t.resized(0, 0);

        assert_eq!(t.resized(1024, 768), Some(PlatformEvent::Resized { width: 1024, height: 768 }));
        assert!(!t.state().minimized);
        assert_eq!((t.state().width, t.state().height), (1024, 768));
    }

    #[test]
    fn same_size_resize_is_dropped() {
        let mut t = translator();
        assert!(t.resized(800, 600).is_none());
    }

    #[test]
    fn occlusion_survives_os_not_minimized() {
        let mut t = translator();
        t.focus(true);

        t.occluded(true);
        t.os_minimized(Some(false));

        assert!(t.state().minimized, "Covered window stays minimized");
        assert!(!t.state().is_active());

        t.occluded(false);
        assert!(t.state().is_active());
    }

    #[test]
    fn zero_resize_survives_os_not_minimized() {
        let mut t = translator();
        t.resized(0, 0);
        t.os_minimized(Some(false));
        assert!(t.state().minimized);

        t.resized(800, 600);
        assert!(!t.state().minimized);
    }

    #[test]
    fn os_minimized_sets_and_clears() {
        let mut t = translator();
        t.os_minimized(Some(true));
        assert!(t.state().minimized);

        t.os_minimized(None);
        assert!(t.state().minimized, "Unknown keeps the last report");

        t.os_minimized(Some(false));
        assert!(!t.state().minimized);
    }

    #[test]
    fn resize_does_not_clear_occlusion() {
        let mut t = translator();
        t.occluded(true);
        t.resized(1024, 768);
        assert!(t.state().minimized);
    }

    #[test]
    fn focus_and_occlusion() {
        let mut t = translator();
        t.focus(true);
        assert!(t.state().is_active());

        t.occluded(true);
        assert!(!t.state().is_active());

        t.occluded(false);
        assert!(t.state().is_active());
    }
}
