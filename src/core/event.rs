//=========================================================================
// Device Event Types
//
// The engine-side representation of everything the device reports:
// keyboard, mouse, touch, joystick and user events.
//
// Platform backends (winit here) translate their own events into these
// types; every collaborator subsystem (GUI, scene, game code) only ever
// sees `Event`.
//
// Event Flow:
// ```text
// winit WindowEvent
//         ↓
//    EventTranslator (platform)
//         ↓
//    Event (this module)
//         ↓
//    EventDispatcher → user receiver → subsystems
// ```
//
//=========================================================================

//=== External Crates =====================================================

use bitflags::bitflags;

//=== Internal Imports ====================================================

use super::keycode::KeyCode;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// Buttons beyond the five listed here are not reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// First side button.
    Back,

    /// Second side button.
    Forward,
}

impl MouseButton {
    /// Bit in [`MouseButtons`] that tracks this button.
    pub const fn mask(self) -> MouseButtons {
        match self {
            Self::Left => MouseButtons::LEFT,
            Self::Right => MouseButtons::RIGHT,
            Self::Middle => MouseButtons::MIDDLE,
            Self::Back => MouseButtons::EXTRA1,
            Self::Forward => MouseButtons::EXTRA2,
        }
    }
}

//=== MouseButtons ========================================================

bitflags! {
    /// Bitmask of mouse buttons currently held.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u32 {
        const LEFT   = 0x01;
        const RIGHT  = 0x02;
        const MIDDLE = 0x04;
        const EXTRA1 = 0x08;
        const EXTRA2 = 0x10;
    }
}

//=== Modifiers ===========================================================

/// Modifier key state (Shift, Ctrl, Alt).
///
/// Left and right variants are not distinguished. On macOS, winit reports
/// Command as Ctrl and Option as Alt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key held (either side).
    pub shift: bool,

    /// Ctrl key held (either side).
    pub ctrl: bool,

    /// Alt key held (either side).
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self { shift: false, ctrl: false, alt: false };

    /// Shift only.
    pub const SHIFT: Self = Self { shift: true, ctrl: false, alt: false };

    /// Ctrl only.
    pub const CTRL: Self = Self { shift: false, ctrl: true, alt: false };

    /// Alt only.
    pub const ALT: Self = Self { shift: false, ctrl: false, alt: true };
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

//=== Mouse Input =========================================================

/// What happened to the mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// Button went down.
    Pressed(MouseButton),

    /// Button went up.
    Released(MouseButton),

    /// Cursor moved inside the client area.
    Moved,

    /// Wheel turned; see [`MouseInput::wheel`].
    Wheel,

    /// Second press of the same button in quick succession.
    DoubleClick(MouseButton),

    /// Third press of the same button in quick succession.
    TripleClick(MouseButton),
}

/// Mouse event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseInput {
    pub kind: MouseEventKind,

    /// Cursor position in client-area pixels, top-left origin.
    pub x: i32,
    pub y: i32,

    /// Wheel movement in lines; positive is away from the user.
    /// Zero for every kind except [`MouseEventKind::Wheel`].
    pub wheel: f32,

    /// Buttons held after this event was applied.
    pub button_states: MouseButtons,

    pub modifiers: Modifiers,
}

impl MouseInput {
    /// Returns `true` if `button` is held according to this event.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.button_states.contains(button.mask())
    }
}

//=== Key Input ===========================================================

/// Keyboard event payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Virtual key, `Unidentified` if the key map had no entry.
    pub key: KeyCode,

    /// Character produced by the key press, if any.
    pub char: Option<char>,

    /// `true` for press (and auto-repeat), `false` for release.
    pub pressed_down: bool,

    pub modifiers: Modifiers,
}

//=== Touch Input =========================================================

/// Touch phase as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchEventKind {
    PressedDown,
    LeftUp,
    Moved,
}

/// Single-finger touch event payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MultiTouchInput {
    pub kind: TouchEventKind,

    /// Finger identifier, unique while the finger stays down.
    pub id: u64,

    pub x: i32,
    pub y: i32,

    /// Position reported by the previous event for this finger.
    pub prev_x: i32,
    pub prev_y: i32,

    /// `false` once the finger has left the surface.
    pub touched: bool,
}

//=== Joystick Input ======================================================

/// Joystick state snapshot, posted once per frame per activated joystick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoystickEvent {
    /// Index into the list returned by `activate_joysticks`.
    pub joystick: u8,

    /// One bit per button, up to 32 buttons.
    pub button_states: u32,

    /// Axes X, Y, Z, R, U, V in `-32767..=32767`.
    pub axis: [i16; JoystickEvent::NUMBER_OF_AXES],

    /// Hat direction in hundredths of a degree, [`JoystickEvent::POV_CENTERED`] if idle.
    pub pov: u16,
}

impl JoystickEvent {
    pub const NUMBER_OF_BUTTONS: usize = 32;
    pub const NUMBER_OF_AXES: usize = 6;

    pub const AXIS_X: usize = 0;
    pub const AXIS_Y: usize = 1;
    pub const AXIS_Z: usize = 2;
    pub const AXIS_R: usize = 3;
    pub const AXIS_U: usize = 4;
    pub const AXIS_V: usize = 5;

    pub const POV_CENTERED: u16 = 65535;

    /// Returns `true` if button `index` is held.
    pub fn is_button_pressed(&self, index: u32) -> bool {
        index < Self::NUMBER_OF_BUTTONS as u32 && self.button_states & (1 << index) != 0
    }
}

//=== User Event ==========================================================

/// Opaque payload posted by application code through the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct UserEvent {
    pub data1: i32,
    pub data2: i32,
}

//=== Event ===============================================================

/// Any event the device delivers to receivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Mouse(MouseInput),
    Key(KeyInput),
    MultiTouch(MultiTouchInput),
    Joystick(JoystickEvent),
    User(UserEvent),
}

impl Event {
    /// Short category name used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Mouse(_) => "mouse",
            Self::Key(_) => "key",
            Self::MultiTouch(_) => "touch",
            Self::Joystick(_) => "joystick",
            Self::User(_) => "user",
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: MouseEventKind, buttons: MouseButtons) -> MouseInput {
        MouseInput {
            kind,
            x: 0,
            y: 0,
            wheel: 0.0,
            button_states: buttons,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn button_masks_are_distinct_bits() {
        let all = [
            MouseButton::Left,
            MouseButton::Right,
            MouseButton::Middle,
            MouseButton::Back,
            MouseButton::Forward,
        ];
        let mut combined = MouseButtons::empty();
        for button in all {
            assert!(!combined.intersects(button.mask()), "{:?} overlaps", button);
            combined |= button.mask();
        }
        assert_eq!(combined.bits(), 0x1F);
    }

    #[test]
    fn mouse_input_reports_held_buttons() {
        let input = mouse(MouseEventKind::Moved, MouseButtons::LEFT | MouseButtons::MIDDLE);
        assert!(input.is_pressed(MouseButton::Left));
        assert!(input.is_pressed(MouseButton::Middle));
        assert!(!input.is_pressed(MouseButton::Right));
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert_ne!(Modifiers::SHIFT, Modifiers::CTRL);
    }

    #[test]
    fn joystick_button_query() {
        let event = JoystickEvent {
            joystick: 0,
            button_states: 0b101,
            axis: [0; JoystickEvent::NUMBER_OF_AXES],
            pov: JoystickEvent::POV_CENTERED,
        };
        assert!(event.is_button_pressed(0));
        assert!(!event.is_button_pressed(1));
        assert!(event.is_button_pressed(2));
        assert!(!event.is_button_pressed(40));
    }

    #[test]
    fn event_kind_names() {
        let event = Event::User(UserEvent { data1: 1, data2: 2 });
        assert_eq!(event.kind_name(), "user");

        let event = Event::Mouse(mouse(MouseEventKind::Wheel, MouseButtons::empty()));
        assert_eq!(event.kind_name(), "mouse");
    }
}
