//=========================================================================
// Window State
//=========================================================================
//
// Plain fields the event pump mutates while translating events: client
// size, last cursor position, held mouse buttons, focus and minimized
// flags. Queried by the device API and the cursor control.
//
//=========================================================================

use super::event::MouseButtons;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,

    pub mouse_x: i32,
    pub mouse_y: i32,
    pub mouse_buttons: MouseButtons,

    pub focused: bool,
    pub minimized: bool,
    pub resizable: bool,

    pub cursor_visible: bool,
}

impl WindowState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mouse_x: 0,
            mouse_y: 0,
            mouse_buttons: MouseButtons::empty(),
            focused: false,
            minimized: false,
            resizable: false,
            cursor_visible: true,
        }
    }

    /// A window needs drawing only while focused and not minimized.
    pub fn is_active(&self) -> bool {
        self.focused && !self.minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_window_is_inactive() {
        let state = WindowState::new(640, 480);
        assert!(!state.is_active());
        assert!(state.cursor_visible);
        assert_eq!((state.width, state.height), (640, 480));
    }

    #[test]
    fn active_requires_focus_and_not_minimized() {
        let mut state = WindowState::new(640, 480);
        state.focused = true;
        assert!(state.is_active());

        state.minimized = true;
        assert!(!state.is_active());
    }
}
