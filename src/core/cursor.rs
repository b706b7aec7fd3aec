//=========================================================================
// Cursor Control
//=========================================================================
//
// Short-lived view over the device's window and window state, handed out
// by `Device::cursor_control()`. Positions are client-area pixels; the
// relative variants use 0..1 across the client area.
//
// Without a window (null driver) the control still tracks visibility and
// reports positions, but cannot move the OS cursor.
//
//=========================================================================

use log::warn;
use winit::dpi::PhysicalPosition;
use winit::window::Window;

use super::window_state::WindowState;

//=== CursorControl =======================================================

pub struct CursorControl<'a> {
    window: Option<&'a Window>,
    state: &'a mut WindowState,
}

impl<'a> CursorControl<'a> {
    pub(crate) fn new(window: Option<&'a Window>, state: &'a mut WindowState) -> Self {
        Self { window, state }
    }

    //--- Visibility -------------------------------------------------------

    pub fn set_visible(&mut self, visible: bool) {
        self.state.cursor_visible = visible;
        if let Some(window) = self.window {
            window.set_cursor_visible(visible);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.state.cursor_visible
    }

    //--- Positioning ------------------------------------------------------

    /// Warps the cursor to `(x, y)` in client-area pixels.
    pub fn set_position(&mut self, x: i32, y: i32) {
        if let Some(window) = self.window {
            if let Err(e) = window.set_cursor_position(PhysicalPosition::new(x, y)) {
                warn!(target: "device::input", "Cursor warp to ({}, {}) failed: {}", x, y, e);
                return;
            }
        }
        self.state.mouse_x = x;
        self.state.mouse_y = y;
    }

    /// Warps the cursor to a relative position (0..1 on both axes).
    pub fn set_relative_position(&mut self, x: f32, y: f32) {
        let px = (x * self.state.width as f32) as i32;
        let py = (y * self.state.height as f32) as i32;
        self.set_position(px, py);
    }

    /// Last known cursor position, clamped to the client area.
    pub fn position(&self) -> (i32, i32) {
        let max_x = i32::try_from(self.state.width).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.state.height).unwrap_or(i32::MAX);
        (
            self.state.mouse_x.clamp(0, max_x),
            self.state.mouse_y.clamp(0, max_y),
        )
    }

    /// Clamped cursor position divided by the client size.
    ///
    /// Returns `(0.0, 0.0)` on a zero-sized (minimized) window.
    pub fn relative_position(&self) -> (f32, f32) {
        if self.state.width == 0 || self.state.height == 0 {
            return (0.0, 0.0);
        }
        let (x, y) = self.position();
        (
            x as f32 / self.state.width as f32,
            y as f32 / self.state.height as f32,
        )
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
