//=========================================================================
// Successive Click Detection
//=========================================================================
//
// Counts presses of the same mouse button that arrive close together in
// time and space. The device posts a double click on the second press and
// a triple click on the third; a fourth press starts over at one.
//
//=========================================================================

use super::event::MouseButton;

/// Maximum cursor travel (pixels, per axis) between counted clicks.
const MAX_MOUSE_MOVE: i32 = 3;

/// Clicks stop accumulating at this count.
const MAX_CLICKS: u32 = 3;

//=== SuccessiveClicks ====================================================

#[derive(Debug)]
pub struct SuccessiveClicks {
    double_click_time_ms: u32,
    last_click_time_ms: Option<u32>,
    last_click: (i32, i32),
    last_button: Option<MouseButton>,
    count: u32,
}

impl SuccessiveClicks {
    pub fn new(double_click_time_ms: u32) -> Self {
        Self {
            double_click_time_ms,
            last_click_time_ms: None,
            last_click: (0, 0),
            last_button: None,
            count: 0,
        }
    }

    pub fn double_click_time(&self) -> u32 {
        self.double_click_time_ms
    }

    pub fn set_double_click_time(&mut self, ms: u32) {
        self.double_click_time_ms = ms;
    }

    /// Registers a press and returns the number of successive clicks (1..=3).
    pub fn register(&mut self, button: MouseButton, x: i32, y: i32, now_ms: u32) -> u32 {
        let within_time = self
            .last_click_time_ms
            .is_some_and(|last| now_ms.wrapping_sub(last) < self.double_click_time_ms);

        let within_distance = (self.last_click.0 - x).abs() <= MAX_MOUSE_MOVE
            && (self.last_click.1 - y).abs() <= MAX_MOUSE_MOVE;

        if within_time
            && within_distance
            && self.count < MAX_CLICKS
            && self.last_button == Some(button)
        {
            self.count += 1;
        } else {
            self.count = 1;
        }

        self.last_button = Some(button);
        self.last_click_time_ms = Some(now_ms);
        self.last_click = (x, y);

        self.count
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
