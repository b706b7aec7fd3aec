//=========================================================================
// Joystick Types
//=========================================================================
//
// Backend-neutral joystick description and the conversions that turn a
// backend's readings into a `JoystickEvent`: axis scaling, button packing,
// and d-pad to POV-hat angle.
//
//=========================================================================

use super::event::JoystickEvent;

//=== JoystickInfo ========================================================

/// Whether the joystick reports a POV hat (d-pad).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PovHat {
    Present,
    Absent,
}

/// Description of one activated joystick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoystickInfo {
    /// Index used in [`JoystickEvent::joystick`].
    pub joystick: u8,
    pub name: String,
    pub axes: u32,
    pub buttons: u32,
    pub pov_hat: PovHat,
}

//=== Conversions =========================================================

/// Scales a normalized axis reading (-1..1) to `-32767..=32767`.
pub fn axis_to_i16(value: f32) -> i16 {
    if value.is_nan() {
        return 0;
    }
    (value.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16
}

/// Packs button states into a bitmask; buttons past the 32nd are dropped.
pub fn pack_buttons<I>(pressed: I) -> u32
where
    I: IntoIterator<Item = bool>,
{
    pressed
        .into_iter()
        .take(JoystickEvent::NUMBER_OF_BUTTONS)
        .enumerate()
        .fold(0, |mask, (i, down)| if down { mask | (1 << i) } else { mask })
}

/// Converts d-pad buttons to a POV angle in hundredths of a degree,
/// clockwise from up. Opposing directions cancel out.
pub fn pov_from_dpad(up: bool, down: bool, left: bool, right: bool) -> u16 {
    let vertical = i8::from(up) - i8::from(down);
    let horizontal = i8::from(right) - i8::from(left);

    match (vertical, horizontal) {
        (1, 0) => 0,
        (1, 1) => 4500,
        (0, 1) => 9000,
        (-1, 1) => 13500,
        (-1, 0) => 18000,
        (-1, -1) => 22500,
        (0, -1) => 27000,
        (1, -1) => 31500,
        _ => JoystickEvent::POV_CENTERED,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_scaling() {
        assert_eq!(axis_to_i16(0.0), 0);
        assert_eq!(axis_to_i16(1.0), 32767);
        assert_eq!(axis_to_i16(-1.0), -32767);
        assert_eq!(axis_to_i16(0.5), 16384);
    }

    #[test]
    fn axis_out_of_range_is_clamped() {
        assert_eq!(axis_to_i16(3.0), 32767);
        assert_eq!(axis_to_i16(-3.0), -32767);
        assert_eq!(axis_to_i16(f32::NAN), 0);
    }

    #[test]
    fn buttons_pack_in_order() {
        assert_eq!(pack_buttons([true, false, true]), 0b101);
        assert_eq!(pack_buttons(std::iter::empty()), 0);
    }

    #[test]
    fn buttons_beyond_32_are_dropped() {
        let mask = pack_buttons(std::iter::repeat(true).take(40));
        assert_eq!(mask, u32::MAX);
    }

    #[test]
    fn pov_cardinal_directions() {
        assert_eq!(pov_from_dpad(true, false, false, false), 0);
        assert_eq!(pov_from_dpad(false, false, false, true), 9000);
        assert_eq!(pov_from_dpad(false, true, false, false), 18000);
        assert_eq!(pov_from_dpad(false, false, true, false), 27000);
    }

    #[test]
    fn pov_diagonals() {
        assert_eq!(pov_from_dpad(true, false, false, true), 4500);
        assert_eq!(pov_from_dpad(false, true, false, true), 13500);
        assert_eq!(pov_from_dpad(false, true, true, false), 22500);
        assert_eq!(pov_from_dpad(true, false, true, false), 31500);
    }

    #[test]
    fn pov_centered_and_cancelled() {
        assert_eq!(pov_from_dpad(false, false, false, false), JoystickEvent::POV_CENTERED);
        assert_eq!(pov_from_dpad(true, true, false, false), JoystickEvent::POV_CENTERED);
        assert_eq!(pov_from_dpad(true, true, true, true), JoystickEvent::POV_CENTERED);
    }
}
