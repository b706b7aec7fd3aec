//=========================================================================
// Gamepad Backend
//=========================================================================
//
// Joystick support through `gilrs`.
//
// `activate()` opens the gilrs context and enumerates connected gamepads;
// `poll()` is called once per `Device::run()` afterwards and returns one
// `JoystickEvent` per activated gamepad, in activation order.
//
// Axis layout: X/Y = left stick, Z/R = right stick, U/V = left/right
// analog triggers. The d-pad feeds the POV hat and is excluded from the
// button mask.
//
//=========================================================================

//=== External Dependencies ===============================================

use gilrs::{Axis, Button, GamepadId, Gilrs};
use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::error::{DeviceError, Result};
use crate::core::event::JoystickEvent;
use crate::core::joystick::{axis_to_i16, pack_buttons, pov_from_dpad, JoystickInfo, PovHat};

//=== Constants ===========================================================

/// Joystick indices are reported as `u8`.
const MAX_JOYSTICKS: usize = 256;

const AXES: [Axis; JoystickEvent::NUMBER_OF_AXES] = [
    Axis::LeftStickX,
    Axis::LeftStickY,
    Axis::RightStickX,
    Axis::RightStickY,
    Axis::LeftZ,
    Axis::RightZ,
];

const BUTTONS: [Button; 15] = [
    Button::South,
    Button::East,
    Button::North,
    Button::West,
    Button::C,
    Button::Z,
    Button::LeftTrigger,
    Button::RightTrigger,
    Button::LeftTrigger2,
    Button::RightTrigger2,
    Button::Select,
    Button::Start,
    Button::Mode,
    Button::LeftThumb,
    Button::RightThumb,
];

const DPAD: [Button; 4] = [Button::DPadUp, Button::DPadDown, Button::DPadLeft, Button::DPadRight];

//=== JoystickManager =====================================================

pub(crate) struct JoystickManager {
    gilrs: Gilrs,
    active: Vec<GamepadId>,
}

impl JoystickManager {
    /// Opens the gamepad backend and enumerates connected gamepads.
    pub(crate) fn activate() -> Result<(Self, Vec<JoystickInfo>)> {
        let gilrs = Gilrs::new().map_err(|e| DeviceError::Joystick(e.to_string()))?;

        let mut active = Vec::new();
        let mut infos = Vec::new();

        for (id, gamepad) in gilrs.gamepads().take(MAX_JOYSTICKS) {
            let index = active.len() as u8;

            let axes = AXES.iter().filter(|a| gamepad.axis_code(**a).is_some()).count() as u32;
            let buttons = BUTTONS.iter().filter(|b| gamepad.button_code(**b).is_some()).count() as u32;
            let pov_hat = if DPAD.iter().any(|b| gamepad.button_code(*b).is_some())
                || gamepad.axis_code(Axis::DPadX).is_some()
            {
                PovHat::Present
            } else {
                PovHat::Absent
            };

            info!(
                target: "device::joystick",
                "Found joystick {}: '{}' ({} axes, {} buttons, hat {})",
                index,
                gamepad.name(),
                axes,
                buttons,
                if pov_hat == PovHat::Present { "present" } else { "absent" }
            );

            infos.push(JoystickInfo {
                joystick: index,
                name: gamepad.name().to_owned(),
                axes,
                buttons,
                pov_hat,
            });
            active.push(id);
        }

        if infos.is_empty() {
            warn!(target: "device::joystick", "Joystick support active but no joysticks found");
        }

        Ok((Self { gilrs, active }, infos))
    }

    /// Current state of every activated gamepad.
    pub(crate) fn poll(&mut self) -> Vec<JoystickEvent> {
        // gilrs updates cached gamepad state only while its queue is drained.
        while let Some(event) = self.gilrs.next_event() {
            debug!(target: "device::joystick", "Gamepad {:?}: {:?}", event.id, event.event);
        }

        self.active
            .iter()
            .enumerate()
            .map(|(index, id)| {
                let gamepad = self.gilrs.gamepad(*id);
                snapshot(
                    index as u8,
                    |axis| gamepad.value(axis),
                    |button| gamepad.button_code(button).is_some(),
                    |button| gamepad.is_pressed(button),
                )
            })
            .collect()
    }
}

//=== Internal Helpers ====================================================

fn snapshot(
    joystick: u8,
    axis_value: impl Fn(Axis) -> f32,
    has_button: impl Fn(Button) -> bool,
    is_pressed: impl Fn(Button) -> bool,
) -> JoystickEvent {
    let axis = AXES.map(|a| axis_to_i16(axis_value(a)));

    let button_states = pack_buttons(
        BUTTONS
            .iter()
            .filter(|b| has_button(**b))
            .map(|b| is_pressed(*b)),
    );

    let [up, down, left, right] = DPAD.map(&is_pressed);

    JoystickEvent {
        joystick,
        button_states,
        axis,
        pov: pov_from_dpad(up, down, left, right),
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_gamepad() {
        let event = snapshot(0, |_| 0.0, |_| true, |_| false);

        assert_eq!(event.button_states, 0);
        assert_eq!(event.axis, [0; 6]);
        assert_eq!(event.pov, JoystickEvent::POV_CENTERED);
    }

    #[test]
    fn axes_follow_stick_then_trigger_layout() {
        let event = snapshot(
            1,
            |axis| match axis {
                Axis::LeftStickX => 1.0,
                Axis::RightStickY => -1.0,
                Axis::RightZ => 0.5,
                _ => 0.0,
            },
            |_| true,
            |_| false,
        );

        assert_eq!(event.joystick, 1);
        assert_eq!(event.axis[JoystickEvent::AXIS_X], 32767);
        assert_eq!(event.axis[JoystickEvent::AXIS_R], -32767);
        assert_eq!(event.axis[JoystickEvent::AXIS_V], 16384);
    }

    #[test]
    fn missing_buttons_do_not_take_bits() {
        // Gamepad without C/Z: East must still be bit 1, North bit 2.
        let event = snapshot(
            0,
            |_| 0.0,
            |button| !matches!(button, Button::C | Button::Z),
            |button| matches!(button, Button::LeftTrigger),
        );

        assert!(event.is_button_pressed(4));
        assert_eq!(event.button_states.count_ones(), 1);
    }

    #[test]
    fn dpad_drives_pov_not_buttons() {
        let event = snapshot(
            0,
            |_| 0.0,
            |_| true,
            |button| matches!(button, Button::DPadDown | Button::DPadRight),
        );

        assert_eq!(event.pov, 13500);
        assert_eq!(event.button_states, 0);
    }
}
