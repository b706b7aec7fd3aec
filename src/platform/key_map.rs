//=========================================================================
// Key Map
//=========================================================================
//
// Static table translating winit physical key codes into engine key codes.
//
// The table is a flat slice so it reads as the reference it is; `KeyMap`
// indexes it once at device start-up. Physical keys give layout-independent
// positions: the punctuation entries name the key at that position on a US
// layout.
//
// Keys missing from the table map to `KeyCode::Unidentified`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

use log::debug;
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

//=== Internal Dependencies ===============================================

use crate::core::keycode::KeyCode;

//=== Table ===============================================================

pub(crate) static KEY_TABLE: &[(WinitKeyCode, KeyCode)] = &[
    //--- Editing / Control ------------------------------------------------
    (WinitKeyCode::Backspace, KeyCode::Backspace),
    (WinitKeyCode::Tab, KeyCode::Tab),
    (WinitKeyCode::NumpadClear, KeyCode::Clear),
    (WinitKeyCode::Enter, KeyCode::Enter),
    (WinitKeyCode::NumpadEnter, KeyCode::Enter),
    (WinitKeyCode::Pause, KeyCode::Pause),
    (WinitKeyCode::CapsLock, KeyCode::CapsLock),
    (WinitKeyCode::Escape, KeyCode::Escape),
    (WinitKeyCode::Space, KeyCode::Space),

    //--- Navigation -------------------------------------------------------
    (WinitKeyCode::PageUp, KeyCode::PageUp),
    (WinitKeyCode::PageDown, KeyCode::PageDown),
    (WinitKeyCode::End, KeyCode::End),
    (WinitKeyCode::Home, KeyCode::Home),
    (WinitKeyCode::ArrowLeft, KeyCode::ArrowLeft),
    (WinitKeyCode::ArrowUp, KeyCode::ArrowUp),
    (WinitKeyCode::ArrowRight, KeyCode::ArrowRight),
    (WinitKeyCode::ArrowDown, KeyCode::ArrowDown),
    (WinitKeyCode::PrintScreen, KeyCode::PrintScreen),
    (WinitKeyCode::Insert, KeyCode::Insert),
    (WinitKeyCode::Delete, KeyCode::Delete),
    (WinitKeyCode::Help, KeyCode::Help),

    //--- Digits -----------------------------------------------------------
    (WinitKeyCode::Digit0, KeyCode::Digit0),
    (WinitKeyCode::Digit1, KeyCode::Digit1),
    (WinitKeyCode::Digit2, KeyCode::Digit2),
    (WinitKeyCode::Digit3, KeyCode::Digit3),
    (WinitKeyCode::Digit4, KeyCode::Digit4),
    (WinitKeyCode::Digit5, KeyCode::Digit5),
    (WinitKeyCode::Digit6, KeyCode::Digit6),
    (WinitKeyCode::Digit7, KeyCode::Digit7),
    (WinitKeyCode::Digit8, KeyCode::Digit8),
    (WinitKeyCode::Digit9, KeyCode::Digit9),

    //--- Letters ----------------------------------------------------------
    (WinitKeyCode::KeyA, KeyCode::KeyA),
    (WinitKeyCode::KeyB, KeyCode::KeyB),
    (WinitKeyCode::KeyC, KeyCode::KeyC),
    (WinitKeyCode::KeyD, KeyCode::KeyD),
    (WinitKeyCode::KeyE, KeyCode::KeyE),
    (WinitKeyCode::KeyF, KeyCode::KeyF),
    (WinitKeyCode::KeyG, KeyCode::KeyG),
    (WinitKeyCode::KeyH, KeyCode::KeyH),
    (WinitKeyCode::KeyI, KeyCode::KeyI),
    (WinitKeyCode::KeyJ, KeyCode::KeyJ),
    (WinitKeyCode::KeyK, KeyCode::KeyK),
    (WinitKeyCode::KeyL, KeyCode::KeyL),
    (WinitKeyCode::KeyM, KeyCode::KeyM),
    (WinitKeyCode::KeyN, KeyCode::KeyN),
    (WinitKeyCode::KeyO, KeyCode::KeyO),
    (WinitKeyCode::KeyP, KeyCode::KeyP),
    (WinitKeyCode::KeyQ, KeyCode::KeyQ),
    (WinitKeyCode::KeyR, KeyCode::KeyR),
    (WinitKeyCode::KeyS, KeyCode::KeyS),
    (WinitKeyCode::KeyT, KeyCode::KeyT),
    (WinitKeyCode::KeyU, KeyCode::KeyU),
    (WinitKeyCode::KeyV, KeyCode::KeyV),
    (WinitKeyCode::KeyW, KeyCode::KeyW),
    (WinitKeyCode::KeyX, KeyCode::KeyX),
    (WinitKeyCode::KeyY, KeyCode::KeyY),
    (WinitKeyCode::KeyZ, KeyCode::KeyZ),

    //--- System -----------------------------------------------------------
    (WinitKeyCode::SuperLeft, KeyCode::SuperLeft),
    (WinitKeyCode::SuperRight, KeyCode::SuperRight),
    (WinitKeyCode::ContextMenu, KeyCode::Apps),
    (WinitKeyCode::Sleep, KeyCode::Sleep),
    (WinitKeyCode::Power, KeyCode::Sleep),

    //--- Numpad -----------------------------------------------------------
    (WinitKeyCode::Numpad0, KeyCode::Numpad0),
    (WinitKeyCode::Numpad1, KeyCode::Numpad1),
    (WinitKeyCode::Numpad2, KeyCode::Numpad2),
    (WinitKeyCode::Numpad3, KeyCode::Numpad3),
    (WinitKeyCode::Numpad4, KeyCode::Numpad4),
    (WinitKeyCode::Numpad5, KeyCode::Numpad5),
    (WinitKeyCode::Numpad6, KeyCode::Numpad6),
    (WinitKeyCode::Numpad7, KeyCode::Numpad7),
    (WinitKeyCode::Numpad8, KeyCode::Numpad8),
    (WinitKeyCode::Numpad9, KeyCode::Numpad9),
    (WinitKeyCode::NumpadMultiply, KeyCode::NumpadMultiply),
    (WinitKeyCode::NumpadAdd, KeyCode::NumpadAdd),
    (WinitKeyCode::NumpadComma, KeyCode::NumpadSeparator),
    (WinitKeyCode::NumpadSubtract, KeyCode::NumpadSubtract),
    (WinitKeyCode::NumpadDecimal, KeyCode::NumpadDecimal),
    (WinitKeyCode::NumpadDivide, KeyCode::NumpadDivide),

    //--- Function Keys ----------------------------------------------------
    (WinitKeyCode::F1, KeyCode::F1),
    (WinitKeyCode::F2, KeyCode::F2),
    (WinitKeyCode::F3, KeyCode::F3),
    (WinitKeyCode::F4, KeyCode::F4),
    (WinitKeyCode::F5, KeyCode::F5),
    (WinitKeyCode::F6, KeyCode::F6),
    (WinitKeyCode::F7, KeyCode::F7),
    (WinitKeyCode::F8, KeyCode::F8),
    (WinitKeyCode::F9, KeyCode::F9),
    (WinitKeyCode::F10, KeyCode::F10),
    (WinitKeyCode::F11, KeyCode::F11),
    (WinitKeyCode::F12, KeyCode::F12),
    (WinitKeyCode::F13, KeyCode::F13),
    (WinitKeyCode::F14, KeyCode::F14),
    (WinitKeyCode::F15, KeyCode::F15),
    (WinitKeyCode::F16, KeyCode::F16),
    (WinitKeyCode::F17, KeyCode::F17),
    (WinitKeyCode::F18, KeyCode::F18),
    (WinitKeyCode::F19, KeyCode::F19),
    (WinitKeyCode::F20, KeyCode::F20),
    (WinitKeyCode::F21, KeyCode::F21),
    (WinitKeyCode::F22, KeyCode::F22),
    (WinitKeyCode::F23, KeyCode::F23),
    (WinitKeyCode::F24, KeyCode::F24),

    //--- Locks ------------------------------------------------------------
    (WinitKeyCode::NumLock, KeyCode::NumLock),
    (WinitKeyCode::ScrollLock, KeyCode::ScrollLock),

    //--- Modifiers --------------------------------------------------------
    (WinitKeyCode::ShiftLeft, KeyCode::ShiftLeft),
    (WinitKeyCode::ShiftRight, KeyCode::ShiftRight),
    (WinitKeyCode::ControlLeft, KeyCode::ControlLeft),
    (WinitKeyCode::ControlRight, KeyCode::ControlRight),
    (WinitKeyCode::AltLeft, KeyCode::AltLeft),
    (WinitKeyCode::AltRight, KeyCode::AltRight),

    //--- Punctuation ------------------------------------------------------
    (WinitKeyCode::Semicolon, KeyCode::Semicolon),
    (WinitKeyCode::Equal, KeyCode::Plus),
    (WinitKeyCode::Comma, KeyCode::Comma),
    (WinitKeyCode::Minus, KeyCode::Minus),
    (WinitKeyCode::Period, KeyCode::Period),
    (WinitKeyCode::Slash, KeyCode::Slash),
    (WinitKeyCode::Backquote, KeyCode::Backquote),
    (WinitKeyCode::BracketLeft, KeyCode::BracketLeft),
    (WinitKeyCode::Backslash, KeyCode::Backslash),
    (WinitKeyCode::BracketRight, KeyCode::BracketRight),
    (WinitKeyCode::Quote, KeyCode::Quote),
];

//=== KeyMap ==============================================================

/// Index over [`KEY_TABLE`].
pub(crate) struct KeyMap {
    index: HashMap<WinitKeyCode, KeyCode>,
}

impl KeyMap {
    pub(crate) fn new() -> Self {
        let index: HashMap<_, _> = KEY_TABLE.iter().copied().collect();
        debug!(target: "device::input", "Key map built with {} entries", index.len());
        Self { index }
    }

    /// Engine key for a winit physical key; `Unidentified` if unmapped.
    pub(crate) fn lookup(&self, key: PhysicalKey) -> KeyCode {
        match key {
            PhysicalKey::Code(code) => self.index.get(&code).copied().unwrap_or(KeyCode::Unidentified),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn table_sources_are_unique() {
        let mut seen = HashSet::new();
        for (source, _) in KEY_TABLE {
            assert!(seen.insert(*source), "{:?} appears twice in the key table", source);
        }
        assert_eq!(KeyMap::new().len(), KEY_TABLE.len());
    }

    #[test]
    fn table_has_no_unidentified_targets() {
        assert!(KEY_TABLE.iter().all(|(_, target)| *target != KeyCode::Unidentified));
    }

    #[test]
    fn letters_digits_and_arrows() {
        let map = KeyMap::new();
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::KeyW)), KeyCode::KeyW);
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::Digit7)), KeyCode::Digit7);
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::ArrowUp)), KeyCode::ArrowUp);
    }

    #[test]
    fn both_enter_keys_map_to_enter() {
        let map = KeyMap::new();
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::Enter)), KeyCode::Enter);
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::NumpadEnter)), KeyCode::Enter);
    }

    #[test]
    fn sided_modifiers() {
        let map = KeyMap::new();
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::ShiftRight)), KeyCode::ShiftRight);
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::AltLeft)), KeyCode::AltLeft);
    }

    #[test]
    fn equal_key_is_plus() {
        let map = KeyMap::new();
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::Equal)), KeyCode::Plus);
    }

    #[test]
    fn unmapped_keys_are_unidentified() {
        let map = KeyMap::new();
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::F35)), KeyCode::Unidentified);
        assert_eq!(map.lookup(PhysicalKey::Code(WinitKeyCode::MediaPlayPause)), KeyCode::Unidentified);
        assert_eq!(
            map.lookup(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::Unidentified
        );
    }
}
