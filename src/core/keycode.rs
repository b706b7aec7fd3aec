//=========================================================================
// Key Codes
//
// Engine-side virtual key codes.
//
// Values follow the Win32 virtual-key numbering so that codes stay stable
// across backends and can be stored in save files or binding tables as a
// plain `u8`. The platform key map translates windowing-library keys into
// these values.
//
//=========================================================================

//=== KeyCode =============================================================

/// Virtual key identifier.
///
/// `Unidentified` (0) is produced for keys the key map does not know. Such
/// events are still delivered so that their character text is not lost.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// Key not covered by the key map.
    Unidentified = 0x00,

    //--- Editing / Control ------------------------------------------------
    Backspace = 0x08,
    Tab = 0x09,
    Clear = 0x0C,
    Enter = 0x0D,
    Shift = 0x10,
    Control = 0x11,
    Menu = 0x12,
    Pause = 0x13,
    CapsLock = 0x14,
    Escape = 0x1B,
    Space = 0x20,

    //--- Navigation -------------------------------------------------------
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    ArrowLeft = 0x25,
    ArrowUp = 0x26,
    ArrowRight = 0x27,
    ArrowDown = 0x28,
    Select = 0x29,
    Print = 0x2A,
    Execute = 0x2B,
    PrintScreen = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,
    Help = 0x2F,

    //--- Digits -----------------------------------------------------------
    Digit0 = 0x30, Digit1 = 0x31, Digit2 = 0x32, Digit3 = 0x33, Digit4 = 0x34,
    Digit5 = 0x35, Digit6 = 0x36, Digit7 = 0x37, Digit8 = 0x38, Digit9 = 0x39,

    //--- Letters ----------------------------------------------------------
    KeyA = 0x41, KeyB = 0x42, KeyC = 0x43, KeyD = 0x44, KeyE = 0x45,
    KeyF = 0x46, KeyG = 0x47, KeyH = 0x48, KeyI = 0x49, KeyJ = 0x4A,
    KeyK = 0x4B, KeyL = 0x4C, KeyM = 0x4D, KeyN = 0x4E, KeyO = 0x4F,
    KeyP = 0x50, KeyQ = 0x51, KeyR = 0x52, KeyS = 0x53, KeyT = 0x54,
    KeyU = 0x55, KeyV = 0x56, KeyW = 0x57, KeyX = 0x58, KeyY = 0x59,
    KeyZ = 0x5A,

    //--- System -----------------------------------------------------------
    SuperLeft = 0x5B,
    SuperRight = 0x5C,
    Apps = 0x5D,
    Sleep = 0x5F,

    //--- Numpad -----------------------------------------------------------
    Numpad0 = 0x60, Numpad1 = 0x61, Numpad2 = 0x62, Numpad3 = 0x63, Numpad4 = 0x64,
    Numpad5 = 0x65, Numpad6 = 0x66, Numpad7 = 0x67, Numpad8 = 0x68, Numpad9 = 0x69,
    NumpadMultiply = 0x6A,
    NumpadAdd = 0x6B,
    NumpadSeparator = 0x6C,
    NumpadSubtract = 0x6D,
    NumpadDecimal = 0x6E,
    NumpadDivide = 0x6F,

    //--- Function Keys ----------------------------------------------------
    F1 = 0x70, F2 = 0x71, F3 = 0x72, F4 = 0x73, F5 = 0x74, F6 = 0x75,
    F7 = 0x76, F8 = 0x77, F9 = 0x78, F10 = 0x79, F11 = 0x7A, F12 = 0x7B,
    F13 = 0x7C, F14 = 0x7D, F15 = 0x7E, F16 = 0x7F, F17 = 0x80, F18 = 0x81,
    F19 = 0x82, F20 = 0x83, F21 = 0x84, F22 = 0x85, F23 = 0x86, F24 = 0x87,

    //--- Locks ------------------------------------------------------------
    NumLock = 0x90,
    ScrollLock = 0x91,

    //--- Sided Modifiers --------------------------------------------------
    ShiftLeft = 0xA0,
    ShiftRight = 0xA1,
    ControlLeft = 0xA2,
    ControlRight = 0xA3,
    AltLeft = 0xA4,
    AltRight = 0xA5,

    //--- Punctuation (US layout positions) --------------------------------
    Semicolon = 0xBA,
    Plus = 0xBB,
    Comma = 0xBC,
    Minus = 0xBD,
    Period = 0xBE,
    Slash = 0xBF,
    Backquote = 0xC0,
    BracketLeft = 0xDB,
    Backslash = 0xDC,
    BracketRight = 0xDD,
    Quote = 0xDE,
}

impl KeyCode {
    /// Returns the raw virtual-key value.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns `true` for the sided and unsided modifier keys.
    pub const fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::Shift
                | Self::Control
                | Self::Menu
                | Self::ShiftLeft
                | Self::ShiftRight
                | Self::ControlLeft
                | Self::ControlRight
                | Self::AltLeft
                | Self::AltRight
        )
    }
}

impl Default for KeyCode {
    fn default() -> Self {
        Self::Unidentified
    }
}

impl From<KeyCode> for u8 {
    fn from(key: KeyCode) -> Self {
        key.code()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
