//=========================================================================
// Video Mode List
//=========================================================================
//
// Resolutions and depths reported by the monitors at device start-up,
// plus the desktop mode of the primary monitor. Filled by the platform
// layer; read-only for everyone else.
//
//=========================================================================

/// One display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoMode {
    pub width: u32,
    pub height: u32,
    pub depth: u16,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoModeList {
    modes: Vec<VideoMode>,
    desktop: Option<VideoMode>,
}

impl VideoModeList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mode, ignoring exact duplicates. Modes stay sorted by
    /// width, height, then depth.
    pub fn add_mode(&mut self, mode: VideoMode) {
        if let Err(index) = self.modes.binary_search(&mode) {
            self.modes.insert(index, mode);
        }
    }

    pub fn set_desktop_mode(&mut self, mode: VideoMode) {
        self.desktop = Some(mode);
    }

    pub fn desktop_mode(&self) -> Option<VideoMode> {
        self.desktop
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn modes(&self) -> &[VideoMode] {
        &self.modes
    }

    /// Mode whose size is closest to the request, preferring the
    /// requested depth on ties.
    pub fn closest(&self, width: u32, height: u32, depth: u16) -> Option<VideoMode> {
        self.modes.iter().copied().min_by_key(|mode| {
            let dw = i64::from(mode.width) - i64::from(width);
            let dh = i64::from(mode.height) - i64::from(height);
            (dw * dw + dh * dh, u16::abs_diff(mode.depth, depth))
        })
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, depth: u16) -> VideoMode {
        VideoMode { width, height, depth }
    }

    #[test]
    fn starts_empty() {
        let list = VideoModeList::new();
        assert!(list.is_empty());
        assert!(list.desktop_mode().is_none());
        assert!(list.closest(800, 600, 32).is_none());
    }

    #[test]
    fn modes_are_sorted_and_deduplicated() {
        let mut list = VideoModeList::new();
        list.add_mode(mode(1920, 1080, 32));
        list.add_mode(mode(800, 600, 32));
        list.add_mode(mode(1920, 1080, 32));
        list.add_mode(mode(800, 600, 16));

        assert_eq!(
            list.modes(),
            &[mode(800, 600, 16), mode(800, 600, 32), mode(1920, 1080, 32)]
        );
    }

    #[test]
    fn closest_prefers_size_then_depth() {
        let mut list = VideoModeList::new();
        list.add_mode(mode(800, 600, 16));
        list.add_mode(mode(800, 600, 32));
        list.add_mode(mode(1280, 720, 32));

        assert_eq!(list.closest(810, 590, 32), Some(mode(800, 600, 32)));
        assert_eq!(list.closest(1300, 700, 16), Some(mode(1280, 720, 32)));
    }

    #[test]
    fn desktop_mode_is_stored() {
        let mut list = VideoModeList::new();
        list.set_desktop_mode(mode(2560, 1440, 32));
        assert_eq!(list.desktop_mode(), Some(mode(2560, 1440, 32)));
    }
}
