//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level window and events) with the device core.
//
// Architecture:
// ```text
//  Device::run()
//  ┌───────────────────────────────────────────────┐
//  │  pump_app_events(timeout = 0)                 │
//  │   ↓                                           │
//  │  Platform (ApplicationHandler)                │
//  │   ├─ EventTranslator: winit → Event           │
//  │   │   └─ updates WindowState                  │
//  │   └─ Sender<PlatformEvent> ───────┐           │
//  │                                   ↓           │
//  │  EventRouter::route_pending() → receivers     │
//  └───────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **Pump, don't run**: the application owns the frame loop, so winit is
//   pumped once per `Device::run()` instead of taking over the thread
// - **Sticky modifiers**: modifier state persists across events until
//   explicitly changed
// - **Graceful channel disconnect**: if the core side is gone the platform
//   logs a warning and keeps the window responsive
// - **Main thread requirement**: winit mandates the main thread on macOS,
//   so the device must be built and run on the main thread
//
// Responsibilities:
// - Create the OS window and report monitors and their video modes
// - Convert winit types to engine events
// - Window control (caption, resizable, minimize/maximize/restore)
// - Present CPU-side images through a lazily created software surface
//
//=========================================================================

//=== Submodules ==========================================================

mod event_translator;
mod gamepad;
mod key_map;
mod presenter;

pub(crate) use gamepad::JoystickManager;

//=== External Crates =====================================================

use std::rc::Rc;
use std::time::Duration;

use crossbeam_channel::Sender;
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Fullscreen, Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::CreationParams;
use crate::core::cursor::CursorControl;
use crate::core::error::{DeviceError, Result};
use crate::core::platform_bridge::PlatformEvent;
use crate::core::video::{VideoMode, VideoModeList};
use crate::core::window_state::WindowState;
use event_translator::EventTranslator;
use presenter::Presenter;

//=== Platform ============================================================

/// Window owner and winit event translator.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(params, sender)`, no window yet
/// 2. **Start-up**: the device pumps until `resumed()` created the window
/// 3. **Frames**: each `Device::run()` pumps once with a zero timeout
/// 4. **Shutdown**: close request → `PlatformEvent::CloseRequested`
///
/// With the null driver the platform is never pumped and never gets a
/// window; it then only carries the window state.
pub(crate) struct Platform {
    /// OS window handle (None until `resumed()` called). Shared with the
    /// presenter's surface.
    window: Option<Rc<Window>>,

    /// Created by the first `present()`.
    presenter: Option<Presenter>,

    params: CreationParams,

    translator: EventTranslator,

    event_sender: Sender<PlatformEvent>,

    video_modes: VideoModeList,

    /// Set when `resumed()` failed to create the window.
    creation_error: Option<String>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(params: CreationParams, event_sender: Sender<PlatformEvent>) -> Self {
        let (width, height) = params.window_size;
        let translator = EventTranslator::new(width, height, params.resizable);

        Self {
            window: None,
            presenter: None,
            params,
            translator,
            event_sender,
            video_modes: VideoModeList::new(),
            creation_error: None,
        }
    }

    //--- Event Loop -------------------------------------------------------

    /// Processes pending OS events, waiting at most `timeout`.
    pub(crate) fn pump(&mut self, event_loop: &mut EventLoop<()>, timeout: Duration) -> PumpStatus {
        event_loop.pump_app_events(Some(timeout), self)
    }

    pub(crate) fn take_creation_error(&mut self) -> Option<String> {
        self.creation_error.take()
    }

    //--- Accessors --------------------------------------------------------

    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_deref()
    }

    pub(crate) fn state(&self) -> &WindowState {
        self.translator.state()
    }

    pub(crate) fn video_modes(&self) -> &VideoModeList {
        &self.video_modes
    }

    pub(crate) fn cursor_control(&mut self) -> CursorControl<'_> {
        CursorControl::new(self.window.as_deref(), self.translator.state_mut())
    }

    //--- Window Control ---------------------------------------------------

    pub(crate) fn set_caption(&mut self, caption: &str) {
        self.params.window_title = caption.to_owned();
        if let Some(window) = &self.window {
            window.set_title(caption);
        }
    }

    pub(crate) fn set_resizable(&mut self, resizable: bool) {
        if self.translator.state().resizable == resizable {
            return;
        }
        self.translator.state_mut().resizable = resizable;
        if let Some(window) = &self.window {
            window.set_resizable(resizable);
        }
    }

    pub(crate) fn minimize(&mut self) {
        if let Some(window) = &self.window {
            window.set_minimized(true);
        }
    }

    pub(crate) fn maximize(&mut self) {
        if let Some(window) = &self.window {
            window.set_minimized(false);
            window.set_maximized(true);
        }
    }

    pub(crate) fn restore(&mut self) {
        if let Some(window) = &self.window {
            window.set_minimized(false);
            window.set_maximized(false);
        }
    }

    pub(crate) fn window_position(&self) -> Option<(i32, i32)> {
        let window = self.window.as_ref()?;
        match window.outer_position() {
            Ok(position) => Some((position.x, position.y)),
            Err(e) => {
                debug!(target: "device", "Window position unavailable: {}", e);
                None
            }
        }
    }

    //--- Presenting -------------------------------------------------------

    /// Shows a `width` x `height` 0xAARRGGBB image stretched over the
    /// client area.
    pub(crate) fn present(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<()> {
        check_image(pixels.len(), width, height)?;
        let Some(window) = self.window.as_ref() else {
            return Err(DeviceError::NoWindow);
        };
        if self.translator.state().minimized {
            return Ok(());
        }

        if self.presenter.is_none() {
            self.presenter = Some(Presenter::new(window)?);
        }
        let target = window.inner_size();
        match self.presenter.as_mut() {
            Some(presenter) => presenter.present(pixels, width, height, (target.width, target.height)),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn send(&self, event: PlatformEvent) {
        if self.event_sender.send(event).is_err() {
            warn!(target: "device::input", "Channel disconnected, dropping {:?}", event);
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        let (width, height) = self.params.window_size;
        let mut attrs = WindowAttributes::default()
            .with_title(self.params.window_title.clone())
            .with_inner_size(PhysicalSize::new(width, height))
            .with_resizable(self.params.resizable);

        if self.params.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }
        attrs
    }

    /// Logs every monitor's modes and records them in the mode list.
    fn collect_video_modes(&mut self, event_loop: &ActiveEventLoop) {
        let monitors: Vec<_> = event_loop.available_monitors().collect();
        info!(target: "device::video", "Found {} monitor(s)", monitors.len());

        for (index, monitor) in monitors.iter().enumerate() {
            let name = monitor.name().unwrap_or_else(|| "unnamed".to_owned());
            let mut count = 0usize;

            for mode in monitor.video_modes() {
                let size = mode.size();
                debug!(
                    target: "device::video",
                    "Monitor {} ({}): {}x{} {}bpp @ {} mHz",
                    index,
                    name,
                    size.width,
                    size.height,
                    mode.bit_depth(),
                    mode.refresh_rate_millihertz()
                );
                self.video_modes.add_mode(VideoMode {
                    width: size.width,
                    height: size.height,
                    depth: mode.bit_depth(),
                });
                count += 1;
            }
            debug!(target: "device::video", "Monitor {} ({}) offers {} modes", index, name, count);
        }

        let desktop = event_loop
            .primary_monitor()
            .or_else(|| monitors.first().cloned());
        if let Some(monitor) = desktop {
            let size = monitor.size();
            self.video_modes.set_desktop_mode(VideoMode {
                width: size.width,
                height: size.height,
                depth: u16::from(self.params.bits),
            });
        }
    }
}

/// Non-empty image whose pixel count matches its dimensions.
fn check_image(len: usize, width: u32, height: u32) -> Result<()> {
    let expected = width as usize * height as usize;
    if expected == 0 || len != expected {
        return Err(DeviceError::InvalidImage { width, height, len });
    }
    Ok(())
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on the first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "device", "Window already exists (resume after suspend)");
            return;
        }

        self.collect_video_modes(event_loop);

        match event_loop.create_window(self.window_attributes()) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    target: "device",
                    "Window created: {}x{} @ {}x DPI{}",
                    size.width,
                    size.height,
                    window.scale_factor(),
                    if self.params.fullscreen { " (fullscreen)" } else { "" }
                );
                // Fullscreen or a tiling WM may not honour the requested size.
                if let Some(event) = self.translator.resized(size.width, size.height) {
                    self.send(event);
                }
                self.window = Some(Rc::new(window));
            }
            Err(e) => {
                error!(target: "device", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "device", "Window close requested");
                self.send(PlatformEvent::CloseRequested);
            }

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "device::input", "Modifiers changed: {:?}", state);
                self.translator.update_modifiers(state.state());
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.translator.translate_cursor_moved(position.x, position.y);
                self.send(PlatformEvent::Input(event));
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(event) = self.translator.translate_mouse_button(button, state) {
                    self.send(PlatformEvent::Input(event));
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let event = self.translator.translate_wheel(delta);
                self.send(PlatformEvent::Input(event));
            }

            WindowEvent::KeyboardInput { event: key_event, is_synthetic, .. } => {
                if is_synthetic {
                    trace!(target: "device::input", "Synthetic key event ignored");
                    return;
                }
                let event = self.translator.translate_key(
                    key_event.physical_key,
                    key_event.state,
                    key_event.text.as_deref(),
                );
                self.send(PlatformEvent::Input(event));
            }

            WindowEvent::Touch(touch) => {
                let events = self.translator.translate_touch(
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                    touch.id,
                );
                let [touch, emulated] = events;
                self.send(PlatformEvent::Input(touch));
                self.send(PlatformEvent::EmulatedInput(emulated));
            }

            WindowEvent::Focused(focused) => {
                debug!(target: "device", "Focus {}", if focused { "gained" } else { "lost" });
                self.translator.focus(focused);
            }

            WindowEvent::Occluded(occluded) => {
                debug!(target: "device", "Window occluded: {}", occluded);
                self.translator.occluded(occluded);
            }

            WindowEvent::Resized(size) => {
                if let Some(event) = self.translator.resized(size.width, size.height) {
                    debug!(target: "device", "Window resized to {}x{}", size.width, size.height);
                    self.send(event);
                }
            }

            _ => {}
        }
    }

    /// Refreshes the minimized flag where the OS reports it directly.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let minimized = self.window.as_deref().and_then(Window::is_minimized);
        self.translator.os_minimized(minimized);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    fn platform() -> (Platform, crossbeam_channel::Receiver<PlatformEvent>) {
        let (tx, rx) = unbounded();
        let params = CreationParams {
            window_size: (640, 480),
            ..CreationParams::default()
        };
        (Platform::new(params, tx), rx)
    }

    #[test]
    fn platform_creation() {
        let (platform, _rx) = platform();
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert_eq!((platform.state().width, platform.state().height), (640, 480));
        assert!(platform.video_modes().is_empty());
    }

    #[test]
    fn send_handles_disconnected_channel() {
        let (platform, rx) = platform();
        drop(rx);

        // Should not panic, just log warning
        platform.send(PlatformEvent::CloseRequested);
    }

    #[test]
    fn window_control_without_window() {
        let (mut platform, _rx) = platform();

        platform.set_caption("Renamed");
        platform.minimize();
        platform.maximize();
        platform.restore();

        assert_eq!(platform.params.window_title, "Renamed");
        assert_eq!(platform.window_position(), None);
    }

    #[test]
    fn set_resizable_updates_state() {
        let (mut platform, _rx) = platform();
        assert!(!platform.state().resizable);

        platform.set_resizable(true);
        assert!(platform.state().resizable);
    }

    #[test]
    fn fullscreen_attributes() {
        let (tx, _rx) = unbounded();
        let params = CreationParams {
            fullscreen: true,
            ..CreationParams::default()
        };
        let platform = Platform::new(params, tx);

        let attrs = platform.window_attributes();
        assert!(matches!(attrs.fullscreen, Some(Fullscreen::Borderless(None))));
        assert_eq!(attrs.title, "Aetheric Device");
    }

    #[test]
    fn cursor_control_tracks_state() {
        let (mut platform, _rx) = platform();
        platform.cursor_control().set_position(10, 20);

        assert_eq!((platform.state().mouse_x, platform.state().mouse_y), (10, 20));
    }

    #[test]
    fn present_without_window() {
        let (mut platform, _rx) = platform();
        let pixels = vec![0u32; 4 * 3];

        assert!(matches!(platform.present(&pixels, 4, 3), Err(DeviceError::NoWindow)));
    }

    #[test]
    fn present_rejects_mismatched_image() {
        let (mut platform, _rx) = platform();
        let pixels = vec![0u32; 10];

        let err = platform.present(&pixels, 4, 3).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidImage { width: 4, height: 3, len: 10 }));

        let err = platform.present(&[], 0, 0).unwrap_err();
        assert!(matches!(err, DeviceError::InvalidImage { .. }));
    }
}
