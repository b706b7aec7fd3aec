//=========================================================================
// Aetheric Device
//
// Main entry point: window, event pump, cursor, joysticks and the video
// driver behind one handle.
//
// Architecture:
// ```text
//     DeviceBuilder  ──build()──>  Device  ──run()──>  true while open
//         │                          │
//         ├─ with_driver()           ├─ pumps winit (zero timeout)
//         ├─ with_window_size()      ├─ routes events to receivers
//         └─ register_driver()       └─ polls joysticks
// ```
//
// The application owns the frame loop:
// ```no_run
// use aetheric_device::{DeviceBuilder, core::DriverType};
//
// let mut device = DeviceBuilder::new().with_driver(DriverType::Software).build()?;
// while device.run() {
//     // draw
// }
// # Ok::<(), aetheric_device::core::DeviceError>(())
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::Path;
use std::time::Duration;

use crossbeam_channel::unbounded;
use log::{debug, error, info};
use winit::{event_loop::EventLoop, platform::pump_events::PumpStatus};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{EventRouter, TickControl};
use crate::core::{
    ColorFormat, CreationParams, CursorControl, DeviceError, DeviceTimer, DriverConstructor,
    DriverFactory, DriverType, Event, EventDispatcher, EventReceiver, JoystickInfo, MouseButtons,
    Result, UserEventSender, VideoDriver, VideoModeList,
};
use crate::platform::{JoystickManager, Platform};

//=== Constants ===========================================================

/// Upper bound on a single start-up pump while waiting for the window.
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(16);

//=== DeviceType ==========================================================

/// Windowing backend behind the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Winit,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winit => f.write_str("winit"),
        }
    }
}

//=== GammaRamp ===========================================================

/// Display gamma settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaRamp {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub brightness: f32,
    pub contrast: f32,
}

//=== DeviceBuilder =======================================================

/// Builder for configuring and constructing a [`Device`].
///
/// # Default Values
///
/// See [`CreationParams::default`]: software driver, 800x600 window,
/// 32 bit colour, 500 ms double-click time.
///
/// # Examples
///
/// Headless device for tools and tests:
/// ```no_run
/// use aetheric_device::{DeviceBuilder, core::DriverType};
///
/// let device = DeviceBuilder::new().with_driver(DriverType::Null).build()?;
/// # Ok::<(), aetheric_device::core::DeviceError>(())
/// ```
///
/// From a config file:
/// ```no_run
/// # use aetheric_device::DeviceBuilder;
/// let device = DeviceBuilder::from_config_file("device.toml")?.build()?;
/// # Ok::<(), aetheric_device::core::DeviceError>(())
/// ```
pub struct DeviceBuilder {
    params: CreationParams,
    factory: DriverFactory,
}

impl DeviceBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            params: CreationParams::default(),
            factory: DriverFactory::new(),
        }
    }

    /// Starts from parameters loaded from a TOML file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let params = CreationParams::load_from_file(path)?;
        Ok(Self::new().with_params(params))
    }

    /// Replaces every creation parameter at once.
    pub fn with_params(mut self, params: CreationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_driver(mut self, driver: DriverType) -> Self {
        self.params.driver_type = driver;
        self
    }

    /// Sets the client area size in physical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero, got {}x{}", width, height);
        self.params.window_size = (width, height);
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.params.fullscreen = fullscreen;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.params.resizable = resizable;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.params.window_title = title.into();
        self
    }

    /// Sets the colour depth.
    ///
    /// # Panics
    ///
    /// Panics unless `bits` is 16 or 32.
    pub fn with_bits(mut self, bits: u8) -> Self {
        assert!(bits == 16 || bits == 32, "Colour depth must be 16 or 32 bits, got {}", bits);
        self.params.bits = bits;
        self
    }

    /// # Panics
    ///
    /// Panics if `ms == 0`.
    pub fn with_double_click_time(mut self, ms: u32) -> Self {
        assert!(ms > 0, "Double-click time must be positive");
        self.params.double_click_time_ms = ms;
        self
    }

    /// Makes a driver backend available to [`build`](Self::build).
    pub fn register_driver(mut self, driver: DriverType, constructor: DriverConstructor) -> Self {
        self.factory.register(driver, constructor);
        self
    }

    /// Replaces the driver factory.
    pub fn with_driver_factory(mut self, factory: DriverFactory) -> Self {
        self.factory = factory;
        self
    }

    pub fn params(&self) -> &CreationParams {
        &self.params
    }

    /// Builds the device.
    ///
    /// Unless the null driver is selected this creates the winit event
    /// loop and the window. A driver that is unavailable or fails to build
    /// is logged and leaves the device without a driver.
    ///
    /// # Errors
    ///
    /// Fails on out-of-range parameters (see [`CreationParams::validate`])
    /// or if the event loop or the window cannot be created.
    pub fn build(self) -> Result<Device> {
        let mut params = self.params;
        params.validate()?;
        info!(
            target: "device",
            "Building device ({} driver, {}x{}{})",
            params.driver_type,
            params.window_size.0,
            params.window_size.1,
            if params.fullscreen { ", fullscreen" } else { "" }
        );

        let (tx, rx) = unbounded();
        let user_sender = UserEventSender::new(tx.clone());
        let mut platform = Platform::new(params.clone(), tx);

        let event_loop = if params.driver_type.needs_window() {
            let mut event_loop = EventLoop::new()?;
            wait_for_window(&mut platform, &mut event_loop)?;
            Some(event_loop)
        } else {
            info!(target: "device", "Null driver selected, running without a window");
            None
        };

        let driver = self.factory.create(&mut params, platform.window());

        Ok(Device {
            event_loop,
            platform,
            router: EventRouter::new(rx, params.double_click_time_ms),
            dispatcher: EventDispatcher::new(),
            driver,
            timer: DeviceTimer::new(),
            joysticks: None,
            user_sender,
            params,
            close: false,
        })
    }
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pumps until `resumed()` has created the window.
fn wait_for_window(platform: &mut Platform, event_loop: &mut EventLoop<()>) -> Result<()> {
    loop {
        let status = platform.pump(event_loop, STARTUP_PUMP_TIMEOUT);

        if let Some(reason) = platform.take_creation_error() {
            return Err(DeviceError::WindowCreation(reason));
        }
        if platform.window().is_some() {
            return Ok(());
        }
        if let PumpStatus::Exit(code) = status {
            error!(target: "device", "Event loop exited ({}) before the window was created", code);
            return Err(DeviceError::EarlyExit(code));
        }
    }
}

//=== Device ==============================================================

/// Window, input and video driver handle.
///
/// Create via [`DeviceBuilder`]. Must stay on the thread that built it
/// (winit requirement); use [`Device::user_event_sender`] to post events
/// from other threads.
pub struct Device {
    /// None with the null driver.
    event_loop: Option<EventLoop<()>>,
    platform: Platform,
    router: EventRouter,
    dispatcher: EventDispatcher,
    driver: Option<Box<dyn VideoDriver>>,
    timer: DeviceTimer,
    joysticks: Option<JoystickManager>,
    user_sender: UserEventSender,
    params: CreationParams,
    close: bool,
}

impl Device {
    //--- Frame ------------------------------------------------------------

    /// Processes one frame of OS events.
    ///
    /// Ticks the timer, pumps winit, dispatches every pending event, then
    /// posts one joystick event per activated joystick. Returns `false`
    /// once the device should close.
    pub fn run(&mut self) -> bool {
        self.timer.tick();

        if self.close {
            return false;
        }

        if let Some(event_loop) = self.event_loop.as_mut() {
            if let PumpStatus::Exit(code) = self.platform.pump(event_loop, Duration::ZERO) {
                info!(target: "device", "Event loop exited with code {}", code);
                self.close = true;
            }
        }

        let now = self.timer.real_time();
        if self.router.route_pending(&mut self.dispatcher, &mut self.driver, now) == TickControl::Exit {
            self.close = true;
        }

        if !self.close {
            if let Some(joysticks) = self.joysticks.as_mut() {
                for event in joysticks.poll() {
                    self.dispatcher.dispatch(&Event::Joystick(event));
                }
            }
        }

        !self.close
    }

    /// Stops the device; the next [`run`](Self::run) returns `false`.
    pub fn close_device(&mut self) {
        info!(target: "device", "Device close requested by application");
        self.close = true;
    }

    pub fn yield_now(&self) {
        std::thread::yield_now();
    }

    /// Sleeps for `ms` milliseconds. With `pause_timer`, a running virtual
    /// timer is stopped for the duration.
    pub fn sleep(&mut self, ms: u64, pause_timer: bool) {
        let pause = pause_timer && !self.timer.is_stopped();
        if pause {
            self.timer.stop();
        }

        std::thread::sleep(Duration::from_millis(ms));

        if pause {
            self.timer.start();
        }
    }

    //--- Events -----------------------------------------------------------

    /// Offers `event` to the receiver chain; returns whether it was consumed.
    pub fn post_event_from_user(&mut self, event: &Event) -> bool {
        self.dispatcher.dispatch(event)
    }

    /// Replaces the user receiver, returning the previous one.
    pub fn set_event_receiver(
        &mut self,
        receiver: Option<Box<dyn EventReceiver>>,
    ) -> Option<Box<dyn EventReceiver>> {
        self.dispatcher.set_user_receiver(receiver)
    }

    /// Appends a subsystem behind the user receiver.
    pub fn add_subsystem(&mut self, name: impl Into<String>, receiver: Box<dyn EventReceiver>) {
        self.dispatcher.add_subsystem(name, receiver);
    }

    pub fn remove_subsystem(&mut self, name: &str) -> Option<Box<dyn EventReceiver>> {
        self.dispatcher.remove_subsystem(name)
    }

    /// Handle for posting user events from any thread.
    pub fn user_event_sender(&self) -> UserEventSender {
        self.user_sender.clone()
    }

    pub fn set_double_click_time(&mut self, ms: u32) {
        self.router.clicks_mut().set_double_click_time(ms);
    }

    pub fn double_click_time(&self) -> u32 {
        self.router.clicks().double_click_time()
    }

    //--- Window -----------------------------------------------------------

    pub fn set_window_caption(&mut self, caption: &str) {
        self.platform.set_caption(caption);
    }

    /// Focused and not minimized.
    pub fn is_window_active(&self) -> bool {
        self.platform.state().is_active()
    }

    pub fn is_window_focused(&self) -> bool {
        self.platform.state().focused
    }

    pub fn is_window_minimized(&self) -> bool {
        self.platform.state().minimized
    }

    pub fn set_resizable(&mut self, resizable: bool) {
        self.platform.set_resizable(resizable);
    }

    pub fn minimize_window(&mut self) {
        self.platform.minimize();
    }

    pub fn maximize_window(&mut self) {
        self.platform.maximize();
    }

    pub fn restore_window(&mut self) {
        self.platform.restore();
    }

    /// Outer window position; `None` without a window or where the
    /// platform does not report it (Wayland).
    pub fn window_position(&self) -> Option<(i32, i32)> {
        self.platform.window_position()
    }

    pub fn window_size(&self) -> (u32, u32) {
        let state = self.platform.state();
        (state.width, state.height)
    }

    pub fn mouse_position(&self) -> (i32, i32) {
        let state = self.platform.state();
        (state.mouse_x, state.mouse_y)
    }

    pub fn mouse_button_states(&self) -> MouseButtons {
        self.platform.state().mouse_buttons
    }

    pub fn cursor_control(&mut self) -> CursorControl<'_> {
        self.platform.cursor_control()
    }

    //--- Video ------------------------------------------------------------

    pub fn device_type(&self) -> DeviceType {
        DeviceType::Winit
    }

    pub fn color_format(&self) -> ColorFormat {
        ColorFormat::from_depth(self.params.bits, self.params.with_alpha_channel)
    }

    /// Modes reported by every monitor at start-up, plus the desktop mode.
    pub fn video_mode_list(&self) -> &VideoModeList {
        self.platform.video_modes()
    }

    pub fn video_driver(&self) -> Option<&dyn VideoDriver> {
        self.driver.as_deref()
    }

    pub fn video_driver_mut(&mut self) -> Option<&mut (dyn VideoDriver + 'static)> {
        self.driver.as_deref_mut()
    }

    /// Shows a `width` x `height` image of 0xAARRGGBB pixels, stretched
    /// over the client area. Alpha is ignored. Nothing is drawn while the
    /// window is minimized.
    ///
    /// # Errors
    ///
    /// [`DeviceError::InvalidImage`] if `pixels` does not hold
    /// `width * height` entries, [`DeviceError::NoWindow`] with the null
    /// driver, [`DeviceError::Present`] if the window surface fails.
    pub fn present(&mut self, pixels: &[u32], width: u32, height: u32) -> Result<()> {
        self.platform.present(pixels, width, height)
    }

    pub fn creation_params(&self) -> &CreationParams {
        &self.params
    }

    /// winit has no gamma control.
    pub fn set_gamma_ramp(&mut self, _ramp: GammaRamp) -> Result<()> {
        Err(DeviceError::Unsupported("gamma ramp"))
    }

    pub fn gamma_ramp(&self) -> Result<GammaRamp> {
        Err(DeviceError::Unsupported("gamma ramp"))
    }

    //--- Timer ------------------------------------------------------------

    pub fn timer(&self) -> &DeviceTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut DeviceTimer {
        &mut self.timer
    }

    //--- Joysticks --------------------------------------------------------

    /// Enumerates connected joysticks and starts polling them every frame.
    pub fn activate_joysticks(&mut self) -> Result<Vec<JoystickInfo>> {
        let (manager, infos) = JoystickManager::activate()?;
        info!(target: "device::joystick", "Joystick support activated ({} found)", infos.len());
        self.joysticks = Some(manager);
        Ok(infos)
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        debug!(target: "device", "Device dropped");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
