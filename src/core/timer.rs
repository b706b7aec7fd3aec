//=========================================================================
// Device Timer
//=========================================================================
//
// Real time (monotonic, since device creation) plus a virtual clock that can
// be paused and sped up. The device ticks it once per `run()`; everything
// time-based inside the device (double clicks, sleep with pause) reads it.
//
// Stop/start nest: two `stop()` calls need two `start()` calls before the
// virtual clock moves again.
//
//=========================================================================

use std::time::{Duration, Instant};

//=== DeviceTimer =========================================================

#[derive(Debug)]
pub struct DeviceTimer {
    origin: Instant,

    /// Virtual time at the last tick, in milliseconds.
    virtual_ms: f64,

    /// Real time at the last tick, in milliseconds.
    last_real_ms: f64,

    speed: f32,
    stop_depth: u32,
}

impl DeviceTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            virtual_ms: 0.0,
            last_real_ms: 0.0,
            speed: 1.0,
            stop_depth: 0,
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Milliseconds since the timer was created; never paused.
    pub fn real_time(&self) -> u32 {
        Self::millis(self.origin.elapsed()) as u32
    }

    /// Virtual time as of the last [`tick`](Self::tick).
    pub fn time(&self) -> u32 {
        self.virtual_ms as u32
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_depth > 0
    }

    //--- Control ----------------------------------------------------------

    /// Advances virtual time by the real time elapsed since the last tick.
    pub fn tick(&mut self) {
        let now = Self::millis(self.origin.elapsed());
        if !self.is_stopped() {
            self.virtual_ms += (now - self.last_real_ms) * f64::from(self.speed);
        }
        self.last_real_ms = now;
    }

    /// Pauses the virtual clock.
    pub fn stop(&mut self) {
        if !self.is_stopped() {
            self.tick();
        }
        self.stop_depth += 1;
    }

    /// Undoes one [`stop`](Self::stop).
    pub fn start(&mut self) {
        if self.stop_depth == 0 {
            return;
        }
        self.stop_depth -= 1;
        if !self.is_stopped() {
            // Skip the paused interval.
            self.last_real_ms = Self::millis(self.origin.elapsed());
        }
    }

    /// Sets the virtual clock speed; negative values clamp to zero.
    pub fn set_speed(&mut self, speed: f32) {
        self.tick();
        self.speed = speed.max(0.0);
    }

    /// Jumps the virtual clock to `time_ms`.
    pub fn set_time(&mut self, time_ms: u32) {
        self.last_real_ms = Self::millis(self.origin.elapsed());
        self.virtual_ms = f64::from(time_ms);
    }

    fn millis(duration: Duration) -> f64 {
        duration.as_secs_f64() * 1000.0
    }
}

impl Default for DeviceTimer {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn starts_at_zero_and_running() {
        let timer = DeviceTimer::new();
        assert_eq!(timer.time(), 0);
        assert!(!timer.is_stopped());
        assert_eq!(timer.speed(), 1.0);
    }

    #[test]
    fn tick_advances_virtual_time() {
        let mut timer = DeviceTimer::new();
        thread::sleep(Duration::from_millis(15));
        timer.tick();
        assert!(timer.time() >= 10);
    }

    #[test]
    fn stopped_timer_does_not_advance() {
        let mut timer = DeviceTimer::new();
        timer.stop();
        let before = timer.time();

        thread::sleep(Duration::from_millis(15));
        timer.tick();

        assert_eq!(timer.time(), before);
        assert!(timer.real_time() >= 10, "Real time keeps running");
    }

    #[test]
    fn stop_start_nests() {
        let mut timer = DeviceTimer::new();
        timer.stop();
        timer.stop();
        timer.start();
        assert!(timer.is_stopped());
        timer.start();
        assert!(!timer.is_stopped());

        // Extra start is ignored
        timer.start();
        assert!(!timer.is_stopped());
    }

    #[test]
    fn restart_skips_paused_interval() {
        let mut timer = DeviceTimer::new();
        timer.stop();
        thread::sleep(Duration::from_millis(30));
        timer.start();
        timer.tick();
        assert!(timer.time() < 30);
    }

    #[test]
    fn zero_speed_freezes_time() {
        let mut timer = DeviceTimer::new();
        timer.set_speed(-2.0);
        assert_eq!(timer.speed(), 0.0);

        thread::sleep(Duration::from_millis(10));
        timer.tick();
        assert_eq!(timer.time(), 0);
    }

    #[test]
    fn set_time_jumps() {
        let mut timer = DeviceTimer::new();
        timer.set_time(5000);
        assert_eq!(timer.time(), 5000);
    }
}
