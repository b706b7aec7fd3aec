//=========================================================================
// Basic Device Demo
//
// Opens a window, draws a scrolling gradient, logs every event it
// receives and exits on Escape.
//
// Run with:
//   RUST_LOG=debug cargo run --example basic_device
//
//=========================================================================

use aetheric_device::core::{JoystickEvent, MouseEventKind};
use aetheric_device::prelude::*;
use log::{info, warn};

fn main() -> Result<(), DeviceError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut device = DeviceBuilder::new()
        .with_title("Aetheric Device Demo")
        .with_window_size(1024, 768)
        .with_resizable(true)
        .build()?;

    match device.activate_joysticks() {
        Ok(joysticks) => info!("{} joystick(s) active", joysticks.len()),
        Err(e) => warn!("Joysticks unavailable: {}", e),
    }

    let quit = device.user_event_sender();
    device.set_event_receiver(Some(Box::new(move |event: &Event| {
        match event {
            Event::Key(key) if key.key == KeyCode::Escape && key.pressed_down => {
                quit.send(0, 0);
                true
            }
            Event::Key(key) => {
                info!("Key {:?} down={} char={:?}", key.key, key.pressed_down, key.char);
                false
            }
            Event::Mouse(mouse) if mouse.kind != MouseEventKind::Moved => {
                info!("Mouse {:?} at ({}, {})", mouse.kind, mouse.x, mouse.y);
                false
            }
            Event::Joystick(JoystickEvent { joystick, button_states, .. }) if *button_states != 0 => {
                info!("Joystick {} buttons {:#034b}", joystick, button_states);
                false
            }
            _ => false,
        }
    })));

    // A user event (posted on Escape) ends the loop.
    let done = std::rc::Rc::new(std::cell::Cell::new(false));
    let flag = done.clone();
    device.add_subsystem("quit", Box::new(move |event: &Event| {
        if matches!(event, Event::User(_)) {
            flag.set(true);
        }
        false
    }));

    const FRAME_W: u32 = 256;
    const FRAME_H: u32 = 192;
    let mut frame = vec![0u32; (FRAME_W * FRAME_H) as usize];

    let mut frames = 0u64;
    while device.run() && !done.get() {
        frames += 1;

        let shift = (frames % 256) as u32;
        for (i, pixel) in frame.iter_mut().enumerate() {
            let (x, y) = (i as u32 % FRAME_W, i as u32 / FRAME_W);
            *pixel = ((x + shift) & 0xFF) << 16 | (y & 0xFF) << 8 | 0x40;
        }
        if let Err(e) = device.present(&frame, FRAME_W, FRAME_H) {
            warn!("Present failed: {}", e);
            break;
        }

        if frames % 300 == 0 {
            let caption = format!("Aetheric Device Demo ({} frames, {} ms)", frames, device.timer().time());
            device.set_window_caption(&caption);
        }
        device.sleep(16, false);
    }

    info!("Exiting after {} frames", frames);
    Ok(())
}
