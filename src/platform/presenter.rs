//=========================================================================
// Presenter
//=========================================================================
//
// Copies a CPU-side image into the window through softbuffer.
//
// The image is stretched over the whole client area (nearest neighbour),
// so a fixed-size frame buffer keeps filling a resized window. Pixels are
// 0xAARRGGBB; alpha is dropped because the surface is opaque.
//
//=========================================================================

//=== External Crates =====================================================

use std::num::NonZeroU32;
use std::rc::Rc;

use log::debug;
use softbuffer::{Context, SoftBufferError, Surface};
use winit::window::Window;

//=== Internal Imports ====================================================

use crate::core::error::{DeviceError, Result};

//=== Presenter ===========================================================

/// Window surface created on the first present.
pub(crate) struct Presenter {
    /// Kept alive for the surface's display connection.
    _context: Context<Rc<Window>>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    surface_size: (u32, u32),
}

impl Presenter {
    pub(crate) fn new(window: &Rc<Window>) -> Result<Self> {
        let context = Context::new(window.clone()).map_err(present_error)?;
        let surface = Surface::new(&context, window.clone()).map_err(present_error)?;
        debug!(target: "device::video", "Software surface created");

        Ok(Self {
            _context: context,
            surface,
            surface_size: (0, 0),
        })
    }

    /// Stretches `pixels` (`width` x `height`) over a `target` sized
    /// client area. A zero-sized target (minimized) presents nothing.
    pub(crate) fn present(&mut self, pixels: &[u32], width: u32, height: u32, target: (u32, u32)) -> Result<()> {
        let (Some(target_w), Some(target_h)) = (NonZeroU32::new(target.0), NonZeroU32::new(target.1)) else {
            return Ok(());
        };

        if self.surface_size != target {
            self.surface.resize(target_w, target_h).map_err(present_error)?;
            self.surface_size = target;
        }

        let mut buffer = self.surface.buffer_mut().map_err(present_error)?;
        blit_scaled(pixels, width, height, &mut buffer, target.0, target.1);
        buffer.present().map_err(present_error)
    }
}

fn present_error(e: SoftBufferError) -> DeviceError {
    DeviceError::Present(e.to_string())
}

//=== Scaling =============================================================

/// Nearest-neighbour copy of `src` (`src_w` x `src_h`) into `dst`
/// (`dst_w` x `dst_h`), clearing the alpha byte.
///
/// Both slices must hold exactly width * height pixels.
pub(crate) fn blit_scaled(src: &[u32], src_w: u32, src_h: u32, dst: &mut [u32], dst_w: u32, dst_h: u32) {
    let (src_w, src_h) = (src_w as usize, src_h as usize);
    let (dst_w, dst_h) = (dst_w as usize, dst_h as usize);
    debug_assert_eq!(src.len(), src_w * src_h);
    debug_assert_eq!(dst.len(), dst_w * dst_h);

    if (src_w, src_h) == (dst_w, dst_h) {
        for (out, pixel) in dst.iter_mut().zip(src) {
            *out = pixel & 0x00FF_FFFF;
        }
        return;
    }

    for (dy, row) in dst.chunks_exact_mut(dst_w).enumerate() {
        let sy = dy * src_h / dst_h;
        let src_row = &src[sy * src_w..(sy + 1) * src_w];
        for (dx, out) in row.iter_mut().enumerate() {
            *out = src_row[dx * src_w / dst_w] & 0x00FF_FFFF;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
