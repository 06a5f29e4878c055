//! Global render state. These act on whatever context is current, not on a [`Renderer`].
//!
//! The `enable_*` toggles only ever switch a feature on. Passing `false` leaves the capability
//! exactly as it was, so a feature can't be turned back off through them.
//!
//! [`Renderer`]: crate::Renderer

use glam::Vec3;

use crate::gl_api::GlApi;

/// Alpha blending with `src * a + dst * (1 - a)`.
pub fn enable_transparency<G: GlApi + ?Sized>(gl: &G, toggle: bool) {
    if !toggle {
        log::debug!("transparency toggle off, blend state left as is");
        return;
    }

    gl.blend_func(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
    gl.enable(gl::BLEND);
}

/// Depth testing, keeping fragments that are closer than what's already there.
pub fn enable_depth_test<G: GlApi + ?Sized>(gl: &G, toggle: bool) {
    if !toggle {
        log::debug!("depth test toggle off, depth state left as is");
        return;
    }

    gl.enable(gl::DEPTH_TEST);
    gl.depth_func(gl::LESS);
}

/// Culls front faces, with counter-clockwise winding as the front.
pub fn enable_culling<G: GlApi + ?Sized>(gl: &G, toggle: bool) {
    if !toggle {
        log::debug!("culling toggle off, cull state left as is");
        return;
    }

    gl.enable(gl::CULL_FACE);
    gl.cull_face(gl::FRONT);
    gl.front_face(gl::CCW);
}

/// Line smoothing.
pub fn enable_antialiasing<G: GlApi + ?Sized>(gl: &G, toggle: bool) {
    if !toggle {
        log::debug!("antialiasing toggle off, line smoothing left as is");
        return;
    }

    gl.enable(gl::LINE_SMOOTH);
}

pub fn is_enabled<G: GlApi + ?Sized>(gl: &G, capability: u32) -> bool {
    gl.is_enabled(capability)
}

/// Sets the clear color. Alpha is always opaque.
pub fn set_background<G: GlApi + ?Sized>(gl: &G, color: Vec3) {
    gl.clear_color(color.x, color.y, color.z, 1.0);
}

/// Clears the color and depth buffers.
pub fn clear<G: GlApi + ?Sized>(gl: &G) {
    gl.clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
}
