//! Window, context and render loop around the renderer.

use std::ffi::c_void;

use anyhow::{Context, Result};
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest};

use renderer::{poll_errors, state, Camera, GlApi, NativeGl, RenderError, Renderer, VertexAttribute};

use crate::config::Config;

const FLOATS_PER_VERTEX: usize = 6;

// Position xyz, colour rgb. Wound clockwise so it survives front-face culling.
#[rustfmt::skip]
const TRIANGLE: [f32; 18] = [
    -0.5, -0.5, 0.0,    1.0, 0.2, 0.2,
     0.0,  0.5, 0.0,    0.2, 1.0, 0.2,
     0.5, -0.5, 0.0,    0.2, 0.2, 1.0,
];

/// Compiles the shaders, uploads the triangle and applies the render state toggles.
fn setup<G: GlApi>(renderer: &mut Renderer<G>, config: &Config) -> Result<()> {
    let (vertex_src, fragment_src) = config.shader_sources()?;
    renderer
        .compile_shaders(&vertex_src, &fragment_src)
        .context("failed to build the shader program")?;

    renderer.gen_vao()?;
    renderer.gen_vbo(&TRIANGLE, FLOATS_PER_VERTEX)?;
    renderer.link_attrib(VertexAttribute::floats(0, 3, FLOATS_PER_VERTEX, 0))?;
    renderer.link_attrib(VertexAttribute::floats(1, 3, FLOATS_PER_VERTEX, 3))?;
    renderer.unbind_all();

    let gl = renderer.gl();
    state::enable_transparency(gl, config.transparency);
    state::enable_depth_test(gl, config.depth_test);
    state::enable_culling(gl, config.culling);
    state::enable_antialiasing(gl, config.antialiasing);
    state::set_background(gl, config.background);

    poll_errors(gl);
    Ok(())
}

fn draw_frame<G: GlApi>(
    renderer: &mut Renderer<G>,
    camera_matrix: &[f32; 16],
) -> Result<(), RenderError> {
    state::clear(renderer.gl());
    renderer.use_program(camera_matrix)?;
    renderer.bind_vao()?;
    renderer.draw();

    poll_errors(renderer.gl());
    Ok(())
}

/// Opens the window and renders until it's closed. Only returns on a setup error.
pub fn run(config: Config) -> Result<()> {
    let events = EventLoop::new();

    let window = WindowBuilder::new()
        .with_title(config.title.clone())
        .with_inner_size(glutin::dpi::LogicalSize::new(config.width as f64, config.height as f64));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, (3, 3)))
        .with_gl_profile(GlProfile::Core)
        .with_vsync(true)
        .build_windowed(window, &events)
        .context("failed to create an OpenGL window")?;

    let context = unsafe { context.make_current() }
        .map_err(|(_, e)| e)
        .context("failed to make the OpenGL context current")?;

    let gl = NativeGl::load_with(|s| context.get_proc_address(s) as *const c_void)?;
    let mut renderer = Renderer::new(gl);
    setup(&mut renderer, &config)?;

    let camera = Camera {
        aspect: config.aspect(),
        ..Camera::default()
    };
    let camera_matrix = camera.to_gl();

    log::info!("rendering {} vertices", renderer.vertex_count());

    events.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                renderer.delete();
                *control_flow = ControlFlow::Exit;
            }
            Event::MainEventsCleared => context.window().request_redraw(),
            Event::RedrawRequested(_) => {
                if let Err(e) = draw_frame(&mut renderer, &camera_matrix) {
                    log::error!("frame failed: {}", e);
                    renderer.delete();
                    *control_flow = ControlFlow::Exit;
                    return;
                }

                if let Err(e) = context.swap_buffers() {
                    log::error!("failed to swap buffers: {}", e);
                }
            }
            _ => {}
        }
    })
}
