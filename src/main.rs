/// Demo host: spinning lit quad rendered by the software pipeline at a
/// reduced internal resolution, integer-upscaled onto a softbuffer surface.
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Instant;

use softpipe::*;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

/// Integer upscale factor between the internal buffer and the window.
const RATIO: usize = 2;

/// Procedural two-tone checkerboard so the demo needs no asset files.
fn checker_texture(size: usize, cells: usize) -> Texture {
    let cell = (size / cells).max(1);
    let mut pixels = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let v = if on { 230 } else { 120 };
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    Texture::from_rgba(size, size, pixels)
}
const BUFFER_W: usize = 16 * 25;
const BUFFER_H: usize = 9 * 25;

fn main() {
    env_logger::init();

    println!("=== softpipe - software rendering demo ===");
    println!("Controls:");
    println!("  WASD       - Move camera");
    println!("  Q/E        - Yaw camera");
    println!("  X          - Toggle wireframe");
    println!("  ESC        - Exit");
    println!();

    let event_loop = EventLoop::new().unwrap();
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("softpipe")
            .with_inner_size(LogicalSize::new(
                (BUFFER_W * RATIO) as u32,
                (BUFFER_H * RATIO) as u32,
            ))
            .build(&event_loop)
            .unwrap(),
    );

    let context = softbuffer::Context::new(window.clone()).unwrap();
    let mut surface = softbuffer::Surface::new(&context, window.clone()).unwrap();

    let mut buffer_w = BUFFER_W;
    let mut buffer_h = BUFFER_H;
    let mut renderer = Renderer::new(buffer_w, buffer_h);
    let mut camera = Camera::new(ProjectionKind::Perspective);
    camera.set_aspect(buffer_w as f32 / buffer_h as f32);
    camera.set_position(Vec3::new(0.0, 0.0, -2.0));

    let mesh = Mesh::quad();
    let mut shader = PhongShader {
        base_color: Color::new(220, 60, 40),
        light_position: Vec3::new(0.0, 3.0, -6.0),
        texture: Some(checker_texture(64, 8)),
        ..Default::default()
    };

    let mut angle = 0.0f32;
    let mut last_frame = Instant::now();
    let mut fps_timer = Instant::now();
    let mut frames = 0u32;

    event_loop
        .run(move |event, elwt| {
            elwt.set_control_flow(ControlFlow::Poll);

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        buffer_w = (new_size.width as usize / RATIO).max(1);
                        buffer_h = (new_size.height as usize / RATIO).max(1);
                        renderer.set_viewport_size(buffer_w, buffer_h);
                        camera.set_aspect(buffer_w as f32 / buffer_h as f32);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        let pressed = event.state == ElementState::Pressed;
                        if let PhysicalKey::Code(keycode) = event.physical_key {
                            match keycode {
                                KeyCode::KeyW if pressed => camera.move_by(Vec3::FORWARD * 0.1),
                                KeyCode::KeyS if pressed => camera.move_by(Vec3::BACK * 0.1),
                                KeyCode::KeyA if pressed => camera.move_by(Vec3::LEFT * 0.1),
                                KeyCode::KeyD if pressed => camera.move_by(Vec3::RIGHT * 0.1),
                                KeyCode::KeyQ if pressed => {
                                    camera.rotate_by(Vec3::new(0.0, -5.0, 0.0))
                                }
                                KeyCode::KeyE if pressed => {
                                    camera.rotate_by(Vec3::new(0.0, 5.0, 0.0))
                                }
                                KeyCode::KeyX if pressed => {
                                    renderer.wireframe = !renderer.wireframe;
                                    println!(
                                        "Wireframe: {}",
                                        if renderer.wireframe { "ON" } else { "OFF" }
                                    );
                                }
                                KeyCode::Escape if pressed => {
                                    elwt.exit();
                                }
                                _ => {}
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let dt = (now - last_frame).as_secs_f32();
                        last_frame = now;
                        angle += 45.0 * dt;

                        // Build the frame.
                        renderer.fill_buffer(Color::BLACK);
                        let transform = Mat4::from_axis_angle(Vec3::UP, angle);
                        shader.transform = transform;
                        shader.transform_inverse_transpose = transform.inverse().transpose();
                        shader.view_projection = camera.view_projection();
                        renderer.draw_mesh(&mesh, &shader);
                        renderer.switch_buffer();

                        // Present: upscale and pack RGBA into 0RGB words.
                        let window_size = window.inner_size();
                        let (win_w, win_h) =
                            (window_size.width as usize, window_size.height as usize);
                        let (Some(nw), Some(nh)) = (
                            NonZeroU32::new(window_size.width),
                            NonZeroU32::new(window_size.height),
                        ) else {
                            return;
                        };
                        surface.resize(nw, nh).unwrap();

                        let scaled =
                            upscale_rgba(renderer.color_buffer(), buffer_w, buffer_h, RATIO);
                        let scaled_w = buffer_w * RATIO;
                        let scaled_h = buffer_h * RATIO;

                        let mut frame = surface.buffer_mut().unwrap();
                        frame.fill(0xFF000000);
                        for y in 0..win_h.min(scaled_h) {
                            for x in 0..win_w.min(scaled_w) {
                                let src = (y * scaled_w + x) * 4;
                                frame[y * win_w + x] = 0xFF000000
                                    | ((scaled[src] as u32) << 16)
                                    | ((scaled[src + 1] as u32) << 8)
                                    | (scaled[src + 2] as u32);
                            }
                        }
                        frame.present().unwrap();

                        frames += 1;
                        if fps_timer.elapsed().as_secs() >= 1 {
                            let stats = renderer.stats();
                            println!(
                                "FPS: {} | frame {} | delta {:.2}ms",
                                frames,
                                stats.frame_count,
                                stats.delta_time * 1000.0
                            );
                            frames = 0;
                            fps_timer = Instant::now();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}
