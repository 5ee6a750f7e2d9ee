use softpipe::*;

/// Helper: mesh from raw positions, three per triangle, with a shared normal
fn triangle_mesh(positions: [[f32; 3]; 3]) -> Mesh {
    let vertices = positions
        .iter()
        .map(|p| Vertex::new(Vec3::new(p[0], p[1], p[2])).with_normal(Vec3::BACK))
        .collect();
    Mesh::from_arrays(vertices, vec![0, 1, 2]).unwrap()
}

/// Helper: count pixels that differ from the clear color
fn drawn_pixels(renderer: &Renderer, clear: Color) -> usize {
    renderer
        .color_buffer()
        .chunks_exact(4)
        .filter(|px| px != &[clear.r, clear.g, clear.b, clear.a])
        .count()
}

/// Helper: color at a pixel
fn pixel_at(renderer: &Renderer, x: usize, y: usize) -> [u8; 4] {
    let i = (y * renderer.width() + x) * 4;
    let buf = renderer.color_buffer();
    [buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]
}

#[test]
fn lit_triangle_in_front_of_camera_produces_pixels() {
    let mut renderer = Renderer::new(64, 64);
    let mut camera = Camera::new(ProjectionKind::Perspective);
    camera.set_position(Vec3::new(0.0, 0.0, -2.0));

    let mesh = triangle_mesh([[-0.9, 0.0, 0.8], [0.0, 0.5, 0.8], [0.9, 0.0, 0.8]]);
    let shader = PhongShader {
        view_projection: camera.view_projection(),
        ..Default::default()
    };

    renderer.fill_buffer(Color::BLACK);
    renderer.draw_mesh(&mesh, &shader);

    assert!(drawn_pixels(&renderer, Color::BLACK) > 0);
}

#[test]
fn triangle_behind_camera_is_rejected_entirely() {
    let mut renderer = Renderer::new(64, 64);
    let mut camera = Camera::new(ProjectionKind::Perspective);
    camera.set_position(Vec3::new(0.0, 0.0, -2.0));

    // Behind the camera: every vertex fails the clip test (w <= 0).
    let mesh = triangle_mesh([[-0.9, 0.0, -5.0], [0.0, 0.5, -5.0], [0.9, 0.0, -5.0]]);
    let shader = PhongShader {
        view_projection: camera.view_projection(),
        ..Default::default()
    };

    renderer.fill_buffer(Color::BLACK);
    renderer.draw_mesh(&mesh, &shader);

    assert_eq!(drawn_pixels(&renderer, Color::BLACK), 0);
    for y in 0..64 {
        for x in 0..64 {
            assert_eq!(renderer.depth_at(x, y), Some(f32::INFINITY));
        }
    }
}

/// Helper: a front-facing full-ish screen triangle at a fixed NDC depth
fn flat_triangle(z: f32) -> Mesh {
    triangle_mesh([[-0.9, -0.9, z], [0.0, 0.9, z], [0.9, -0.9, z]])
}

#[test]
fn depth_test_is_draw_order_independent() {
    let near = flat_triangle(0.2);
    let far = flat_triangle(0.8);
    let red = FlatShader { color: Color::RED };
    let blue = FlatShader { color: Color::BLUE };

    let mut near_first = Renderer::new(32, 32);
    near_first.fill_buffer(Color::BLACK);
    near_first.draw_mesh(&near, &red);
    near_first.draw_mesh(&far, &blue);

    let mut far_first = Renderer::new(32, 32);
    far_first.fill_buffer(Color::BLACK);
    far_first.draw_mesh(&far, &blue);
    far_first.draw_mesh(&near, &red);

    assert_eq!(near_first.color_buffer(), far_first.color_buffer());
    // The center pixel is covered by both triangles; the near one wins.
    assert_eq!(pixel_at(&near_first, 16, 16), [255, 0, 0, 255]);
    let depth = near_first.depth_at(16, 16).unwrap();
    assert!((depth - 0.2).abs() < 1e-5);
}

#[test]
fn back_facing_triangle_is_culled() {
    let mut renderer = Renderer::new(32, 32);
    renderer.fill_buffer(Color::BLACK);

    // Same triangle as flat_triangle but with the winding reversed.
    let mesh = triangle_mesh([[0.9, -0.9, 0.5], [0.0, 0.9, 0.5], [-0.9, -0.9, 0.5]]);
    renderer.draw_mesh(&mesh, &FlatShader { color: Color::RED });

    assert_eq!(drawn_pixels(&renderer, Color::BLACK), 0);
}

#[test]
fn wireframe_draws_outline_without_touching_depth() {
    let mut renderer = Renderer::new(32, 32);
    renderer.wireframe = true;
    renderer.fill_buffer(Color::BLACK);
    renderer.draw_mesh(&flat_triangle(0.5), &FlatShader { color: Color::RED });

    let outline = [
        WIREFRAME_COLOR.r,
        WIREFRAME_COLOR.g,
        WIREFRAME_COLOR.b,
        WIREFRAME_COLOR.a,
    ];
    let outline_pixels = renderer
        .color_buffer()
        .chunks_exact(4)
        .filter(|px| px == &outline)
        .count();
    assert!(outline_pixels > 0);
    assert_eq!(drawn_pixels(&renderer, Color::BLACK), outline_pixels);

    for y in 0..32 {
        for x in 0..32 {
            assert_eq!(renderer.depth_at(x, y), Some(f32::INFINITY));
        }
    }
}

#[test]
fn resize_reallocates_both_buffers() {
    let mut renderer = Renderer::new(16, 16);
    renderer.fill_buffer(Color::RED);
    renderer.draw_mesh(&flat_triangle(0.5), &FlatShader { color: Color::BLUE });

    renderer.set_viewport_size(24, 8);
    assert_eq!(renderer.width(), 24);
    assert_eq!(renderer.height(), 8);
    assert_eq!(renderer.color_buffer().len(), 24 * 8 * 4);
    assert!(renderer.color_buffer().iter().all(|&b| b == 0));
    for y in 0..8 {
        for x in 0..24 {
            assert_eq!(renderer.depth_at(x, y), Some(f32::INFINITY));
        }
    }
    assert_eq!(renderer.depth_at(24, 0), None);
}

#[test]
fn switch_buffer_tracks_frame_timing() {
    let mut renderer = Renderer::new(4, 4);

    renderer.switch_buffer();
    let first = renderer.stats();
    assert_eq!(first.frame_count, 1);
    assert_eq!(first.delta_time, 0.0);
    assert_eq!(first.fps, 0.0);

    std::thread::sleep(std::time::Duration::from_millis(50));
    renderer.switch_buffer();
    let second = renderer.stats();
    assert_eq!(second.frame_count, 2);
    assert!(second.delta_time >= 0.05);
    assert!((second.fps - 1.0 / second.delta_time).abs() < 1e-3);
}

#[test]
fn degenerate_index_count_draws_nothing() {
    let mut renderer = Renderer::new(16, 16);
    renderer.fill_buffer(Color::BLACK);

    let vertices = vec![
        Vertex::new(Vec3::new(-0.5, -0.5, 0.5)),
        Vertex::new(Vec3::new(0.0, 0.5, 0.5)),
    ];
    let mesh = Mesh::from_arrays(vertices, vec![0, 1]).unwrap();
    renderer.draw_mesh(&mesh, &FlatShader { color: Color::RED });

    assert_eq!(drawn_pixels(&renderer, Color::BLACK), 0);
}
