/// Benchmark suite for the software rasterizer
/// Tests performance of buffer clears and the full draw path.
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use softpipe::{
    Camera, Color, FlatShader, Mesh, PhongShader, ProjectionKind, Renderer, Vec3, Vertex,
};

fn bench_fill_buffer(c: &mut Criterion) {
    c.bench_function("fill_buffer", |b| {
        let mut renderer = Renderer::new(400, 225);

        b.iter(|| {
            renderer.fill_buffer(black_box(Color::new(30, 30, 60)));
        });
    });
}

fn bench_draw_flat_triangle(c: &mut Criterion) {
    c.bench_function("draw_flat_triangle", |b| {
        let mut renderer = Renderer::new(400, 225);
        let vertices = vec![
            Vertex::new(Vec3::new(-0.9, -0.9, 0.5)),
            Vertex::new(Vec3::new(0.0, 0.9, 0.5)),
            Vertex::new(Vec3::new(0.9, -0.9, 0.5)),
        ];
        let mesh = Mesh::from_arrays(vertices, vec![0, 1, 2]).unwrap();
        let shader = FlatShader { color: Color::RED };

        b.iter(|| {
            renderer.fill_buffer(Color::BLACK);
            renderer.draw_mesh(black_box(&mesh), &shader);
        });
    });
}

fn bench_draw_lit_quad(c: &mut Criterion) {
    c.bench_function("draw_lit_quad", |b| {
        let mut renderer = Renderer::new(400, 225);
        let mut camera = Camera::new(ProjectionKind::Perspective);
        camera.set_aspect(400.0 / 225.0);
        camera.set_position(Vec3::new(0.0, 0.0, -2.0));
        let mesh = Mesh::quad();
        let shader = PhongShader {
            view_projection: camera.view_projection(),
            ..Default::default()
        };

        b.iter(|| {
            renderer.fill_buffer(Color::BLACK);
            renderer.draw_mesh(black_box(&mesh), &shader);
        });
    });
}

fn bench_draw_wireframe_quad(c: &mut Criterion) {
    c.bench_function("draw_wireframe_quad", |b| {
        let mut renderer = Renderer::new(400, 225);
        renderer.wireframe = true;
        let mut camera = Camera::new(ProjectionKind::Perspective);
        camera.set_aspect(400.0 / 225.0);
        camera.set_position(Vec3::new(0.0, 0.0, -2.0));
        let mesh = Mesh::quad();
        let shader = PhongShader {
            view_projection: camera.view_projection(),
            ..Default::default()
        };

        b.iter(|| {
            renderer.fill_buffer(Color::BLACK);
            renderer.draw_mesh(black_box(&mesh), &shader);
        });
    });
}

criterion_group!(
    benches,
    bench_fill_buffer,
    bench_draw_flat_triangle,
    bench_draw_lit_quad,
    bench_draw_wireframe_quad
);
criterion_main!(benches);
