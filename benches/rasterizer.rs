use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softraster::render::rasterizer::{draw_textured_triangle, fill_triangle, ScreenVertex};
use softraster::render::FrameBuffer;
use softraster::texture::Checkerboard;
use softraster::triangle::TexCoord;
use softraster::{Engine, RenderConfig};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (Vec<u32>, Vec<f32>) {
    let size = (BUFFER_WIDTH * BUFFER_HEIGHT) as usize;
    (vec![0u32; size], vec![0.0f32; size])
}

fn small_triangle() -> [(i32, i32); 3] {
    [(100, 100), (120, 100), (110, 120)]
}

fn medium_triangle() -> [(i32, i32); 3] {
    [(100, 100), (300, 100), (200, 300)]
}

fn large_triangle() -> [(i32, i32); 3] {
    [(50, 50), (750, 100), (400, 550)]
}

/// Corners at depths 2, 4 and 8 with the full texture across them.
fn textured(points: [(i32, i32); 3]) -> [ScreenVertex; 3] {
    let uv = [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)];
    let z = [2.0f32, 4.0, 8.0];
    [0, 1, 2].map(|i| {
        let w = 1.0 / z[i];
        ScreenVertex::new(
            points[i].0,
            points[i].1,
            TexCoord {
                u: uv[i].0 * w,
                v: uv[i].1 * w,
                w,
            },
        )
    })
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let checker = Checkerboard::default();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("solid", name), &triangle, |b, tri| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                fill_triangle(&mut fb, black_box(tri[0]), tri[1], tri[2], 0xFFFF0000);
            });
        });

        let vertices = textured(triangle);
        group.bench_with_input(BenchmarkId::new("textured", name), &vertices, |b, v| {
            let (mut color, mut depth) = create_buffers();
            b.iter(|| {
                // Clear depth so every iteration does the full amount of work.
                depth.fill(0.0);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                draw_textured_triangle(&mut fb, black_box(*v), &checker, Some(0xFF808080));
            });
        });
    }

    group.finish();
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    let config = RenderConfig {
        width: BUFFER_WIDTH,
        height: BUFFER_HEIGHT,
        ..RenderConfig::default()
    };
    let mut engine = Engine::new(&config).expect("default config is valid");
    engine
        .transform_mut()
        .set_position_xyz(-0.5, -0.5, 2.5)
        .rotate_y(0.6)
        .rotate_x(0.4);

    group.bench_function("cube_update_and_render", |b| {
        b.iter(|| {
            engine.transform_mut().rotate_y(0.01);
            engine.update();
            engine.render();
            black_box(engine.renderer().pixels()[0]);
        });
    });

    group.bench_function("cube_pipeline_only", |b| {
        b.iter(|| {
            engine.update();
            black_box(engine.triangles().len());
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_cube_frame);
criterion_main!(benches);
