//! End-to-end properties of clipping, projection and rasterization.

use approx::assert_relative_eq;

use softraster::camera::Camera;
use softraster::clipper::{clip_triangle, Plane};
use softraster::math::{Mat4, Vec3, Vec4};
use softraster::render::rasterizer::{
    draw_textured_triangle, fill_triangle, textured, ScreenVertex,
};
use softraster::render::{FrameBuffer, Renderer};
use softraster::texture::{Checkerboard, Sampler, SolidColor};
use softraster::{Mesh, Pipeline, RenderConfig, RenderContext, TexCoord, Triangle};

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / (1u64 << 24) as f32
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

fn flat_triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle::from_points(points.map(|(x, y)| Vec4::point(x, y, 0.0)), 0)
}

/// Reference half-plane clip of a polygon, in f64.
fn clip_polygon(poly: &[(f64, f64)], point: (f64, f64), normal: (f64, f64)) -> Vec<(f64, f64)> {
    let d = |p: (f64, f64)| normal.0 * (p.0 - point.0) + normal.1 * (p.1 - point.1);
    let mut out = Vec::new();
    for i in 0..poly.len() {
        let a = poly[i];
        let b = poly[(i + 1) % poly.len()];
        let (da, db) = (d(a), d(b));
        if da >= 0.0 {
            out.push(a);
        }
        if (da >= 0.0) != (db >= 0.0) {
            let t = da / (da - db);
            out.push((a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t));
        }
    }
    out
}

fn shoelace(poly: &[(f64, f64)]) -> f64 {
    let mut sum = 0.0;
    for i in 0..poly.len() {
        let (a, b) = (poly[i], poly[(i + 1) % poly.len()]);
        sum += a.0 * b.1 - b.0 * a.1;
    }
    0.5 * sum
}

#[test]
fn clipped_area_matches_the_inside_part() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..2000 {
        let points = [0, 1, 2].map(|_| (rng.range(-10.0, 10.0), rng.range(-10.0, 10.0)));
        let tri = flat_triangle(points);

        let angle = rng.range(0.0, std::f32::consts::TAU);
        let (px, py) = (rng.range(-10.0, 10.0), rng.range(-10.0, 10.0));
        let plane = Plane::new(Vec3::new(px, py, 0.0), Vec3::new(angle.cos(), angle.sin(), 0.0));

        let out = clip_triangle(&plane, &tri);
        assert!(out.len() <= 2);
        let got: f64 = out.iter().map(|t| t.signed_area_2d() as f64).sum();

        let poly: Vec<(f64, f64)> = points.iter().map(|&(x, y)| (x as f64, y as f64)).collect();
        let n = (plane.normal.x as f64, plane.normal.y as f64);
        let expected = shoelace(&clip_polygon(&poly, (px as f64, py as f64), n));

        assert!(
            (got - expected).abs() < 1e-2,
            "area {got} != {expected} for {points:?}"
        );
    }
}

/// Encodes the sampled coordinates in the color: `u` in the high 16 bits,
/// `v` in the low 16 bits.
struct CoordinateProbe;

impl Sampler for CoordinateProbe {
    fn sample(&self, u: f32, v: f32) -> u32 {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 65535.0).round() as u32;
        (q(u) << 16) | q(v)
    }
}

fn decode(color: u32) -> (f64, f64) {
    ((color >> 16) as f64 / 65535.0, (color & 0xFFFF) as f64 / 65535.0)
}

#[test]
fn textures_are_perspective_correct() {
    let config = RenderConfig {
        width: 200,
        height: 200,
        backface_culling: false,
        ..RenderConfig::default()
    };
    let ctx = RenderContext::new(&config, &Camera::default()).unwrap();

    // A triangle receding from z = 2 to z = 12.
    let world = [
        Vec3::new(-1.5, -1.0, 2.0),
        Vec3::new(1.5, -1.0, 2.0),
        Vec3::new(0.0, 1.5, 12.0),
    ];
    let uv: [(f32, f32); 3] = [(0.0, 1.0), (1.0, 1.0), (0.5, 0.0)];
    let tri = Triangle::new(
        world.map(Vec4::from),
        uv.map(|(u, v)| TexCoord::new(u, v)),
        0,
    );
    let screen = Pipeline::process(&ctx, &Mesh::new("probe", vec![tri]), &Mat4::identity());
    assert_eq!(screen.len(), 1);

    let mut renderer = Renderer::new(200, 200);
    textured::draw_triangle(&mut renderer.as_framebuffer(), &screen[0], &CoordinateProbe, None);

    // Un-project each pixel through the camera onto the triangle's plane and
    // interpolate the texture coordinates there.
    let f = 1.0 / (45.0f64.to_radians()).tan();
    let uv = uv.map(|(u, v)| (u as f64, v as f64));
    let p = world.map(|v| [v.x as f64, v.y as f64, v.z as f64]);
    let sub = |a: [f64; 3], b: [f64; 3]| [a[0] - b[0], a[1] - b[1], a[2] - b[2]];
    let dot = |a: [f64; 3], b: [f64; 3]| a[0] * b[0] + a[1] * b[1] + a[2] * b[2];
    let (e0, e1) = (sub(p[1], p[0]), sub(p[2], p[0]));
    let normal = [
        e0[1] * e1[2] - e0[2] * e1[1],
        e0[2] * e1[0] - e0[0] * e1[2],
        e0[0] * e1[1] - e0[1] * e1[0],
    ];
    let expected = |x: f64, y: f64| {
        let ray = [(1.0 - x / 100.0) / f, (1.0 - y / 100.0) / f, 1.0];
        let t = dot(normal, p[0]) / dot(normal, ray);
        let hit = sub(ray.map(|c| c * t), p[0]);
        let (d00, d01, d11) = (dot(e0, e0), dot(e0, e1), dot(e1, e1));
        let (d20, d21) = (dot(hit, e0), dot(hit, e1));
        let den = d00 * d11 - d01 * d01;
        let b = (d11 * d20 - d01 * d21) / den;
        let c = (d00 * d21 - d01 * d20) / den;
        let a = 1.0 - b - c;
        (
            a * uv[0].0 + b * uv[1].0 + c * uv[2].0,
            a * uv[0].1 + b * uv[1].1 + c * uv[2].1,
        )
    };

    let mut errors = Vec::new();
    for y in 0..200usize {
        for x in 0..200usize {
            if renderer.depth()[y * 200 + x] == 0.0 {
                continue;
            }
            let (u, v) = decode(renderer.pixels()[y * 200 + x]);
            let (eu, ev) = expected(x as f64, y as f64);
            errors.push((u - eu).abs().max((v - ev).abs()));
        }
    }
    assert!(errors.len() > 1000, "only {} pixels drawn", errors.len());
    errors.sort_by(|a, b| a.total_cmp(b));
    let median = errors[errors.len() / 2];
    let max = errors[errors.len() - 1];
    // Screen-linear interpolation of u, v would be off by about 0.2 here.
    assert!(median < 0.02, "median error {median}");
    assert!(max < 0.08, "max error {max}");
}

fn corner_triangle(w: f32) -> [ScreenVertex; 3] {
    let tex = TexCoord { u: 0.0, v: 0.0, w };
    [
        ScreenVertex::new(2, 2, tex),
        ScreenVertex::new(28, 4, tex),
        ScreenVertex::new(6, 29, tex),
    ]
}

#[test]
fn nearer_triangle_wins_in_either_order() {
    let near = (corner_triangle(0.5), SolidColor(0xFFFF0000));
    let far = (
        corner_triangle(0.25).map(|mut v| {
            v.x += 3;
            v.y += 2;
            v
        }),
        SolidColor(0xFF0000FF),
    );

    let draw = |order: [&([ScreenVertex; 3], SolidColor); 2]| {
        let mut renderer = Renderer::new(32, 32);
        renderer.clear(0);
        let mut fb = renderer.as_framebuffer();
        for (vertices, color) in order {
            draw_textured_triangle(&mut fb, *vertices, color, None);
        }
        (renderer.pixels().to_vec(), renderer.depth().to_vec())
    };

    let a = draw([&near, &far]);
    let b = draw([&far, &near]);
    assert_eq!(a, b);
    // Inside both triangles.
    assert_eq!(a.0[10 * 32 + 10], 0xFFFF0000);
    assert_eq!(a.1[10 * 32 + 10], 0.5);
}

#[test]
fn identity_transform_and_trivial_clip_change_nothing() {
    let tri = Triangle::new(
        [
            Vec4::point(3.0, 2.0, 0.0),
            Vec4::point(40.0, 12.0, 0.0),
            Vec4::point(9.0, 37.0, 0.0),
        ],
        [
            TexCoord::new(0.0, 0.0),
            TexCoord::new(1.0, 0.0),
            TexCoord::new(0.0, 1.0),
        ],
        0,
    );
    let checker = Checkerboard::default();
    let render = |t: &Triangle| {
        let mut renderer = Renderer::new(48, 48);
        textured::draw_triangle(&mut renderer.as_framebuffer(), t, &checker, None);
        (renderer.pixels().to_vec(), renderer.depth().to_vec())
    };

    let behind = Plane::new(Vec3::new(0.0, 0.0, -100.0), Vec3::FORWARD);
    let clipped = clip_triangle(&behind, &tri.transformed(&Mat4::identity()));
    assert_eq!(clipped.len(), 1);
    assert_eq!(clipped[0], tri);
    assert_eq!(render(&clipped[0]), render(&tri));
}

#[test]
fn vertex_on_the_plane_is_stable() {
    let plane = Plane::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
    let with_apex = |x: f32| flat_triangle([(x, 5.0), (10.0, 0.0), (10.0, 10.0)]);
    let area = |tri: &Triangle| -> f32 {
        clip_triangle(&plane, tri)
            .iter()
            .map(|t| t.signed_area_2d())
            .sum()
    };

    let on = with_apex(0.0);
    let out = clip_triangle(&plane, &on);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0], on);

    let eps = 1e-4;
    let inside = with_apex(eps);
    assert_eq!(clip_triangle(&plane, &inside).len(), 1);

    let outside = with_apex(-eps);
    assert_eq!(clip_triangle(&plane, &outside).len(), 2);

    let reference = area(&on);
    assert_relative_eq!(area(&inside), reference, epsilon = 1e-3);
    assert_relative_eq!(area(&outside), reference, epsilon = 1e-3);
}

#[test]
fn rotated_cube_projects_to_hand_computed_points() {
    let config = RenderConfig {
        width: 320,
        height: 240,
        fov_degrees: 90.0,
        z_near: 0.1,
        z_far: 100.0,
        ..RenderConfig::default()
    };
    let ctx = RenderContext::new(&config, &Camera::default()).unwrap();
    let angle = 0.5f32;
    let world = Mat4::rotation_y(angle) * Mat4::translation(-0.5, -0.5, 4.0);
    let cube = Mesh::unit_cube();
    let out = Pipeline::process(&ctx, &cube, &world);

    let (s, c) = (angle as f64).sin_cos();
    let f = 1.0 / (45.0f64.to_radians()).tan();
    let aspect = 320.0 / 240.0;
    let place = |p: Vec4| {
        let (x, y, z) = (p.x as f64, p.y as f64, p.z as f64);
        (x * c - z * s - 0.5, y - 0.5, x * s + z * c + 4.0)
    };

    let mut expected = Vec::new();
    for tri in cube.triangles() {
        let v = tri.points.map(place);
        let e0 = (v[1].0 - v[0].0, v[1].1 - v[0].1, v[1].2 - v[0].2);
        let e1 = (v[2].0 - v[0].0, v[2].1 - v[0].1, v[2].2 - v[0].2);
        let n = (
            e0.1 * e1.2 - e0.2 * e1.1,
            e0.2 * e1.0 - e0.0 * e1.2,
            e0.0 * e1.1 - e0.1 * e1.0,
        );
        // Camera at the origin.
        if n.0 * v[0].0 + n.1 * v[0].1 + n.2 * v[0].2 >= 0.0 {
            continue;
        }
        expected.push(v.map(|(x, y, z)| {
            (
                (1.0 - x * f / aspect / z) * 160.0,
                (1.0 - y * f / z) * 120.0,
            )
        }));
    }

    assert_eq!(out.len(), expected.len());
    assert!(!out.is_empty());
    for (tri, reference) in out.iter().zip(&expected) {
        for (p, &(x, y)) in tri.points.iter().zip(reference) {
            assert!((p.x as f64 - x).abs() < 1e-3, "x {} vs {x}", p.x);
            assert!((p.y as f64 - y).abs() < 1e-3, "y {} vs {y}", p.y);
        }
    }
}

#[test]
fn solid_triangle_covers_exactly_the_closed_triangle() {
    let (mut color, mut depth) = (vec![0u32; 64 * 64], vec![0.0f32; 64 * 64]);
    let mut fb = FrameBuffer::new(&mut color, &mut depth, 64, 64);
    let (a, b, c) = ((10, 10), (50, 10), (10, 50));
    fill_triangle(&mut fb, a, b, c, 1);

    let edge = |p: (i32, i32), q: (i32, i32), x: i32, y: i32| {
        (q.0 - p.0) * (y - p.1) - (q.1 - p.1) * (x - p.0)
    };
    for y in 0..64 {
        for x in 0..64 {
            let e = [edge(a, b, x, y), edge(b, c, x, y), edge(c, a, x, y)];
            let inside = e.iter().all(|&v| v >= 0) || e.iter().all(|&v| v <= 0);
            let drawn = color[(y * 64 + x) as usize] == 1;
            assert_eq!(drawn, inside, "pixel ({x}, {y})");
        }
    }
}
