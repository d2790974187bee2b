//! Integration tests for weft-render.

use weft_mesh::{ClothMesh, GridLayout, MeshBuilder};
use weft_render::{
    ClothRenderer, DrawCommand, DrawSurface, PixelCanvas, RecordingSurface, RenderConfig, Rgba,
    SurfaceSize,
};
use weft_solver::{ClothSim, SimConfig};
use weft_types::Vec2;

fn grid(cols: usize, rows: usize) -> ClothMesh {
    MeshBuilder::default().build_layout(GridLayout::new(cols, rows, 10.0, Vec2::ZERO))
}

// ─── Renderer Tests ───────────────────────────────────────────

#[test]
fn renders_two_triangles_per_cell_and_every_spring() {
    let mesh = grid(4, 3);
    let mut surface = RecordingSurface::new(100, 100);
    let stats = ClothRenderer::default().render(&mesh, &mut surface);

    assert_eq!(stats.triangles, mesh.layout.triangle_count());
    assert_eq!(stats.lines, mesh.spring_count());
    assert_eq!(stats.skipped, 0);
    assert_eq!(surface.triangle_count(), 12);
    assert_eq!(surface.line_count(), mesh.spring_count());
    assert_eq!(surface.commands()[0], DrawCommand::Clear);
    assert_eq!(surface.frames_presented(), 1);
}

#[test]
fn first_triangle_uses_cell_corners() {
    let mesh = grid(3, 3);
    let mut surface = RecordingSurface::new(50, 50);
    ClothRenderer::default().render(&mesh, &mut surface);

    match &surface.commands()[1] {
        DrawCommand::FillTriangle { points, color } => {
            assert_eq!(*points, [[0.0, 0.0], [10.0, 0.0], [0.0, 10.0]]);
            assert_eq!(color.a, 1.0);
        }
        other => panic!("expected a triangle, got {other:?}"),
    }
}

#[test]
fn empty_mesh_only_clears() {
    let mesh = ClothMesh::empty();
    let mut surface = RecordingSurface::new(0, 0);
    let stats = ClothRenderer::default().render(&mesh, &mut surface);
    assert_eq!(stats.triangles + stats.lines, 0);
    assert_eq!(surface.commands(), &[DrawCommand::Clear]);
}

#[test]
fn render_does_not_mutate_mesh() {
    let mut sim = ClothSim::new(SimConfig::default());
    sim.rebuild(240.0, 120.0);
    for _ in 0..10 {
        sim.step();
    }
    let before = sim.mesh().particles.clone();
    let mut surface = RecordingSurface::new(240, 120);
    ClothRenderer::default().render(sim.mesh(), &mut surface);
    assert_eq!(sim.mesh().particles, before);
}

#[test]
fn repeated_renders_are_identical() {
    let mesh = grid(5, 5);
    let renderer = ClothRenderer::default();
    let mut a = RecordingSurface::new(60, 60);
    let mut b = RecordingSurface::new(60, 60);
    renderer.render(&mesh, &mut a);
    renderer.render(&mesh, &mut a);
    renderer.render(&mesh, &mut b);
    assert_eq!(a.commands(), b.commands());
}

#[test]
fn toggles_skip_primitives() {
    let mesh = grid(3, 3);
    let renderer = ClothRenderer::new(RenderConfig {
        draw_springs: false,
        ..RenderConfig::default()
    });
    let mut surface = RecordingSurface::new(30, 30);
    let stats = renderer.render(&mesh, &mut surface);
    assert_eq!(stats.lines, 0);
    assert_eq!(surface.line_count(), 0);
    assert_eq!(stats.triangles, 8);
}

#[test]
fn stale_springs_are_skipped() {
    let mut mesh = grid(3, 3);
    mesh.springs[0].b = weft_types::ParticleId(500);
    let mut surface = RecordingSurface::new(30, 30);
    let stats = ClothRenderer::default().render(&mesh, &mut surface);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.lines, mesh.spring_count() - 1);
}

#[test]
fn tilt_lowers_triangle_opacity_but_not_lines() {
    let mesh = grid(3, 3);
    let renderer = ClothRenderer::new(RenderConfig {
        normal_tilt: 0.01,
        ..RenderConfig::default()
    });
    let mut surface = RecordingSurface::new(30, 30);
    renderer.render(&mesh, &mut surface);
    for command in surface.commands() {
        match command {
            DrawCommand::FillTriangle { color, .. } => {
                assert!((color.a - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4)
            }
            DrawCommand::StrokeLine { color, .. } => assert_eq!(color.a, 1.0),
            DrawCommand::Clear => {}
        }
    }
}

#[test]
fn recorder_json_export() {
    let mesh = grid(2, 2);
    let mut surface = RecordingSurface::new(20, 20);
    ClothRenderer::default().render(&mesh, &mut surface);
    let json = surface.to_json().unwrap();
    assert!(json.contains("\"op\":\"fill_triangle\""));
    assert!(json.contains("\"op\":\"stroke_line\""));
}

// ─── PixelCanvas Tests ────────────────────────────────────────

#[test]
fn canvas_reports_size() {
    let canvas = PixelCanvas::new(64, 32);
    assert_eq!(canvas.size(), SurfaceSize::new(64, 32));
    assert_eq!(canvas.covered_pixels(), 0);
}

#[test]
fn canvas_fills_triangle_interior_only() {
    let mut canvas = PixelCanvas::new(20, 20);
    canvas.fill_triangle(
        Vec2::new(0.0, 0.0),
        Vec2::new(20.0, 0.0),
        Vec2::new(0.0, 20.0),
        Rgba::new(0, 0, 0, 1.0),
    );
    assert_eq!(canvas.pixel(1, 1), Some([0, 0, 0, 255]));
    assert_eq!(canvas.pixel(18, 18), Some([0, 0, 0, 0]));
    // Half the canvas, give or take the diagonal.
    let covered = canvas.covered_pixels();
    assert!((180..=220).contains(&covered), "covered {covered}");
}

#[test]
fn canvas_fill_ignores_winding() {
    let mut cw = PixelCanvas::new(20, 20);
    let mut ccw = PixelCanvas::new(20, 20);
    let (a, b, c) = (Vec2::new(2.0, 2.0), Vec2::new(18.0, 4.0), Vec2::new(6.0, 17.0));
    let ink = Rgba::new(10, 20, 30, 1.0);
    cw.fill_triangle(a, b, c, ink);
    ccw.fill_triangle(a, c, b, ink);
    assert_eq!(cw.pixels(), ccw.pixels());
    assert!(cw.covered_pixels() > 0);
}

#[test]
fn canvas_skips_degenerate_and_offscreen_shapes() {
    let mut canvas = PixelCanvas::new(10, 10);
    let ink = Rgba::new(0, 0, 0, 1.0);
    canvas.fill_triangle(Vec2::ZERO, Vec2::new(5.0, 5.0), Vec2::new(9.0, 9.0), ink);
    canvas.fill_triangle(
        Vec2::new(-50.0, -50.0),
        Vec2::new(-40.0, -50.0),
        Vec2::new(-50.0, -40.0),
        ink,
    );
    canvas.fill_triangle(Vec2::new(f32::NAN, 0.0), Vec2::new(5.0, 0.0), Vec2::new(0.0, 5.0), ink);
    canvas.stroke_line(Vec2::new(-5.0, -5.0), Vec2::new(-1.0, -9.0), ink);
    assert_eq!(canvas.covered_pixels(), 0);
}

#[test]
fn canvas_strokes_horizontal_line() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.stroke_line(
        Vec2::new(-5.0, 4.5),
        Vec2::new(50.0, 4.5),
        Rgba::new(255, 0, 0, 1.0),
    );
    for x in 0..10 {
        assert_eq!(canvas.pixel(x, 4), Some([255, 0, 0, 255]));
    }
    assert_eq!(canvas.covered_pixels(), 10);
}

#[test]
fn canvas_line_blends_each_pixel_once() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.stroke_line(Vec2::new(0.5, 0.5), Vec2::new(9.5, 0.5), Rgba::new(0, 0, 0, 0.5));
    assert_eq!(canvas.pixel(3, 0), Some([0, 0, 0, 128]));
}

#[test]
fn canvas_clear_and_resize() {
    let mut canvas = PixelCanvas::new(10, 10);
    canvas.stroke_line(Vec2::ZERO, Vec2::new(9.0, 9.0), Rgba::new(0, 0, 0, 1.0));
    assert!(canvas.covered_pixels() > 0);
    canvas.clear();
    assert_eq!(canvas.covered_pixels(), 0);
    canvas.resize(30, 5);
    assert_eq!(canvas.size(), SurfaceSize::new(30, 5));
    assert_eq!(canvas.pixels().len(), 150);
}

#[test]
fn canvas_pixel_addresses_row_major() {
    let mut canvas = PixelCanvas::new(7, 3);
    canvas.stroke_line(Vec2::new(6.2, 2.5), Vec2::new(6.8, 2.5), Rgba::new(9, 8, 7, 1.0));
    assert_eq!(canvas.pixel(6, 2), Some([9, 8, 7, 255]));
    assert_eq!(canvas.pixels()[2 * 7 + 6], [9, 8, 7, 255]);
    assert_eq!(canvas.covered_pixels(), 1);
    assert_eq!(canvas.pixel(7, 0), None);
    assert_eq!(canvas.pixel(0, 3), None);
    assert_eq!(canvas.pixel(u32::MAX, u32::MAX), None);
}

#[test]
fn rendered_cloth_covers_the_mesh_strip() {
    let mut sim = ClothSim::new(SimConfig::default());
    sim.rebuild(600.0, 200.0);
    let mut canvas = PixelCanvas::new(600, 200);
    ClothRenderer::default().render(sim.mesh(), &mut canvas);

    // The mesh spans ~100px centred in 600px.
    assert!(canvas.pixel(300, 100).unwrap()[3] > 0);
    assert_eq!(canvas.pixel(10, 100), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(590, 100), Some([0, 0, 0, 0]));
}

#[test]
fn canvas_png_export() {
    let mut canvas = PixelCanvas::new(16, 16);
    canvas.fill_triangle(
        Vec2::ZERO,
        Vec2::new(16.0, 0.0),
        Vec2::new(0.0, 16.0),
        Rgba::new(0, 0, 0, 1.0),
    );
    let path = std::env::temp_dir().join(format!("weft-render-{}.png", std::process::id()));
    canvas.save_png(&path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 16));
    assert_eq!(decoded.get_pixel(1, 1).0, [0, 0, 0, 255]);
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn empty_canvas_png_is_an_error() {
    let canvas = PixelCanvas::new(0, 0);
    assert!(canvas.save_png(std::env::temp_dir().join("weft-empty.png")).is_err());
}
