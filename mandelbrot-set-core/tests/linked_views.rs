use mandelbrot_set_core::reference::{shade, Escape};
use mandelbrot_set_core::{
    Adjustment, Application, ColoringAlgorithm, Palette, Point, ReferenceBackend, ScreenPoint,
    ShaderConfig, SurfaceSize, SurfaceTarget, ViewTransform,
};

fn app(width: u32, height: u32) -> Application<ReferenceBackend> {
    let size = SurfaceSize::new(width, height);
    Application::new(ReferenceBackend::new(), size, ReferenceBackend::new(), size)
}

#[test]
fn center_click_seeds_main_offset() {
    let mut app = app(800, 600);
    let offset = Point::new(-0.7436, 0.1318);
    app.set_transforms(
        ViewTransform::with_scale(0.02, offset).unwrap(),
        ViewTransform::default(),
    );

    let report = app.set_julia_seed(ScreenPoint::new(400.0, 300.0));

    assert!(report.is_ok());
    assert_eq!(app.seed(), offset);
}

#[test]
fn click_maps_through_main_transform_only() {
    let mut app = app(200, 100);
    // Zooming the Julia view must not affect where main-surface clicks land.
    app.zoom(SurfaceTarget::Julia, 0.5);
    app.set_julia_seed(ScreenPoint::new(200.0, 0.0));
    let seed = app.seed();
    assert!((seed.x - 2.0).abs() < 1e-6);
    assert!((seed.y - 1.0).abs() < 1e-6);
}

#[test]
fn redraw_is_deterministic() {
    let mut app = app(48, 32);
    app.set_coloring_algorithm(ColoringAlgorithm::NormalizedIterationCount);
    app.set_julia_seed_plane(Point::new(-0.8, 0.156)).unwrap();

    let main = app.main_surface().backend().pixels().to_vec();
    let julia = app.julia_surface().backend().pixels().to_vec();

    let report = app.redraw();
    assert!(report.is_ok());
    assert_eq!(app.main_surface().backend().pixels(), main.as_slice());
    assert_eq!(app.julia_surface().backend().pixels(), julia.as_slice());
}

#[test]
fn seed_change_leaves_main_pixels_untouched() {
    let mut app = app(32, 32);
    app.redraw();
    let main_draws = app.main_surface().backend().draws();
    let julia_before = app.julia_surface().backend().pixels().to_vec();

    app.set_julia_seed_plane(Point::new(0.285, 0.01)).unwrap();

    assert_eq!(app.main_surface().backend().draws(), main_draws);
    assert_ne!(app.julia_surface().backend().pixels(), julia_before.as_slice());
}

#[test]
fn discrete_coloring_wraps_at_palette_length() {
    let mut config = ShaderConfig::mandelbrot();
    config.set_coloring(ColoringAlgorithm::Discrete);
    config.set_palette(Palette::base());
    let escaped = |iterations| Escape {
        iterations,
        z: Point::new(2.5, 0.0),
    };
    assert_eq!(shade(&config, escaped(17)), shade(&config, escaped(1)));
    assert_eq!(shade(&config, escaped(32)), shade(&config, escaped(0)));
}

#[test]
fn interior_is_black_in_every_scheme() {
    for coloring in ColoringAlgorithm::ALL {
        let mut app = app(9, 9);
        app.set_coloring_algorithm(coloring);
        // Center pixel of an odd-sized surface samples the origin exactly.
        assert_eq!(
            app.main_surface().backend().pixel(4, 4),
            Some([0, 0, 0, 255]),
            "{coloring:?}"
        );
    }
}

#[test]
fn pad_steps_pan_by_scale() {
    let mut app = app(64, 64);
    app.apply(Adjustment::right(SurfaceTarget::Both));
    app.apply(Adjustment::up(SurfaceTarget::Main));
    let main = app.main_surface().transform().offset;
    let julia = app.julia_surface().transform().offset;
    assert!((main.x - 0.2).abs() < 1e-6 && (main.y - 0.2).abs() < 1e-6);
    assert!((julia.x - 0.2).abs() < 1e-6 && julia.y == 0.0);
}
