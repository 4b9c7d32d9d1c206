use crate::error::{ConfigError, RenderError};
use crate::palette::Palette;
use crate::settings::Settings;
use crate::shader::{assemble, ColoringAlgorithm, IterationAlgorithm, ShaderConfig};
use crate::surface::{GraphicsBackend, RenderSurface};
use crate::viewport::{Point, ScreenPoint, SurfaceSize, ViewTransform};

/// Offset/zoom amount applied per pan or zoom step.
pub const MOVEMENT_STEP: f32 = 0.05;

/// Interval between repeated steps while a control is held.
pub const REPEAT_INTERVAL_MS: u32 = 100;

/// Which surface(s) a pan or zoom applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceTarget {
    Main,
    Julia,
    Both,
}

impl SurfaceTarget {
    fn includes_main(self) -> bool {
        matches!(self, SurfaceTarget::Main | SurfaceTarget::Both)
    }

    fn includes_julia(self) -> bool {
        matches!(self, SurfaceTarget::Julia | SurfaceTarget::Both)
    }

    /// Element id prefix of the pad controls for this target.
    pub fn id_prefix(self) -> &'static str {
        match self {
            SurfaceTarget::Main => "m-",
            SurfaceTarget::Julia => "j-",
            SurfaceTarget::Both => "",
        }
    }
}

/// One discrete pan or zoom step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Adjustment {
    Pan {
        target: SurfaceTarget,
        dx: f32,
        dy: f32,
    },
    Zoom {
        target: SurfaceTarget,
        amount: f32,
    },
}

impl Adjustment {
    pub fn up(target: SurfaceTarget) -> Self {
        Adjustment::Pan {
            target,
            dx: 0.0,
            dy: MOVEMENT_STEP,
        }
    }

    pub fn down(target: SurfaceTarget) -> Self {
        Adjustment::Pan {
            target,
            dx: 0.0,
            dy: -MOVEMENT_STEP,
        }
    }

    pub fn left(target: SurfaceTarget) -> Self {
        Adjustment::Pan {
            target,
            dx: -MOVEMENT_STEP,
            dy: 0.0,
        }
    }

    pub fn right(target: SurfaceTarget) -> Self {
        Adjustment::Pan {
            target,
            dx: MOVEMENT_STEP,
            dy: 0.0,
        }
    }

    pub fn zoom_in(target: SurfaceTarget) -> Self {
        Adjustment::Zoom {
            target,
            amount: MOVEMENT_STEP,
        }
    }

    pub fn zoom_out(target: SurfaceTarget) -> Self {
        Adjustment::Zoom {
            target,
            amount: -MOVEMENT_STEP,
        }
    }

    pub fn target(&self) -> SurfaceTarget {
        match self {
            Adjustment::Pan { target, .. } | Adjustment::Zoom { target, .. } => *target,
        }
    }
}

/// Outcome of one redraw. `None` means the surface was not drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedrawReport {
    pub main: Option<Result<(), RenderError>>,
    pub julia: Option<Result<(), RenderError>>,
}

impl RedrawReport {
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }

    /// Number of surfaces that were drawn (successfully or not).
    pub fn drawn(&self) -> usize {
        self.main.is_some() as usize + self.julia.is_some() as usize
    }

    pub fn errors(&self) -> impl Iterator<Item = &RenderError> {
        self.main
            .iter()
            .chain(self.julia.iter())
            .filter_map(|outcome| outcome.as_ref().err())
    }

    /// First error, for a toast.
    pub fn first_error(&self) -> Option<&RenderError> {
        self.errors().next()
    }
}

/// The two linked surfaces, their configurations and the Julia seed.
///
/// Every mutating operation finishes updating state before drawing, and
/// draws each affected surface exactly once.
pub struct Application<B> {
    main: RenderSurface<B>,
    julia: RenderSurface<B>,
    main_config: ShaderConfig,
    julia_config: ShaderConfig,
    seed: Point,
}

impl<B: GraphicsBackend> Application<B> {
    pub fn new(main: B, main_size: SurfaceSize, julia: B, julia_size: SurfaceSize) -> Self {
        Self {
            main: RenderSurface::new("main", main, main_size),
            julia: RenderSurface::new("julia", julia, julia_size),
            main_config: ShaderConfig::mandelbrot(),
            julia_config: ShaderConfig::julia(),
            seed: Point::ORIGIN,
        }
    }

    pub fn main_surface(&self) -> &RenderSurface<B> {
        &self.main
    }

    pub fn julia_surface(&self) -> &RenderSurface<B> {
        &self.julia
    }

    pub fn main_surface_mut(&mut self) -> &mut RenderSurface<B> {
        &mut self.main
    }

    pub fn julia_surface_mut(&mut self) -> &mut RenderSurface<B> {
        &mut self.julia
    }

    pub fn main_config(&self) -> &ShaderConfig {
        &self.main_config
    }

    pub fn julia_config(&self) -> &ShaderConfig {
        &self.julia_config
    }

    pub fn seed(&self) -> Point {
        self.seed
    }

    pub fn pan(&mut self, target: SurfaceTarget, dx: f32, dy: f32) -> RedrawReport {
        for surface in self.targets_mut(target) {
            surface.transform_mut().pan_scaled(dx, dy);
        }
        self.redraw_target(target)
    }

    pub fn zoom(&mut self, target: SurfaceTarget, amount: f32) -> RedrawReport {
        for surface in self.targets_mut(target) {
            if surface.transform_mut().zoom_log(amount) {
                log::debug!(
                    "{} surface zoom clamped at scale {}",
                    surface.name(),
                    surface.transform().scale
                );
            }
        }
        self.redraw_target(target)
    }

    pub fn apply(&mut self, adjustment: Adjustment) -> RedrawReport {
        match adjustment {
            Adjustment::Pan { target, dx, dy } => self.pan(target, dx, dy),
            Adjustment::Zoom { target, amount } => self.zoom(target, amount),
        }
    }

    /// Seed the Julia set with the plane point under `screen` on the main
    /// surface.
    pub fn set_julia_seed(&mut self, screen: ScreenPoint) -> RedrawReport {
        self.seed = self.main.screen_to_plane(screen);
        log::debug!("julia seed set to ({}, {})", self.seed.x, self.seed.y);
        self.redraw_target(SurfaceTarget::Julia)
    }

    pub fn set_julia_seed_plane(&mut self, seed: Point) -> Result<RedrawReport, ConfigError> {
        if !seed.x.is_finite() || !seed.y.is_finite() {
            return Err(ConfigError::InvalidSeed(format!("{}, {}", seed.x, seed.y)));
        }
        self.seed = seed;
        Ok(self.redraw_target(SurfaceTarget::Julia))
    }

    pub fn set_coloring_algorithm(&mut self, coloring: ColoringAlgorithm) -> RedrawReport {
        self.update_configs(|config| {
            config.set_coloring(coloring);
            Ok(())
        })
        .unwrap_or_default()
    }

    pub fn set_iteration_algorithm(&mut self, iteration: IterationAlgorithm) -> RedrawReport {
        self.update_configs(|config| {
            config.set_iteration(iteration);
            Ok(())
        })
        .unwrap_or_default()
    }

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> Result<RedrawReport, ConfigError> {
        self.update_configs(|config| config.set_max_iterations(max_iterations))
    }

    pub fn set_bail_out(&mut self, bail_out: f32) -> Result<RedrawReport, ConfigError> {
        self.update_configs(|config| config.set_bail_out(bail_out))
    }

    pub fn set_exponent(&mut self, exponent: f32) -> Result<RedrawReport, ConfigError> {
        self.update_configs(|config| config.set_exponent(exponent))
    }

    pub fn set_palette(&mut self, palette: Palette) -> RedrawReport {
        self.update_configs(|config| {
            config.set_palette(palette.clone());
            Ok(())
        })
        .unwrap_or_default()
    }

    /// Apply every shared parameter, then redraw once.
    pub fn apply_settings(&mut self, settings: &Settings) -> Result<RedrawReport, ConfigError> {
        settings.validate()?;
        self.update_configs(|config| {
            config.set_max_iterations(settings.max_iterations)?;
            config.set_bail_out(settings.bail_out)?;
            config.set_exponent(settings.exponent)?;
            config.set_coloring(settings.coloring);
            config.set_iteration(settings.iteration);
            config.set_palette(settings.palette.clone());
            Ok(())
        })
    }

    /// Restore view transforms without changing anything else.
    pub fn set_transforms(&mut self, main: ViewTransform, julia: ViewTransform) -> RedrawReport {
        self.main.set_transform(main);
        self.julia.set_transform(julia);
        self.redraw()
    }

    /// Restore both views and the seed from a shared link, then redraw both
    /// surfaces once. A non-finite seed leaves everything unchanged.
    pub fn restore_view(
        &mut self,
        main: ViewTransform,
        julia: ViewTransform,
        seed: Point,
    ) -> Result<RedrawReport, ConfigError> {
        if !seed.x.is_finite() || !seed.y.is_finite() {
            return Err(ConfigError::InvalidSeed(format!("{}, {}", seed.x, seed.y)));
        }
        self.seed = seed;
        Ok(self.set_transforms(main, julia))
    }

    pub fn resize(&mut self, main: SurfaceSize, julia: SurfaceSize) -> RedrawReport {
        let main_resize = self.main.resize(main);
        let julia_resize = self.julia.resize(julia);
        let mut report = self.redraw();
        if let Err(err) = main_resize {
            log::error!("main surface resize: {err}");
            report.main = Some(Err(err));
        }
        if let Err(err) = julia_resize {
            log::error!("julia surface resize: {err}");
            report.julia = Some(Err(err));
        }
        report
    }

    /// Re-assemble and draw both surfaces.
    pub fn redraw(&mut self) -> RedrawReport {
        self.redraw_target(SurfaceTarget::Both)
    }

    fn redraw_target(&mut self, target: SurfaceTarget) -> RedrawReport {
        let mut report = RedrawReport::default();
        if target.includes_main() {
            let source = assemble(&self.main_config);
            let seed = self.main_config.accepts_seed().then_some(self.seed);
            report.main = Some(self.main.draw(&self.main_config, &source, seed));
        }
        if target.includes_julia() {
            let source = assemble(&self.julia_config);
            let seed = self.julia_config.accepts_seed().then_some(self.seed);
            report.julia = Some(self.julia.draw(&self.julia_config, &source, seed));
        }
        report
    }

    /// Apply `update` to both configs atomically; on error neither changes.
    fn update_configs<F>(&mut self, update: F) -> Result<RedrawReport, ConfigError>
    where
        F: Fn(&mut ShaderConfig) -> Result<(), ConfigError>,
    {
        let mut main_config = self.main_config.clone();
        let mut julia_config = self.julia_config.clone();
        update(&mut main_config)?;
        update(&mut julia_config)?;
        self.main_config = main_config;
        self.julia_config = julia_config;
        Ok(self.redraw())
    }

    fn targets_mut(&mut self, target: SurfaceTarget) -> Vec<&mut RenderSurface<B>> {
        let mut surfaces = Vec::with_capacity(2);
        if target.includes_main() {
            surfaces.push(&mut self.main);
        }
        if target.includes_julia() {
            surfaces.push(&mut self.julia);
        }
        surfaces
    }
}
