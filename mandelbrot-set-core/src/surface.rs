use crate::error::RenderError;
use crate::shader::{ShaderConfig, ShaderSource};
use crate::transforms::screen_to_plane;
use crate::viewport::{Point, ScreenPoint, SurfaceSize, ViewTransform};

/// Everything a backend needs to shade one surface.
///
/// Uniform values are taken from the frame on every draw; backends may cache
/// compiled programs keyed by `source` but never uniform state.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub source: &'a ShaderSource,
    pub config: &'a ShaderConfig,
    pub size: SurfaceSize,
    pub transform: ViewTransform,
    /// Julia seed. Only bound when the program declares `position`.
    pub seed: Option<Point>,
}

/// Drawing context behind a render surface.
///
/// Implementations:
/// - `ReferenceBackend`: CPU evaluation into an RGBA buffer
/// - `WebGlBackend` (ui crate): WebGL 1 on a canvas
pub trait GraphicsBackend {
    /// Shade every pixel of the surface once.
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;

    /// Called when the surface dimensions change, before the next draw.
    fn resize(&mut self, _size: SurfaceSize) -> Result<(), RenderError> {
        Ok(())
    }
}

impl<B: GraphicsBackend + ?Sized> GraphicsBackend for Box<B> {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        (**self).draw(frame)
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        (**self).resize(size)
    }
}

/// One drawing surface: backend, size, view transform and failure state.
///
/// A surface whose context turned out to be unavailable is marked failed and
/// rejects later draws with `RenderError::SurfaceFailed` instead of touching
/// the backend again.
pub struct RenderSurface<B> {
    name: &'static str,
    backend: B,
    size: SurfaceSize,
    transform: ViewTransform,
    failure: Option<String>,
}

impl<B: GraphicsBackend> RenderSurface<B> {
    pub fn new(name: &'static str, backend: B, size: SurfaceSize) -> Self {
        Self {
            name,
            backend,
            size,
            transform: ViewTransform::default(),
            failure: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut ViewTransform {
        &mut self.transform
    }

    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Map a pointer position on this surface to the plane.
    pub fn screen_to_plane(&self, screen: ScreenPoint) -> Point {
        screen_to_plane(self.size, &self.transform, screen)
    }

    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        if size == self.size {
            return Ok(());
        }
        self.size = size;
        if self.failure.is_some() {
            return Ok(());
        }
        self.backend.resize(size)
    }

    /// Draw with the given configuration and its assembled source.
    pub fn draw(
        &mut self,
        config: &ShaderConfig,
        source: &ShaderSource,
        seed: Option<Point>,
    ) -> Result<(), RenderError> {
        if let Some(reason) = &self.failure {
            return Err(RenderError::SurfaceFailed(reason.clone()));
        }

        let frame = Frame {
            source,
            config,
            size: self.size,
            transform: self.transform,
            seed,
        };

        let result = self.backend.draw(&frame);
        if let Err(err) = &result {
            log::error!("{} surface: {}", self.name, err);
            if let RenderError::ContextUnavailable(reason) = err {
                self.failure = Some(reason.clone());
            }
        }
        result
    }
}
