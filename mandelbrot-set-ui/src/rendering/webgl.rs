//! WebGL 1 backend: one full-viewport quad shaded by the assembled program.

use mandelbrot_set_core::{
    export::flip_rows, Frame, GraphicsBackend, Point, RenderError, ShaderSource, ShaderStage,
    SurfaceSize,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGlBuffer, WebGlContextAttributes, WebGlProgram, WebGlRenderingContext,
    WebGlShader, WebGlUniformLocation,
};

type GL = WebGlRenderingContext;

/// Triangle strip covering clip space.
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

fn resource_error(what: &str, err: JsValue) -> RenderError {
    RenderError::Resource(format!("{what}: {err:?}"))
}

struct UniformLocations {
    resolution: Option<WebGlUniformLocation>,
    scale: Option<WebGlUniformLocation>,
    offset: Option<WebGlUniformLocation>,
    colors: Option<WebGlUniformLocation>,
    /// Only present when the fragment source declares `position`.
    seed: Option<WebGlUniformLocation>,
}

impl UniformLocations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        Self {
            resolution: gl.get_uniform_location(program, "resolution"),
            scale: gl.get_uniform_location(program, "scale"),
            offset: gl.get_uniform_location(program, "offset"),
            colors: gl.get_uniform_location(program, "colors"),
            seed: gl.get_uniform_location(program, "position"),
        }
    }
}

struct CompiledProgram {
    source: ShaderSource,
    program: WebGlProgram,
    position_attribute: u32,
    uniforms: UniformLocations,
}

struct GlContext {
    gl: GL,
    quad: WebGlBuffer,
    program: Option<CompiledProgram>,
}

impl GlContext {
    fn acquire(canvas: &HtmlCanvasElement) -> Result<Self, RenderError> {
        let attrs = WebGlContextAttributes::new();
        // Keeps the last frame readable for PNG download and GIF capture.
        attrs.set_preserve_drawing_buffer(true);

        let gl = canvas
            .get_context_with_context_options("webgl", &attrs)
            .map_err(|e| RenderError::ContextUnavailable(format!("{e:?}")))?
            .ok_or_else(|| RenderError::ContextUnavailable("WebGL not supported".into()))?
            .dyn_into::<GL>()
            .map_err(|_| RenderError::ContextUnavailable("Not a WebGL context".into()))?;

        let quad = gl
            .create_buffer()
            .ok_or_else(|| RenderError::Resource("Failed to create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&quad));
        let vertices = js_sys::Float32Array::from(&QUAD[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

        log::info!("Acquired WebGL context ({}x{})", canvas.width(), canvas.height());
        Ok(Self {
            gl,
            quad,
            program: None,
        })
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<WebGlShader, RenderError> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or_else(|| RenderError::Resource(format!("Failed to create {stage} shader")))?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            return Err(RenderError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }

    fn link(&self, source: &ShaderSource) -> Result<CompiledProgram, RenderError> {
        let vertex = self.compile_shader(ShaderStage::Vertex, &source.vertex)?;
        let fragment = match self.compile_shader(ShaderStage::Fragment, &source.fragment) {
            Ok(shader) => shader,
            Err(err) => {
                self.gl.delete_shader(Some(&vertex));
                return Err(err);
            }
        };

        let program = self
            .gl
            .create_program()
            .ok_or_else(|| RenderError::Resource("Failed to create program".into()))?;
        self.gl.attach_shader(&program, &vertex);
        self.gl.attach_shader(&program, &fragment);
        self.gl.link_program(&program);

        // Shaders can go once linked either way.
        self.gl.detach_shader(&program, &vertex);
        self.gl.detach_shader(&program, &fragment);
        self.gl.delete_shader(Some(&vertex));
        self.gl.delete_shader(Some(&fragment));

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = self.gl.get_program_info_log(&program).unwrap_or_default();
            self.gl.delete_program(Some(&program));
            return Err(RenderError::ProgramLink(log));
        }

        let position = self.gl.get_attrib_location(&program, "position");
        if position < 0 {
            self.gl.delete_program(Some(&program));
            return Err(RenderError::ProgramLink(
                "vertex shader has no `position` attribute".into(),
            ));
        }

        let uniforms = UniformLocations::lookup(&self.gl, &program);
        Ok(CompiledProgram {
            source: source.clone(),
            program,
            position_attribute: position as u32,
            uniforms,
        })
    }

    /// Reuse the cached program unless the source changed.
    fn ensure_program(&mut self, source: &ShaderSource) -> Result<&CompiledProgram, RenderError> {
        let stale = self
            .program
            .as_ref()
            .map_or(true, |compiled| &compiled.source != source);

        if stale {
            log::debug!("Compiling shader program ({} bytes)", source.fragment.len());
            let compiled = self.link(source)?;
            if let Some(old) = self.program.replace(compiled) {
                self.gl.delete_program(Some(&old.program));
            }
        }

        self.program
            .as_ref()
            .ok_or_else(|| RenderError::Resource("Shader program missing".into()))
    }
}

/// Draws onto one canvas. The context is acquired on first draw; if that
/// fails the owning surface marks itself failed.
pub struct WebGlBackend {
    canvas: HtmlCanvasElement,
    context: Option<GlContext>,
}

impl WebGlBackend {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self {
            canvas,
            context: None,
        }
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    fn context(&mut self) -> Result<&mut GlContext, RenderError> {
        if self.context.is_none() {
            self.context = Some(GlContext::acquire(&self.canvas)?);
        }
        let context = self
            .context
            .as_mut()
            .ok_or_else(|| RenderError::ContextUnavailable("WebGL context missing".into()))?;
        if context.gl.is_context_lost() {
            return Err(RenderError::ContextUnavailable("WebGL context lost".into()));
        }
        Ok(context)
    }

    fn sync_canvas_size(&self, size: SurfaceSize) {
        if self.canvas.width() != size.width {
            self.canvas.set_width(size.width);
        }
        if self.canvas.height() != size.height {
            self.canvas.set_height(size.height);
        }
    }

    /// RGBA pixels of the last frame, top row first.
    pub fn read_pixels(&self) -> Result<Vec<u8>, RenderError> {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        let context = self
            .context
            .as_ref()
            .ok_or_else(|| RenderError::Resource("Nothing drawn yet".into()))?;
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        context
            .gl
            .read_pixels_with_opt_u8_array(
                0,
                0,
                width as i32,
                height as i32,
                GL::RGBA,
                GL::UNSIGNED_BYTE,
                Some(&mut pixels),
            )
            .map_err(|e| resource_error("readPixels", e))?;
        flip_rows(&pixels, width, height).map_err(|e| RenderError::Resource(e.to_string()))
    }
}

impl GraphicsBackend for WebGlBackend {
    fn draw(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        self.sync_canvas_size(frame.size);
        let context = self.context()?;
        context.ensure_program(frame.source)?;

        let gl = &context.gl;
        let Some(compiled) = context.program.as_ref() else {
            return Err(RenderError::Resource("Shader program missing".into()));
        };

        gl.viewport(0, 0, frame.size.width as i32, frame.size.height as i32);
        gl.use_program(Some(&compiled.program));

        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&context.quad));
        gl.vertex_attrib_pointer_with_i32(compiled.position_attribute, 2, GL::FLOAT, false, 0, 0);
        gl.enable_vertex_attrib_array(compiled.position_attribute);

        let uniforms = &compiled.uniforms;
        gl.uniform2f(
            uniforms.resolution.as_ref(),
            frame.size.width as f32,
            frame.size.height as f32,
        );
        gl.uniform1f(uniforms.scale.as_ref(), frame.transform.scale);
        gl.uniform2f(
            uniforms.offset.as_ref(),
            frame.transform.offset.x,
            frame.transform.offset.y,
        );
        gl.uniform3fv_with_f32_array(uniforms.colors.as_ref(), &frame.config.palette().flatten());
        if let Some(location) = uniforms.seed.as_ref() {
            let seed = frame.seed.unwrap_or(Point::ORIGIN);
            gl.uniform2f(Some(location), seed.x, seed.y);
        }

        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), RenderError> {
        self.sync_canvas_size(size);
        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use mandelbrot_set_core::{assemble, RenderSurface, ShaderConfig};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn canvas() -> HtmlCanvasElement {
        web_sys::window()
            .unwrap()
            .document()
            .unwrap()
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap()
    }

    #[wasm_bindgen_test]
    fn draws_and_reads_back_interior_black() {
        let size = SurfaceSize::new(9, 9);
        let mut surface = RenderSurface::new("test", WebGlBackend::new(canvas()), size);
        let config = ShaderConfig::mandelbrot();
        surface.draw(&config, &assemble(&config), None).unwrap();

        let pixels = surface.backend().read_pixels().unwrap();
        assert_eq!(pixels.len(), 9 * 9 * 4);
        let center = (4 * 9 + 4) * 4;
        assert_eq!(&pixels[center..center + 4], &[0, 0, 0, 255]);
    }

    #[wasm_bindgen_test]
    fn broken_fragment_reports_compile_log() {
        let mut surface =
            RenderSurface::new("test", WebGlBackend::new(canvas()), SurfaceSize::new(4, 4));
        let config = ShaderConfig::mandelbrot();
        let mut source = assemble(&config);
        source.fragment.push_str("\nthis is not glsl");

        let result = surface.draw(&config, &source, None);
        assert!(matches!(
            result,
            Err(RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                ..
            })
        ));
        assert!(!surface.is_failed());
    }
}
