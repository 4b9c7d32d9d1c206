//! GLSL ES 1.00 sources and interchangeable fragments.
//!
//! `FRAGMENT_TEMPLATE` carries `@NAME@` placeholders that the assembler fills
//! from a `ShaderConfig`. Fragments may only reference the constants and
//! helpers the template declares (`MAX_ITERATIONS`, `COLORS_COUNT`, `BAILOUT`,
//! `EXPONENT`, `complexMul`, `complexPow`, `paletteColor`, `paletteRamp`) and
//! the locals `uv`, `z`, `c` and `iterations`.

/// Full-viewport quad. The only attribute is `position`.
pub const VERTEX_SHADER: &str = "\
attribute vec2 position;

void main() {
    gl_Position = vec4(position, 0.0, 1.0);
}
";

pub const FRAGMENT_TEMPLATE: &str = "\
precision highp float;

uniform vec2 resolution;
uniform float scale;
uniform vec2 offset;
uniform vec3 colors[@COLORS_COUNT@];
@UNIFORMS@

const int MAX_ITERATIONS = @MAX_ITERATIONS@;
const int COLORS_COUNT = @COLORS_COUNT@;
const float BAILOUT = @BAILOUT@;
const float EXPONENT = @EXPONENT@;

vec2 complexMul(vec2 a, vec2 b) {
    return vec2(a.x * b.x - a.y * b.y, a.x * b.y + a.y * b.x);
}

vec2 complexPow(vec2 z, float n) {
    float r = length(z);
    if (r == 0.0) {
        return vec2(0.0);
    }
    float theta = atan(z.y, z.x) * n;
    return pow(r, n) * vec2(cos(theta), sin(theta));
}

vec3 paletteColor(int index) {
    vec3 color = colors[0];
    for (int i = 0; i < COLORS_COUNT; i++) {
        if (i == index) {
            color = colors[i];
        }
    }
    return color;
}

vec3 paletteRamp(float t) {
    float wrapped = mod(t, float(COLORS_COUNT));
    int lower = int(floor(wrapped));
    int upper = int(mod(float(lower + 1), float(COLORS_COUNT)));
    return mix(paletteColor(lower), paletteColor(upper), fract(wrapped));
}

void main() {
    vec2 uv = (gl_FragCoord.xy - 0.5 * resolution) * (scale / resolution.x) + offset;
    @VARIABLES@

    int iterations = MAX_ITERATIONS;
    for (int i = 0; i < MAX_ITERATIONS; i++) {
        if (dot(z, z) > BAILOUT * BAILOUT) {
            iterations = i;
            break;
        }
        @ITERATIONS_ALGORITHM@
    }

    vec3 color = vec3(0.0);
    if (iterations < MAX_ITERATIONS) {
        @COLORING_ALGORITHM@
    }
    gl_FragColor = vec4(color, 1.0);
}
";

pub const MANDELBROT_UNIFORMS: &str = "";

pub const JULIA_UNIFORMS: &str = "uniform vec2 position;";

pub const MANDELBROT_VARIABLES: &str = "\
vec2 c = uv;
    vec2 z = vec2(0.0);";

pub const JULIA_VARIABLES: &str = "\
vec2 c = position;
    vec2 z = uv;";

pub const MANDELBROT_ITERATION: &str = "z = complexMul(z, z) + c;";

pub const MULTIBROT_ITERATION: &str = "z = complexPow(z, EXPONENT) + c;";

pub const GRAYSCALE_COLORING: &str =
    "color = vec3(float(iterations) / float(MAX_ITERATIONS));";

pub const DISCRETE_COLORING: &str =
    "color = paletteColor(int(mod(float(iterations), float(COLORS_COUNT))));";

pub const LINEAR_COLORING: &str = "\
float rampPosition = float(iterations) / float(MAX_ITERATIONS) * float(COLORS_COUNT - 1);
        color = paletteRamp(rampPosition);";

pub const NORMALIZED_ITERATION_COUNT_COLORING: &str = "\
float logModulus = log(dot(z, z)) / 2.0;
        float nu = log(logModulus / log(max(BAILOUT, 1.0001))) / log(max(abs(EXPONENT), 1.0001));
        color = paletteRamp(max(float(iterations) + 1.0 - nu, 0.0));";
