use super::config::ShaderConfig;
use super::templates::{FRAGMENT_TEMPLATE, VERTEX_SHADER};

/// Named substitution points in the fragment template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    MaxIterations,
    BailOut,
    Exponent,
    ColorsCount,
    Uniforms,
    Variables,
    IterationsAlgorithm,
    ColoringAlgorithm,
}

impl Placeholder {
    pub const ALL: [Placeholder; 8] = [
        Placeholder::MaxIterations,
        Placeholder::BailOut,
        Placeholder::Exponent,
        Placeholder::ColorsCount,
        Placeholder::Uniforms,
        Placeholder::Variables,
        Placeholder::IterationsAlgorithm,
        Placeholder::ColoringAlgorithm,
    ];

    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::MaxIterations => "@MAX_ITERATIONS@",
            Placeholder::BailOut => "@BAILOUT@",
            Placeholder::Exponent => "@EXPONENT@",
            Placeholder::ColorsCount => "@COLORS_COUNT@",
            Placeholder::Uniforms => "@UNIFORMS@",
            Placeholder::Variables => "@VARIABLES@",
            Placeholder::IterationsAlgorithm => "@ITERATIONS_ALGORITHM@",
            Placeholder::ColoringAlgorithm => "@COLORING_ALGORITHM@",
        }
    }

    /// Replacement text for this placeholder under `config`.
    pub fn value(&self, config: &ShaderConfig) -> String {
        match self {
            Placeholder::MaxIterations => config.max_iterations().to_string(),
            Placeholder::BailOut => format!("{:.2}", config.bail_out()),
            Placeholder::Exponent => format!("{:.2}", config.effective_exponent()),
            Placeholder::ColorsCount => config.palette().len().to_string(),
            Placeholder::Uniforms => config.uniforms().to_string(),
            Placeholder::Variables => config.variables().to_string(),
            Placeholder::IterationsAlgorithm => config.iteration().fragment().to_string(),
            Placeholder::ColoringAlgorithm => config.coloring().fragment().to_string(),
        }
    }

    /// Text fragments are substituted before numbers so that numeric
    /// placeholders inside a fragment are resolved as well.
    fn is_fragment(&self) -> bool {
        matches!(
            self,
            Placeholder::Uniforms
                | Placeholder::Variables
                | Placeholder::IterationsAlgorithm
                | Placeholder::ColoringAlgorithm
        )
    }
}

/// A vertex/fragment source pair ready for compilation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Assemble the built-in template for `config`.
pub fn assemble(config: &ShaderConfig) -> ShaderSource {
    assemble_with_template(FRAGMENT_TEMPLATE, config)
}

/// Assemble a custom fragment template. Every occurrence of every known
/// placeholder is replaced; unknown `@...@` tokens are left untouched.
pub fn assemble_with_template(template: &str, config: &ShaderConfig) -> ShaderSource {
    let (fragments, numbers): (Vec<Placeholder>, Vec<Placeholder>) =
        Placeholder::ALL.into_iter().partition(Placeholder::is_fragment);

    let fragment = fragments
        .iter()
        .chain(numbers.iter())
        .fold(template.to_string(), |source, placeholder| {
            source.replace(placeholder.token(), &placeholder.value(config))
        });

    ShaderSource {
        vertex: VERTEX_SHADER.to_string(),
        fragment,
    }
}

/// Known placeholder tokens still present in `source`.
pub fn unresolved_placeholders(source: &str) -> Vec<Placeholder> {
    Placeholder::ALL
        .into_iter()
        .filter(|p| source.contains(p.token()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ColoringAlgorithm, IterationAlgorithm};
    use crate::{Color, Palette};

    #[test]
    fn template_contains_every_placeholder() {
        for placeholder in Placeholder::ALL {
            assert!(
                FRAGMENT_TEMPLATE.contains(placeholder.token()),
                "template is missing {}",
                placeholder.token()
            );
        }
    }

    #[test]
    fn max_iterations_is_substituted() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_max_iterations(500).unwrap();
        let source = assemble(&config);
        assert!(source.fragment.contains("const int MAX_ITERATIONS = 500;"));
        assert!(!source.fragment.contains("@MAX_ITERATIONS@"));
    }

    #[test]
    fn no_placeholder_survives_assembly() {
        for coloring in ColoringAlgorithm::ALL {
            for iteration in IterationAlgorithm::ALL {
                let mut config = ShaderConfig::julia();
                config.set_coloring(coloring);
                config.set_iteration(iteration);
                let source = assemble(&config);
                assert!(unresolved_placeholders(&source.fragment).is_empty());
                assert!(!source.fragment.contains('@'));
            }
        }
    }

    #[test]
    fn bail_out_has_two_decimals() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_bail_out(4.0).unwrap();
        let source = assemble(&config);
        assert!(source.fragment.contains("const float BAILOUT = 4.00;"));
    }

    #[test]
    fn exponent_is_a_float_literal() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_iteration(IterationAlgorithm::Multibrot);
        config.set_exponent(3.0).unwrap();
        let source = assemble(&config);
        assert!(source.fragment.contains("const float EXPONENT = 3.00;"));
        assert!(source.fragment.contains("complexPow(z, EXPONENT)"));
    }

    #[test]
    fn colors_count_follows_palette_length() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_palette(Palette::linear(Color::BLACK, Color::WHITE, 5).unwrap());
        let source = assemble(&config);
        assert!(source.fragment.contains("uniform vec3 colors[5];"));
        assert!(source.fragment.contains("const int COLORS_COUNT = 5;"));
    }

    #[test]
    fn julia_source_declares_position_uniform() {
        let julia = assemble(&ShaderConfig::julia());
        let mandelbrot = assemble(&ShaderConfig::mandelbrot());
        assert!(julia.fragment.contains("uniform vec2 position;"));
        assert!(julia.fragment.contains("vec2 z = uv;"));
        assert!(!mandelbrot.fragment.contains("uniform vec2 position;"));
    }

    #[test]
    fn vertex_source_is_fixed_quad() {
        let source = assemble(&ShaderConfig::mandelbrot());
        assert!(source.vertex.contains("attribute vec2 position;"));
        assert!(!source.vertex.contains('@'));
    }

    #[test]
    fn placeholders_inside_fragments_are_resolved() {
        let mut config = ShaderConfig::mandelbrot();
        config.set_variables("vec2 c = uv; vec2 z = vec2(@BAILOUT@);");
        let source = assemble(&config);
        assert!(source.fragment.contains("vec2 z = vec2(2.00);"));
    }

    #[test]
    fn custom_template_reports_unknown_tokens_untouched() {
        let source = assemble_with_template("@MAX_ITERATIONS@ @OTHER@", &ShaderConfig::mandelbrot());
        assert_eq!(source.fragment, "100 @OTHER@");
    }

    #[test]
    fn assembly_is_pure() {
        let config = ShaderConfig::julia();
        assert_eq!(assemble(&config), assemble(&config));
    }
}
