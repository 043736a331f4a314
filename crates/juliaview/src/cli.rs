use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "juliaview",
    author,
    version,
    about = "Real-time animated Julia-set fractal viewer"
)]
pub struct Args {
    /// Override the render resolution (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// View zoom factor handed to the fragment shader.
    #[arg(long, value_name = "FACTOR", default_value_t = renderer::DEFAULT_ZOOM)]
    pub zoom: f32,

    /// Horizontal view pan offset.
    #[arg(long, value_name = "X", default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset_x: f32,

    /// Vertical view pan offset.
    #[arg(long, value_name = "Y", default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset_y: f32,

    /// Start with the animation paused (toggle with the space key).
    #[arg(long)]
    pub paused: bool,

    /// Replacement vertex shader (GLSL); defaults to the bundled pass-through.
    #[arg(long, value_name = "PATH")]
    pub vertex_shader: Option<PathBuf>,

    /// Replacement fragment shader (GLSL); defaults to the bundled Julia program.
    #[arg(long, value_name = "PATH")]
    pub fragment_shader: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_parameters() {
        let args = Args::try_parse_from(["juliaview"]).expect("bare invocation parses");
        assert!(args.size.is_none());
        assert_eq!(args.zoom, 1.5);
        assert_eq!(args.offset_x, 0.0);
        assert_eq!(args.offset_y, 0.0);
        assert!(!args.paused);
        assert!(args.vertex_shader.is_none());
        assert!(args.fragment_shader.is_none());
    }

    #[test]
    fn all_flags_parse() {
        let args = Args::try_parse_from([
            "juliaview",
            "--size",
            "1280x720",
            "--zoom",
            "2.0",
            "--offset-x",
            "-0.5",
            "--offset-y",
            "0.25",
            "--paused",
            "--fragment-shader",
            "custom.frag",
        ])
        .expect("full invocation parses");

        assert_eq!(args.size.as_deref(), Some("1280x720"));
        assert_eq!(args.zoom, 2.0);
        assert_eq!(args.offset_x, -0.5);
        assert_eq!(args.offset_y, 0.25);
        assert!(args.paused);
        assert_eq!(args.fragment_shader, Some(PathBuf::from("custom.frag")));
    }
}
