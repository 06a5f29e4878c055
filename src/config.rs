//! Command line configuration for the viewer.

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, ArgMatches};
use glam::Vec3;

const DEFAULT_VERTEX_SHADER: &str = include_str!("shaders/triangle.vert");
const DEFAULT_FRAGMENT_SHADER: &str = include_str!("shaders/triangle.frag");

#[derive(Debug, Clone)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub background: Vec3,
    pub vertex_shader: Option<PathBuf>,
    pub fragment_shader: Option<PathBuf>,
    pub transparency: bool,
    pub depth_test: bool,
    pub culling: bool,
    pub antialiasing: bool,
    pub log_filter: Option<String>,
}

impl Config {
    /// Parses the command line described in `cli.yaml`.
    ///
    /// `--help` and `--version` come back as a `clap::Error`, which the caller should `exit()` on.
    pub fn from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let yaml = load_yaml!("cli.yaml");
        let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;

        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let width = parse_dimension(value(matches, "width")?, "width")?;
        let height = parse_dimension(value(matches, "height")?, "height")?;
        let background = parse_color(value(matches, "background")?)?;

        Ok(Self {
            width,
            height,
            title: value(matches, "title")?.to_owned(),
            background,
            vertex_shader: matches.value_of_os("vertex-shader").map(PathBuf::from),
            fragment_shader: matches.value_of_os("fragment-shader").map(PathBuf::from),
            transparency: matches.is_present("transparency"),
            depth_test: !matches.is_present("no-depth-test"),
            culling: matches.is_present("culling"),
            antialiasing: matches.is_present("antialiasing"),
            log_filter: matches.value_of("log").map(str::to_owned),
        })
    }

    /// Width over height, for the camera projection.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Reads the shader files given on the command line, falling back to the built-in sources.
    pub fn shader_sources(&self) -> Result<(String, String)> {
        let vertex = match &self.vertex_shader {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read vertex shader {}", path.display()))?,
            None => DEFAULT_VERTEX_SHADER.to_owned(),
        };

        let fragment = match &self.fragment_shader {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read fragment shader {}", path.display()))?,
            None => DEFAULT_FRAGMENT_SHADER.to_owned(),
        };

        Ok((vertex, fragment))
    }
}

/// Value of an option that `cli.yaml` gives a default.
fn value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches.value_of(name).ok_or_else(|| anyhow!("missing --{}", name))
}

fn parse_dimension(value: &str, name: &str) -> Result<u32> {
    let n: u32 = value
        .parse()
        .with_context(|| format!("{} must be a whole number of pixels, got {:?}", name, value))?;

    if n == 0 {
        bail!("{} must be greater than zero", name);
    }

    Ok(n)
}

/// Parses `r,g,b` with each component in `0.0..=1.0`.
pub fn parse_color(value: &str) -> Result<Vec3> {
    let components = value
        .split(',')
        .map(|c| c.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("color components must be numbers, got {:?}", value))?;

    if components.len() != 3 {
        bail!("expected three color components (r,g,b), got {}", components.len());
    }

    if components.iter().any(|c| !(0.0..=1.0).contains(c)) {
        bail!("color components must be between 0 and 1, got {:?}", value);
    }

    Ok(Vec3::new(components[0], components[1], components[2]))
}
