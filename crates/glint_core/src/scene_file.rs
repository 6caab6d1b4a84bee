//! Scene description text format.
//!
//! One directive per line; the first whitespace-separated token is the
//! keyword and the rest are numeric fields:
//!
//! ```text
//! camera      fx fy fz  ax ay az  ux uy uz  fov
//! light       px py pz  r g b  intensity
//! sphere      cx cy cz  radius  <material>
//! box         x0 y0 z0  x1 y1 z1  <material>
//! triangle    ax ay az  bx by bz  cx cy cz  <material>
//! background  r g b
//! reflections enabled(0/1) max_depth(>=1)
//! off_model   path  <material>
//!
//! <material> = r g b  ambient diffuse specular shininess reflectivity
//! ```
//!
//! Unknown keywords, blank lines and `#` comments are skipped. A known
//! keyword with a missing or malformed field fails the whole parse, so a
//! scene is never built from half a file. `off_model` uses five times the
//! red channel as the mesh scale.

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::SplitWhitespace;

use glint_math::Vec3;
use thiserror::Error;

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum SceneFileError {
    #[error("Failed to read scene file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Line {line}: '{keyword}' is missing field '{field}'")]
    MissingField {
        line: usize,
        keyword: String,
        field: &'static str,
    },

    #[error("Line {line}: '{keyword}' field '{field}' has invalid value '{value}'")]
    InvalidNumber {
        line: usize,
        keyword: String,
        field: &'static str,
        value: String,
    },
}

/// Result type for scene file parsing.
pub type SceneFileResult<T> = Result<T, SceneFileError>;

/// Surface appearance as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialSpec {
    pub color: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    pub shininess: f32,
    pub reflectivity: f32,
}

impl Default for MaterialSpec {
    fn default() -> Self {
        Self {
            color: Vec3::new(0.8, 0.8, 0.8),
            ambient: 0.1,
            diffuse: 0.7,
            specular: 0.3,
            shininess: 32.0,
            reflectivity: 0.0,
        }
    }
}

/// Pinhole camera placement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpec {
    pub look_from: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(0.0, 0.0, 5.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            fov: 60.0,
        }
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpec {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

impl Default for LightSpec {
    /// The light added when a scene defines none.
    fn default() -> Self {
        Self {
            position: Vec3::new(10.0, 10.0, 10.0),
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Reflection settings from a `reflections` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectionSpec {
    pub enabled: bool,
    pub max_depth: u32,
}

/// A geometric object, in file order.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectSpec {
    Sphere {
        center: Vec3,
        radius: f32,
        material: MaterialSpec,
    },
    Box {
        min: Vec3,
        max: Vec3,
        material: MaterialSpec,
    },
    Triangle {
        vertices: [Vec3; 3],
        material: MaterialSpec,
    },
    /// An OFF mesh, scaled uniformly about the origin.
    Mesh {
        path: PathBuf,
        scale: f32,
        material: MaterialSpec,
    },
}

/// A fully parsed scene file, not yet turned into renderable primitives.
#[derive(Debug, Clone, Default)]
pub struct SceneDescription {
    /// Last `camera` directive, if any
    pub camera: Option<CameraSpec>,
    /// Lights in file order; never empty after parsing
    pub lights: Vec<LightSpec>,
    /// Objects in file order
    pub objects: Vec<ObjectSpec>,
    /// Last `background` directive, if any
    pub background: Option<Vec3>,
    /// Last `reflections` directive, if any
    pub reflections: Option<ReflectionSpec>,
    /// Directory of the scene file, used to resolve relative mesh paths
    pub base_dir: Option<PathBuf>,
}

impl SceneDescription {
    /// Resolve a mesh path written in the scene file.
    ///
    /// Relative paths are tried against the scene file's directory first
    /// and fall back to the path as written (relative to the working
    /// directory).
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            if let Some(base) = &self.base_dir {
                let candidate = base.join(path);
                if candidate.exists() {
                    return candidate;
                }
            }
        }
        path.to_path_buf()
    }
}

/// Read and parse a scene file from disk.
pub fn parse_scene_file(path: impl AsRef<Path>) -> SceneFileResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SceneFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut description = parse_scene(&content)?;
    description.base_dir = path.parent().map(Path::to_path_buf);

    log::info!(
        "Parsed scene {:?}: {} objects, {} lights",
        path,
        description.objects.len(),
        description.lights.len()
    );

    Ok(description)
}

/// Parse scene text. Fails on the first malformed directive.
pub fn parse_scene(content: &str) -> SceneFileResult<SceneDescription> {
    let mut description = SceneDescription::default();

    for (index, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        let mut fields = Fields {
            line: index + 1,
            keyword,
            tokens,
        };

        match keyword {
            "camera" => {
                description.camera = Some(CameraSpec {
                    look_from: fields.vec3("look_from")?,
                    look_at: fields.vec3("look_at")?,
                    up: fields.vec3("up")?,
                    fov: fields.float("fov")?,
                });
            }
            "light" => {
                description.lights.push(LightSpec {
                    position: fields.vec3("position")?,
                    color: fields.vec3("color")?,
                    intensity: fields.float("intensity")?,
                });
            }
            "sphere" => {
                let center = fields.vec3("center")?;
                let radius = fields.float("radius")?;
                let material = fields.material()?;
                description.objects.push(ObjectSpec::Sphere {
                    center,
                    radius,
                    material,
                });
            }
            "box" => {
                let min = fields.vec3("min")?;
                let max = fields.vec3("max")?;
                let material = fields.material()?;
                description
                    .objects
                    .push(ObjectSpec::Box { min, max, material });
            }
            "triangle" => {
                let vertices = [fields.vec3("v0")?, fields.vec3("v1")?, fields.vec3("v2")?];
                let material = fields.material()?;
                description
                    .objects
                    .push(ObjectSpec::Triangle { vertices, material });
            }
            "background" => {
                description.background = Some(fields.vec3("color")?);
            }
            "reflections" => {
                let enabled = fields.int("enabled")? != 0;
                let max_depth = fields.positive("max_depth")?;
                description.reflections = Some(ReflectionSpec { enabled, max_depth });
            }
            "off_model" => {
                let path = PathBuf::from(fields.word("path")?);
                let material = fields.material()?;
                description.objects.push(ObjectSpec::Mesh {
                    path,
                    scale: material.color.x * 5.0,
                    material,
                });
            }
            other => {
                log::debug!("Line {}: skipping unknown directive '{}'", index + 1, other);
            }
        }
    }

    if description.lights.is_empty() {
        log::debug!("Scene defines no lights, adding default light");
        description.lights.push(LightSpec::default());
    }

    Ok(description)
}

/// Field reader over the tokens of one directive line.
struct Fields<'a> {
    line: usize,
    keyword: &'a str,
    tokens: SplitWhitespace<'a>,
}

impl<'a> Fields<'a> {
    fn word(&mut self, field: &'static str) -> SceneFileResult<&'a str> {
        self.tokens.next().ok_or_else(|| SceneFileError::MissingField {
            line: self.line,
            keyword: self.keyword.to_string(),
            field,
        })
    }

    fn number<T: std::str::FromStr>(&mut self, field: &'static str) -> SceneFileResult<T> {
        let token = self.word(field)?;
        token.parse::<T>().map_err(|_| SceneFileError::InvalidNumber {
            line: self.line,
            keyword: self.keyword.to_string(),
            field,
            value: token.to_string(),
        })
    }

    fn float(&mut self, field: &'static str) -> SceneFileResult<f32> {
        self.number::<f32>(field)
    }

    fn int(&mut self, field: &'static str) -> SceneFileResult<i64> {
        self.number::<i64>(field)
    }

    /// Unsigned integer that must be at least 1.
    fn positive(&mut self, field: &'static str) -> SceneFileResult<u32> {
        self.number::<NonZeroU32>(field).map(NonZeroU32::get)
    }

    fn vec3(&mut self, field: &'static str) -> SceneFileResult<Vec3> {
        Ok(Vec3::new(
            self.float(field)?,
            self.float(field)?,
            self.float(field)?,
        ))
    }

    fn material(&mut self) -> SceneFileResult<MaterialSpec> {
        Ok(MaterialSpec {
            color: self.vec3("color")?,
            ambient: self.float("ambient")?,
            diffuse: self.float("diffuse")?,
            specular: self.float("specular")?,
            shininess: self.float("shininess")?,
            reflectivity: self.float("reflectivity")?,
        })
    }
}
