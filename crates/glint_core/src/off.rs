//! OFF (Object File Format) mesh reader.
//!
//! Reads the plain-text polygon format:
//!
//! ```text
//! OFF
//! # comment
//! 4 2 0
//! 0 0 0
//! 1 0 0
//! 1 1 0
//! 0 1 0
//! 3 0 1 2
//! 3 0 2 3
//! ```
//!
//! The header keyword may share its line with the counts (`OFF 4 2 0`).
//! Trailing per-vertex or per-face values (colors in `COFF` files) are
//! ignored. Polygons with more than three vertices are fan-triangulated
//! around their first vertex.

use std::path::Path;

use glint_math::Vec3;
use thiserror::Error;

use crate::mesh::Mesh;

/// Errors that can occur while reading an OFF file.
#[derive(Error, Debug)]
pub enum OffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing OFF header")]
    MissingHeader,

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unexpected end of file: expected {0}")]
    UnexpectedEof(&'static str),

    #[error("Face at line {line} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        vertex_count: usize,
    },
}

/// Result type for OFF reading.
pub type OffResult<T> = Result<T, OffError>;

/// Read an OFF file from disk.
pub fn read_off(path: impl AsRef<Path>) -> OffResult<Mesh> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mesh = parse_off(&content)?;

    log::info!(
        "Read {:?}: {} vertices, {} triangles",
        path,
        mesh.vertex_count(),
        mesh.triangle_count()
    );

    Ok(mesh)
}

/// Parse OFF content that is already in memory.
pub fn parse_off(content: &str) -> OffResult<Mesh> {
    // Significant lines only, with 1-based line numbers and comments removed
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty());

    let (header_line, header) = lines.next().ok_or(OffError::MissingHeader)?;
    let mut header_tokens = header.split_whitespace();
    if !header_tokens.next().is_some_and(|kw| kw.ends_with("OFF")) {
        return Err(OffError::MissingHeader);
    }

    // Counts either follow the keyword directly or sit on the next line
    let rest: Vec<&str> = header_tokens.collect();
    let (counts_line, counts) = if rest.is_empty() {
        let (line, text) = lines.next().ok_or(OffError::UnexpectedEof("vertex/face counts"))?;
        (line, text.split_whitespace().collect::<Vec<_>>())
    } else {
        (header_line, rest)
    };

    if counts.len() < 2 {
        return Err(OffError::Parse {
            line: counts_line,
            message: "expected vertex and face counts".to_string(),
        });
    }
    let vertex_count = parse_count(counts[0], counts_line)?;
    let face_count = parse_count(counts[1], counts_line)?;

    // Header counts are untrusted; every entry takes at least one byte of input
    let mut positions = Vec::with_capacity(vertex_count.min(content.len()));
    for _ in 0..vertex_count {
        let (line, text) = lines.next().ok_or(OffError::UnexpectedEof("vertex"))?;
        let coords: Vec<&str> = text.split_whitespace().take(3).collect();
        if coords.len() < 3 {
            return Err(OffError::Parse {
                line,
                message: format!("vertex needs 3 coordinates, found {}", coords.len()),
            });
        }
        positions.push(Vec3::new(
            parse_float(coords[0], line)?,
            parse_float(coords[1], line)?,
            parse_float(coords[2], line)?,
        ));
    }

    let mut indices = Vec::with_capacity(face_count.saturating_mul(3).min(content.len()));
    for _ in 0..face_count {
        let (line, text) = lines.next().ok_or(OffError::UnexpectedEof("face"))?;
        let mut tokens = text.split_whitespace();

        let sides = match tokens.next() {
            Some(token) => parse_count(token, line)?,
            None => continue,
        };

        let polygon = tokens
            .take(sides)
            .map(|token| {
                let index = parse_count(token, line)?;
                if index >= vertex_count {
                    return Err(OffError::IndexOutOfRange {
                        line,
                        index,
                        vertex_count,
                    });
                }
                Ok(index as u32)
            })
            .collect::<OffResult<Vec<u32>>>()?;

        if polygon.len() < sides {
            return Err(OffError::Parse {
                line,
                message: format!("face declares {} vertices, found {}", sides, polygon.len()),
            });
        }

        triangulate_fan(&polygon, &mut indices);
    }

    Ok(Mesh::new(positions, indices))
}

/// Append a fan triangulation of `polygon` to `indices`.
///
/// Polygons with fewer than three vertices produce nothing.
fn triangulate_fan(polygon: &[u32], indices: &mut Vec<u32>) {
    if polygon.len() < 3 {
        return;
    }
    for j in 2..polygon.len() {
        indices.extend_from_slice(&[polygon[0], polygon[j - 1], polygon[j]]);
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_count(token: &str, line: usize) -> OffResult<usize> {
    token.parse::<usize>().map_err(|_| OffError::Parse {
        line,
        message: format!("invalid integer '{}'", token),
    })
}

fn parse_float(token: &str, line: usize) -> OffResult<f32> {
    token.parse::<f32>().map_err(|_| OffError::Parse {
        line,
        message: format!("invalid number '{}'", token),
    })
}
