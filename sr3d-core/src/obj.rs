//! Wavefront OBJ subset parser and asynchronous mesh loading

use std::future::Future;
use std::io;
use std::path::PathBuf;

use nalgebra::Point3;
use nom::{
    bytes::complete::take_till1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, map, opt, recognize, rest},
    number::complete::float,
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};
use tracing::{debug, warn};

use crate::error::{LoadError, ObjError};
use crate::geometry::{Mesh, Triangle};

/// A classified source line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line<'a> {
    Vertex(Point3<f32>),
    /// Raw tokens of a three-token `f` line
    Face([&'a str; 3]),
    Ignored,
}

/// Parse OBJ text into a mesh.
///
/// Only `v x y z` and triangular `f a b c` lines are read; everything else
/// (comments, normals, texture coordinates, materials, quads) is skipped.
/// Face indices are 1-based and may carry `/texture/normal` suffixes, which
/// are dropped. A three-token face whose tokens are not integers, or whose
/// index does not name a previously declared vertex, aborts the parse.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut vertices: Vec<Point3<f32>> = Vec::new();
    let mut triangles = Vec::new();
    let mut skipped = 0usize;

    for (number, text) in input.lines().enumerate() {
        match classify(text) {
            Line::Vertex(v) => vertices.push(v),
            Line::Face(tokens) => {
                let line = number + 1;
                let indices = [
                    parse_index(tokens[0], line)?,
                    parse_index(tokens[1], line)?,
                    parse_index(tokens[2], line)?,
                ];
                let [a, b, c] = resolve(indices, &vertices, line)?;
                match Triangle::new(a, b, c) {
                    Ok(triangle) => triangles.push(triangle),
                    Err(e) => {
                        warn!(line, "skipping degenerate face: {}", e);
                        skipped += 1;
                    }
                }
            }
            Line::Ignored => {}
        }
    }

    debug!(
        vertices = vertices.len(),
        triangles = triangles.len(),
        skipped,
        "parsed OBJ"
    );
    Ok(Mesh::new(triangles))
}

fn resolve(
    indices: [i64; 3],
    vertices: &[Point3<f32>],
    line: usize,
) -> Result<[Point3<f32>; 3], ObjError> {
    let lookup = |i: i64| {
        usize::try_from(i)
            .ok()
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| vertices.get(i).copied())
            .ok_or(ObjError::IndexOutOfRange {
                line,
                index: i,
                vertex_count: vertices.len(),
            })
    };
    Ok([lookup(indices[0])?, lookup(indices[1])?, lookup(indices[2])?])
}

fn classify(text: &str) -> Line<'_> {
    let text = text.trim();
    if let Ok((_, v)) = vertex_line(text) {
        return Line::Vertex(v);
    }
    if let Ok((_, f)) = face_line(text) {
        return Line::Face(f);
    }
    Line::Ignored
}

fn vertex_line(input: &str) -> IResult<&str, Point3<f32>> {
    all_consuming(map(
        preceded(
            char('v'),
            tuple((
                preceded(space1, float),
                preceded(space1, float),
                preceded(space1, float),
            )),
        ),
        |(x, y, z)| Point3::new(x, y, z),
    ))(input)
}

fn face_line(input: &str) -> IResult<&str, [&str; 3]> {
    all_consuming(map(
        terminated(
            preceded(
                char('f'),
                tuple((
                    preceded(space1, face_token),
                    preceded(space1, face_token),
                    preceded(space1, face_token),
                )),
            ),
            space0,
        ),
        |(a, b, c)| [a, b, c],
    ))(input)
}

fn face_token(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace())(input)
}

/// `i`, `i/t`, `i//n` or `i/t/n`; only the signed position index is kept
fn face_index(input: &str) -> IResult<&str, &str> {
    all_consuming(terminated(
        recognize(pair(opt(char('-')), digit1)),
        opt(preceded(char('/'), rest)),
    ))(input)
}

fn parse_index(token: &str, line: usize) -> Result<i64, ObjError> {
    let (_, digits) = face_index(token).map_err(|_| ObjError::MalformedFace {
        line,
        token: token.to_string(),
    })?;

    // Too wide for i64 means out of range for any mesh; saturate so the
    // range check rejects it
    Ok(digits.parse::<i64>().unwrap_or(if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Fetch OBJ text and parse it into a mesh.
///
/// `fetch` is the source of the text; any I/O error it yields is returned
/// as [`LoadError::Io`].
pub async fn load_obj<F>(fetch: F) -> Result<Mesh, LoadError>
where
    F: Future<Output = io::Result<String>>,
{
    let text = fetch.await?;
    Ok(parse_obj(&text)?)
}

/// Load an OBJ file from disk
pub async fn load_obj_file(path: impl Into<PathBuf>) -> Result<Mesh, LoadError> {
    let path = path.into();
    load_obj(async move { std::fs::read_to_string(&path) }).await
}
