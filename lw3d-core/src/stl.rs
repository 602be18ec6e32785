/// STL import for binary and ASCII formats
use std::collections::HashMap;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{multispace0, multispace1},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::color::Rgb;
use crate::error::StlError;
use crate::wireframe::Wireframe;

/// Accumulates triangles into a wireframe, sharing nodes between
/// triangles that meet at bit-identical coordinates.
struct TriangleSink {
    mesh: Wireframe,
    color: Rgb,
    seen: HashMap<[u32; 3], usize>,
}

impl TriangleSink {
    fn new(color: Rgb) -> Self {
        Self {
            mesh: Wireframe::new(),
            color,
            seen: HashMap::new(),
        }
    }

    fn node(&mut self, point: [f32; 3]) -> usize {
        let key = [point[0].to_bits(), point[1].to_bits(), point[2].to_bits()];
        if let Some(&index) = self.seen.get(&key) {
            return index;
        }
        let index = self.mesh.add_node(point[0], point[1], point[2]);
        self.seen.insert(key, index);
        index
    }

    fn triangle(&mut self, a: [f32; 3], b: [f32; 3], c: [f32; 3]) {
        let face = vec![self.node(a), self.node(b), self.node(c)];
        self.mesh.add_face(face, self.color);
    }
}

/// Parse a binary STL body.
///
/// The stored per-facet normal is skipped; shading recomputes normals
/// from the winding.
pub fn parse_binary_stl(data: &[u8]) -> Result<Wireframe, StlError> {
    if data.len() < 84 {
        return Err(StlError::TooShort);
    }

    // Skip the 80-byte header, then read the little-endian triangle
    // count.
    let data = &data[80..];
    let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

    let mut sink = TriangleSink::new(Rgb::WHITE);
    let mut offset = 4;
    for index in 0..count {
        if offset + 50 > data.len() {
            return Err(StlError::TruncatedTriangle(index));
        }

        // Normal (3 floats), three vertices (9 floats), attribute bytes.
        offset += 12;
        let mut points = [[0.0f32; 3]; 3];
        for point in &mut points {
            for channel in point.iter_mut() {
                *channel = f32::from_le_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
                offset += 4;
            }
        }
        offset += 2;

        sink.triangle(points[0], points[1], points[2]);
    }

    Ok(sink.mesh)
}

/// Parse an ASCII STL file.
pub fn parse_ascii_stl(input: &str) -> Result<Wireframe, StlError> {
    match parse_ascii_body(input) {
        Ok((_, triangles)) => {
            let mut sink = TriangleSink::new(Rgb::WHITE);
            for [a, b, c] in triangles {
                sink.triangle(a, b, c);
            }
            Ok(sink.mesh)
        }
        Err(error) => {
            let near = match &error {
                nom::Err::Error(inner) | nom::Err::Failure(inner) => {
                    inner.input.chars().take(32).collect()
                }
                nom::Err::Incomplete(_) => String::from("end of input"),
            };
            Err(StlError::Ascii(near))
        }
    }
}

fn parse_ascii_body(input: &str) -> IResult<&str, Vec<[[f32; 3]; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    // Optional solid name, up to the end of the line.
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, triangles) = many0(parse_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, triangles))
}

fn parse_facet(input: &str) -> IResult<&str, [[f32; 3]; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _) = parse_triple(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = parse_vertex(input)?;
    let (input, b) = parse_vertex(input)?;
    let (input, c) = parse_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn parse_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    parse_triple(input)
}

fn parse_triple(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, [x, y, z]))
}

/// Detect the format and parse either way.
pub fn parse_stl(data: &[u8]) -> Result<Wireframe, StlError> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }
    parse_binary_stl(data)
}
