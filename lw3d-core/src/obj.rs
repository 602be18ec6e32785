/// Wavefront OBJ import
///
/// Reads `v`, `f` and `l` statements into a wireframe. Texture and
/// normal references inside elements are parsed and dropped, as are
/// grouping, material and smoothing statements. Vertex references are
/// 1-based and may be negative, counting back from the most recently
/// read vertex.
use nom::{
    character::complete::{char, i64 as integer, multispace0, multispace1},
    combinator::{all_consuming, opt},
    multi::many1,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::color::Rgb;
use crate::error::ObjError;
use crate::wireframe::Wireframe;

/// Parse OBJ text into a wireframe with white faces and edges.
pub fn parse_obj(input: &str) -> Result<Wireframe, ObjError> {
    let mut mesh = Wireframe::new();
    for (index, line) in input.lines().enumerate() {
        let line = line.trim();
        let Some(keyword) = line.split_whitespace().next() else {
            continue;
        };
        let line_number = index + 1;
        let rest = &line[keyword.len()..];
        match keyword {
            "v" => {
                let (x, y, z) = run(vertex_statement, rest, line_number, "v")?;
                mesh.add_node(x, y, z);
            }
            "f" => {
                let references = run(element_statement, rest, line_number, "f")?;
                if references.len() < 3 {
                    return Err(ObjError::FaceTooSmall {
                        line: line_number,
                        count: references.len(),
                    });
                }
                let nodes = resolve_all(&references, mesh.nodes.len(), line_number)?;
                mesh.add_face(nodes, Rgb::WHITE);
            }
            "l" => {
                let references = run(element_statement, rest, line_number, "l")?;
                if references.len() < 2 {
                    return Err(ObjError::Malformed {
                        line: line_number,
                        statement: "l",
                    });
                }
                let nodes = resolve_all(&references, mesh.nodes.len(), line_number)?;
                for pair in nodes.windows(2) {
                    mesh.add_edge(pair[0], pair[1], Rgb::WHITE);
                }
            }
            // Comments, normals, texture coordinates, groups and
            // materials carry nothing the wireframe stores.
            _ => {}
        }
    }
    Ok(mesh)
}

fn run<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    input: &'a str,
    line: usize,
    statement: &'static str,
) -> Result<O, ObjError> {
    match all_consuming(parser)(input) {
        Ok((_, parsed)) => Ok(parsed),
        Err(_) => Err(ObjError::Malformed { line, statement }),
    }
}

fn resolve_all(
    references: &[i64],
    count: usize,
    line: usize,
) -> Result<Vec<usize>, ObjError> {
    references
        .iter()
        .map(|&reference| resolve(reference, count, line))
        .collect()
}

/// Turn a 1-based or negative OBJ reference into a node index.
fn resolve(reference: i64, count: usize, line: usize) -> Result<usize, ObjError> {
    let resolved = if reference > 0 {
        reference - 1
    } else {
        count as i64 + reference
    };
    if resolved < 0 || resolved >= count as i64 {
        return Err(ObjError::ReferenceOutOfRange {
            line,
            reference,
            count,
        });
    }
    Ok(resolved as usize)
}

fn vertex_statement(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = preceded(multispace1, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    // Optional weight component, parsed and ignored.
    let (input, _) = opt(preceded(multispace1, float))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (x, y, z)))
}

fn element_statement(input: &str) -> IResult<&str, Vec<i64>> {
    let (input, references) = many1(preceded(multispace1, vertex_reference))(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, references))
}

/// One element reference: `v`, `v/vt`, `v//vn` or `v/vt/vn`. Only the
/// vertex part is kept.
fn vertex_reference(input: &str) -> IResult<&str, i64> {
    let (input, vertex) = integer(input)?;
    let (input, _) = opt(preceded(char('/'), opt(integer)))(input)?;
    let (input, _) = opt(preceded(char('/'), integer))(input)?;
    Ok((input, vertex))
}
