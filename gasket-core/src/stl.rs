/// STL export of solids and import of triangle soups (ASCII and binary)
use std::fmt::Write as _;

use log::{debug, warn};
use nom::{
    bytes::complete::{tag, take, take_till},
    character::complete::{multispace0, multispace1},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::StlError;
use crate::solid::{SolidSpec, Triangle};
use crate::transform::Vec3;

const BINARY_HEADER_LEN: usize = 80;
const BINARY_FACET_LEN: usize = 50;

/// Write `solids` as one ASCII STL document, triangles in world space.
pub fn write_ascii<'a, I>(name: &str, solids: I) -> String
where
    I: IntoIterator<Item = &'a SolidSpec>,
{
    write_triangles(name, solids.into_iter().flat_map(|s| s.triangles()))
}

/// Write any triangle sequence as an ASCII STL document.
pub fn write_triangles<I>(name: &str, triangles: I) -> String
where
    I: IntoIterator<Item = Triangle>,
{
    let mut out = String::new();
    let mut facets = 0usize;
    // fmt::Write on String cannot fail
    let _ = writeln!(out, "solid {}", name);
    for tri in triangles {
        let n = tri.normal();
        let _ = writeln!(out, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z);
        let _ = writeln!(out, "    outer loop");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {:e} {:e} {:e}", v.x, v.y, v.z);
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
        facets += 1;
    }
    let _ = writeln!(out, "endsolid {}", name);
    debug!("wrote {} facets to ASCII STL {:?}", facets, name);
    out
}

/// Parse an ASCII STL document. Facet normals are recomputed from winding.
pub fn parse_ascii(input: &str) -> Result<Vec<Triangle>, StlError> {
    match ascii_document(input) {
        Ok((_, triangles)) => Ok(triangles),
        Err(e) => Err(StlError::Malformed(format!("{:?}", e))),
    }
}

fn ascii_document(input: &str) -> IResult<&str, Vec<Triangle>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _) = take_till(|c| c == '\n')(input)?;
    let (input, triangles) = many0(facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    Ok((input, triangles))
}

fn facet(input: &str) -> IResult<&str, Triangle> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = vector3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, v0) = preceded(preceded(multispace0, tag("vertex")), vector3)(input)?;
    let (input, v1) = preceded(preceded(multispace0, tag("vertex")), vector3)(input)?;
    let (input, v2) = preceded(preceded(multispace0, tag("vertex")), vector3)(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, Triangle::new(v0, v1, v2)))
}

fn vector3(input: &str) -> IResult<&str, Vec3> {
    let (input, x) = preceded(multispace0, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

/// Parse a binary STL blob: 80-byte header, `u32` facet count, 50-byte facets.
pub fn parse_binary(data: &[u8]) -> Result<Vec<Triangle>, StlError> {
    let min = BINARY_HEADER_LEN + 4;
    if data.len() < min {
        return Err(StlError::Truncated {
            needed: min,
            found: data.len(),
        });
    }

    let facets = u32::from_le_bytes([data[80], data[81], data[82], data[83]]) as usize;
    let needed = min + facets * BINARY_FACET_LEN;
    if data.len() < needed {
        return Err(StlError::Truncated {
            needed,
            found: data.len(),
        });
    }

    match binary_document(data) {
        Ok((_, triangles)) => Ok(triangles),
        Err(e) => Err(StlError::Malformed(format!("{:?}", e))),
    }
}

fn binary_document(input: &[u8]) -> IResult<&[u8], Vec<Triangle>> {
    let (input, _) = take(BINARY_HEADER_LEN)(input)?;
    let (input, facets) = le_u32(input)?;
    count(binary_facet, facets as usize)(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Triangle> {
    let (input, _normal) = le_vector3(input)?;
    let (input, v0) = le_vector3(input)?;
    let (input, v1) = le_vector3(input)?;
    let (input, v2) = terminated(le_vector3, le_u16)(input)?;
    Ok((input, Triangle::new(v0, v1, v2)))
}

fn le_vector3(input: &[u8]) -> IResult<&[u8], Vec3> {
    let (input, x) = le_f32(input)?;
    let (input, y) = le_f32(input)?;
    let (input, z) = le_f32(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

/// Detect the format and parse. Data starting with `solid` is tried as ASCII
/// first, since some binary exporters also write that header.
pub fn parse(data: &[u8]) -> Result<Vec<Triangle>, StlError> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            match parse_ascii(text) {
                Ok(triangles) => return Ok(triangles),
                Err(e) => warn!("not ASCII STL despite header, trying binary: {}", e),
            }
        }
    }
    parse_binary(data)
}

pub fn read_file(path: impl AsRef<std::path::Path>) -> Result<Vec<Triangle>, StlError> {
    let data = std::fs::read(path)?;
    parse(&data)
}
