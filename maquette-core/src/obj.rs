/// OBJ text serialization: writer plus a parser for the emitted subset
use std::io::{self, Write};

use nalgebra::{Point3, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending, u32 as index},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::error::{GeomError, GeomResult};
use crate::geometry::{Face, Mesh};

/// Render a mesh in the OBJ layout: a comment header with counts, `v`
/// lines, `vn` lines and `f v//n v//n v//n` lines, coordinates with four
/// decimal places. This layout is an output-compatibility contract; do
/// not reorder or reformat it.
pub fn to_obj_string(mesh: &Mesh) -> String {
    let mut out = String::new();

    out.push_str("# OBJ file\n");
    out.push_str(&format!("# {} vertices\n", mesh.vertex_count()));
    for v in mesh.vertices() {
        out.push_str(&format!("v {:.4} {:.4} {:.4}\n", v.x, v.y, v.z));
    }

    out.push_str(&format!("# {} normals\n", mesh.normal_count()));
    for n in mesh.normals() {
        out.push_str(&format!("vn {:.4} {:.4} {:.4}\n", n.x, n.y, n.z));
    }

    out.push_str(&format!("# {} faces\n", mesh.face_count()));
    for f in mesh.faces() {
        out.push_str(&format!(
            "f {}//{} {}//{} {}//{}\n",
            f.vertices[0], f.normal, f.vertices[1], f.normal, f.vertices[2], f.normal
        ));
    }

    out
}

/// Write the OBJ text to any writer.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W) -> io::Result<()> {
    writer.write_all(to_obj_string(mesh).as_bytes())
}

/// Parse the OBJ subset the writer emits (`v`, `vn`, `f v//n` with
/// comments and blank lines) back into a validated mesh.
pub fn parse_obj(input: &str) -> GeomResult<Mesh> {
    let (rest, mesh) =
        parse_obj_impl(input).map_err(|e| GeomError::InvalidObj(e.to_string()))?;
    if !rest.trim().is_empty() {
        let line = rest.trim_start().lines().next().unwrap_or_default();
        return Err(GeomError::InvalidObj(format!("unexpected line: {line:?}")));
    }
    if mesh.vertex_count() == 0 {
        return Err(GeomError::InvalidObj("no vertices".to_string()));
    }
    mesh.validate()?;
    Ok(mesh)
}

fn parse_obj_impl(input: &str) -> IResult<&str, Mesh> {
    let (input, vertices) = many0(vertex_line)(input)?;
    let (input, normals) = many0(normal_line)(input)?;
    let (input, faces) = many0(face_line)(input)?;
    let (input, _) = comments(input)?;
    let (input, _) = multispace0(input)?;

    let mut mesh = Mesh::with_capacity(vertices.len(), normals.len(), faces.len());
    for v in vertices {
        mesh.push_vertex(v);
    }
    for n in normals {
        mesh.push_normal(n);
    }
    for f in faces {
        mesh.add_face(f);
    }

    Ok((input, mesh))
}

fn comment(input: &str) -> IResult<&str, &str> {
    preceded(preceded(multispace0, tag("#")), not_line_ending)(input)
}

fn comments(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(comment)(input)?;
    Ok((input, ()))
}

fn vertex_line(input: &str) -> IResult<&str, Point3<f32>> {
    let (input, _) = comments(input)?;
    let (input, _) = preceded(multispace0, tag("v"))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, (x, y, z)) = triple(input)?;
    Ok((input, Point3::new(x, y, z)))
}

fn normal_line(input: &str) -> IResult<&str, Vector3<f32>> {
    let (input, _) = comments(input)?;
    let (input, _) = preceded(multispace0, tag("vn"))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, (x, y, z)) = triple(input)?;
    Ok((input, Vector3::new(x, y, z)))
}

fn face_line(input: &str) -> IResult<&str, Face> {
    let (input, _) = comments(input)?;
    let (input, _) = preceded(multispace0, tag("f"))(input)?;
    let (input, a) = index_pair(input)?;
    let (input, b) = index_pair(input)?;
    let (input, c) = index_pair(input)?;
    // the writer repeats one normal per face; keep the first
    Ok((input, Face::new([a.0, b.0, c.0], a.1)))
}

fn index_pair(input: &str) -> IResult<&str, (u32, u32)> {
    let (input, v) = preceded(multispace1, index)(input)?;
    let (input, _) = tag("//")(input)?;
    let (input, n) = index(input)?;
    Ok((input, (v, n)))
}

fn triple(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = float(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, (x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frustum::Frustum;

    fn triangle_prism() -> Mesh {
        Frustum::new(3, 1.0, 1.0, 1.0).unwrap().mesh().unwrap()
    }

    #[test]
    fn test_writer_layout() {
        let text = to_obj_string(&triangle_prism());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# OBJ file");
        assert_eq!(lines[1], "# 8 vertices");
        assert_eq!(lines[2], "v 1.0000 0.0000 0.0000");
        assert_eq!(lines[10], "# 8 normals");
        assert_eq!(lines[19], "# 12 faces");
        assert_eq!(lines[20], "f 1//3 2//3 4//3");
        assert_eq!(lines.len(), 32);
    }

    #[test]
    fn test_writer_uses_four_decimal_places() {
        let text = to_obj_string(&triangle_prism());
        // ring vertex at 120 degrees
        assert!(text.contains("v -0.5000 0.0000 0.8660"));
        assert!(text.contains("vn 0.0000 -1.0000 0.0000"));
    }

    #[test]
    fn test_cap_fans_reference_cap_normals() {
        let text = to_obj_string(&triangle_prism());
        // bottom fan winds through the bottom center (vertex 7)
        assert!(text.contains("f 7//1 2//1 1//1"));
        // top fan winds through the top center (vertex 8)
        assert!(text.contains("f 8//2 4//2 5//2"));
    }

    #[test]
    fn test_round_trip() {
        let mesh = Frustum::new(8, 6.0, 1.0, 0.8).unwrap().mesh().unwrap();
        let parsed = parse_obj(&to_obj_string(&mesh)).unwrap();

        assert_eq!(parsed.vertex_count(), mesh.vertex_count());
        assert_eq!(parsed.normal_count(), mesh.normal_count());
        assert_eq!(parsed.faces(), mesh.faces());
        for (a, b) in parsed.vertices().iter().zip(mesh.vertices()) {
            assert!((a - b).norm() < 1e-3);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_obj("not a mesh"),
            Err(GeomError::InvalidObj(_))
        ));
        assert!(matches!(parse_obj(""), Err(GeomError::InvalidObj(_))));
    }

    #[test]
    fn test_parse_rejects_out_of_range_indices() {
        let text = "v 0.0 0.0 0.0\nvn 0.0 1.0 0.0\nf 1//9 1//9 1//9\n";
        assert!(matches!(parse_obj(text), Err(GeomError::InvalidObj(_))));
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# header\n\nv 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\n# normals\nvn 0.0 0.0 1.0\n\nf 1//1 2//1 3//1\n";
        let mesh = parse_obj(text).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 1);
    }
}
