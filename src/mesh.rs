//! Triangle meshes and Wavefront OBJ loading.
//!
//! Only the geometry subset of OBJ is read: `v` positions, `vt` texture
//! coordinates and triangular `f` faces with optional `vertex/texture` index
//! pairs. Normals and material libraries are ignored. Parsing is done by
//! `tobj`; this module checks the result and builds [`Triangle`]s.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::colors;
use crate::math::{Mat4, Vec3, Vec4};
use crate::triangle::{TexCoord, Triangle};

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("failed to open mesh: {0}")]
    Io(#[from] std::io::Error),

    /// The file parsed, but describes something we cannot render safely.
    #[error("malformed mesh: {reason}")]
    Malformed { reason: String },
}

impl MeshError {
    fn malformed(reason: impl Into<String>) -> Self {
        MeshError::Malformed {
            reason: reason.into(),
        }
    }
}

/// An immutable list of triangles in model space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    name: String,
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, triangles: Vec<Triangle>) -> Self {
        Self {
            name: name.into(),
            triangles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.triangles.iter().flat_map(|t| t.points);
        let first = points.next()?.xyz();
        Some(points.fold((first, first), |(lo, hi), p| {
            (
                Vec3::new(lo.x.min(p.x), lo.y.min(p.y), lo.z.min(p.z)),
                Vec3::new(hi.x.max(p.x), hi.y.max(p.y), hi.z.max(p.z)),
            )
        }))
    }

    /// A copy moved so its bounding box is centred on the origin, which makes
    /// the model rotate about its own middle.
    pub fn centered(&self) -> Self {
        let Some((lo, hi)) = self.bounds() else {
            return self.clone();
        };
        let c = (lo + hi) * 0.5;
        let shift = Mat4::translation(-c.x, -c.y, -c.z);
        Self {
            name: self.name.clone(),
            triangles: self.triangles.iter().map(|t| t.transformed(&shift)).collect(),
        }
    }

    /// Load a mesh from an OBJ file on disk.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let mut mesh = Self::from_obj_reader(&mut reader)?;
        if mesh.name.is_empty() {
            if let Some(stem) = path.file_stem() {
                mesh.name = stem.to_string_lossy().into_owned();
            }
        }
        tracing::info!(
            path = %path.display(),
            name = %mesh.name,
            triangles = mesh.triangles.len(),
            "loaded mesh"
        );
        Ok(mesh)
    }

    /// Parse OBJ text from any buffered reader.
    ///
    /// Every object and group in the file is merged into one mesh. Texture
    /// `v` is flipped (`1 - v`) so that `v = 0` is the top row of an image.
    /// Either every face corner names a texture coordinate or none does.
    pub fn from_obj_reader<R: BufRead>(reader: &mut R) -> Result<Self, MeshError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let textured = faces_are_textured(&text)?;

        let options = tobj::LoadOptions {
            single_index: false,
            triangulate: false,
            ignore_points: true,
            ignore_lines: true,
            ..Default::default()
        };
        // Materials are never loaded; a `mtllib` line just yields no materials.
        let (models, _materials) =
            tobj::load_obj_buf(&mut text.as_bytes(), &options, |_| Err(tobj::LoadError::OpenFileFailed))
                .map_err(|e| MeshError::malformed(e.to_string()))?;

        let name = models.first().map(|m| m.name.clone()).unwrap_or_default();
        let mut triangles = Vec::new();
        for model in &models {
            append_triangles(&model.mesh, &model.name, textured, &mut triangles)?;
        }
        Ok(Self::new(name, triangles))
    }

    /// The unit cube spanning `0..1` on every axis: 8 corners, 12 triangles,
    /// each face mapped to the full texture. Faces wind so their normals point
    /// outwards.
    pub fn unit_cube() -> Self {
        const FACES: [[[f32; 3]; 3]; 12] = [
            // SOUTH
            [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
            // EAST
            [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
            [[1.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
            // NORTH
            [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
            [[1.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]],
            // WEST
            [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]],
            // TOP
            [[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]],
            [[0.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
            // BOTTOM
            [[1.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]],
            [[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]],
        ];
        const FIRST: [TexCoord; 3] = [
            TexCoord::new(0.0, 1.0),
            TexCoord::new(0.0, 0.0),
            TexCoord::new(1.0, 0.0),
        ];
        const SECOND: [TexCoord; 3] = [
            TexCoord::new(0.0, 1.0),
            TexCoord::new(1.0, 0.0),
            TexCoord::new(1.0, 1.0),
        ];

        let triangles = FACES
            .iter()
            .enumerate()
            .map(|(i, face)| {
                let points = face.map(|[x, y, z]| Vec4::point(x, y, z));
                let tex = if i % 2 == 0 { FIRST } else { SECOND };
                Triangle::new(points, tex, colors::FILL)
            })
            .collect();
        Self::new("cube", triangles)
    }
}

/// Whether the faces of an OBJ file carry texture indices (`v/vt` or
/// `v/vt/vn`) rather than bare positions (`v` or `v//vn`).
///
/// `tobj` fills in a texture index for every corner as soon as the file has
/// any `vt` line, so a mix has to be caught on the raw text.
fn faces_are_textured(text: &str) -> Result<bool, MeshError> {
    let mut textured = None;
    for (number, line) in text.lines().enumerate() {
        let mut words = line.split_whitespace();
        if words.next() != Some("f") {
            continue;
        }
        for corner in words {
            let has_texcoord = corner.split('/').nth(1).is_some_and(|t| !t.is_empty());
            match textured {
                None => textured = Some(has_texcoord),
                Some(expected) if expected != has_texcoord => {
                    return Err(MeshError::malformed(format!(
                        "line {}: faces mix corners with and without texture coordinates",
                        number + 1
                    )));
                }
                Some(_) => {}
            }
        }
    }
    Ok(textured.unwrap_or(false))
}

fn append_triangles(
    mesh: &tobj::Mesh,
    name: &str,
    textured: bool,
    out: &mut Vec<Triangle>,
) -> Result<(), MeshError> {
    if let Some(arity) = mesh.face_arities.iter().find(|&&a| a != 3) {
        return Err(MeshError::malformed(format!(
            "object `{name}` has a face with {arity} vertices, only triangles are supported"
        )));
    }
    if mesh.indices.len() % 3 != 0 {
        return Err(MeshError::malformed(format!(
            "object `{name}` has {} face indices, not a multiple of 3",
            mesh.indices.len()
        )));
    }

    let vertex_count = mesh.positions.len() / 3;
    let texcoord_count = mesh.texcoords.len() / 2;

    for (face, corners) in mesh.indices.chunks_exact(3).enumerate() {
        let mut points = [Vec4::default(); 3];
        let mut tex = [TexCoord::default(); 3];
        for (k, &index) in corners.iter().enumerate() {
            let i = index as usize;
            if i >= vertex_count {
                return Err(MeshError::malformed(format!(
                    "face {} of `{name}` uses vertex {} but only {vertex_count} exist",
                    face + 1,
                    i + 1
                )));
            }
            points[k] = Vec4::point(
                mesh.positions[3 * i] as f32,
                mesh.positions[3 * i + 1] as f32,
                mesh.positions[3 * i + 2] as f32,
            );

            if textured {
                let Some(&t) = mesh.texcoord_indices.get(3 * face + k) else {
                    return Err(MeshError::malformed(format!(
                        "face {} of `{name}` has no texture index",
                        face + 1
                    )));
                };
                let t = t as usize;
                if t >= texcoord_count {
                    return Err(MeshError::malformed(format!(
                        "face {} of `{name}` uses texture coordinate {} but only {texcoord_count} exist",
                        face + 1,
                        t + 1
                    )));
                }
                tex[k] = TexCoord::new(
                    mesh.texcoords[2 * t] as f32,
                    1.0 - mesh.texcoords[2 * t + 1] as f32,
                );
            }
        }
        out.push(Triangle::new(points, tex, colors::FILL));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(text: &str) -> Result<Mesh, MeshError> {
        Mesh::from_obj_reader(&mut text.as_bytes())
    }

    #[test]
    fn loads_positions_with_one_based_indices() {
        let mesh = parse(
            "v 0 0 0\n\
             v 1 0 0\n\
             v 0 1 0\n\
             v 0 0 1\n\
             f 1 2 3\n\
             f 1 3 4\n",
        )
        .unwrap();
        assert_eq!(mesh.len(), 2);
        let second = mesh.triangles()[1];
        assert_eq!(second.points[0], Vec4::point(0.0, 0.0, 0.0));
        assert_eq!(second.points[1], Vec4::point(0.0, 1.0, 0.0));
        assert_eq!(second.points[2], Vec4::point(0.0, 0.0, 1.0));
        assert_eq!(second.tex, [TexCoord::default(); 3]);
    }

    #[test]
    fn texture_v_is_flipped() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0.25 0.0\nvt 1.0 0.75\nvt 0.0 1.0\n\
             f 1/1 2/2 3/3\n",
        )
        .unwrap();
        let tex = mesh.triangles()[0].tex;
        assert_relative_eq!(tex[0].u, 0.25);
        assert_relative_eq!(tex[0].v, 1.0);
        assert_relative_eq!(tex[1].v, 0.25);
        assert_relative_eq!(tex[2].v, 0.0);
        assert_eq!(tex[0].w, 1.0);
    }

    #[test]
    fn out_of_range_vertex_is_malformed() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 9\n").unwrap_err();
        assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
    }

    #[test]
    fn out_of_range_texcoord_is_malformed() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1 2/1 3/5\n").unwrap_err();
        assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
    }

    #[test]
    fn quads_are_rejected() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap_err();
        assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
    }

    #[test]
    fn mixed_faces_are_malformed() {
        let vertices = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.3 0.2\n";
        for faces in ["f 1/1 2/1 3/1\nf 1 2 3\n", "f 1 2 3\nf 1/1 2/1 3/1\n"] {
            let err = parse(&format!("{vertices}{faces}")).unwrap_err();
            assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
        }

        // Mixed within one face, and across separate objects.
        let err = parse(&format!("{vertices}f 1/1 2 3/1\n")).unwrap_err();
        assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
        let err = parse(&format!("{vertices}o a\nf 1/1 2/1 3/1\no b\nf 1 2 3\n")).unwrap_err();
        assert!(matches!(err, MeshError::Malformed { .. }), "{err}");
    }

    #[test]
    fn unused_texcoords_leave_faces_untextured() {
        let mesh = parse(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.3 0.2\nvn 0 0 1\n\
             f 1 2 3\n\
             f 1//1 2//1 3//1\n",
        )
        .unwrap();
        assert_eq!(mesh.len(), 2);
        for tri in mesh.triangles() {
            assert_eq!(tri.tex, [TexCoord::default(); 3]);
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Mesh::from_obj("/no/such/mesh.obj"),
            Err(MeshError::Io(_))
        ));
    }

    #[test]
    fn centered_cube_spans_minus_half_to_half() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.bounds(), Some((Vec3::ZERO, Vec3::ONE)));

        let (lo, hi) = cube.centered().bounds().unwrap();
        assert_relative_eq!(lo, Vec3::new(-0.5, -0.5, -0.5));
        assert_relative_eq!(hi, Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(Mesh::default().bounds(), None);
    }

    #[test]
    fn unit_cube_is_closed_and_outward_facing() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.len(), 12);

        let mut corners: Vec<[i32; 3]> = cube
            .triangles()
            .iter()
            .flat_map(|t| t.points)
            .map(|p| [p.x as i32, p.y as i32, p.z as i32])
            .collect();
        corners.sort();
        corners.dedup();
        assert_eq!(corners.len(), 8);

        let centre = Vec4::point(0.5, 0.5, 0.5);
        for tri in cube.triangles() {
            let outward = tri.points[0] - centre;
            assert!(tri.normal().dot(outward) > 0.0);
        }
    }
}
