use glam::{Vec2, Vec3};
use viewport_common::{Camera, Color, rotate, to_radians};
use viewport_kernel::{NodeId, PartProperties, Scene};

use crate::projection::{Projector, ScreenPoint, world_to_camera};
use crate::sink::DrawSink;

/// Corner indices of the six box faces. Corner `i` has `+x` when bit 2 is
/// set, `+y` for bit 1 and `+z` for bit 0.
pub const BOX_FACES: [[usize; 4]; 6] = [
    [0, 1, 3, 2], // -x
    [4, 5, 7, 6], // +x
    [0, 1, 5, 4], // -y
    [2, 3, 7, 6], // +y
    [0, 2, 6, 4], // -z
    [1, 3, 7, 5], // +z
];

/// The eight corners of an axis-aligned box centred on the origin.
pub fn box_corners(half: Vec3) -> [Vec3; 8] {
    std::array::from_fn(|i| {
        Vec3::new(
            if i & 4 != 0 { half.x } else { -half.x },
            if i & 2 != 0 { half.y } else { -half.y },
            if i & 1 != 0 { half.z } else { -half.z },
        )
    })
}

/// World-space corners of a part: half-extents rotated by its X/Y rotation,
/// then translated by its position. Rotation about Z is ignored.
pub fn part_vertices(part: &PartProperties) -> [Vec3; 8] {
    let pitch = to_radians(part.rotation.x);
    let yaw = to_radians(part.rotation.y);
    box_corners(part.size / 2.0).map(|c| rotate(c, pitch, yaw) + part.position)
}

/// A face ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub node: NodeId,
    /// Index into [`BOX_FACES`].
    pub face: usize,
    pub points: [Vec2; 4],
    /// Mean camera-space z of the four corners; more negative is farther.
    pub depth: f32,
    pub color: Color,
    pub alpha: f32,
}

/// Faces collected for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceList {
    /// Sorted far to near.
    pub faces: Vec<Face>,
    /// Faces dropped because a corner was behind the camera.
    pub culled: usize,
    /// Parts visited.
    pub parts: usize,
}

/// Turn projected corners into faces. A face survives only if all four of
/// its corners projected; there is no clipping. Returns the number dropped.
pub fn assemble_faces(
    node: NodeId,
    projected: &[Option<ScreenPoint>; 8],
    color: &Color,
    alpha: f32,
    out: &mut Vec<Face>,
) -> usize {
    let mut culled = 0;
    for (face, corners) in BOX_FACES.iter().enumerate() {
        let points: Option<Vec<ScreenPoint>> = corners.iter().map(|&i| projected[i]).collect();
        let Some(points) = points else {
            culled += 1;
            continue;
        };
        let depth = points.iter().map(|p| p.depth).sum::<f32>() / 4.0;
        out.push(Face {
            node,
            face,
            points: std::array::from_fn(|i| points[i].position),
            depth,
            color: color.clone(),
            alpha,
        });
    }
    culled
}

/// Project one part and append its visible faces. Returns the number culled.
pub fn part_faces(
    node: NodeId,
    part: &PartProperties,
    camera: &Camera,
    projector: &Projector,
    out: &mut Vec<Face>,
) -> usize {
    let projected =
        part_vertices(part).map(|v| projector.project(world_to_camera(v, camera)));
    assemble_faces(node, &projected, &part.color, 1.0 - part.transparency, out)
}

/// Painter's order: ascending depth, so the farthest face is first and the
/// nearest is painted last. Stable for equal depths.
pub fn sort_faces(faces: &mut [Face]) {
    faces.sort_by(|a, b| a.depth.total_cmp(&b.depth));
}

/// Collect and sort the faces of every `Part` directly under the workspace.
pub fn collect_faces(scene: &Scene, camera: &Camera, projector: &Projector) -> FaceList {
    let mut list = FaceList::default();
    for (node, part) in scene.workspace_parts() {
        list.culled += part_faces(node, part, camera, projector, &mut list.faces);
        list.parts += 1;
    }
    sort_faces(&mut list.faces);
    list
}

/// Fill each face as a closed polygon, in order. Leaves global alpha at 1.
pub fn paint<S: DrawSink + ?Sized>(faces: &[Face], sink: &mut S) {
    for face in faces {
        sink.set_global_alpha(face.alpha);
        sink.begin_path();
        let [first, rest @ ..] = &face.points;
        sink.move_to(first.x, first.y);
        for p in rest {
            sink.line_to(p.x, p.y);
        }
        sink.close_path();
        sink.set_fill_color(&face.color);
        sink.fill();
    }
    sink.set_global_alpha(1.0);
}
