use crate::core::curve::TunnelCurve;
use glam::{Quat, Vec3};

/// Moving frames along the curve (one per tubular sample).
#[derive(Clone, Debug, Default)]
pub struct CurveFrames {
    pub tangents: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub binormals: Vec<Vec3>,
}

/// Parallel-transport frames at `segments + 1` evenly spaced arc-length samples.
pub fn compute_frames(curve: &TunnelCurve, segments: usize) -> CurveFrames {
    let segments = segments.max(1);
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| curve.tangent_at(i as f32 / segments as f32))
        .collect();

    let mut normals = Vec::with_capacity(tangents.len());
    let mut binormals = Vec::with_capacity(tangents.len());

    // Seed the first normal from the axis the first tangent is least aligned with.
    let t0 = tangents[0];
    let (ax, ay, az) = (t0.x.abs(), t0.y.abs(), t0.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vec3::X
    } else if ay <= az {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let side = t0.cross(axis).normalize_or_zero();
    let n0 = t0.cross(side);
    normals.push(n0);
    binormals.push(t0.cross(n0));

    for i in 1..tangents.len() {
        let (prev_t, t) = (tangents[i - 1], tangents[i]);
        let mut n = normals[i - 1];
        let rot_axis = prev_t.cross(t);
        let sin = rot_axis.length();
        if sin > f32::EPSILON {
            let theta = sin.atan2(prev_t.dot(t));
            n = Quat::from_axis_angle(rot_axis / sin, theta) * n;
        }
        // drop the drift that accumulates over hundreds of samples
        n = (n - t * n.dot(t)).try_normalize().unwrap_or(n);
        normals.push(n);
        binormals.push(t.cross(n));
    }

    CurveFrames {
        tangents,
        normals,
        binormals,
    }
}

/// Wireframe tube geometry: `(segments + 1) * (radial + 1)` vertices and a
/// line list covering ring, longitudinal and diagonal edges.
#[derive(Clone, Debug, Default)]
pub struct TubeMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Arc-length fraction of each vertex's ring, used for shading falloff.
    pub along: Vec<f32>,
    pub line_indices: Vec<u32>,
    pub segments: usize,
    pub radial_segments: usize,
}

impl TubeMesh {
    pub fn build(curve: &TunnelCurve, segments: usize, radius: f32, radial_segments: usize) -> Self {
        let segments = segments.max(1);
        let radial = radial_segments.max(3);
        let frames = compute_frames(curve, segments);

        let ring = radial + 1;
        let vertex_count = (segments + 1) * ring;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut along = Vec::with_capacity(vertex_count);

        for i in 0..=segments {
            let u = i as f32 / segments as f32;
            let center = curve.point_at(u);
            let n = frames.normals[i];
            let b = frames.binormals[i];
            for j in 0..=radial {
                let v = j as f32 / radial as f32 * std::f32::consts::TAU;
                let dir = (-v.cos() * n + v.sin() * b).normalize_or_zero();
                positions.push(center + dir * radius);
                normals.push(dir);
                along.push(u);
            }
        }

        let idx = |i: usize, j: usize| (i * ring + j) as u32;
        let mut line_indices = Vec::with_capacity(2 * (3 * segments * radial + segments + radial));
        for i in 0..segments {
            for j in 0..radial {
                let a = idx(i, j);
                let b = idx(i + 1, j);
                let d = idx(i, j + 1);
                line_indices.extend_from_slice(&[a, b, a, d, b, d]);
            }
            // seam column closes the last quad of each ring
            line_indices.extend_from_slice(&[idx(i, radial), idx(i + 1, radial)]);
        }
        for j in 0..radial {
            line_indices.extend_from_slice(&[idx(segments, j), idx(segments, j + 1)]);
        }

        Self {
            positions,
            normals,
            along,
            line_indices,
            segments,
            radial_segments: radial,
        }
    }

    pub fn edge_count(&self) -> usize {
        self.line_indices.len() / 2
    }
}
