use glam::Vec3;

/// Fixed fly-through control points: sinusoidal sway in x/y, linear advance in z.
pub fn tunnel_control_points(
    count: usize,
    sway_x_freq: f32,
    sway_y_freq: f32,
    amplitude: f32,
    z_step: f32,
) -> Vec<Vec3> {
    (0..count)
        .map(|i| {
            let f = i as f32;
            Vec3::new(
                (f * sway_x_freq).sin() * amplitude,
                (f * sway_y_freq).cos() * amplitude,
                f * z_step,
            )
        })
        .collect()
}

// Cubic c0 + c1 t + c2 t^2 + c3 t^3, built per axis through glam vectors.
#[derive(Clone, Copy, Debug)]
struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    fn hermite(p0: Vec3, p1: Vec3, t0: Vec3, t1: Vec3) -> Self {
        Self {
            c0: p0,
            c1: t0,
            c2: -3.0 * p0 + 3.0 * p1 - 2.0 * t0 - t1,
            c3: 2.0 * p0 - 2.0 * p1 + t0 + t1,
        }
    }

    // Non-uniform Catmull-Rom between x1 and x2 with knot spacings dt0..dt2.
    fn catmull_rom(x0: Vec3, x1: Vec3, x2: Vec3, x3: Vec3, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    fn eval(&self, t: f32) -> Vec3 {
        let t2 = t * t;
        let t3 = t2 * t;
        self.c0 + self.c1 * t + self.c2 * t2 + self.c3 * t3
    }
}

/// Open centripetal Catmull-Rom spline with an arc-length lookup table so
/// `point_at` moves at constant speed.
#[derive(Clone, Debug)]
pub struct TunnelCurve {
    points: Vec<Vec3>,
    arc_lengths: Vec<f32>,
}

impl TunnelCurve {
    /// Needs at least two control points; fewer yields `None`.
    pub fn new(points: Vec<Vec3>, divisions: usize) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        let mut curve = Self {
            points,
            arc_lengths: Vec::new(),
        };
        curve.arc_lengths = curve.compute_arc_lengths(divisions.max(1));
        Some(curve)
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at curve parameter `t` (not arc-length uniform).
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let n = self.points.len();
        let p = (n - 1) as f32 * t;
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;
        if seg >= n - 1 {
            seg = n - 2;
            weight = 1.0;
        }

        let p1 = self.points[seg];
        let p2 = self.points[seg + 1];
        // open curve: reflect past the ends
        let p0 = if seg > 0 {
            self.points[seg - 1]
        } else {
            p1 + (p1 - p2)
        };
        let p3 = if seg + 2 < n {
            self.points[seg + 2]
        } else {
            p2 + (p2 - p1)
        };

        let mut dt0 = p0.distance_squared(p1).powf(0.25);
        let mut dt1 = p1.distance_squared(p2).powf(0.25);
        let mut dt2 = p2.distance_squared(p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }
        CubicSegment::catmull_rom(p0, p1, p2, p3, dt0, dt1, dt2).eval(weight)
    }

    /// Point at arc-length fraction `u` in `[0,1]`.
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.point(self.u_to_t(u))
    }

    /// Unit tangent at arc-length fraction `u`.
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.tangent(self.u_to_t(u))
    }

    pub fn tangent(&self, t: f32) -> Vec3 {
        const DELTA: f32 = 1e-4;
        let t1 = (t - DELTA).max(0.0);
        let t2 = (t + DELTA).min(1.0);
        (self.point(t2) - self.point(t1)).normalize_or_zero()
    }

    fn compute_arc_lengths(&self, divisions: usize) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(divisions + 1);
        let mut sum = 0.0;
        let mut last = self.point(0.0);
        lengths.push(0.0);
        for d in 1..=divisions {
            let current = self.point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    fn u_to_t(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let count = self.arc_lengths.len();
        let total = self.length();
        if count < 2 || total <= 0.0 {
            return u;
        }
        let target = u * total;
        // last index whose cumulative length is <= target
        let i = self
            .arc_lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(count - 2);
        let before = self.arc_lengths[i];
        let segment = self.arc_lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            ((target - before) / segment).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f32 + fraction) / (count - 1) as f32
    }
}
