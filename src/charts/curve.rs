//! Curve smoothing for `CurveType::Function`.

/// Interpolate a Catmull-Rom spline through `points`.
///
/// Every input point lies on the output curve. Each interval is split into
/// `samples` steps; inputs with fewer than 3 points are returned unchanged.
pub fn smooth(points: &[(f64, f64)], samples: usize) -> Vec<(f64, f64)> {
    let n = points.len();
    if n < 3 || samples < 2 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity((n - 1) * samples + 1);

    for i in 0..n - 1 {
        // Endpoints are duplicated so the curve starts and ends on the data
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        for step in 0..samples {
            let t = step as f64 / samples as f64;
            out.push(catmull_rom(p0, p1, p2, p3, t));
        }
    }
    out.push(points[n - 1]);

    out
}

fn catmull_rom(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;

    let blend = |a: f64, b: f64, c: f64, d: f64| {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };

    (blend(p0.0, p1.0, p2.0, p3.0), blend(p0.1, p1.1, p2.1, p3.1))
}
