//! Barycentric coordinate computation

use primlod_core::Point3f;

/// Barycentric weights of `p` with respect to triangle `(a, b, c)`, using
/// the edge-vector projection formulas. The weights sum to 1 by
/// construction. For a degenerate triangle (zero denominator) the fallback
/// is all weight on the first vertex: `[1, 0, 0]`.
///
/// `p` is projected onto the triangle's plane implicitly; points off the
/// plane or outside the triangle yield weights outside `[0, 1]`, which is
/// acceptable for attribute extrapolation.
pub fn barycentric_weights(p: &Point3f, a: &Point3f, b: &Point3f, c: &Point3f) -> [f32; 3] {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;
    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denom = d00 * d11 - d01 * d01;
    if denom == 0.0 {
        return [1.0, 0.0, 0.0];
    }
    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    [1.0 - v - w, v, w]
}
