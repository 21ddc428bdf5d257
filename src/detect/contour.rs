//! Contour geometry: polygon moments and the minimal enclosing circle.
//!
//! imageproc supplies contour extraction and polygon approximation; these two
//! routines cover the remaining primitives the shape filter needs.

use imageproc::point::Point;
use nalgebra::Point2;

/// Zeroth and first image moments of a closed contour polygon, computed with
/// Green's theorem over the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn of_polygon(points: &[Point<i32>]) -> Self {
        let mut m00 = 0.0;
        let mut m10 = 0.0;
        let mut m01 = 0.0;
        let n = points.len();
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            let (x0, y0) = (p.x as f64, p.y as f64);
            let (x1, y1) = (q.x as f64, q.y as f64);
            let cross = x0 * y1 - x1 * y0;
            m00 += cross;
            m10 += (x0 + x1) * cross;
            m01 += (y0 + y1) * cross;
        }
        Self {
            m00: m00 / 2.0,
            m10: m10 / 6.0,
            m01: m01 / 6.0,
        }
    }

    /// Contour area, orientation-independent.
    pub fn area(&self) -> f64 {
        self.m00.abs()
    }

    /// Centroid, or `None` for a degenerate (zero-area) contour.
    pub fn centroid(&self) -> Option<Point2<f32>> {
        if self.m00 == 0.0 {
            return None;
        }
        Some(Point2::new(
            (self.m10 / self.m00) as f32,
            (self.m01 / self.m00) as f32,
        ))
    }
}

const EPS: f64 = 1e-7;

#[derive(Clone, Copy)]
struct Circle {
    cx: f64,
    cy: f64,
    r: f64,
}

impl Circle {
    fn point(p: (f64, f64)) -> Self {
        Self { cx: p.0, cy: p.1, r: 0.0 }
    }

    fn diameter(a: (f64, f64), b: (f64, f64)) -> Self {
        let cx = (a.0 + b.0) / 2.0;
        let cy = (a.1 + b.1) / 2.0;
        Self { cx, cy, r: dist(a, b) / 2.0 }
    }

    fn circumscribed(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> Self {
        let d = 2.0 * (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1));
        if d.abs() < EPS {
            // Collinear: fall back to the widest pair.
            let (p, q) = widest_pair(a, b, c);
            return Self::diameter(p, q);
        }
        let a2 = a.0 * a.0 + a.1 * a.1;
        let b2 = b.0 * b.0 + b.1 * b.1;
        let c2 = c.0 * c.0 + c.1 * c.1;
        let cx = (a2 * (b.1 - c.1) + b2 * (c.1 - a.1) + c2 * (a.1 - b.1)) / d;
        let cy = (a2 * (c.0 - b.0) + b2 * (a.0 - c.0) + c2 * (b.0 - a.0)) / d;
        let r = dist((cx, cy), a);
        Self { cx, cy, r }
    }

    fn contains(&self, p: (f64, f64)) -> bool {
        dist((self.cx, self.cy), p) <= self.r + EPS
    }
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn widest_pair(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> ((f64, f64), (f64, f64)) {
    let (mut p, mut q, mut best) = (a, b, dist(a, b));
    if dist(a, c) > best {
        (p, q, best) = (a, c, dist(a, c));
    }
    if dist(b, c) > best {
        (p, q) = (b, c);
    }
    (p, q)
}

/// Smallest circle containing every contour point.
///
/// Incremental construction over boundary support points; deterministic, no
/// shuffling. Returns `None` for an empty contour.
pub fn min_enclosing_circle(points: &[Point<i32>]) -> Option<(Point2<f32>, f32)> {
    let pts: Vec<(f64, f64)> = points.iter().map(|p| (p.x as f64, p.y as f64)).collect();
    let first = *pts.first()?;

    let mut circle = Circle::point(first);
    for i in 1..pts.len() {
        if circle.contains(pts[i]) {
            continue;
        }
        circle = Circle::point(pts[i]);
        for j in 0..i {
            if circle.contains(pts[j]) {
                continue;
            }
            circle = Circle::diameter(pts[i], pts[j]);
            for k in 0..j {
                if !circle.contains(pts[k]) {
                    circle = Circle::circumscribed(pts[i], pts[j], pts[k]);
                }
            }
        }
    }

    Some((
        Point2::new(circle.cx as f32, circle.cy as f32),
        circle.r as f32,
    ))
}
