//! Geometric primitives tagged with their coordinate space.
//!
//! Three spaces appear during a redraw:
//!
//! - [`Model`]: scene coordinates, one unit per target pixel.
//! - [`Sample`]: model coordinates stretched by the sample grid, one unit per
//!   sub-pixel sample.
//! - [`Screen`]: canvas pixels after zoom and pan.
//!
//! Points carry the space as a zero-sized marker so that a model point can
//! never be handed to a function expecting screen coordinates.

use crate::color::Rgba;
use std::marker::PhantomData;
use std::ops::Range;

/// Scene coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Model;

/// Sub-pixel sample coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample;

/// Canvas pixel coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Screen;

/// A 2D point with floating-point coordinates in space `S`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<S> {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
    space: PhantomData<S>,
}

/// Point in scene coordinates.
pub type ModelPoint = Point<Model>;
/// Point in sub-pixel sample coordinates.
pub type SamplePoint = Point<Sample>;
/// Point in canvas pixels.
pub type ScreenPoint = Point<Screen>;

impl<S> Point<S> {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    /// Reinterpret the coordinates in another space after scaling each axis.
    ///
    /// This is the only way to move a point between spaces; callers name the
    /// target space explicitly.
    #[must_use]
    pub fn scale_into<T>(self, sx: f32, sy: f32) -> Point<T> {
        Point::new(self.x * sx, self.y * sy)
    }
}

/// Barycentric weights of a point with respect to a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    /// Weight of vertex `a`.
    pub alpha: f32,
    /// Weight of vertex `b`.
    pub beta: f32,
    /// Weight of vertex `c` (`1 - alpha - beta`).
    pub gamma: f32,
}

impl Barycentric {
    /// True when every weight lies in `[0, 1]`, boundary included.
    #[must_use]
    pub fn is_inside(&self) -> bool {
        let unit = 0.0..=1.0;
        unit.contains(&self.alpha) && unit.contains(&self.beta) && unit.contains(&self.gamma)
    }
}

/// Compute the barycentric coordinates of `p` in triangle `a`, `b`, `c`.
///
/// Returns `None` when the triangle is degenerate: the determinant is zero
/// (collinear or coincident vertices) or not finite.
#[must_use]
pub fn barycentric<S>(p: Point<S>, a: Point<S>, b: Point<S>, c: Point<S>) -> Option<Barycentric> {
    let denominator = (b.y - c.y) * (a.x - c.x) + (c.x - b.x) * (a.y - c.y);
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }

    let alpha = ((b.y - c.y) * (p.x - c.x) + (c.x - b.x) * (p.y - c.y)) / denominator;
    let beta = ((c.y - a.y) * (p.x - c.x) + (a.x - c.x) * (p.y - c.y)) / denominator;

    Some(Barycentric {
        alpha,
        beta,
        gamma: 1.0 - alpha - beta,
    })
}

/// Point-in-triangle test, inclusive of edges and vertices.
///
/// Degenerate triangles contain nothing.
///
/// # Example
///
/// ```
/// use trueno_pixel::geometry::{point_in_triangle, ModelPoint};
///
/// let (a, b, c) = (ModelPoint::new(0.0, 0.0), ModelPoint::new(16.0, 13.0), ModelPoint::new(0.0, 16.0));
/// assert!(point_in_triangle(ModelPoint::new(1.0, 8.0), a, b, c));
/// assert!(!point_in_triangle(ModelPoint::new(100.0, 100.0), a, b, c));
/// ```
#[must_use]
pub fn point_in_triangle<S>(p: Point<S>, a: Point<S>, b: Point<S>, c: Point<S>) -> bool {
    barycentric(p, a, b, c).is_some_and(|w| w.is_inside())
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<S> {
    /// Top-left corner.
    pub min: Point<S>,
    /// Bottom-right corner.
    pub max: Point<S>,
}

impl<S> Bounds<S> {
    /// Smallest box containing all `points`.
    #[must_use]
    pub fn enclosing(points: &[Point<S>]) -> Self
    where
        S: Copy,
    {
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self {
            min: Point::new(min_x, min_y),
            max: Point::new(max_x, max_y),
        }
    }

    /// Width of the box.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the box.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Integer pixel columns and rows touched by the box.
    ///
    /// `floor(min)..ceil(max)` per axis, so integer bounds cover `[min, max)`.
    /// Non-finite bounds give empty ranges.
    #[must_use]
    pub fn pixel_span(&self) -> (Range<i32>, Range<i32>) {
        let span = |lo: f32, hi: f32| {
            if lo.is_finite() && hi.is_finite() {
                (lo.floor() as i32)..(hi.ceil() as i32)
            } else {
                0..0
            }
        };
        (span(self.min.x, self.max.x), span(self.min.y, self.max.y))
    }
}

/// A flat-colored triangle in space `S`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle<S = Model> {
    /// First vertex.
    pub a: Point<S>,
    /// Second vertex.
    pub b: Point<S>,
    /// Third vertex.
    pub c: Point<S>,
    /// Fill color.
    pub color: Rgba,
}

impl<S: Copy> Triangle<S> {
    /// Create a new triangle.
    #[must_use]
    pub const fn new(a: Point<S>, b: Point<S>, c: Point<S>, color: Rgba) -> Self {
        Self { a, b, c, color }
    }

    /// Vertices in order.
    #[must_use]
    pub const fn vertices(&self) -> [Point<S>; 3] {
        [self.a, self.b, self.c]
    }

    /// Apply `f` to every vertex, producing a new triangle.
    #[must_use]
    pub fn map<T, F>(&self, mut f: F) -> Triangle<T>
    where
        F: FnMut(Point<S>) -> Point<T>,
    {
        Triangle {
            a: f(self.a),
            b: f(self.b),
            c: f(self.c),
            color: self.color,
        }
    }

    /// Axis-aligned bounding box of the vertices.
    #[must_use]
    pub fn bounds(&self) -> Bounds<S> {
        Bounds::enclosing(&self.vertices())
    }

    /// True when the vertices do not span any area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        barycentric(self.a, self.a, self.b, self.c).is_none()
    }

    /// Point-in-triangle test against this triangle.
    #[must_use]
    pub fn contains(&self, p: Point<S>) -> bool {
        point_in_triangle(p, self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> Triangle {
        Triangle::new(
            ModelPoint::new(a.0, a.1),
            ModelPoint::new(b.0, b.1),
            ModelPoint::new(c.0, c.1),
            Rgba::RED,
        )
    }

    #[test]
    fn test_interior_point() {
        let t = tri((0.0, 0.0), (16.0, 13.0), (0.0, 16.0));
        assert!(t.contains(ModelPoint::new(1.0, 8.0)));
    }

    #[test]
    fn test_far_outside_point() {
        let t = tri((0.0, 0.0), (16.0, 13.0), (0.0, 16.0));
        assert!(!t.contains(ModelPoint::new(100.0, 100.0)));
    }

    #[test]
    fn test_vertices_and_edges_are_inside() {
        let t = tri((0.0, 0.0), (16.0, 13.0), (0.0, 16.0));
        for v in t.vertices() {
            assert!(t.contains(v));
        }
        // Midpoint of the vertical edge a-c
        assert!(t.contains(ModelPoint::new(0.0, 8.0)));
    }

    #[test]
    fn test_barycentric_weights_sum_to_one() {
        let t = tri((0.0, 0.0), (16.0, 13.0), (0.0, 16.0));
        let w = barycentric(ModelPoint::new(1.0, 8.0), t.a, t.b, t.c).unwrap();
        assert!((w.alpha + w.beta + w.gamma - 1.0).abs() < 1e-6);
        assert!((w.beta - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_collinear_triangle_is_degenerate() {
        let t = tri((0.0, 0.0), (5.0, 5.0), (10.0, 10.0));
        assert!(t.is_degenerate());
        assert!(barycentric(ModelPoint::new(5.0, 5.0), t.a, t.b, t.c).is_none());
        for p in [(0.0, 0.0), (5.0, 5.0), (2.0, 7.0), (-1.0, -1.0)] {
            assert!(!t.contains(ModelPoint::new(p.0, p.1)));
        }
    }

    #[test]
    fn test_coincident_vertices_are_degenerate() {
        let t = tri((3.0, 3.0), (3.0, 3.0), (3.0, 3.0));
        assert!(t.is_degenerate());
        assert!(!t.contains(ModelPoint::new(3.0, 3.0)));
    }

    #[test]
    fn test_non_finite_vertices_are_degenerate() {
        let t = tri((0.0, 0.0), (f32::INFINITY, 1.0), (0.0, 5.0));
        assert!(t.is_degenerate());
        assert!(!t.contains(ModelPoint::new(0.0, 1.0)));
    }

    #[test]
    fn test_bounds() {
        let t = tri((10.0, 10.0), (12.0, 28.0), (30.0, 30.0));
        let bounds = t.bounds();
        assert_eq!(bounds.min, ModelPoint::new(10.0, 10.0));
        assert_eq!(bounds.max, ModelPoint::new(30.0, 30.0));
        assert!((bounds.width() - 20.0).abs() < f32::EPSILON);
        assert!((bounds.height() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pixel_span_integer_and_fractional() {
        let t = tri((10.0, 10.0), (12.0, 28.0), (30.0, 30.0));
        assert_eq!(t.bounds().pixel_span(), (10..30, 10..30));

        let t = tri((0.5, 1.25), (3.5, 1.25), (0.5, 4.75));
        assert_eq!(t.bounds().pixel_span(), (0..4, 1..5));
    }

    #[test]
    fn test_map_does_not_touch_source() {
        let t = tri((1.0, 2.0), (3.0, 4.0), (5.0, 0.0));
        let scaled: Triangle<Screen> = t.map(|p| p.scale_into(2.0, 2.0));
        let again: Triangle<Screen> = t.map(|p| p.scale_into(2.0, 2.0));
        assert_eq!(scaled, again);
        assert_eq!(t.a, ModelPoint::new(1.0, 2.0));
        assert_eq!(scaled.a, ScreenPoint::new(2.0, 4.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn coord() -> impl Strategy<Value = f32> {
        (-1000i32..1000).prop_map(|v| v as f32 / 4.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn vertices_always_inside(
            ax in coord(), ay in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(),
        ) {
            let t = Triangle::new(
                ModelPoint::new(ax, ay),
                ModelPoint::new(bx, by),
                ModelPoint::new(cx, cy),
                Rgba::WHITE,
            );
            prop_assume!(!t.is_degenerate());
            for v in t.vertices() {
                prop_assert!(t.contains(v));
            }
        }

        #[test]
        fn collinear_never_contains(
            ox in coord(), oy in coord(),
            dx in coord(), dy in coord(),
            s in -4i32..4,
            px in coord(), py in coord(),
        ) {
            let a = ModelPoint::new(ox, oy);
            let b = ModelPoint::new(ox + dx, oy + dy);
            let c = ModelPoint::new(ox + dx * s as f32, oy + dy * s as f32);
            prop_assert!(!point_in_triangle(ModelPoint::new(px, py), a, b, c));
        }

        #[test]
        fn bounds_contain_vertices(
            ax in coord(), ay in coord(),
            bx in coord(), by in coord(),
            cx in coord(), cy in coord(),
        ) {
            let t = Triangle::new(
                ModelPoint::new(ax, ay),
                ModelPoint::new(bx, by),
                ModelPoint::new(cx, cy),
                Rgba::WHITE,
            );
            let bounds = t.bounds();
            prop_assert!(bounds.width() >= 0.0 && bounds.height() >= 0.0);
            for v in t.vertices() {
                prop_assert!(v.x >= bounds.min.x && v.x <= bounds.max.x);
                prop_assert!(v.y >= bounds.min.y && v.y <= bounds.max.y);
            }
        }
    }
}
