//! The five-pointed star glyph.

use starlet_core::{Point, Rect};

/// Side of the square glyph view box.
pub const VIEW_BOX: f32 = 24.0;

/// SVG path data for the star, in a 24x24 view box.
pub const STAR_PATH: &str =
    "M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z";

/// Inline SVG markup rendered inside every star.
pub const STAR_SVG: &str = concat!(
    r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">"#,
    r#"<path d="M12 2l3.09 6.26L22 9.27l-5 4.87 1.18 6.88L12 17.77l-6.18 3.25L7 14.14 2 9.27l6.91-1.01L12 2z" fill="currentColor"/>"#,
    "</svg>"
);

/// Absolute vertices of [`STAR_PATH`], clockwise from the top point.
pub const STAR_VERTICES: [(f32, f32); 10] = [
    (12.0, 2.0),
    (15.09, 8.26),
    (22.0, 9.27),
    (17.0, 14.14),
    (18.18, 21.02),
    (12.0, 17.77),
    (5.82, 21.02),
    (7.0, 14.14),
    (2.0, 9.27),
    (8.91, 8.26),
];

/// Star polygon scaled into `rect`.
#[must_use]
pub fn star_polygon(rect: Rect) -> Vec<Point> {
    let sx = rect.width / VIEW_BOX;
    let sy = rect.height / VIEW_BOX;
    STAR_VERTICES
        .iter()
        .map(|&(x, y)| Point::new(x.mul_add(sx, rect.x), y.mul_add(sy, rect.y)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_embeds_path() {
        assert!(STAR_SVG.contains(STAR_PATH));
    }

    #[test]
    fn test_vertices_inside_view_box() {
        for (x, y) in STAR_VERTICES {
            assert!((0.0..=VIEW_BOX).contains(&x));
            assert!((0.0..=VIEW_BOX).contains(&y));
        }
    }

    #[test]
    fn test_polygon_scales_and_offsets() {
        let points = star_polygon(Rect::new(100.0, 10.0, 48.0, 48.0));
        assert_eq!(points.len(), 10);
        assert_eq!(points[0], Point::new(124.0, 14.0));
        assert_eq!(points[2], Point::new(144.0, 28.54));
    }

    #[test]
    fn test_polygon_identity_at_view_box_size() {
        let points = star_polygon(Rect::new(0.0, 0.0, VIEW_BOX, VIEW_BOX));
        assert_eq!(points[4], Point::new(18.18, 21.02));
    }
}
