//! Geometry in logical (DPI-independent) units unless a function says otherwise.

/// A position. Mouse coordinates are client-relative.
pub type Point = glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Clamp a point into `[0, width] x [0, height]`.
    pub fn clamp_point(self, p: Point) -> Point {
        Point::new(
            p.x.clamp(0.0, self.width.max(0.0)),
            p.y.clamp(0.0, self.height.max(0.0)),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Multiply every component by `factor` (logical <-> physical conversion).
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }

    /// Same size, positioned at the centre of `area`.
    pub fn centered_in(&self, area: &Rect) -> Self {
        Self::new(
            area.x + (area.width - self.width) / 2.0,
            area.y + (area.height - self.height) / 2.0,
            self.width,
            self.height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_parts_round_trip() {
        let r = Rect::from_parts(Point::new(10.0, 20.0), Size::new(300.0, 200.0));
        assert_eq!(r, Rect::new(10.0, 20.0, 300.0, 200.0));
        assert_eq!(r.position(), Point::new(10.0, 20.0));
        assert_eq!(r.size(), Size::new(300.0, 200.0));
    }

    #[test]
    fn scaled_rect_multiplies_all_components() {
        let r = Rect::new(10.0, 20.0, 300.0, 200.0).scaled(1.5);
        assert_eq!(r, Rect::new(15.0, 30.0, 450.0, 300.0));
    }

    #[test]
    fn centered_in_respects_area_origin() {
        let area = Rect::new(100.0, 0.0, 1000.0, 800.0);
        let r = Rect::new(0.0, 0.0, 400.0, 200.0).centered_in(&area);
        assert_eq!(r, Rect::new(400.0, 300.0, 400.0, 200.0));
    }

    #[test]
    fn clamp_point_stays_inside_size() {
        let s = Size::new(100.0, 50.0);
        assert_eq!(s.clamp_point(Point::new(-5.0, 70.0)), Point::new(0.0, 50.0));
        assert_eq!(s.clamp_point(Point::new(40.0, 20.0)), Point::new(40.0, 20.0));
    }
}
