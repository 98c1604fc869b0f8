use serde::Serialize;

/// An axis-aligned rectangle in atlas pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "w")]
    pub width: u32,
    #[serde(rename = "h")]
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Check if this rectangle intersects with another
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Check if this rectangle fully contains another
    pub fn contains(&self, other: &Rect) -> bool {
        self.x <= other.x
            && self.y <= other.y
            && self.right() >= other.right()
            && self.bottom() >= other.bottom()
    }

    /// Map this rectangle into a space scaled by `scale`.
    ///
    /// Both edges are floored, so rectangles that were disjoint stay disjoint.
    /// Sizes keep a minimum of one pixel so that a visible rectangle never
    /// vanishes from a small preview.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "scale is positive and results are bounded by the scaled canvas"
    )]
    pub fn scaled(&self, scale: f64) -> Rect {
        if scale == 1.0 {
            return *self;
        }
        let floor = |v: u32| (f64::from(v) * scale).floor() as u32;
        let x = floor(self.x);
        let y = floor(self.y);
        let width = floor(self.right()).saturating_sub(x).max(1);
        let height = floor(self.bottom()).saturating_sub(y).max(1);
        Rect::new(x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(20, 20, 10, 10);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contains() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 5, 5);
        let partial = Rect::new(15, 15, 10, 10);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(!outer.contains(&partial));
    }

    #[test]
    fn test_scaled() {
        let rect = Rect::new(10, 15, 328, 497);
        assert_eq!(rect.scaled(1.0), rect);
        assert_eq!(rect.scaled(0.5), Rect::new(5, 7, 164, 249));
        // Tiny rectangles keep at least one pixel
        assert_eq!(Rect::new(3, 3, 1, 1).scaled(0.1), Rect::new(0, 0, 1, 1));
    }

    #[test]
    fn test_scaled_neighbours_stay_disjoint() {
        // Six 170px cells with no padding on a 300px preview of a 1024px atlas
        let scale = 300.0 / 1024.0;
        let cells: Vec<_> = (0..6)
            .map(|i| Rect::new(i * 170, 0, 170, 170).scaled(scale))
            .collect();

        assert_eq!(cells[0], Rect::new(0, 0, 49, 49));
        assert_eq!(cells[1].x, 49);
        for pair in cells.windows(2) {
            assert!(!pair[0].intersects(&pair[1]), "{:?} overlaps {:?}", pair[0], pair[1]);
            assert_eq!(pair[0].right(), pair[1].x);
        }
    }
}
