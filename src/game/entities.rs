/// An axis-aligned rectangle in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: i32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: i32) {
        self.y = bottom - self.h;
    }

    /// True when the rectangles share positive overlap area
    ///
    /// Touching edges do not count as an overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// A solid, unit-sized platform cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub rect: Rect,
}

impl Tile {
    /// Place a tile at the given grid cell
    pub fn at_cell(col: i32, row: i32, tile_size: i32) -> Self {
        Self {
            rect: Rect::new(col * tile_size, row * tile_size, tile_size, tile_size),
        }
    }

    /// Grid cell this tile occupies
    pub fn cell(&self, tile_size: i32) -> (i32, i32) {
        (self.rect.x / tile_size, self.rect.y / tile_size)
    }
}

/// A unit-sized hazard cell; not solid, damages the player on overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    /// Place an obstacle at the given grid cell
    pub fn at_cell(col: i32, row: i32, tile_size: i32) -> Self {
        Self {
            rect: Rect::new(col * tile_size, row * tile_size, tile_size, tile_size),
        }
    }

    /// Grid cell this obstacle occupies
    pub fn cell(&self, tile_size: i32) -> (i32, i32) {
        (self.rect.x / tile_size, self.rect.y / tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let rect = Rect::new(10, 20, 30, 40);
        assert_eq!(rect.left(), 10);
        assert_eq!(rect.right(), 40);
        assert_eq!(rect.top(), 20);
        assert_eq!(rect.bottom(), 60);
        assert_eq!(rect.center_x(), 25);
        assert_eq!(rect.center_y(), 40);
    }

    #[test]
    fn test_rect_setters() {
        let mut rect = Rect::new(0, 0, 30, 40);

        rect.set_right(100);
        assert_eq!(rect.x, 70);
        assert_eq!(rect.right(), 100);

        rect.set_bottom(200);
        assert_eq!(rect.y, 160);
        assert_eq!(rect.bottom(), 200);

        rect.set_left(5);
        rect.set_top(6);
        assert_eq!((rect.x, rect.y), (5, 6));
    }

    #[test]
    fn test_overlap_detection() {
        let a = Rect::new(0, 0, 40, 40);
        let b = Rect::new(30, 30, 40, 40);
        let c = Rect::new(40, 0, 40, 40);
        let d = Rect::new(100, 100, 40, 40);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges are not an overlap
        assert!(!a.intersects(&c));
        assert!(!a.intersects(&d));
    }

    #[test]
    fn test_tile_cell_round_trip() {
        let tile = Tile::at_cell(7, 12, 40);
        assert_eq!(tile.rect, Rect::new(280, 480, 40, 40));
        assert_eq!(tile.cell(40), (7, 12));

        let obstacle = Obstacle::at_cell(7, 11, 40);
        assert_eq!(obstacle.cell(40), (7, 11));
    }
}
