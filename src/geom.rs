//! Grid geometry: points, unit moves, distance metrics and the angular
//! classification that decides what a visited point compiles to.

use std::fmt;

use glam::IVec2;

/// A unit move of the salesperson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Stay,
    Left,
    Down,
    Right,
    Up,
}

impl Move {
    /// Displacement of this move on the grid (y grows upward).
    pub const fn delta(self) -> IVec2 {
        match self {
            Move::Stay => IVec2::ZERO,
            Move::Left => IVec2::NEG_X,
            Move::Down => IVec2::NEG_Y,
            Move::Right => IVec2::X,
            Move::Up => IVec2::Y,
        }
    }
}

/// A position on the integer grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point(IVec2);

impl Point {
    pub const ORIGIN: Point = Point(IVec2::ZERO);

    pub const fn new(x: i32, y: i32) -> Point {
        Point(IVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.0.y
    }

    /// The point reached by taking `step` from here.
    #[inline]
    pub fn offset(self, step: Move) -> Point {
        Point(self.0 + step.delta())
    }

    /// `max(|dx|, |dy|)`
    pub fn chebyshev_distance(self, other: Point) -> u32 {
        let d = (other.0 - self.0).abs();
        d.max_element() as u32
    }

    /// `|dx| + |dy|`
    pub fn manhattan_distance(self, other: Point) -> u32 {
        let d = (other.0 - self.0).abs();
        d.element_sum() as u32
    }

    /// Both distances from `origin`, used to tell visited points apart.
    pub fn distance_key(self, origin: Point) -> DistanceKey {
        DistanceKey {
            chebyshev: origin.chebyshev_distance(self),
            manhattan: origin.manhattan_distance(self),
        }
    }

    /// Which of the nine areas around the origin this point falls in.
    ///
    /// Points on either axis or either diagonal are [`Area::OnLine`]. Every
    /// other point lies strictly inside exactly one octant.
    pub fn area(self) -> Area {
        let (x, y) = (self.x(), self.y());
        if x == 0 || y == 0 || x.unsigned_abs() == y.unsigned_abs() {
            return Area::OnLine;
        }
        let (ax, ay) = (x.unsigned_abs(), y.unsigned_abs());
        let steep = ax < ay;
        match (x > 0, y > 0) {
            (true, true) if steep => Area::Nne,
            (true, true) => Area::Ene,
            (false, true) if steep => Area::Nnw,
            (false, true) => Area::Wnw,
            (false, false) if steep => Area::Ssw,
            (false, false) => Area::Wsw,
            (true, false) if steep => Area::Sse,
            (true, false) => Area::Ese,
        }
    }
}

impl From<IVec2> for Point {
    fn from(v: IVec2) -> Point {
        Point(v)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x(), self.y())
    }
}

/// Distance of a point from the origin under both metrics.
///
/// Ordering is lexicographic, Chebyshev first, which is exactly the order
/// compiled instructions are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistanceKey {
    pub chebyshev: u32,
    pub manhattan: u32,
}

/// Regions of the plane around the origin.
///
/// The eight octants are listed counter-clockwise starting just above the
/// positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Area {
    /// The x axis, the y axis, `y = x` and `y = -x`.
    OnLine,
    Ene,
    Nne,
    Nnw,
    Wnw,
    Wsw,
    Ssw,
    Sse,
    Ese,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_table() {
        let cases = [
            (Point::new(0, 0), Area::OnLine),
            (Point::new(1, 1), Area::OnLine),
            (Point::new(-2, 2), Area::OnLine),
            (Point::new(0, -3), Area::OnLine),
            (Point::new(2, 1), Area::Ene),
            (Point::new(1, 2), Area::Nne),
            (Point::new(-1, 2), Area::Nnw),
            (Point::new(-2, 1), Area::Wnw),
            (Point::new(-2, -1), Area::Wsw),
            (Point::new(-1, -2), Area::Ssw),
            (Point::new(1, -2), Area::Sse),
            (Point::new(2, -1), Area::Ese),
        ];
        for (point, expected) in cases {
            assert_eq!(point.area(), expected, "area of {point}");
        }
    }

    #[test]
    fn area_is_total_and_matches_lines() {
        for x in -25..=25 {
            for y in -25..=25 {
                let p = Point::new(x, y);
                let on_line = x == 0 || y == 0 || x.abs() == y.abs();
                assert_eq!(p.area() == Area::OnLine, on_line, "area of {p}");
            }
        }
    }

    #[test]
    fn octants_keep_their_quadrant() {
        for x in -12..=12_i32 {
            for y in -12..=12_i32 {
                let p = Point::new(x, y);
                let quadrant_ok = match p.area() {
                    Area::OnLine => continue,
                    Area::Ene => x > 0 && y > 0 && x > y,
                    Area::Nne => x > 0 && y > 0 && x < y,
                    Area::Nnw => x < 0 && y > 0 && -x < y,
                    Area::Wnw => x < 0 && y > 0 && -x > y,
                    Area::Wsw => x < 0 && y < 0 && x < y,
                    Area::Ssw => x < 0 && y < 0 && x > y,
                    Area::Sse => x > 0 && y < 0 && x < -y,
                    Area::Ese => x > 0 && y < 0 && x > -y,
                };
                assert!(quadrant_ok, "{p} classified as {:?}", p.area());
            }
        }
    }

    #[test]
    fn distances() {
        let a = Point::new(-3, 4);
        assert_eq!(Point::ORIGIN.chebyshev_distance(a), 4);
        assert_eq!(Point::ORIGIN.manhattan_distance(a), 7);
        assert_eq!(a.chebyshev_distance(Point::new(2, 2)), 5);
        assert_eq!(a.manhattan_distance(Point::new(2, 2)), 7);
        assert_eq!(
            a.distance_key(Point::ORIGIN),
            DistanceKey {
                chebyshev: 4,
                manhattan: 7
            }
        );
    }

    #[test]
    fn mirrored_points_share_a_key() {
        let key = Point::new(3, 1).distance_key(Point::ORIGIN);
        assert_eq!(Point::new(-1, -3).distance_key(Point::ORIGIN), key);
        assert_eq!(Point::new(1, -3).distance_key(Point::ORIGIN), key);
    }

    #[test]
    fn moves() {
        let p = Point::ORIGIN
            .offset(Move::Right)
            .offset(Move::Right)
            .offset(Move::Up)
            .offset(Move::Stay);
        assert_eq!(p, Point::new(2, 1));
        assert_eq!(p.offset(Move::Left).offset(Move::Down), Point::new(1, 0));
    }
}
