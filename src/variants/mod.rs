/// Lower-dimensional relatives of the sponge shown on the laboratory
/// screen: the Sierpinski carpet, the Cantor set and the chaos-game
/// Sierpinski triangle.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Axis-aligned square, `(x, y)` is the lower corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Square {
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Interval `[x, x + width]` produced at `level`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub x: f64,
    pub width: f64,
    pub level: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

const TRIANGLE: [Point2; 3] = [
    Point2 { x: 0.1, y: 0.85 },
    Point2 { x: 0.9, y: 0.85 },
    Point2 { x: 0.5, y: 0.15 },
];

/// Sierpinski carpet on the unit square: 8 of 9 kept per step.
pub fn carpet(iter: u32) -> Vec<Square> {
    let mut squares = vec![Square { x: 0.0, y: 0.0, size: 1.0 }];
    for _ in 0..iter {
        let mut next = Vec::with_capacity(squares.len() * 8);
        for s in &squares {
            let third = s.size / 3.0;
            for dx in 0..3 {
                for dy in 0..3 {
                    if dx == 1 && dy == 1 {
                        continue;
                    }
                    next.push(Square {
                        x: s.x + f64::from(dx) * third,
                        y: s.y + f64::from(dy) * third,
                        size: third,
                    });
                }
            }
        }
        squares = next;
    }
    squares
}

/// Cantor set on `[0.05, 0.95]`: the middle third of every segment goes.
pub fn cantor(iter: u32) -> Vec<Segment> {
    let mut segments = vec![Segment { x: 0.05, width: 0.9, level: 0 }];
    for _ in 0..iter {
        let mut next = Vec::with_capacity(segments.len() * 2);
        for s in &segments {
            let w = s.width / 3.0;
            next.push(Segment { x: s.x, width: w, level: s.level + 1 });
            next.push(Segment { x: s.x + 2.0 * w, width: w, level: s.level + 1 });
        }
        segments = next;
    }
    segments
}

/// Number of chaos-game points drawn for a detail level.
pub fn chaos_point_count(iter: u32) -> usize {
    500 + iter as usize * 350
}

/// Chaos-game Sierpinski triangle. Deterministic for a given seed.
pub fn chaos_triangle(iter: u32, seed: u64) -> Vec<Point2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut p = Point2 { x: 0.5, y: 0.5 };
    let n = chaos_point_count(iter);
    let mut points = Vec::with_capacity(n);
    for _ in 0..n {
        let target = TRIANGLE[rng.gen_range(0..TRIANGLE.len())];
        p = Point2 { x: (p.x + target.x) * 0.5, y: (p.y + target.y) * 0.5 };
        points.push(p);
    }
    points
}
