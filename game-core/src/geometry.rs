use game_types::{Guess, PlayerColor, Point};

use crate::ScoringEngine;

/// Screen-space box of the rendered image, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    fn is_degenerate(&self) -> bool {
        !(self.left.is_finite() && self.top.is_finite())
            || !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
    }
}

/// Map a raw click position onto the image as percentages.
///
/// Clicks that land slightly outside the box (borders, subpixel rounding)
/// are clamped onto the edge. Returns `None` when the box has no area.
pub fn normalize(client_x: f64, client_y: f64, bounds: &BoundingBox) -> Option<Point> {
    if bounds.is_degenerate() {
        return None;
    }

    let x = (client_x - bounds.left) / bounds.width * 100.0;
    let y = (client_y - bounds.top) / bounds.height * 100.0;
    Some(Point::new(x, y).clamped())
}

pub fn midpoint(a: &Point, b: &Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Dashed line from a guess to the target on the results screen,
/// labelled at its midpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceLine {
    pub from: Point,
    pub to: Point,
    pub midpoint: Point,
    pub label_distance: i64,
    pub color: PlayerColor,
}

impl DistanceLine {
    pub fn between(from: Point, to: Point, color: PlayerColor) -> Self {
        Self {
            from,
            to,
            midpoint: midpoint(&from, &to),
            label_distance: ScoringEngine::display_distance(ScoringEngine::distance(&from, &to)),
            color,
        }
    }
}

/// One line per guess, in confirmation order
pub fn distance_lines(guesses: &[Guess], target: &Point) -> Vec<DistanceLine> {
    guesses
        .iter()
        .map(|guess| DistanceLine::between(guess.point, *target, guess.color.clone()))
        .collect()
}
