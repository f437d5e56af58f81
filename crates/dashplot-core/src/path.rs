// File: crates/dashplot-core/src/path.rs
// Summary: Backend-agnostic path descriptors (draw-command lists) with SVG `d` serialization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier with two control points.
    CurveTo { c1: Point, c2: Point, to: Point },
    /// Elliptical arc, SVG semantics. `sweep = true` is clockwise in y-down space.
    ArcTo { radius: f64, large_arc: bool, sweep: bool, to: Point },
    Close,
}

/// Ordered list of draw commands. An empty segment draws nothing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathSegment {
    commands: Vec<PathCommand>,
}

impl PathSegment {
    pub fn new() -> Self { Self::default() }

    pub fn with_capacity(cap: usize) -> Self {
        Self { commands: Vec::with_capacity(cap) }
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }
    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }
    pub fn curve_to(&mut self, c1: Point, c2: Point, to: Point) -> &mut Self {
        self.commands.push(PathCommand::CurveTo { c1, c2, to });
        self
    }
    pub fn arc_to(&mut self, radius: f64, large_arc: bool, sweep: bool, to: Point) -> &mut Self {
        self.commands.push(PathCommand::ArcTo { radius, large_arc, sweep, to });
        self
    }
    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] { &self.commands }
    pub fn len(&self) -> usize { self.commands.len() }
    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    /// Position of the leading move-to, if any.
    pub fn start(&self) -> Option<Point> {
        match self.commands.first() {
            Some(PathCommand::MoveTo(p)) => Some(*p),
            _ => None,
        }
    }

    /// Current point after the last command (the start point again after `Close`).
    pub fn end(&self) -> Option<Point> {
        let mut start = None;
        let mut cur = None;
        for c in &self.commands {
            match *c {
                PathCommand::MoveTo(p) => { start = Some(p); cur = Some(p); }
                PathCommand::LineTo(p) => cur = Some(p),
                PathCommand::CurveTo { to, .. } | PathCommand::ArcTo { to, .. } => cur = Some(to),
                PathCommand::Close => cur = start,
            }
        }
        cur
    }

    /// SVG path data string, same as `to_string()`.
    pub fn to_svg_d(&self) -> String { self.to_string() }
}

impl Extend<PathCommand> for PathSegment {
    fn extend<T: IntoIterator<Item = PathCommand>>(&mut self, iter: T) {
        self.commands.extend(iter);
    }
}

// Three decimals keeps output stable across platforms and small enough for inline SVG.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = (self.0 * 1000.0).round() / 1000.0;
        // avoid "-0"
        let r = if r == 0.0 { 0.0 } else { r };
        write!(f, "{r}")
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.commands.iter().enumerate() {
            if i > 0 { f.write_str(" ")?; }
            match *c {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", Num(p.x), Num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", Num(p.x), Num(p.y))?,
                PathCommand::CurveTo { c1, c2, to } => write!(
                    f,
                    "C {} {}, {} {}, {} {}",
                    Num(c1.x), Num(c1.y), Num(c2.x), Num(c2.y), Num(to.x), Num(to.y)
                )?,
                PathCommand::ArcTo { radius, large_arc, sweep, to } => write!(
                    f,
                    "A {} {} 0 {} {} {} {}",
                    Num(radius), Num(radius), large_arc as u8, sweep as u8, Num(to.x), Num(to.y)
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}
