use std::fmt;

use serde::{Deserialize, Serialize};

/// Interpolation used to connect consecutive line points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    #[default]
    Linear,
    /// Horizontal-vertical-horizontal steps changing at the x midpoint.
    Step,
    /// Vertical first, then horizontal.
    StepBefore,
    /// Horizontal first, then vertical.
    StepAfter,
    /// Cubic curve preserving monotonicity in y.
    MonotoneX,
    /// Uniform cubic B-spline through the end points.
    Basis,
}

impl Curve {
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "linear" => Some(Self::Linear),
            "step" => Some(Self::Step),
            "step-before" => Some(Self::StepBefore),
            "step-after" => Some(Self::StepAfter),
            "monotone-x" => Some(Self::MonotoneX),
            "basis" => Some(Self::Basis),
            _ => None,
        }
    }
}

/// One SVG path drawing command in absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo(x, y) => write!(f, "M{x},{y}"),
            Self::LineTo(x, y) => write!(f, "L{x},{y}"),
            Self::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => write!(f, "C{x1},{y1},{x2},{y2},{x},{y}"),
            Self::Close => f.write_str("Z"),
        }
    }
}

/// Draw commands connecting `points` in order with `curve`.
///
/// No points yield no commands; a single point yields a closed move.
#[must_use]
pub fn curve_commands(points: &[(f64, f64)], curve: Curve) -> Vec<PathCommand> {
    let Some(&(x0, y0)) = points.first() else {
        return Vec::new();
    };

    let mut commands = Vec::with_capacity(points.len() * 3);
    commands.push(PathCommand::MoveTo(x0, y0));
    if points.len() == 1 {
        commands.push(PathCommand::Close);
        return commands;
    }

    match curve {
        Curve::Linear => {
            commands.extend(points[1..].iter().map(|&(x, y)| PathCommand::LineTo(x, y)));
        }
        Curve::Step => push_step(&mut commands, points, 0.5),
        Curve::StepBefore => push_step(&mut commands, points, 0.0),
        Curve::StepAfter => push_step(&mut commands, points, 1.0),
        Curve::MonotoneX => push_monotone_x(&mut commands, points),
        Curve::Basis => push_basis(&mut commands, points),
    }
    commands
}

/// Serializes commands in the compact `M0,0L10,5` form.
#[must_use]
pub fn serialize_path(commands: &[PathCommand]) -> String {
    commands.iter().map(ToString::to_string).collect()
}

/// Path descriptor for `points` under `curve`.
#[must_use]
pub fn path_descriptor(points: &[(f64, f64)], curve: Curve) -> String {
    serialize_path(&curve_commands(points, curve))
}

fn push_step(commands: &mut Vec<PathCommand>, points: &[(f64, f64)], t: f64) {
    for pair in points.windows(2) {
        let (px, py) = pair[0];
        let (x, y) = pair[1];
        if t <= 0.0 {
            commands.push(PathCommand::LineTo(px, y));
            commands.push(PathCommand::LineTo(x, y));
        } else {
            let mid = px * (1.0 - t) + x * t;
            commands.push(PathCommand::LineTo(mid, py));
            commands.push(PathCommand::LineTo(mid, y));
        }
    }
    if t > 0.0 && t < 1.0 {
        if let Some(&(x, y)) = points.last() {
            commands.push(PathCommand::LineTo(x, y));
        }
    }
}

fn push_monotone_x(commands: &mut Vec<PathCommand>, points: &[(f64, f64)]) {
    let n = points.len();
    if n == 2 {
        commands.push(PathCommand::LineTo(points[1].0, points[1].1));
        return;
    }

    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = end_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = end_tangent(points[n - 2], points[n - 1], tangents[n - 2]);

    for i in 1..n {
        let (x0, y0) = points[i - 1];
        let (x1, y1) = points[i];
        let dx = (x1 - x0) / 3.0;
        commands.push(PathCommand::CubicTo {
            x1: x0 + dx,
            y1: y0 + dx * tangents[i - 1],
            x2: x1 - dx,
            y2: y1 - dx * tangents[i],
            x: x1,
            y: y1,
        });
    }
}

// Fritsch-Carlson tangent; zero at local extrema so the curve never overshoots.
fn interior_tangent(prev: (f64, f64), current: (f64, f64), next: (f64, f64)) -> f64 {
    let h0 = current.0 - prev.0;
    let h1 = next.0 - current.0;
    let s0 = (current.1 - prev.1) / h0;
    let s1 = (next.1 - current.1) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let sign = |value: f64| if value < 0.0 { -1.0 } else { 1.0 };
    let tangent = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if tangent.is_finite() { tangent } else { 0.0 }
}

fn end_tangent(a: (f64, f64), b: (f64, f64), neighbour: f64) -> f64 {
    let h = b.0 - a.0;
    if h == 0.0 {
        neighbour
    } else {
        (3.0 * (b.1 - a.1) / h - neighbour) / 2.0
    }
}

fn push_basis(commands: &mut Vec<PathCommand>, points: &[(f64, f64)]) {
    let n = points.len();
    if n == 2 {
        commands.push(PathCommand::LineTo(points[1].0, points[1].1));
        return;
    }

    let (x0, y0) = points[0];
    let (x1, y1) = points[1];
    commands.push(PathCommand::LineTo((5.0 * x0 + x1) / 6.0, (5.0 * y0 + y1) / 6.0));
    for i in 2..n {
        commands.push(basis_segment(points[i - 2], points[i - 1], points[i]));
    }
    let last = points[n - 1];
    commands.push(basis_segment(points[n - 2], last, last));
    commands.push(PathCommand::LineTo(last.0, last.1));
}

fn basis_segment(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> PathCommand {
    PathCommand::CubicTo {
        x1: (2.0 * a.0 + b.0) / 3.0,
        y1: (2.0 * a.1 + b.1) / 3.0,
        x2: (a.0 + 2.0 * b.0) / 3.0,
        y2: (a.1 + 2.0 * b.1) / 3.0,
        x: (a.0 + 4.0 * b.0 + c.0) / 6.0,
        y: (a.1 + 4.0 * b.1 + c.1) / 6.0,
    }
}
