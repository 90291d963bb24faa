//! Annular wedge paths with `d3.arc()` semantics (no corner radius).
//!
//! Angles are measured clockwise from 12 o'clock, y grows downwards.

use crate::config::ChartOptions;
use crate::model::Wedge;
use crate::svg::fmt_path;
use euclid::default::Point2D;
use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt::Write as _;

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub pad_angle: f64,
    pub pad_radius: f64,
}

impl ArcSpec {
    /// Pixel geometry for a wedge. `pop_out` in `[0, 1]` blends the outer radius from the
    /// resting `y1·r − 1` to the emphasized `y1·r·pop_out_scale`.
    pub fn for_wedge(w: &Wedge, options: &ChartOptions, pop_out: f64) -> Self {
        let r = options.radius;
        let inner = w.y0 * r;
        let resting = inner.max(w.y1 * r - 1.0);
        let popped = inner.max(w.y1 * r * options.pop_out_scale);
        let p = pop_out.clamp(0.0, 1.0);
        Self {
            start_angle: w.x0,
            end_angle: w.x1,
            inner_radius: inner,
            outer_radius: resting + (popped - resting) * p,
            pad_angle: (w.angular_width() / 2.0).min(options.pad_angle_max),
            pad_radius: options.pad_radius(),
        }
    }
}

fn asin(x: f64) -> f64 {
    if x >= 1.0 {
        FRAC_PI_2
    } else if x <= -1.0 {
        -FRAC_PI_2
    } else {
        x.asin()
    }
}

fn polar(r: f64, a: f64) -> Point2D<f64> {
    Point2D::new(r * a.cos(), r * a.sin())
}

#[derive(Debug, Default)]
struct PathBuilder {
    out: String,
    cur: Option<Point2D<f64>>,
}

impl PathBuilder {
    fn move_to(&mut self, p: Point2D<f64>) {
        let _ = write!(self.out, "M{},{}", fmt_path(p.x), fmt_path(p.y));
        self.cur = Some(p);
    }

    fn line_to(&mut self, p: Point2D<f64>) {
        let _ = write!(self.out, "L{},{}", fmt_path(p.x), fmt_path(p.y));
        self.cur = Some(p);
    }

    /// `d3-path` `arc(0, 0, r, a0, a1, ccw)`.
    fn arc(&mut self, r: f64, a0: f64, a1: f64, ccw: bool) {
        let start = polar(r, a0);
        match self.cur {
            None => self.move_to(start),
            Some(c) if (c.x - start.x).abs() > 1e-6 || (c.y - start.y).abs() > 1e-6 => {
                self.line_to(start)
            }
            Some(_) => {}
        }
        if r <= 0.0 {
            return;
        }

        let sweep = if ccw { 0 } else { 1 };
        let mut da = if ccw { a0 - a1 } else { a1 - a0 };
        if da < 0.0 {
            da = da % TAU + TAU;
        }

        if da > TAU - 1e-6 {
            // Full ring: two half-circle arcs back to the start.
            let opposite = Point2D::new(-start.x, -start.y);
            let _ = write!(
                self.out,
                "A{r},{r},0,1,{sweep},{x},{y}A{r},{r},0,1,{sweep},{sx},{sy}",
                r = fmt_path(r),
                x = fmt_path(opposite.x),
                y = fmt_path(opposite.y),
                sx = fmt_path(start.x),
                sy = fmt_path(start.y),
            );
            self.cur = Some(start);
        } else if da > 1e-6 {
            let end = polar(r, a1);
            let large = if da >= PI { 1 } else { 0 };
            let _ = write!(
                self.out,
                "A{r},{r},0,{large},{sweep},{x},{y}",
                r = fmt_path(r),
                x = fmt_path(end.x),
                y = fmt_path(end.y),
            );
            self.cur = Some(end);
        }
    }

    fn close(&mut self) {
        self.out.push('Z');
    }
}

/// SVG path data for one annular wedge.
pub fn arc_path(spec: &ArcSpec) -> String {
    let mut r0 = spec.inner_radius.max(0.0);
    let mut r1 = spec.outer_radius.max(0.0);
    if r1 < r0 {
        std::mem::swap(&mut r0, &mut r1);
    }
    let a0 = spec.start_angle - FRAC_PI_2;
    let a1 = spec.end_angle - FRAC_PI_2;
    let da = (a1 - a0).abs();
    let cw = a1 > a0;

    let mut path = PathBuilder::default();

    if !(r1 > EPSILON) {
        path.move_to(Point2D::new(0.0, 0.0));
    } else if da > TAU - EPSILON {
        path.move_to(polar(r1, a0));
        path.arc(r1, a0, a1, !cw);
        if r0 > EPSILON {
            path.move_to(polar(r0, a1));
            path.arc(r0, a1, a0, cw);
        }
    } else {
        let (mut a01, mut a11, mut a00, mut a10) = (a0, a1, a0, a1);
        let (mut da0, mut da1) = (da, da);
        let ap = spec.pad_angle / 2.0;
        let rp = if ap > EPSILON && spec.pad_radius > 0.0 {
            spec.pad_radius
        } else {
            (r0 * r0 + r1 * r1).sqrt()
        };

        if ap > EPSILON && rp > EPSILON {
            let dir = if cw { 1.0 } else { -1.0 };
            let p0 = if r0 > EPSILON {
                asin(rp / r0 * ap.sin())
            } else {
                FRAC_PI_2
            };
            let p1 = asin(rp / r1 * ap.sin());
            da0 -= p0 * 2.0;
            if da0 > EPSILON {
                a00 += p0 * dir;
                a10 -= p0 * dir;
            } else {
                da0 = 0.0;
                a00 = (a0 + a1) / 2.0;
                a10 = a00;
            }
            da1 -= p1 * 2.0;
            if da1 > EPSILON {
                a01 += p1 * dir;
                a11 -= p1 * dir;
            } else {
                da1 = 0.0;
                a01 = (a0 + a1) / 2.0;
                a11 = a01;
            }
        }

        path.move_to(polar(r1, a01));
        if da1 > EPSILON {
            path.arc(r1, a01, a11, !cw);
        }

        if !(r0 > EPSILON) || !(da0 > EPSILON) {
            path.line_to(polar(r0, a10));
        } else {
            path.arc(r0, a10, a00, cw);
        }
    }

    path.close();
    path.out
}
