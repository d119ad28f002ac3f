//! Path command interpreter.
//!
//! Walks the token stream with a cursor, a subpath start and the last
//! Bezier control point, and emits a flat vertex list. Lines emit their
//! endpoints literally; curves and arcs are expanded with adaptive
//! sampling. Interpretation is bounded by a vertex ceiling and an optional
//! wall-clock budget; exceeding either returns the partial result with
//! `truncated` set.

use std::time::Instant;

use tracing::{debug, warn};
use vessel_kernel_math::{reflect, Point2};

use crate::arc::endpoint_to_center;
use crate::config::{PipelineConfig, SampleBounds};
use crate::lexer::{tokenize_path, Token};
use crate::sample::{
    adaptive_arc_samples, adaptive_cubic_samples, adaptive_quadratic_samples, sample_arc,
    sample_cubic, sample_quadratic,
};

/// Vertices produced from one path, plus whether interpretation stopped early.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interpretation {
    /// Emitted vertices in drawing order.
    pub vertices: Vec<Point2>,
    /// `true` if the vertex ceiling or time budget cut interpretation short.
    pub truncated: bool,
}

/// Number of operands consumed per repetition of a command, or `None` for
/// unrecognized letters.
fn arity(command: char) -> Option<usize> {
    match command.to_ascii_uppercase() {
        'M' | 'L' | 'T' => Some(2),
        'H' | 'V' => Some(1),
        'Q' | 'S' => Some(4),
        'C' => Some(6),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

/// Interpreter state over a token stream.
pub struct PathInterpreter<'a> {
    tokens: Vec<Token>,
    pos: usize,
    bounds: SampleBounds,
    ceiling: usize,
    config: &'a PipelineConfig,
    cursor: Point2,
    subpath_start: Point2,
    last_control: Option<Point2>,
    vertices: Vec<Point2>,
}

impl<'a> PathInterpreter<'a> {
    /// Create an interpreter for the given path data.
    pub fn new(d: &str, config: &'a PipelineConfig) -> Self {
        Self {
            tokens: tokenize_path(d),
            pos: 0,
            bounds: config.sample_bounds(),
            ceiling: config.vertex_ceiling(),
            config,
            cursor: Point2::origin(),
            subpath_start: Point2::origin(),
            last_control: None,
            vertices: Vec::new(),
        }
    }

    /// Run to completion (or until a budget is exceeded).
    pub fn run(mut self) -> Interpretation {
        let started = Instant::now();
        let mut command: Option<char> = None;
        let mut truncated = false;

        while self.pos < self.tokens.len() {
            if let Token::Command(c) = self.tokens[self.pos] {
                command = Some(c);
                self.pos += 1;
            }

            match command.and_then(|c| arity(c).map(|n| (c, n))) {
                Some((c, 0)) => {
                    self.execute(c, &[], true);
                    self.skip_operands();
                }
                Some((c, n)) => {
                    let mut first = true;
                    while let Some(args) = self.take_operands(n) {
                        self.execute(c, &args, first);
                        first = false;
                        if self.over_budget(started) {
                            truncated = true;
                            break;
                        }
                    }
                    if truncated {
                        break;
                    }
                    // Too few operands left for another repetition.
                    self.skip_operands();
                }
                None => {
                    if let Some(c) = command {
                        debug!(command = %c, "skipping unsupported path command");
                    }
                    self.skip_operands();
                    self.last_control = None;
                }
            }

            if self.over_budget(started) {
                truncated = true;
                break;
            }
        }

        if truncated {
            warn!(
                vertices = self.vertices.len(),
                ceiling = self.ceiling,
                "path interpretation truncated"
            );
        }

        Interpretation {
            vertices: self.vertices,
            truncated,
        }
    }

    fn over_budget(&self, started: Instant) -> bool {
        if self.vertices.len() > self.ceiling {
            return true;
        }
        self.config
            .time_budget
            .is_some_and(|budget| started.elapsed() > budget)
    }

    /// Consume `n` numeric operands if that many are available before the
    /// next command letter.
    fn take_operands(&mut self, n: usize) -> Option<Vec<f64>> {
        let slice = self.tokens.get(self.pos..self.pos + n)?;
        let args: Vec<f64> = slice.iter().map_while(Token::as_number).collect();
        if args.len() < n {
            return None;
        }
        self.pos += n;
        Some(args)
    }

    fn skip_operands(&mut self) {
        while let Some(Token::Number(_)) = self.tokens.get(self.pos) {
            self.pos += 1;
        }
    }

    /// Output coordinates must stay finite; overflowing vertices are dropped
    /// and leave the cursor where it was.
    fn emit(&mut self, p: Point2) {
        if p.x.is_finite() && p.y.is_finite() {
            self.vertices.push(p);
            self.cursor = p;
        }
    }

    fn emit_all(&mut self, points: Vec<Point2>) {
        for p in points {
            self.emit(p);
        }
    }

    fn resolve(&self, x: f64, y: f64, absolute: bool) -> Point2 {
        if absolute {
            Point2::new(x, y)
        } else {
            Point2::new(self.cursor.x + x, self.cursor.y + y)
        }
    }

    /// Control point for a smooth (`T`/`S`) segment.
    fn smooth_control(&self) -> Point2 {
        match self.last_control {
            Some(prev) => reflect(&prev, &self.cursor),
            None => self.cursor,
        }
    }

    fn execute(&mut self, command: char, args: &[f64], first: bool) {
        let absolute = command.is_ascii_uppercase();
        match command.to_ascii_uppercase() {
            'M' => {
                let p = self.resolve(args[0], args[1], absolute);
                self.emit(p);
                // Pairs after the first are implicit line-tos.
                if first {
                    self.subpath_start = p;
                }
                self.last_control = None;
            }
            'L' => {
                let p = self.resolve(args[0], args[1], absolute);
                self.emit(p);
                self.last_control = None;
            }
            'H' => {
                let x = if absolute { args[0] } else { self.cursor.x + args[0] };
                self.emit(Point2::new(x, self.cursor.y));
                self.last_control = None;
            }
            'V' => {
                let y = if absolute { args[0] } else { self.cursor.y + args[0] };
                self.emit(Point2::new(self.cursor.x, y));
                self.last_control = None;
            }
            'Q' => {
                let ctrl = self.resolve(args[0], args[1], absolute);
                let end = self.resolve(args[2], args[3], absolute);
                self.quadratic(ctrl, end);
            }
            'T' => {
                let ctrl = self.smooth_control();
                let end = self.resolve(args[0], args[1], absolute);
                self.quadratic(ctrl, end);
            }
            'C' => {
                let c1 = self.resolve(args[0], args[1], absolute);
                let c2 = self.resolve(args[2], args[3], absolute);
                let end = self.resolve(args[4], args[5], absolute);
                self.cubic(c1, c2, end);
            }
            'S' => {
                let c1 = self.smooth_control();
                let c2 = self.resolve(args[0], args[1], absolute);
                let end = self.resolve(args[2], args[3], absolute);
                self.cubic(c1, c2, end);
            }
            'A' => {
                let end = self.resolve(args[5], args[6], absolute);
                self.arc(args[0], args[1], args[2], args[3] != 0.0, args[4] != 0.0, end);
            }
            'Z' => {
                self.emit(self.subpath_start);
                self.last_control = None;
            }
            _ => {}
        }
    }

    fn quadratic(&mut self, ctrl: Point2, end: Point2) {
        let start = self.cursor;
        let n = adaptive_quadratic_samples(self.bounds, &start, &ctrl, &end);
        self.emit_all(sample_quadratic(&start, &ctrl, &end, n));
        self.last_control = Some(ctrl);
    }

    fn cubic(&mut self, c1: Point2, c2: Point2, end: Point2) {
        let start = self.cursor;
        let n = adaptive_cubic_samples(self.bounds, &start, &c1, &c2, &end);
        self.emit_all(sample_cubic(&start, &c1, &c2, &end, n));
        self.last_control = Some(c2);
    }

    fn arc(&mut self, rx: f64, ry: f64, phi: f64, large_arc: bool, sweep: bool, end: Point2) {
        match endpoint_to_center(self.cursor, end, rx, ry, phi, large_arc, sweep) {
            Some(arc) => {
                let n = adaptive_arc_samples(self.bounds, &arc);
                let mut points = sample_arc(&arc, n);
                // Land exactly on the commanded endpoint.
                if let Some(last) = points.last_mut() {
                    *last = end;
                }
                self.emit_all(points);
            }
            None => self.emit(end),
        }
        self.last_control = None;
    }
}

/// Interpret path data into vertices using the given configuration.
pub fn interpret(d: &str, config: &PipelineConfig) -> Interpretation {
    PathInterpreter::new(d, config).run()
}
