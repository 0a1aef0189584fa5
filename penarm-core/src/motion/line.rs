//! Straight-line point sampling

use crate::kinematics::CartesianPoint;
use crate::traits::CoordinateSource;

/// Step count used when tracing a line between two targets
pub const DEFAULT_LINE_STEPS: u32 = 10;

/// Evenly spaced points from `from` to `to`, both inclusive
///
/// Yields `steps + 1` points; with `steps == 0` only `from` is yielded.
#[derive(Debug, Clone)]
pub struct LineSampler {
    from: CartesianPoint,
    to: CartesianPoint,
    steps: u32,
    index: u32,
    done: bool,
}

impl LineSampler {
    pub fn new(from: CartesianPoint, to: CartesianPoint, steps: u32) -> Self {
        Self {
            from,
            to,
            steps,
            index: 0,
            done: false,
        }
    }

    pub fn from(&self) -> CartesianPoint {
        self.from
    }

    pub fn to(&self) -> CartesianPoint {
        self.to
    }

    fn remaining(&self) -> usize {
        if self.done {
            0
        } else {
            (self.steps - self.index) as usize + 1
        }
    }
}

impl Iterator for LineSampler {
    type Item = CartesianPoint;

    fn next(&mut self) -> Option<CartesianPoint> {
        if self.done {
            return None;
        }

        let point = if self.index == 0 {
            self.from
        } else if self.index == self.steps {
            // Exact endpoint, free of interpolation rounding
            self.to
        } else {
            self.from.lerp(self.to, self.index as f64 / self.steps as f64)
        };

        if self.index == self.steps {
            self.done = true;
        } else {
            self.index += 1;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineSampler {}

/// Coordinate source that walks a line, one sample per read
///
/// Once the line is exhausted the final point is held.
#[derive(Debug, Clone)]
pub struct LineSource {
    sampler: LineSampler,
    current: CartesianPoint,
}

impl LineSource {
    pub fn new(from: CartesianPoint, to: CartesianPoint, steps: u32) -> Self {
        Self {
            sampler: LineSampler::new(from, to, steps),
            current: from,
        }
    }

    /// True once every sample has been read
    pub fn is_finished(&self) -> bool {
        self.sampler.len() == 0
    }

    /// Start a new line from the last point read
    pub fn line_to(&mut self, to: CartesianPoint, steps: u32) {
        self.sampler = LineSampler::new(self.current, to, steps);
    }
}

impl CoordinateSource for LineSource {
    fn read(&mut self) -> CartesianPoint {
        if let Some(point) = self.sampler.next() {
            self.current = point;
        }
        self.current
    }
}
