//! Sampled membership functions over a discretized universe.

use mamdani_core::config::UniverseSpec;
use mamdani_core::errors::{ConfigError, FuzzyResult};

/// Evenly sampled numeric range `[lo, hi]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Universe {
    lo: f64,
    hi: f64,
    samples: usize,
}

impl Universe {
    /// Create a universe with `samples` evenly spaced points over `[lo, hi]`.
    pub fn new(lo: f64, hi: f64, samples: usize) -> FuzzyResult<Self> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("bounds [{lo}, {hi}] are not a finite ascending range"),
            }
            .into());
        }
        if samples < 2 {
            return Err(ConfigError::InvalidUniverse {
                reason: format!("need at least 2 samples, got {samples}"),
            }
            .into());
        }
        Ok(Self { lo, hi, samples })
    }

    /// Build from a config spec.
    pub fn from_spec(spec: &UniverseSpec) -> FuzzyResult<Self> {
        Self::new(spec.lo, spec.hi, spec.samples)
    }

    /// Lower bound.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Number of grid points.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// The i-th grid point. Endpoints land exactly on `lo` and `hi`.
    pub fn x_at(&self, i: usize) -> f64 {
        debug_assert!(i < self.samples);
        if i == self.samples - 1 {
            return self.hi;
        }
        self.lo + (self.hi - self.lo) * i as f64 / (self.samples - 1) as f64
    }
}

/// Piecewise-linear membership function stored as `(x, degree)` samples.
///
/// Immutable once constructed. Queried by binary search for the bracketing
/// pair and linear interpolation between them, which keeps plateaus exact
/// and clamps queries outside the universe to the boundary sample.
#[derive(Debug, Clone, PartialEq)]
pub struct MembershipFunction {
    xs: Vec<f64>,
    degrees: Vec<f64>,
}

impl MembershipFunction {
    /// Sample a trapezoid with breakpoints `a ≤ b ≤ c ≤ d` over the universe.
    ///
    /// The degree rises linearly from 0 at `a` to 1 at `b`, holds at 1 until
    /// `c`, and falls to 0 at `d`. `a = b` or `c = d` produce a step;
    /// `a = b = c = d` produces a singleton spike at that point.
    pub fn trapezoid(universe: &Universe, breakpoints: [f64; 4]) -> FuzzyResult<Self> {
        let [a, b, c, d] = breakpoints;
        if !(a <= b && b <= c && c <= d) {
            return Err(ConfigError::InvalidBreakpoints {
                reason: format!("[{a}, {b}, {c}, {d}] is not ascending"),
            }
            .into());
        }

        let n = universe.samples();
        let mut xs = Vec::with_capacity(n);
        let mut degrees = Vec::with_capacity(n);
        for i in 0..n {
            let x = universe.x_at(i);
            xs.push(x);
            degrees.push(trapezoid_degree(x, a, b, c, d));
        }
        Ok(Self { xs, degrees })
    }

    /// Membership degree at `x`, interpolated from the stored samples.
    ///
    /// Values outside the universe clamp to the nearest boundary sample
    /// rather than error: physical inputs may exceed the nominal range.
    pub fn degree_at(&self, x: f64) -> f64 {
        let first = self.xs[0];
        let last = self.xs[self.xs.len() - 1];
        if x <= first {
            return self.degrees[0];
        }
        if x >= last {
            return self.degrees[self.degrees.len() - 1];
        }

        // First index with grid point >= x; the bracket is [hi - 1, hi].
        let hi = self.xs.partition_point(|&gx| gx < x);
        let lo = hi - 1;
        let (x0, x1) = (self.xs[lo], self.xs[hi]);
        let (d0, d1) = (self.degrees[lo], self.degrees[hi]);
        if x1 == x0 {
            return d0;
        }
        // `d0 + t * (d1 - d0)` reproduces flat segments exactly.
        let t = (x - x0) / (x1 - x0);
        d0 + t * (d1 - d0)
    }

    /// The stored sample count.
    pub fn samples(&self) -> usize {
        self.xs.len()
    }
}

/// Analytic trapezoid membership, clamped to [0, 1].
fn trapezoid_degree(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a {
        0.0
    } else if x <= b {
        // a = b is a step: full membership at the shared breakpoint.
        if b == a {
            1.0
        } else {
            (x - a) / (b - a)
        }
    } else if x <= c {
        1.0
    } else if x <= d {
        // c = d handled by the branch above (x <= c catches the step point).
        (d - x) / (d - c)
    } else {
        0.0
    }
}
