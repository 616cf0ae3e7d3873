/// Workspace version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default sample count for a discretized universe.
pub const DEFAULT_UNIVERSE_SAMPLES: usize = 1000;

/// Default exponent for the gamma-weighted centroid (plain weighted average).
pub const DEFAULT_GAMMA: f64 = 1.0;

/// Default alpha-cut threshold for priority-ordered label selection.
pub const DEFAULT_ALPHA_CUT: f64 = 0.3;
