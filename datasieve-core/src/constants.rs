/// Datasieve system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of rows fed to the effective-rank SVD.
pub const MAX_RANK_ROWS: usize = 1000;

/// Maximum entries in the influence estimator's ranked harmful list.
pub const TOP_HARMFUL_LIMIT: usize = 20;

/// Maximum relabel suggestions emitted by a single cleansing call.
pub const MAX_RELABEL_SUGGESTIONS: usize = 50;

/// Variance below this is treated as zero when guarding divisions.
pub const VARIANCE_EPSILON: f64 = 1e-12;
