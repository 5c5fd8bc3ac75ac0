//! Engine tunables.

/// Knobs the host may adjust between searches. All of them take effect on
/// the next `compute_next_move` call.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Consult the opening book for plies 0..15.
    pub use_book: bool,
    /// Start the generation scan on a random square, perturbing move order
    /// among equal-score branches.
    pub randomize: bool,
    /// Emit one PV trace line per completed iteration.
    pub verbose: bool,
    /// Depth ceiling for iterative deepening (at most 63).
    pub level_max_max: usize,
    /// Soft wall-clock budget per search, in milliseconds.
    pub time_budget_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            use_book: true,
            randomize: false,
            verbose: true,
            level_max_max: 63,
            time_budget_ms: 2000,
        }
    }
}
