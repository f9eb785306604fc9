/// How the per-source shortest-path runs are scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// One source at a time, in ascending node order.
    #[default]
    Sequential,
    /// Sources spread over the rayon thread pool. Produces the same scores as
    /// `Sequential`.
    Parallel,
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Execution::Sequential => f.write_str("sequential"),
            Execution::Parallel => f.write_str("parallel"),
        }
    }
}

/// Settings for a centrality run.
#[derive(Debug, Clone, Copy, Default)]
pub struct CentralityConfig {
    pub execution: Execution,
}

impl CentralityConfig {
    pub fn sequential() -> Self {
        Self {
            execution: Execution::Sequential,
        }
    }

    pub fn parallel() -> Self {
        Self {
            execution: Execution::Parallel,
        }
    }
}
