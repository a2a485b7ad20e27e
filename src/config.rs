//! Tuning knobs for the numeric kernels
//!
//! Every decomposition and solver entry point has a default-configured form
//! and a `*_with_config` form taking a [`LinalgConfig`].

/// Iteration budgets, tolerances, and parallelism thresholds
///
/// # Example
///
/// ```
/// use matr::config::LinalgConfig;
///
/// let config = LinalgConfig::default()
///     .with_max_sweeps(100)
///     .with_rank_tolerance(1e-10);
/// assert_eq!(config.max_sweeps, 100);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinalgConfig {
    /// Sweep budget for the one-sided Jacobi SVD
    pub max_sweeps: usize,
    /// QR/QL iteration budget per matrix dimension for the eigen solvers
    pub max_iterations_per_dim: usize,
    /// Absolute rank threshold; `None` uses `max(m, n) * σ_max * ε`
    pub rank_tolerance: Option<f64>,
    /// Minimum output rows before the dense product runs rows in parallel
    pub parallel_threshold: usize,
}

impl LinalgConfig {
    /// Default Jacobi sweep budget
    pub const DEFAULT_MAX_SWEEPS: usize = 60;
    /// Default per-dimension iteration budget
    pub const DEFAULT_MAX_ITERATIONS_PER_DIM: usize = 30;
    /// Default row threshold for the parallel product
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

    /// Set the Jacobi sweep budget
    pub fn with_max_sweeps(mut self, sweeps: usize) -> Self {
        self.max_sweeps = sweeps;
        self
    }

    /// Set the per-dimension iteration budget
    pub fn with_max_iterations_per_dim(mut self, iterations: usize) -> Self {
        self.max_iterations_per_dim = iterations;
        self
    }

    /// Set an absolute rank threshold
    pub fn with_rank_tolerance(mut self, tol: f64) -> Self {
        self.rank_tolerance = Some(tol);
        self
    }

    /// Set the parallel product row threshold
    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Total iteration budget for an `n × n` eigenproblem
    #[inline]
    pub fn eigen_iteration_budget(&self, n: usize) -> usize {
        self.max_iterations_per_dim.saturating_mul(n.max(1))
    }
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            max_sweeps: Self::DEFAULT_MAX_SWEEPS,
            max_iterations_per_dim: Self::DEFAULT_MAX_ITERATIONS_PER_DIM,
            rank_tolerance: None,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_setters() {
        let config = LinalgConfig::default();
        assert_eq!(config.max_sweeps, 60);
        assert_eq!(config.rank_tolerance, None);
        assert_eq!(config.eigen_iteration_budget(4), 120);
        assert_eq!(config.eigen_iteration_budget(0), 30);

        let tuned = config.with_parallel_threshold(1).with_max_iterations_per_dim(5);
        assert_eq!(tuned.parallel_threshold, 1);
        assert_eq!(tuned.eigen_iteration_budget(2), 10);
    }
}
