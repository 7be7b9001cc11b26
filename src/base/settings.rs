use serde::{Deserialize, Serialize};

/// Defines the smallest allowed tolerance (Newton)
pub const NEWTON_MIN_TOL: f64 = 1e-15;

/// Defines the smallest allowed line-search reduction factor
pub const NEWTON_MIN_BETA: f64 = 0.01;

/// Defines the largest allowed line-search reduction factor
pub const NEWTON_MAX_BETA: f64 = 0.99;

/// Specifies how the absolute and relative tolerances are combined in the convergence test
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Criterion {
    /// Converged if ‖R‖ ≤ tol_abs
    Absolute,

    /// Converged if ‖R‖ ≤ tol_rel · ‖R₀‖
    Relative,

    /// Converged if ‖R‖ ≤ tol_abs or ‖R‖ ≤ tol_rel · ‖R₀‖
    Either,

    /// Converged if ‖R‖ ≤ tol_abs and ‖R‖ ≤ tol_rel · ‖R₀‖
    Both,
}

impl Criterion {
    /// Performs the convergence test
    ///
    /// `norm_rr` is the current residual norm and `norm_rr0` the norm at the initial guess.
    pub fn converged(&self, norm_rr: f64, norm_rr0: f64, tol_abs: f64, tol_rel: f64) -> bool {
        let abs = norm_rr <= tol_abs;
        let rel = norm_rr <= tol_rel * norm_rr0;
        match self {
            Criterion::Absolute => abs,
            Criterion::Relative => rel,
            Criterion::Either => abs || rel,
            Criterion::Both => abs && rel,
        }
    }
}

/// Holds the parameters of the Newton root-finder
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamNewton {
    /// Absolute tolerance for the residual norm
    pub tol_abs: f64,

    /// Relative tolerance for the residual norm (relative to the norm at the initial guess)
    pub tol_rel: f64,

    /// Combination of the absolute and relative tests
    pub criterion: Criterion,

    /// Maximum number of iterations
    pub n_max_iterations: usize,

    /// Shows one message per iteration
    pub verbose: bool,

    /// Enables the backtracking line search
    pub line_search: bool,

    /// Reduction factor of the step length during the line search; 0.01 ≤ β ≤ 0.99
    pub line_search_beta: f64,

    /// Maximum number of reductions of the step length
    pub n_max_line_search: usize,
}

/// Holds the parameters of the element-deletion (element kill) policy
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct ParamElementKill {
    /// Enables the element deletion
    pub enabled: bool,

    /// Damage value at which the material point is considered failed
    pub damage_threshold: f64,

    /// Divisor of the elastic stiffness of a failed material point
    pub stiffness_divisor: f64,
}

/// Holds the configuration of the damage stress-update
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct Settings {
    /// Root-finder parameters
    pub newton: ParamNewton,

    /// Element deletion parameters
    pub element_kill: ParamElementKill,
}

impl ParamNewton {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        ParamNewton {
            tol_abs: 1e-8,
            tol_rel: 1e-8,
            criterion: Criterion::Absolute,
            n_max_iterations: 50,
            verbose: false,
            line_search: false,
            line_search_beta: 0.5,
            n_max_line_search: 10,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.tol_abs < NEWTON_MIN_TOL {
            return Some(format!(
                "tol_abs = {:?} is incorrect; it must be ≥ {:e}",
                self.tol_abs, NEWTON_MIN_TOL
            ));
        }
        if self.tol_rel < NEWTON_MIN_TOL {
            return Some(format!(
                "tol_rel = {:?} is incorrect; it must be ≥ {:e}",
                self.tol_rel, NEWTON_MIN_TOL
            ));
        }
        if self.n_max_iterations < 1 {
            return Some(format!(
                "n_max_iterations = {} is incorrect; it must be ≥ 1",
                self.n_max_iterations
            ));
        }
        if self.line_search {
            if self.line_search_beta < NEWTON_MIN_BETA || self.line_search_beta > NEWTON_MAX_BETA {
                return Some(format!(
                    "line_search_beta = {:?} is incorrect; it must be {:?} ≤ β ≤ {:?}",
                    self.line_search_beta, NEWTON_MIN_BETA, NEWTON_MAX_BETA
                ));
            }
            if self.n_max_line_search < 1 {
                return Some(format!(
                    "n_max_line_search = {} is incorrect; it must be ≥ 1",
                    self.n_max_line_search
                ));
            }
        }
        None
    }
}

impl ParamElementKill {
    /// Allocates a new instance with default values (disabled)
    pub fn new() -> Self {
        ParamElementKill {
            enabled: false,
            damage_threshold: 0.5,
            stiffness_divisor: 1e5,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.damage_threshold <= 0.0 || self.damage_threshold > 1.0 {
            return Some(format!(
                "damage_threshold = {:?} is incorrect; it must be 0.0 < dkill ≤ 1.0",
                self.damage_threshold
            ));
        }
        if self.stiffness_divisor <= 0.0 {
            return Some(format!(
                "stiffness_divisor = {:?} is incorrect; it must be > 0.0",
                self.stiffness_divisor
            ));
        }
        None
    }
}

impl Settings {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Settings {
            newton: ParamNewton::new(),
            element_kill: ParamElementKill::new(),
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = self.newton.validate() {
            return Some(msg);
        }
        self.element_kill.validate()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
