//! Bond pricing: present value, current yield and yield-to-maturity.

mod yield_solver;

pub use yield_solver::{
    current_yield, present_value, solve_yield, Annualization, SolverMethod, YieldBracket,
    YieldResult, YieldSolver, DEFAULT_HIGH_RATE, DEFAULT_LOW_RATE,
};
