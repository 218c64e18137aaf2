//! The dashboard view-state and the staged fetch that fills it.
//!
//! A dashboard load is several independent backend sources racing into one
//! state object. The expenses list is fetched first and painted immediately;
//! the rest (summary, limits, pulse, festivals, income) settle as a batch,
//! each applying only its own slice, each failure degrading to a cached,
//! derived or default value instead of surfacing an error. A fixed timeout
//! bounds how long a caller waits, without cancelling the batch: late
//! results still land as long as the consumer is attached.

pub mod controller;
pub mod planner;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::DashboardController;
pub use planner::{GoalPlanner, PlanView, local_plan};
pub use state::{DashboardState, MoneyStats, Notice, NoticeLevel, Provenance};
