pub mod schedule;
pub mod solver;

pub use schedule::{amortization_schedule, AmortizationPeriod, AmortizationSchedule, ScheduleInput};
pub use solver::{required_payment, solve, solve_facts};
