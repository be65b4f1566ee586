pub mod aggregator;

pub use aggregator::{aggregate, aggregate_with, build_payoff_plan, PayoffPlan, PayoffPlanInput, PayoffScheduleEntry};
