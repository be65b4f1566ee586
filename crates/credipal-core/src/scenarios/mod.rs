pub mod comparator;
pub mod sensitivity;

pub use comparator::{
    analyze_scenarios, compare_scenarios, compare_scenarios_with, OptimisticScenario,
    PessimisticScenario, ScenarioInput, ScenarioSet,
};
pub use sensitivity::{extra_payment_sensitivity, SensitivityInput, SensitivityOutput, SensitivityPoint};
