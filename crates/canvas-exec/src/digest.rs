//! Deterministic plan digests for the run manifest.
//!
//! The digest covers the serialized plan summary only: identical range and
//! weekday table give the identical hash across runs.

use canvas_core::hash::{hash_serde, Hash256};
use canvas_plan::SimulationPlan;

use crate::ExecError;

pub fn hash_plan(plan: &SimulationPlan) -> Result<Hash256, ExecError> {
    hash_serde(&plan.summary()).map_err(|e| ExecError::Hash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas_core::calendar::{DateRange, WeekdayDistribution};

    #[test]
    fn same_plan_same_hash() {
        let range = DateRange::from_years(2020, 2021).unwrap();
        let a = SimulationPlan::new(range, WeekdayDistribution::STANDARD);
        let b = SimulationPlan::new(range, WeekdayDistribution::STANDARD);
        assert_eq!(hash_plan(&a).unwrap(), hash_plan(&b).unwrap());

        let other = SimulationPlan::new(range, WeekdayDistribution::new([1; 7]));
        assert_ne!(hash_plan(&a).unwrap(), hash_plan(&other).unwrap());
    }
}
