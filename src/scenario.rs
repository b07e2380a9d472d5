//! Scenario runner for batch and sensitivity runs
//!
//! Holds a base set of inputs and runs variants of it. Every run is an
//! independent pure computation, so batches are spread across threads.

use rayon::prelude::*;

use crate::error::Result;
use crate::inputs::Inputs;
use crate::projection::{run, ModelResult};

/// Runner over variations of one base input set
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(Inputs::default());
///
/// // Sweep the appreciation rate
/// let results = runner.run_variants(&[0.0, 0.02, 0.04], |inputs, rate| {
///     inputs.home_appreciation_rate = rate;
/// });
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    base_inputs: Inputs,
}

impl ScenarioRunner {
    pub fn new(base_inputs: Inputs) -> Self {
        Self { base_inputs }
    }

    /// Run the base inputs
    pub fn run_base(&self) -> Result<ModelResult> {
        run(self.base_inputs.clone())
    }

    /// Run independent input sets in parallel, preserving order
    pub fn run_batch(&self, inputs: &[Inputs]) -> Vec<Result<ModelResult>> {
        inputs.par_iter().map(|i| run(i.clone())).collect()
    }

    /// Apply `vary` to a copy of the base inputs once per value and run each
    pub fn run_variants<T, F>(&self, values: &[T], vary: F) -> Vec<Result<ModelResult>>
    where
        T: Copy + Sync,
        F: Fn(&mut Inputs, T) + Sync,
    {
        values
            .par_iter()
            .map(|&value| {
                let mut inputs = self.base_inputs.clone();
                vary(&mut inputs, value);
                run(inputs)
            })
            .collect()
    }

    /// Run the base inputs once per mortgage term (in years)
    pub fn compare_terms(&self, terms: &[u32]) -> Vec<Result<ModelResult>> {
        self.run_variants(terms, |inputs, years| inputs.mortgage_term_years = years)
    }

    pub fn inputs(&self) -> &Inputs {
        &self.base_inputs
    }

    pub fn inputs_mut(&mut self) -> &mut Inputs {
        &mut self.base_inputs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_variants_appreciation() {
        let runner = ScenarioRunner::new(Inputs::default());
        let results = runner.run_variants(&[0.0, 0.02, 0.04], |inputs, rate| {
            inputs.home_appreciation_rate = rate;
        });
        assert_eq!(results.len(), 3);

        let npvs: Vec<f64> = results
            .into_iter()
            .map(|r| r.unwrap().summary.buy_total_npv)
            .collect();

        // Higher appreciation should result in a higher buy NPV
        assert!(npvs[1] > npvs[0]);
        assert!(npvs[2] > npvs[1]);
    }

    #[test]
    fn test_compare_terms_preserves_order() {
        let mut runner = ScenarioRunner::default();
        runner.inputs_mut().mortgage_rate = 0.04;
        runner.inputs_mut().discount_rate = 0.07;

        let results = runner.compare_terms(&[15, 30]);
        let short = results[0].as_ref().unwrap();
        let long = results[1].as_ref().unwrap();

        assert_eq!(short.inputs.mortgage_term_years, 15);
        assert_eq!(long.inputs.mortgage_term_years, 30);
        assert!(long.summary.buy_total_npv > short.summary.buy_total_npv);
    }

    #[test]
    fn test_batch_reports_each_failure() {
        let runner = ScenarioRunner::default();
        let bad = Inputs { mortgage_term_years: 0, ..Inputs::default() };
        let results = runner.run_batch(&[Inputs::default(), bad]);

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            runner.run_base().unwrap().summary,
            results[0].as_ref().unwrap().summary
        );
    }
}
