//! Browser bindings. Everything crosses the boundary as JSON strings.

use wasm_bindgen::prelude::*;

use crate::assignment::Assignment;
use crate::config::OptimizerConfig;
use crate::problem::Problem;
use crate::solver::Optimizer;

fn to_js(error: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Optimize a JSON [`ProblemSpec`](crate::problem::ProblemSpec), returning an [`OptimizeReport`](crate::OptimizeReport) as JSON.
///
/// `config` is an optional TOML [`OptimizerConfig`].
#[wasm_bindgen(js_name = optimize)]
pub fn optimize_json(problem: &str, config: Option<String>) -> Result<String, JsValue> {
    let problem = Problem::from_json(problem).map_err(to_js)?;
    let config = match config {
        Some(config) => OptimizerConfig::from_toml_str(&config).map_err(to_js)?,
        None => OptimizerConfig::default(),
    };

    let report = problem.solve(&Optimizer::new(config));
    serde_json::to_string(&report).map_err(to_js)
}

/// Score a JSON list of placements against a JSON [`ProblemSpec`](crate::problem::ProblemSpec), returning a [`ScoreSheet`](crate::scoring::ScoreSheet) as JSON.
#[wasm_bindgen(js_name = score)]
pub fn score_json(problem: &str, assignment: &str) -> Result<String, JsValue> {
    let problem = Problem::from_json(problem).map_err(to_js)?;
    let assignment: Assignment = serde_json::from_str(assignment).map_err(to_js)?;

    let sheet = problem.score_sheet(&Default::default(), &assignment);
    serde_json::to_string(&sheet).map_err(to_js)
}
