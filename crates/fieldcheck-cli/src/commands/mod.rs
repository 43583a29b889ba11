//! CLI command implementations.

mod check;
mod coverage;
mod render;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use render::{run_render, RenderArgs};
