//! Field extraction: registry, line matching, corrective salvage, engine.

mod corrective;
mod engine;
mod matcher;
pub mod patterns;
mod registry;

pub use engine::FieldEngine;
pub use matcher::{best_similarity, match_line, MatchPolicy};
pub use registry::{FieldDef, FieldRegistry, FieldSpec, Keyword};
