// src/db/mod.rs
//
// Data access layer. Queries are runtime-checked; JSON-shaped columns
// (questions, raw answers, per-question verdicts) are stored as TEXT and
// (de)serialized here so the rest of the crate only sees domain types.

pub mod assessment;
pub mod attempt;
