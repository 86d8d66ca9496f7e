/// Shared formatting helpers (counts, level summaries).
pub mod formatting;
/// Experience-to-level calculation.
pub mod leveling;
/// Pure parser helpers.
pub mod parse;
