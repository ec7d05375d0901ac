// Search-volume lookup: load a keyword-planner export and filter it by free text.

pub mod dataset;
pub mod filter;
pub mod handlers;
