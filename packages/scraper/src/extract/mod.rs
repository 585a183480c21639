//! Field extractors, grouped by the page they read.
//!
//! Every extractor is a pure function over one parsed page. None of them
//! fetch anything, so they can be called in any order and any number of
//! times against a page that is already loaded.

pub mod awards;
pub mod credits;
pub mod person;
pub mod title;
