//! Staining scheme generation for flow-cytometry antibody panels.
//!
//! A [`engine::StainingEngine`] holds the antibody catalog loaded from a
//! library table, an optional spectrum similarity table and the current
//! antibody selection. Generation enumerates every spectrum/channel assignment
//! that never reuses a spectrum and ranks the results by worst-case pairwise
//! spectral similarity.

pub mod catalog;
pub mod engine;
pub mod input;
pub mod report;
pub mod scheme;
pub mod similarity;

pub use catalog::Catalog;
pub use engine::{EngineConfig, EngineObserver, LoadOutcome, Notification, StainingEngine};
pub use scheme::{Scheme, StainingAssignment};
pub use similarity::{ScoreParsePolicy, SimilarityTable};
