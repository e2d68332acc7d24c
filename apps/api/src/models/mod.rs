pub mod profile;
pub mod result;

pub use profile::{Candidate, Education, Experience, Job};
pub use result::{
    BatchSummary, MatchBreakdown, MatchExplanation, MatchResult, QualityTier, RankedMatchResult,
};
