//! Domain Services
//!
//! Pure text engines used by the upgrade flow. None of them touch the file
//! system or the state store; they receive plain text and return values.

pub mod conflict_markers;
pub mod line_diff;
pub mod merge;
pub mod resolver;

pub use line_diff::{diff, stats, DiffHunk, DiffLine, DiffStats, LineKind};
pub use merge::{merge, merge_with_labels, MergeLabels, MergeResult};
pub use resolver::{
    resolve, ResolutionPass, ResolveOutcome, ResolverPipeline, TokenListClassifier,
    TokenSetAssignmentPass, UtilityClassHeuristic,
};
