//! Three-way merge engine.
//!
//! Native diff3 over lines: `local` and `incoming` are each aligned against
//! their common ancestor `base`, and the engine walks base positions emitting
//! stable regions verbatim and reconciling unstable ones. Overlapping,
//! differing edits become canonical conflict blocks.

use std::ops::Range;

use tracing::{debug, trace};

use super::conflict_markers::{CLOSE_MARKER, OPEN_MARKER, SEPARATOR_MARKER};
use super::line_diff::lcs_pairs;
use crate::error::{ContractorError, ContractorResult};

/// Labels written after the opening and closing conflict markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeLabels {
    pub local: String,
    pub incoming: String,
}

impl MergeLabels {
    pub fn new(local: impl Into<String>, incoming: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            incoming: incoming.into(),
        }
    }
}

impl Default for MergeLabels {
    fn default() -> Self {
        Self::new("LOCAL", "INCOMING")
    }
}

/// The result of a three-way merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    /// Merged text; contains conflict blocks when `has_conflicts`
    pub text: String,
    pub has_conflicts: bool,
    /// Number of conflict blocks emitted
    pub conflicts: usize,
}

impl MergeResult {
    fn clean(text: &str) -> Self {
        Self {
            text: text.to_string(),
            has_conflicts: false,
            conflicts: 0,
        }
    }
}

/// A region of the base text and what each side did to it
#[derive(Debug, Clone, PartialEq, Eq)]
enum Chunk {
    /// Unchanged on both sides
    Stable(Range<usize>),
    /// Changed on at least one side
    Unstable {
        base: Range<usize>,
        local: Range<usize>,
        incoming: Range<usize>,
    },
}

/// Merge with the default `LOCAL` / `INCOMING` labels
pub fn merge(base: &str, local: &str, incoming: &str) -> ContractorResult<MergeResult> {
    merge_with_labels(base, local, incoming, &MergeLabels::default())
}

/// Three-way merge of `local` and `incoming` against their ancestor `base`
///
/// Lines keep their terminators, so the presence or absence of a trailing
/// newline survives the merge unchanged.
pub fn merge_with_labels(
    base: &str,
    local: &str,
    incoming: &str,
    labels: &MergeLabels,
) -> ContractorResult<MergeResult> {
    if local == base {
        trace!("local unchanged, taking incoming");
        return Ok(MergeResult::clean(incoming));
    }
    if incoming == base {
        trace!("incoming unchanged, keeping local");
        return Ok(MergeResult::clean(local));
    }
    if local == incoming {
        trace!("identical edits on both sides");
        return Ok(MergeResult::clean(local));
    }

    let base_lines = split_lines(base);
    let local_lines = split_lines(local);
    let incoming_lines = split_lines(incoming);

    let chunks = diff3_chunks(&base_lines, &local_lines, &incoming_lines)?;

    let mut out = String::with_capacity(local.len().max(incoming.len()));
    let mut conflicts = 0;

    for chunk in chunks {
        match chunk {
            Chunk::Stable(range) => push_lines(&mut out, &base_lines[range]),
            Chunk::Unstable {
                base: b,
                local: l,
                incoming: i,
            } => {
                let base_side = &base_lines[b];
                let local_side = &local_lines[l];
                let incoming_side = &incoming_lines[i];

                if local_side == base_side {
                    push_lines(&mut out, incoming_side);
                } else if incoming_side == base_side || local_side == incoming_side {
                    push_lines(&mut out, local_side);
                } else {
                    conflicts += 1;
                    push_conflict(&mut out, local_side, incoming_side, labels);
                }
            }
        }
    }

    debug!(conflicts, "three-way merge finished");
    Ok(MergeResult {
        text: out,
        has_conflicts: conflicts > 0,
        conflicts,
    })
}

/// Split keeping terminators; empty text has no lines
fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// `map[base_index] = Some(side_index)` for matched lines
fn match_map(base: &[&str], side: &[&str]) -> Vec<Option<usize>> {
    let mut map = vec![None; base.len()];
    for (b, s) in lcs_pairs(base, side) {
        map[b] = Some(s);
    }
    map
}

fn diff3_chunks(base: &[&str], local: &[&str], incoming: &[&str]) -> ContractorResult<Vec<Chunk>> {
    let to_local = match_map(base, local);
    let to_incoming = match_map(base, incoming);

    let mut chunks = Vec::new();
    let (mut o, mut a, mut b) = (0usize, 0usize, 0usize);

    loop {
        // Longest run of base lines matched at the current position on both sides
        let stable = (o..base.len())
            .take_while(|&k| {
                to_local[k] == Some(a + (k - o)) && to_incoming[k] == Some(b + (k - o))
            })
            .count();
        if stable > 0 {
            chunks.push(Chunk::Stable(o..o + stable));
            o += stable;
            a += stable;
            b += stable;
            continue;
        }

        // Next base line both sides still agree on
        let sync = (o..base.len()).find_map(|k| match (to_local[k], to_incoming[k]) {
            (Some(x), Some(y)) => Some((k, x, y)),
            _ => None,
        });

        match sync {
            Some((k, x, y)) => {
                if x < a || y < b {
                    return Err(ContractorError::MergeFailure {
                        message: format!(
                            "alignment went backwards at base line {} (local {} < {} or incoming {} < {})",
                            k + 1,
                            x,
                            a,
                            y,
                            b
                        ),
                    });
                }
                chunks.push(Chunk::Unstable {
                    base: o..k,
                    local: a..x,
                    incoming: b..y,
                });
                o = k;
                a = x;
                b = y;
            }
            None => {
                if o < base.len() || a < local.len() || b < incoming.len() {
                    chunks.push(Chunk::Unstable {
                        base: o..base.len(),
                        local: a..local.len(),
                        incoming: b..incoming.len(),
                    });
                }
                break;
            }
        }
    }

    Ok(chunks)
}

fn push_lines(out: &mut String, lines: &[&str]) {
    for line in lines {
        out.push_str(line);
    }
}

fn push_terminated(out: &mut String, line: &str) {
    out.push_str(line);
    if !line.ends_with('\n') {
        out.push('\n');
    }
}

fn push_conflict(out: &mut String, local: &[&str], incoming: &[&str], labels: &MergeLabels) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(&format!("{} {}\n", OPEN_MARKER, labels.local));
    for line in local {
        push_terminated(out, line);
    }
    out.push_str(SEPARATOR_MARKER);
    out.push('\n');
    for line in incoming {
        push_terminated(out, line);
    }
    out.push_str(&format!("{} {}\n", CLOSE_MARKER, labels.incoming));
}
