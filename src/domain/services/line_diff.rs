//! Line Diff Domain Service
//!
//! Aligns two texts line by line with a longest-common-subsequence table and
//! groups the changes into context-padded hunks for previews. The same
//! alignment (`lcs_pairs`) drives the three-way merge.

use std::fmt;

/// Kind of a single diff line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Present only in the new text
    Added,
    /// Present only in the old text
    Removed,
    /// Present in both texts
    Context,
}

/// A single line of a diff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    /// 1-based line number in the old text
    pub old_line: Option<usize>,
    /// 1-based line number in the new text
    pub new_line: Option<usize>,
    /// Line content without its terminator
    pub text: String,
    /// Last line of its text with no trailing newline
    pub missing_newline: bool,
}

impl DiffLine {
    fn new(kind: LineKind, old_line: Option<usize>, new_line: Option<usize>, raw: &str) -> Self {
        let text = raw.strip_suffix('\n').unwrap_or(raw);
        Self {
            kind,
            old_line,
            new_line,
            text: text.strip_suffix('\r').unwrap_or(text).to_string(),
            missing_newline: !raw.ends_with('\n'),
        }
    }
}

/// A contiguous, context-padded group of changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffHunk {
    /// 1-based line in the new text where the hunk starts
    pub start_line: usize,
    /// 1-based line in the old text where the hunk starts
    pub old_start: usize,
    pub lines: Vec<DiffLine>,
}

impl DiffHunk {
    /// Number of old-side lines covered (context + removed)
    pub fn old_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Added)
            .count()
    }

    /// Number of new-side lines covered (context + added)
    pub fn new_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| l.kind != LineKind::Removed)
            .count()
    }

    /// Unified diff header, e.g. `@@ -3,4 +3,5 @@`
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start,
            self.old_count(),
            self.start_line,
            self.new_count()
        )
    }
}

/// Added/removed line counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub additions: usize,
    pub deletions: usize,
}

impl DiffStats {
    pub fn has_changes(&self) -> bool {
        self.additions > 0 || self.deletions > 0
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}, -{}", self.additions, self.deletions)
    }
}

impl std::ops::AddAssign for DiffStats {
    fn add_assign(&mut self, rhs: Self) {
        self.additions += rhs.additions;
        self.deletions += rhs.deletions;
    }
}

/// Maximal set of matched `(old_index, new_index)` pairs, increasing on both axes.
///
/// Common prefix and suffix are matched directly; the remainder goes through
/// the O(m·n) dynamic-programming table.
pub fn lcs_pairs<T: PartialEq>(old: &[T], new: &[T]) -> Vec<(usize, usize)> {
    let prefix = old
        .iter()
        .zip(new.iter())
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old[prefix..]
        .iter()
        .rev()
        .zip(new[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old[prefix..old.len() - suffix];
    let new_mid = &new[prefix..new.len() - suffix];

    let mut pairs: Vec<(usize, usize)> = (0..prefix).map(|i| (i, i)).collect();

    let (m, n) = (old_mid.len(), new_mid.len());
    if m > 0 && n > 0 {
        // table[i][j] = LCS length of old_mid[i..] and new_mid[j..]
        let width = n + 1;
        let mut table = vec![0u32; (m + 1) * width];
        for i in (0..m).rev() {
            for j in (0..n).rev() {
                table[i * width + j] = if old_mid[i] == new_mid[j] {
                    table[(i + 1) * width + j + 1] + 1
                } else {
                    table[(i + 1) * width + j].max(table[i * width + j + 1])
                };
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < m && j < n {
            if old_mid[i] == new_mid[j] {
                pairs.push((prefix + i, prefix + j));
                i += 1;
                j += 1;
            } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
                i += 1;
            } else {
                j += 1;
            }
        }
    }

    let old_tail = old.len() - suffix;
    let new_tail = new.len() - suffix;
    pairs.extend((0..suffix).map(|k| (old_tail + k, new_tail + k)));
    pairs
}

/// Full line-by-line edit script between two texts
///
/// Between matched pairs, removed lines come before added lines.
pub fn diff_lines(old: &str, new: &str) -> Vec<DiffLine> {
    // Terminators take part in the comparison so newline-only edits show up
    let old_lines: Vec<&str> = old.split_inclusive('\n').collect();
    let new_lines: Vec<&str> = new.split_inclusive('\n').collect();
    let pairs = lcs_pairs(&old_lines, &new_lines);

    let mut out = Vec::with_capacity(old_lines.len().max(new_lines.len()));
    let (mut oi, mut ni) = (0, 0);

    let sentinel = (old_lines.len(), new_lines.len());
    for (po, pn) in pairs.into_iter().chain(std::iter::once(sentinel)) {
        while oi < po {
            out.push(DiffLine::new(LineKind::Removed, Some(oi + 1), None, old_lines[oi]));
            oi += 1;
        }
        while ni < pn {
            out.push(DiffLine::new(LineKind::Added, None, Some(ni + 1), new_lines[ni]));
            ni += 1;
        }
        if po < old_lines.len() {
            out.push(DiffLine::new(
                LineKind::Context,
                Some(po + 1),
                Some(pn + 1),
                old_lines[po],
            ));
            oi += 1;
            ni += 1;
        }
    }

    out
}

/// Diff two texts into hunks padded with `context_lines` lines of context
pub fn diff(old: &str, new: &str, context_lines: usize) -> Vec<DiffHunk> {
    let lines = diff_lines(old, new);
    let changes: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.kind != LineKind::Context)
        .map(|(idx, _)| idx)
        .collect();

    let Some((&first, rest)) = changes.split_first() else {
        return Vec::new();
    };

    let last = lines.len() - 1;
    let mut hunks = Vec::new();
    let mut start = first.saturating_sub(context_lines);
    let mut end = (first + context_lines).min(last);

    for &change in rest {
        let expanded_start = change.saturating_sub(context_lines);
        if expanded_start <= end + 1 {
            end = (change + context_lines).min(last);
        } else {
            hunks.push(build_hunk(&lines, start, end));
            start = expanded_start;
            end = (change + context_lines).min(last);
        }
    }
    hunks.push(build_hunk(&lines, start, end));

    hunks
}

fn build_hunk(lines: &[DiffLine], start: usize, end: usize) -> DiffHunk {
    let preceding = &lines[..start];
    let first = &lines[start];

    let start_line = first.new_line.unwrap_or_else(|| {
        preceding.iter().filter(|l| l.new_line.is_some()).count() + 1
    });
    let old_start = first.old_line.unwrap_or_else(|| {
        preceding.iter().filter(|l| l.old_line.is_some()).count() + 1
    });

    DiffHunk {
        start_line,
        old_start,
        lines: lines[start..=end].to_vec(),
    }
}

/// Count added and removed lines across hunks
pub fn stats(hunks: &[DiffHunk]) -> DiffStats {
    let mut stats = DiffStats::default();
    for line in hunks.iter().flat_map(|h| &h.lines) {
        match line.kind {
            LineKind::Added => stats.additions += 1,
            LineKind::Removed => stats.deletions += 1,
            LineKind::Context => {}
        }
    }
    stats
}
