//! Conflict marker wire format
//!
//! The canonical three-marker convention shared with git and other merge
//! tools: `<<<<<<< label`, `=======`, `>>>>>>> label`. A diff3-style base
//! section (`||||||| label` up to the separator) is accepted on input so text
//! produced by external tools can be fed to the resolver.

/// Opening marker prefix
pub const OPEN_MARKER: &str = "<<<<<<<";
/// Separator line (must match exactly)
pub const SEPARATOR_MARKER: &str = "=======";
/// Closing marker prefix
pub const CLOSE_MARKER: &str = ">>>>>>>";
/// diff3 base-section marker prefix
pub const BASE_MARKER: &str = "|||||||";

/// One conflict block found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictBlock<'a> {
    /// The whole block, markers included, exactly as it appears in the text
    pub raw: &'a str,
    /// Local side lines, without terminators
    pub local: Vec<&'a str>,
    /// diff3 base section, when present
    pub base: Option<Vec<&'a str>>,
    /// Incoming side lines, without terminators
    pub incoming: Vec<&'a str>,
}

impl ConflictBlock<'_> {
    /// Line terminator used by the closing marker (empty at end of text)
    pub fn line_ending(&self) -> &'static str {
        if self.raw.ends_with("\r\n") {
            "\r\n"
        } else if self.raw.ends_with('\n') {
            "\n"
        } else {
            ""
        }
    }
}

/// A piece of a text: either plain lines or a conflict block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Conflict(ConflictBlock<'a>),
}

fn content(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn is_open(line: &str) -> bool {
    content(line).starts_with(OPEN_MARKER)
}

fn is_separator(line: &str) -> bool {
    content(line) == SEPARATOR_MARKER
}

fn is_close(line: &str) -> bool {
    content(line).starts_with(CLOSE_MARKER)
}

fn is_base(line: &str) -> bool {
    content(line).starts_with(BASE_MARKER)
}

/// Split a text into plain segments and well-formed conflict blocks
///
/// An opening marker without a matching separator and closing marker (or
/// with another opening marker before them) is kept as plain text.
pub fn parse(text: &str) -> Vec<Segment<'_>> {
    let mut lines: Vec<(usize, &str)> = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        lines.push((offset, line));
        offset += line.len();
    }

    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut idx = 0;

    while idx < lines.len() {
        let (start, line) = lines[idx];
        if !is_open(line) {
            idx += 1;
            continue;
        }

        match scan_block(&lines[idx + 1..]) {
            Some(scan) => {
                let close_idx = idx + 1 + scan.close;
                let (close_start, close_line) = lines[close_idx];
                let end = close_start + close_line.len();

                if text_start < start {
                    segments.push(Segment::Text(&text[text_start..start]));
                }

                let body = &lines[idx + 1..close_idx];
                segments.push(Segment::Conflict(ConflictBlock {
                    raw: &text[start..end],
                    local: strip(&body[..scan.base.unwrap_or(scan.separator)]),
                    base: scan.base.map(|b| strip(&body[b + 1..scan.separator])),
                    incoming: strip(&body[scan.separator + 1..]),
                }));

                text_start = end;
                idx = close_idx + 1;
            }
            None => idx += 1,
        }
    }

    if text_start < text.len() {
        segments.push(Segment::Text(&text[text_start..]));
    }
    segments
}

fn strip<'a>(lines: &[(usize, &'a str)]) -> Vec<&'a str> {
    lines.iter().map(|&(_, line)| content(line)).collect()
}

struct BlockScan {
    base: Option<usize>,
    separator: usize,
    close: usize,
}

/// Find separator/close positions relative to the line after the opener
fn scan_block(rest: &[(usize, &str)]) -> Option<BlockScan> {
    let mut base = None;
    let mut separator = None;
    for (pos, (_, line)) in rest.iter().enumerate() {
        if is_open(line) {
            return None;
        }
        match separator {
            None if is_base(line) && base.is_none() => base = Some(pos),
            None if is_separator(line) => separator = Some(pos),
            Some(sep) if is_close(line) => {
                return Some(BlockScan {
                    base,
                    separator: sep,
                    close: pos,
                })
            }
            _ => {}
        }
    }
    None
}

/// Whether any line of the text starts with an opening marker
pub fn has_conflict_markers(text: &str) -> bool {
    text.lines().any(is_open)
}

/// Number of well-formed conflict blocks in a text
pub fn count_conflicts(text: &str) -> usize {
    parse(text)
        .iter()
        .filter(|s| matches!(s, Segment::Conflict(_)))
        .count()
}
