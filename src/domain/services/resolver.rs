//! Semantic Conflict Resolver
//!
//! Runs after the three-way merge and tries to settle conflict blocks that a
//! line-based merge cannot, without understanding the surrounding language.
//!
//! The resolver is a pipeline of independent [`ResolutionPass`]es applied in
//! order to each block. The first pass that returns a replacement wins; blocks
//! no pass can handle are left exactly as they were.
//!
//! The shipped pass, [`TokenSetAssignmentPass`], handles the most common
//! conflict in generated component code: both sides edited the same
//! single-line string assignment holding a space-separated token list, e.g.
//!
//! ```text
//! <<<<<<< LOCAL
//!   const base = "inline-flex items-center rounded-md";
//! =======
//!   const base = "inline-flex items-center transition-colors";
//! >>>>>>> INCOMING
//! ```
//!
//! which resolves to the union of both token lists.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::debug;

use super::conflict_markers::{self, ConflictBlock, Segment};

/// Result of running the resolver over a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub text: String,
    /// At least one block was resolved
    pub changed: bool,
    /// An opening conflict marker remains in `text`
    pub still_has_conflicts: bool,
    /// Number of blocks resolved
    pub resolved: usize,
}

/// One independent resolution strategy
///
/// A pass either returns the replacement lines for a block (without line
/// terminators) or `None` to leave the block to later passes.
pub trait ResolutionPass: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    fn resolve_block(&self, block: &ConflictBlock<'_>) -> Option<Vec<String>>;
}

/// Predicate deciding whether a string value is a token list worth merging
pub trait TokenListClassifier: Send + Sync {
    fn is_token_list(&self, value: &str) -> bool;
}

/// Treats a value as a utility-class list when it contains `-`, `:`, `[` or `]`
#[derive(Debug, Clone, Copy, Default)]
pub struct UtilityClassHeuristic;

impl TokenListClassifier for UtilityClassHeuristic {
    fn is_token_list(&self, value: &str) -> bool {
        value.contains(['-', ':', '[', ']'])
    }
}

/// A parsed `name = "value";` line
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assignment<'a> {
    indent: &'a str,
    decl: &'a str,
    name: &'a str,
    quote: char,
    value: &'a str,
}

fn assignment_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"^(?P<indent>\s*)",
            r"(?P<decl>(?:(?:export\s+)?(?:const|let|var)\s+)?)",
            r"(?P<name>[A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*",
            r#"(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|`(?P<bq>[^`]*)`)"#,
            r"\s*;$",
        ))
        .ok()
    })
    .as_ref()
}

fn parse_assignment(line: &str) -> Option<Assignment<'_>> {
    let caps: Captures<'_> = assignment_regex()?.captures(line)?;
    let (quote, value) = [("dq", '"'), ("sq", '\''), ("bq", '`')]
        .into_iter()
        .find_map(|(group, quote)| caps.name(group).map(|m| (quote, m.as_str())))?;

    Some(Assignment {
        indent: caps.name("indent").map_or("", |m| m.as_str()),
        decl: caps.name("decl").map_or("", |m| m.as_str()),
        name: caps.name("name")?.as_str(),
        quote,
        value,
    })
}

/// The side of a block as a single line, if it is exactly one line long
/// once trailing blank lines are dropped
fn single_line<'a>(side: &[&'a str]) -> Option<&'a str> {
    let content = side
        .iter()
        .rposition(|line| !line.trim_end().is_empty())
        .map_or(&side[..0], |last| &side[..=last]);
    match content {
        [line] => Some(line.trim_end()),
        _ => None,
    }
}

/// Union of whitespace-separated tokens in first-seen order, local first
pub fn union_tokens(local: &str, incoming: &str) -> String {
    let mut seen = HashSet::new();
    local
        .split_whitespace()
        .chain(incoming.split_whitespace())
        .filter(|token| seen.insert(*token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Merges conflicting single-line string assignments by unioning tokens
///
/// Applies only when both sides are one line, both match
/// `indent [const|let|var] name = <quote>value<quote>;` with the same
/// binding name, and at least one value is a token list according to the
/// classifier. The result keeps the local side's indentation, declaration
/// and quote character.
#[derive(Debug, Clone, Default)]
pub struct TokenSetAssignmentPass<C = UtilityClassHeuristic> {
    classifier: C,
}

impl<C: TokenListClassifier> TokenSetAssignmentPass<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self { classifier }
    }
}

impl<C: TokenListClassifier> ResolutionPass for TokenSetAssignmentPass<C> {
    fn name(&self) -> &'static str {
        "token-set-assignment"
    }

    fn resolve_block(&self, block: &ConflictBlock<'_>) -> Option<Vec<String>> {
        let local = parse_assignment(single_line(&block.local)?)?;
        let incoming = parse_assignment(single_line(&block.incoming)?)?;

        if local.name != incoming.name {
            return None;
        }
        if !self.classifier.is_token_list(local.value)
            && !self.classifier.is_token_list(incoming.value)
        {
            return None;
        }

        let tokens = union_tokens(local.value, incoming.value);
        Some(vec![format!(
            "{}{}{} = {q}{}{q};",
            local.indent,
            local.decl,
            local.name,
            tokens,
            q = local.quote
        )])
    }
}

/// Ordered list of resolution passes
pub struct ResolverPipeline {
    passes: Vec<Box<dyn ResolutionPass>>,
}

impl Default for ResolverPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ResolverPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.passes.iter().map(|p| p.name()))
            .finish()
    }
}

impl ResolverPipeline {
    /// A pipeline with no passes (resolves nothing)
    pub fn new() -> Self {
        Self { passes: Vec::new() }
    }

    /// The passes shipped with contractor
    pub fn standard() -> Self {
        Self::new().with_pass(TokenSetAssignmentPass::<UtilityClassHeuristic>::default())
    }

    /// Append a pass; passes run in the order they were added
    pub fn with_pass(mut self, pass: impl ResolutionPass + 'static) -> Self {
        self.passes.push(Box::new(pass));
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Resolve every conflict block some pass can handle
    pub fn resolve(&self, text: &str) -> ResolveOutcome {
        let mut out = String::with_capacity(text.len());
        let mut resolved = 0;

        for segment in conflict_markers::parse(text) {
            match segment {
                Segment::Text(plain) => out.push_str(plain),
                Segment::Conflict(block) => {
                    let replacement = self.passes.iter().find_map(|pass| {
                        pass.resolve_block(&block).map(|lines| (pass.name(), lines))
                    });
                    match replacement {
                        Some((pass, lines)) => {
                            debug!(pass, lines = lines.len(), "resolved conflict block");
                            resolved += 1;
                            let ending = block.line_ending();
                            let last = lines.len().saturating_sub(1);
                            for (idx, line) in lines.iter().enumerate() {
                                out.push_str(line);
                                out.push_str(if idx == last { ending } else { "\n" });
                            }
                        }
                        None => out.push_str(block.raw),
                    }
                }
            }
        }

        let still_has_conflicts = conflict_markers::has_conflict_markers(&out);
        ResolveOutcome {
            text: out,
            changed: resolved > 0,
            still_has_conflicts,
            resolved,
        }
    }
}

/// Resolve with the standard pipeline
pub fn resolve(text: &str) -> ResolveOutcome {
    ResolverPipeline::standard().resolve(text)
}
