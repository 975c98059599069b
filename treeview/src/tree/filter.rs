//! Label filtering: match strategies and visibility computation.

use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use slotmap::SecondaryMap;

use crate::config::FilterMode;

use super::node::{Arena, NodeId};

/// A compiled text filter. Built once per `set_filter` call and discarded
/// after the visibility annotation is computed.
pub(crate) struct TextFilter {
    /// Lowered, trimmed needle (substring mode).
    needle: String,
    /// Compiled pattern (fuzzy mode).
    pattern: Option<Pattern>,
}

impl TextFilter {
    /// Compile `text` under the given strategy. Returns `None` when the
    /// text trims to nothing: the identity filter, under which every node
    /// is visible.
    pub fn compile(text: &str, mode: FilterMode) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match mode {
            FilterMode::Substring => Some(Self {
                needle: trimmed.to_lowercase(),
                pattern: None,
            }),
            FilterMode::Fuzzy => Some(Self {
                needle: String::new(),
                pattern: Some(Pattern::new(
                    trimmed,
                    CaseMatching::Ignore,
                    Normalization::Smart,
                    AtomKind::Fuzzy,
                )),
            }),
        }
    }

    pub fn matches(&self, label: &str) -> bool {
        match &self.pattern {
            Some(pattern) => {
                let mut matcher = Matcher::new(Config::DEFAULT);
                let mut buf = Vec::new();
                let haystack = Utf32Str::new(label, &mut buf);
                pattern.score(haystack, &mut matcher).is_some()
            }
            None => label.to_lowercase().contains(&self.needle),
        }
    }
}

/// Compute the visibility annotation for the whole forest: a node is
/// visible iff its label matches or any descendant is visible.
///
/// Pure over the arena; the annotation is transient and consumed only by
/// the flattening step.
pub(crate) fn compute_visibility<T>(
    arena: &Arena<T>,
    roots: &[NodeId],
    filter: &TextFilter,
) -> SecondaryMap<NodeId, bool> {
    let mut visibility = SecondaryMap::new();
    for &root in roots {
        visit(arena, root, filter, &mut visibility);
    }
    visibility
}

fn visit<T>(
    arena: &Arena<T>,
    id: NodeId,
    filter: &TextFilter,
    out: &mut SecondaryMap<NodeId, bool>,
) -> bool {
    let node = &arena[id];
    let mut visible = filter.matches(&node.label);
    for &child in &node.children {
        // No short-circuit: every descendant needs its annotation.
        visible |= visit(arena, child, filter, out);
    }
    out.insert(id, visible);
    visible
}
