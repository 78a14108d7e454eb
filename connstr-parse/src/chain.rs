//! The ordered pair chain.
//!
//! The keyword mapping forgets order and repeated keys. The chain keeps
//! every accepted pair in source order together with the number of source
//! bytes it consumed, so a caller can slice the original string pair by pair.
//! Chains are built once through [`PairChainBuilder`] and are read-only
//! afterwards.

use std::ops::Range;

use smol_str::SmolStr;

/// One accepted pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairNode {
    keyword: SmolStr,
    value: Option<String>,
    length: usize,
}

impl PairNode {
    /// Canonical keyword.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Value as parsed.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Source bytes consumed, including leading separators and a trailing `;`.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// Append-only builder for a [`PairChain`].
#[derive(Debug, Default)]
pub struct PairChainBuilder {
    nodes: Vec<PairNode>,
}

impl PairChainBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node after the last one.
    pub fn push(&mut self, keyword: impl Into<SmolStr>, value: Option<String>, length: usize) {
        self.nodes.push(PairNode {
            keyword: keyword.into(),
            value,
            length,
        });
    }

    /// Freeze the chain.
    pub fn finish(self) -> PairChain {
        PairChain {
            nodes: self.nodes.into_boxed_slice(),
        }
    }
}

/// Immutable, insertion-ordered sequence of accepted pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairChain {
    nodes: Box<[PairNode]>,
}

impl PairChain {
    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the chain holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node at position `index`.
    pub fn get(&self, index: usize) -> Option<&PairNode> {
        self.nodes.get(index)
    }

    /// The first node.
    pub fn first(&self) -> Option<&PairNode> {
        self.nodes.first()
    }

    /// Iterate over nodes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, PairNode> {
        self.nodes.iter()
    }

    /// Iterate over nodes with the byte range each one covers in the source.
    pub fn spans(&self) -> Spans<'_> {
        Spans {
            nodes: self.nodes.iter(),
            offset: 0,
        }
    }

    /// Total number of source bytes covered by the chain.
    pub fn consumed(&self) -> usize {
        self.nodes.iter().map(PairNode::length).sum()
    }
}

impl<'a> IntoIterator for &'a PairChain {
    type Item = &'a PairNode;
    type IntoIter = std::slice::Iter<'a, PairNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`PairChain::spans`].
#[derive(Debug, Clone)]
pub struct Spans<'a> {
    nodes: std::slice::Iter<'a, PairNode>,
    offset: usize,
}

impl<'a> Iterator for Spans<'a> {
    type Item = (&'a PairNode, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.next()?;
        let start = self.offset;
        self.offset += node.length;
        Some((node, start..self.offset))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl ExactSizeIterator for Spans<'_> {}
