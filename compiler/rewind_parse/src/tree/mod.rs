//! Parse tree construction.
//!
//! The parser reports committed structure to a [`TreeSink`]: a node opens
//! when a rule starts, tokens are attached as they are consumed, and the
//! node closes when the rule returns. Speculative trials never reach the
//! sink, so a sink sees each token exactly once and in source order.
//!
//! [`TreeBuilder`] turns the events into an arena-allocated
//! [`SyntaxTree`]; [`NoopSink`] discards them for recognize-only parsing.

use crate::parser::{Rule, RuleId};
use rewind_ir::{Span, TokenKind, TokenList};
use std::fmt::Write;

/// Receiver of committed parse events.
pub trait TreeSink {
    type Output;

    /// A rule began. Nodes nest until the matching `finish_node`.
    fn start_node(&mut self, rule: &Rule);

    /// Recovery began skipping tokens. Closed by `finish_node`.
    fn start_error(&mut self);

    /// A token was consumed. `index` is its position in the token list.
    fn token(&mut self, index: usize);

    fn finish_node(&mut self);

    fn finish(self) -> Self::Output;
}

/// Sink that builds nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TreeSink for NoopSink {
    type Output = ();

    #[inline]
    fn start_node(&mut self, _rule: &Rule) {}
    #[inline]
    fn start_error(&mut self) {}
    #[inline]
    fn token(&mut self, _index: usize) {}
    #[inline]
    fn finish_node(&mut self) {}
    #[inline]
    fn finish(self) {}
}

/// Index of a node in a [`SyntaxTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Rule { id: RuleId, name: &'static str },
    /// Tokens skipped by error recovery.
    Error,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Rule { name, .. } => name,
            NodeKind::Error => "<error>",
        }
    }
}

/// A child of a node: a nested node or a token-list index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Child {
    Node(NodeId),
    Token(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub children: Vec<Child>,
}

/// A concrete syntax tree stored in an arena.
///
/// Nodes are kept in the order they were opened, which is preorder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    top_level: Vec<Child>,
}

impl SyntaxTree {
    /// The first top-level node, normally the start rule.
    pub fn root(&self) -> Option<NodeId> {
        self.top_level.iter().find_map(|child| match child {
            Child::Node(id) => Some(*id),
            Child::Token(_) => None,
        })
    }

    /// Everything not nested in another node.
    pub fn top_level(&self) -> &[Child] {
        &self.top_level
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn children(&self, id: NodeId) -> &[Child] {
        &self.node(id).children
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in preorder.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(|i| NodeId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Token indices of the whole tree, in order.
    pub fn tokens_in_order(&self) -> Vec<usize> {
        let mut out = Vec::new();
        for child in &self.top_level {
            self.collect_tokens(*child, &mut out);
        }
        out
    }

    /// Token indices under `id`, in order.
    pub fn tokens_of(&self, id: NodeId) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_tokens(Child::Node(id), &mut out);
        out
    }

    fn collect_tokens(&self, child: Child, out: &mut Vec<usize>) {
        match child {
            Child::Token(index) => out.push(index),
            Child::Node(id) => {
                for &c in self.children(id) {
                    self.collect_tokens(c, out);
                }
            }
        }
    }

    /// Nodes produced by the rule named `name`, in preorder.
    pub fn find_all(&self, name: &str) -> Vec<NodeId> {
        self.node_ids()
            .filter(|&id| matches!(self.kind(id), NodeKind::Rule { name: n, .. } if n == name))
            .collect()
    }

    pub fn find_first(&self, name: &str) -> Option<NodeId> {
        self.find_all(name).into_iter().next()
    }

    /// Number of error nodes.
    pub fn error_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.kind == NodeKind::Error)
            .count()
    }

    /// Source span covered by a node's tokens.
    pub fn span<K: TokenKind>(&self, id: NodeId, tokens: &TokenList<K>) -> Option<Span> {
        let indices = self.tokens_of(id);
        let first = tokens.get(*indices.first()?)?.span;
        let last = tokens.get(*indices.last()?)?.span;
        Some(first.merge(last))
    }

    /// Render as an s-expression: `(rule child child ...)` with tokens
    /// printed as their text.
    pub fn to_sexpr<K: TokenKind>(&self, tokens: &TokenList<K>) -> String {
        self.render(tokens, false)
    }

    /// Like [`to_sexpr`](Self::to_sexpr), but a node whose only child is
    /// another node is replaced by that child. Expression cascades
    /// collapse to the levels that actually did something.
    pub fn to_compact_sexpr<K: TokenKind>(&self, tokens: &TokenList<K>) -> String {
        self.render(tokens, true)
    }

    /// Compact s-expression of the subtree rooted at `id`.
    pub fn subtree_sexpr<K: TokenKind>(&self, id: NodeId, tokens: &TokenList<K>) -> String {
        let mut out = String::new();
        self.render_child(Child::Node(id), tokens, true, &mut out);
        out
    }

    fn render<K: TokenKind>(&self, tokens: &TokenList<K>, compact: bool) -> String {
        let mut out = String::new();
        for (i, child) in self.top_level.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            self.render_child(*child, tokens, compact, &mut out);
        }
        out
    }

    fn render_child<K: TokenKind>(
        &self,
        child: Child,
        tokens: &TokenList<K>,
        compact: bool,
        out: &mut String,
    ) {
        match child {
            Child::Token(index) => match tokens.get(index) {
                Some(token) => out.push_str(tokens.text(token)),
                None => out.push('?'),
            },
            Child::Node(id) => {
                let node = self.node(id);
                if compact {
                    if let [only @ Child::Node(_)] = node.children.as_slice() {
                        if node.kind != NodeKind::Error {
                            self.render_child(*only, tokens, compact, out);
                            return;
                        }
                    }
                }
                let _ = write!(out, "({}", node.kind.name());
                for &c in &node.children {
                    out.push(' ');
                    self.render_child(c, tokens, compact, out);
                }
                out.push(')');
            }
        }
    }
}

/// Sink that builds a [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: SyntaxTree,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn attach(&mut self, child: Child) {
        match self.open.last() {
            Some(parent) => self.tree.nodes[parent.index()].children.push(child),
            None => self.tree.top_level.push(child),
        }
    }

    fn open(&mut self, kind: NodeKind) {
        let id = NodeId(u32::try_from(self.tree.nodes.len()).unwrap_or(u32::MAX));
        self.tree.nodes.push(SyntaxNode {
            kind,
            children: Vec::new(),
        });
        self.attach(Child::Node(id));
        self.open.push(id);
    }

    /// Number of nodes currently open.
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

impl TreeSink for TreeBuilder {
    type Output = SyntaxTree;

    fn start_node(&mut self, rule: &Rule) {
        self.open(NodeKind::Rule {
            id: rule.id,
            name: rule.name,
        });
    }

    fn start_error(&mut self) {
        self.open(NodeKind::Error);
    }

    fn token(&mut self, index: usize) {
        self.attach(Child::Token(index));
    }

    fn finish_node(&mut self) {
        let closed = self.open.pop();
        debug_assert!(closed.is_some(), "finish_node without an open node");
    }

    fn finish(self) -> SyntaxTree {
        debug_assert!(self.open.is_empty(), "{} nodes left open", self.open.len());
        self.tree
    }
}

#[cfg(test)]
mod tests;
