//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind`.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(Root, Root);
ast_node!(Tree, Tree);
ast_node!(Group, Group);
ast_node!(Alt, Alt);
ast_node!(Str, Str);
ast_node!(Wildcard, Wildcard);
ast_node!(Field, Field);
ast_node!(NegatedField, NegatedField);
ast_node!(Anchor, Anchor);
ast_node!(Quantifier, Quantifier);
ast_node!(Capture, Capture);
ast_node!(Predicate, Predicate);

/// Expression: any pattern that can appear in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Tree(Tree),
    Group(Group),
    Alt(Alt),
    Str(Str),
    Wildcard(Wildcard),
    Field(Field),
    NegatedField(NegatedField),
    Anchor(Anchor),
    Quantifier(Quantifier),
    Capture(Capture),
}

impl Expr {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Tree => Tree::cast(node).map(Expr::Tree),
            SyntaxKind::Group => Group::cast(node).map(Expr::Group),
            SyntaxKind::Alt => Alt::cast(node).map(Expr::Alt),
            SyntaxKind::Str => Str::cast(node).map(Expr::Str),
            SyntaxKind::Wildcard => Wildcard::cast(node).map(Expr::Wildcard),
            SyntaxKind::Field => Field::cast(node).map(Expr::Field),
            SyntaxKind::NegatedField => NegatedField::cast(node).map(Expr::NegatedField),
            SyntaxKind::Anchor => Anchor::cast(node).map(Expr::Anchor),
            SyntaxKind::Quantifier => Quantifier::cast(node).map(Expr::Quantifier),
            SyntaxKind::Capture => Capture::cast(node).map(Expr::Capture),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Expr::Tree(n) => n.as_cst(),
            Expr::Group(n) => n.as_cst(),
            Expr::Alt(n) => n.as_cst(),
            Expr::Str(n) => n.as_cst(),
            Expr::Wildcard(n) => n.as_cst(),
            Expr::Field(n) => n.as_cst(),
            Expr::NegatedField(n) => n.as_cst(),
            Expr::Anchor(n) => n.as_cst(),
            Expr::Quantifier(n) => n.as_cst(),
            Expr::Capture(n) => n.as_cst(),
        }
    }
}

fn first_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl Root {
    /// Top-level patterns, in source order.
    pub fn exprs(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Tree {
    /// `identifier` in `(identifier)`, `_` in `(_)`, `expression` in `(expression/identifier)`.
    pub fn node_type(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::Underscore))
    }

    /// `identifier` in `(expression/identifier)`.
    pub fn subtype(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .skip_while(|t| t.kind() != SyntaxKind::Slash)
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    /// The node type a match actually has: the subtype when present.
    pub fn matched_type(&self) -> Option<SyntaxToken> {
        self.subtype().or_else(|| self.node_type())
    }

    pub fn children(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    pub fn predicates(&self) -> impl Iterator<Item = Predicate> + '_ {
        self.0.children().filter_map(Predicate::cast)
    }
}

impl Group {
    pub fn children(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }

    pub fn predicates(&self) -> impl Iterator<Item = Predicate> + '_ {
        self.0.children().filter_map(Predicate::cast)
    }
}

impl Alt {
    pub fn branches(&self) -> impl Iterator<Item = Expr> + '_ {
        self.0.children().filter_map(Expr::cast)
    }
}

impl Str {
    /// Raw text between the quotes, escapes untouched. `None` for `""`.
    pub fn raw_value(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::StrVal)
    }

    /// Text between the quotes with escapes resolved.
    pub fn value(&self) -> String {
        self.raw_value()
            .map(|t| unescape(t.text()))
            .unwrap_or_default()
    }
}

impl Field {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }
}

impl NegatedField {
    pub fn name(&self) -> Option<SyntaxToken> {
        first_token(&self.0, SyntaxKind::Id)
    }
}

impl Quantifier {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    pub fn operator(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| {
                matches!(
                    t.kind(),
                    SyntaxKind::Star | SyntaxKind::Plus | SyntaxKind::Question
                )
            })
    }
}

impl Capture {
    pub fn inner(&self) -> Option<Expr> {
        self.0.children().find_map(Expr::cast)
    }

    /// Capture names without the `@` marker.
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::CaptureName)
            .map(|t| t.text().trim_start_matches('@').to_string())
    }
}

/// One argument of a predicate clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredicateArg {
    Capture(SyntaxToken),
    Str(Str),
    Ident(SyntaxToken),
}

impl Predicate {
    /// `match?` in `(#match? @x "^a")`.
    pub fn name(&self) -> Option<String> {
        first_token(&self.0, SyntaxKind::PredicateName)
            .map(|t| t.text().trim_start_matches('#').to_string())
    }

    pub fn args(&self) -> impl Iterator<Item = PredicateArg> + '_ {
        self.0.children_with_tokens().filter_map(|it| match it {
            rowan::NodeOrToken::Node(n) => Str::cast(n).map(PredicateArg::Str),
            rowan::NodeOrToken::Token(t) => match t.kind() {
                SyntaxKind::CaptureName => Some(PredicateArg::Capture(t)),
                SyntaxKind::Id | SyntaxKind::Underscore => Some(PredicateArg::Ident(t)),
                _ => None,
            },
        })
    }
}

/// Resolves `\"`, `\\`, `\n`, `\t`, `\r` and `\0`; any other escaped char stands for itself.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
