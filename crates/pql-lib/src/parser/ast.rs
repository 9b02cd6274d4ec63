//! Typed wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens in the statement builder.

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
ast_node!(Call, Call);
ast_node!(ArgList, ArgList);
ast_node!(Value, Value);
ast_node!(SortKey, SortKey);
ast_node!(FieldRef, FieldRef);
ast_node!(AllFields, AllFields);

/// One argument of a call.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arg {
    Call(Call),
    Value(Value),
    SortKey(SortKey),
    FieldRef(FieldRef),
    AllFields(AllFields),
}

impl Arg {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::Call => Call::cast(node).map(Arg::Call),
            SyntaxKind::Value => Value::cast(node).map(Arg::Value),
            SyntaxKind::SortKey => SortKey::cast(node).map(Arg::SortKey),
            SyntaxKind::FieldRef => FieldRef::cast(node).map(Arg::FieldRef),
            SyntaxKind::AllFields => AllFields::cast(node).map(Arg::AllFields),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Arg::Call(n) => n.as_cst(),
            Arg::Value(n) => n.as_cst(),
            Arg::SortKey(n) => n.as_cst(),
            Arg::FieldRef(n) => n.as_cst(),
            Arg::AllFields(n) => n.as_cst(),
        }
    }
}

/// Literal carried by a [`Value`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Str,
    Int,
    Float,
}

impl Root {
    pub fn calls(&self) -> impl Iterator<Item = Call> + '_ {
        self.0.children().filter_map(Call::cast)
    }

    /// Whether recovery left any `Error` node anywhere in the tree.
    pub fn has_error_nodes(&self) -> bool {
        self.0.descendants().any(|n| n.kind() == SyntaxKind::Error)
    }
}

impl Call {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Id)
    }

    pub fn arg_list(&self) -> Option<ArgList> {
        self.0.children().find_map(ArgList::cast)
    }

    /// Arguments in order; empty when the argument list is missing.
    pub fn args(&self) -> Vec<Arg> {
        self.arg_list()
            .map(|list| list.args().collect())
            .unwrap_or_default()
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Arg> + '_ {
        self.0.children().filter_map(Arg::cast)
    }
}

impl Value {
    pub fn kind(&self) -> LiteralKind {
        let first = self
            .0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
            .map(|t| t.kind());
        match first {
            Some(SyntaxKind::Int) => LiteralKind::Int,
            Some(SyntaxKind::Float) => LiteralKind::Float,
            _ => LiteralKind::Str,
        }
    }

    /// Raw literal text. Strings come back without quotes and still escaped.
    pub fn text(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Int | SyntaxKind::Float | SyntaxKind::StrVal))
            .map(|t| t.text().to_owned())
            .unwrap_or_default()
    }
}

impl SortKey {
    pub fn sign(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| matches!(t.kind(), SyntaxKind::Plus | SyntaxKind::Minus))
    }

    pub fn field(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Id)
    }
}

impl FieldRef {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Id)
    }
}
