//! AST node types for mica
//!
//! A [`Node`] is a kind plus an optional [`SourceMap`]. The parser fills
//! the map for every node it builds; `map: None` only occurs for nodes
//! fabricated in tests or by future tooling, and the locate renderer
//! treats it as "no location info".

use crate::mica::source::SourceMap;
use serde::Serialize;

/// One node of a mica syntax tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<SourceMap>,
}

/// The syntactic shapes a node can take
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Int {
        value: i64,
    },
    Str {
        value: String,
    },
    Name {
        name: String,
    },
    Assign {
        target: Box<Node>,
        value: Box<Node>,
    },
    #[serde(rename = "binop")]
    BinaryOp {
        op: String,
        lhs: Box<Node>,
        rhs: Box<Node>,
    },
    Call {
        name: String,
        args: Vec<Node>,
    },
    Group {
        inner: Box<Node>,
    },
    If {
        cond: Box<Node>,
        then_body: Box<Node>,
        #[serde(skip_serializing_if = "Option::is_none")]
        else_body: Option<Box<Node>>,
    },
    Def {
        name: String,
        body: Box<Node>,
    },
    Block {
        stmts: Vec<Node>,
    },
}

impl Node {
    pub fn new(kind: NodeKind, map: SourceMap) -> Self {
        Self {
            kind,
            map: Some(map),
        }
    }

    /// A node without location information
    pub fn bare(kind: NodeKind) -> Self {
        Self { kind, map: None }
    }

    /// Lowercase tag, matching both the s-expression dump and the JSON
    /// `type` field
    pub fn node_type(&self) -> &'static str {
        match &self.kind {
            NodeKind::Int { .. } => "int",
            NodeKind::Str { .. } => "str",
            NodeKind::Name { .. } => "name",
            NodeKind::Assign { .. } => "assign",
            NodeKind::BinaryOp { .. } => "binop",
            NodeKind::Call { .. } => "call",
            NodeKind::Group { .. } => "group",
            NodeKind::If { .. } => "if",
            NodeKind::Def { .. } => "def",
            NodeKind::Block { .. } => "block",
        }
    }

    /// Child nodes in syntactic order
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Int { .. } | NodeKind::Str { .. } | NodeKind::Name { .. } => Vec::new(),
            NodeKind::Assign { target, value } => vec![target.as_ref(), value.as_ref()],
            NodeKind::BinaryOp { lhs, rhs, .. } => vec![lhs.as_ref(), rhs.as_ref()],
            NodeKind::Call { args, .. } => args.iter().collect(),
            NodeKind::Group { inner } => vec![inner.as_ref()],
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                let mut children = vec![cond.as_ref(), then_body.as_ref()];
                if let Some(else_body) = else_body {
                    children.push(else_body.as_ref());
                }
                children
            }
            NodeKind::Def { body, .. } => vec![body.as_ref()],
            NodeKind::Block { stmts } => stmts.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Node {
        Node::bare(NodeKind::Int { value })
    }

    #[test]
    fn test_node_type_tags() {
        assert_eq!(int(1).node_type(), "int");
        let assign = Node::bare(NodeKind::Assign {
            target: Box::new(Node::bare(NodeKind::Name { name: "x".into() })),
            value: Box::new(int(1)),
        });
        assert_eq!(assign.node_type(), "assign");
        let binop = Node::bare(NodeKind::BinaryOp {
            op: "+".into(),
            lhs: Box::new(int(1)),
            rhs: Box::new(int(2)),
        });
        assert_eq!(binop.node_type(), "binop");
    }

    #[test]
    fn test_children_order() {
        let node = Node::bare(NodeKind::BinaryOp {
            op: "+".into(),
            lhs: Box::new(int(1)),
            rhs: Box::new(int(2)),
        });
        let kinds: Vec<&NodeKind> = node.children().into_iter().map(|child| &child.kind).collect();
        assert_eq!(
            kinds,
            vec![&NodeKind::Int { value: 1 }, &NodeKind::Int { value: 2 }]
        );
    }

    #[test]
    fn test_leaves_have_no_children() {
        assert!(int(1).children().is_empty());
        assert!(Node::bare(NodeKind::Str { value: "s".into() }).children().is_empty());
    }

    #[test]
    fn test_if_children_skip_missing_else() {
        let without_else = Node::bare(NodeKind::If {
            cond: Box::new(int(1)),
            then_body: Box::new(int(2)),
            else_body: None,
        });
        assert_eq!(without_else.children().len(), 2);

        let with_else = Node::bare(NodeKind::If {
            cond: Box::new(int(1)),
            then_body: Box::new(int(2)),
            else_body: Some(Box::new(int(3))),
        });
        assert_eq!(with_else.children().len(), 3);
    }

    #[test]
    fn test_json_type_tag() {
        let json = serde_json::to_value(int(42)).unwrap();
        assert_eq!(json["type"], "int");
        assert_eq!(json["value"], 42);
        assert!(json.get("map").is_none());
    }
}
