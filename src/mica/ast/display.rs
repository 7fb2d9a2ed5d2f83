//! Single-line s-expression dump of a node tree
//!
//! This is the plain text form the runner prints for every node: the whole
//! subtree on one line, lisp style. `(assign (name x) (int 1))` reads as
//! "an assignment whose target is the name `x` and whose value is the
//! integer 1".

use super::node::{Node, NodeKind};
use std::fmt;

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Int { value } => write!(f, "(int {})", value),
            NodeKind::Str { value } => write!(f, "(str {:?})", value),
            NodeKind::Name { name } => write!(f, "(name {})", name),
            NodeKind::Assign { target, value } => write!(f, "(assign {} {})", target, value),
            NodeKind::BinaryOp { op, lhs, rhs } => write!(f, "(binop {} {} {})", op, lhs, rhs),
            NodeKind::Call { name, args } => {
                write!(f, "(call {}", name)?;
                for arg in args {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            }
            NodeKind::Group { inner } => write!(f, "(group {})", inner),
            NodeKind::If {
                cond,
                then_body,
                else_body,
            } => {
                write!(f, "(if {} {}", cond, then_body)?;
                if let Some(else_body) = else_body {
                    write!(f, " {}", else_body)?;
                }
                write!(f, ")")
            }
            NodeKind::Def { name, body } => write!(f, "(def {} {})", name, body),
            NodeKind::Block { stmts } => {
                write!(f, "(block")?;
                for stmt in stmts {
                    write!(f, " {}", stmt)?;
                }
                write!(f, ")")
            }
        }
    }
}
