//! Pre-order traversal over node trees

use super::node::Node;

/// Iterator yielding a node and then its descendants, depth first
pub struct Preorder<'a> {
    stack: Vec<&'a Node>,
}

impl Node {
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children reversed so the first child is popped first
        let mut children = node.children();
        children.reverse();
        self.stack.extend(children);
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mica::ast::NodeKind;

    fn int(value: i64) -> Node {
        Node::bare(NodeKind::Int { value })
    }

    #[test]
    fn test_single_node() {
        let node = int(1);
        let visited: Vec<&str> = node.preorder().map(|n| n.node_type()).collect();
        assert_eq!(visited, vec!["int"]);
    }

    #[test]
    fn test_parent_before_children_left_to_right() {
        let node = Node::bare(NodeKind::Assign {
            target: Box::new(Node::bare(NodeKind::Name { name: "x".into() })),
            value: Box::new(Node::bare(NodeKind::BinaryOp {
                op: "+".into(),
                lhs: Box::new(int(1)),
                rhs: Box::new(int(2)),
            })),
        });
        let visited: Vec<&str> = node.preorder().map(|n| n.node_type()).collect();
        assert_eq!(visited, vec!["assign", "name", "binop", "int", "int"]);
    }

    #[test]
    fn test_block_statement_order() {
        let node = Node::bare(NodeKind::Block {
            stmts: vec![int(1), int(2), int(3)],
        });
        let values: Vec<String> = node.preorder().skip(1).map(|n| n.to_string()).collect();
        assert_eq!(values, vec!["(int 1)", "(int 2)", "(int 3)"]);
    }
}
