//! Named source ranges attached to an AST node
//!
//! Every node carries at most one [`SourceMap`]; which slots are filled
//! depends on the node kind. The `expression` slot covers the whole
//! construct, the others mark salient pieces like the `if` keyword or a
//! closing parenthesis.

use super::range::SourceRange;
use serde::Serialize;

/// The locations a mica node can expose, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceMap {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<SourceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<SourceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<SourceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operator: Option<SourceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin: Option<SourceRange>,
    #[serde(rename = "else", skip_serializing_if = "Option::is_none")]
    pub else_: Option<SourceRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<SourceRange>,
}

impl SourceMap {
    pub fn new(expression: SourceRange) -> Self {
        Self {
            expression: Some(expression),
            ..Self::default()
        }
    }

    pub fn with_keyword(mut self, range: SourceRange) -> Self {
        self.keyword = Some(range);
        self
    }

    pub fn with_name(mut self, range: SourceRange) -> Self {
        self.name = Some(range);
        self
    }

    pub fn with_operator(mut self, range: SourceRange) -> Self {
        self.operator = Some(range);
        self
    }

    pub fn with_begin(mut self, range: SourceRange) -> Self {
        self.begin = Some(range);
        self
    }

    pub fn with_else(mut self, range: SourceRange) -> Self {
        self.else_ = Some(range);
        self
    }

    pub fn with_end(mut self, range: SourceRange) -> Self {
        self.end = Some(range);
        self
    }

    pub fn expression(&self) -> Option<&SourceRange> {
        self.expression.as_ref()
    }

    /// All slots paired with their display labels, in a fixed order so
    /// downstream sorting stays deterministic
    pub fn entries(&self) -> [(&'static str, Option<&SourceRange>); 7] {
        [
            ("keyword", self.keyword.as_ref()),
            ("name", self.name.as_ref()),
            ("operator", self.operator.as_ref()),
            ("begin", self.begin.as_ref()),
            ("else", self.else_.as_ref()),
            ("end", self.end.as_ref()),
            ("expression", self.expression.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mica::source::Position;

    fn range(column: usize, length: usize) -> SourceRange {
        SourceRange::new(column..column + length, Position::new(1, column), length)
    }

    #[test]
    fn test_builder_fills_slots() {
        let map = SourceMap::new(range(0, 10))
            .with_keyword(range(0, 2))
            .with_end(range(7, 3));
        assert!(map.expression.is_some());
        assert!(map.keyword.is_some());
        assert!(map.end.is_some());
        assert!(map.name.is_none());
        assert!(map.operator.is_none());
    }

    #[test]
    fn test_entries_order_is_fixed() {
        let map = SourceMap::default();
        let labels: Vec<&str> = map.entries().iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "keyword",
                "name",
                "operator",
                "begin",
                "else",
                "end",
                "expression"
            ]
        );
    }

    #[test]
    fn test_serialize_skips_empty_slots() {
        let map = SourceMap::new(range(0, 4));
        let json = serde_json::to_value(&map).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("expression"));
    }

    #[test]
    fn test_serialize_renames_else_slot() {
        let map = SourceMap::new(range(0, 8)).with_else(range(4, 4));
        let json = serde_json::to_value(&map).unwrap();
        assert!(json.as_object().unwrap().contains_key("else"));
    }
}
