//! Recursive descent parser for mica
//!
//! Precedence climbing over the token vector, one level per method:
//! assignment, comparison, additive, multiplicative, primary. Every node
//! built here carries a [`SourceMap`] whose `expression` range covers the
//! node's full extent, first token to last; the other slots mark the
//! salient tokens per kind (operator signs, keywords, parentheses). Those
//! byte spans are the ground truth the locate renderer works from, so each
//! construction site derives them straight from the token spans involved.

use super::error::{format_source_context, ParseError};
use crate::mica::ast::{Node, NodeKind};
use crate::mica::lexing::{Lexer, SpannedToken, StandardLexer, Token};
use crate::mica::source::{SourceBuffer, SourceMap, SourceRange};
use std::ops::Range as ByteRange;

/// A parser over a chosen lexing behavior
pub struct Parser {
    lexer: Box<dyn Lexer>,
}

impl Parser {
    pub fn new(lexer: Box<dyn Lexer>) -> Self {
        Self { lexer }
    }

    /// A parser over the plain [`StandardLexer`]
    pub fn standard() -> Self {
        Self::new(Box::new(StandardLexer::new()))
    }

    /// The wrapped lexer's short name, for status lines
    pub fn lexer_description(&self) -> &'static str {
        self.lexer.describe()
    }

    /// Parses one buffer into a node tree
    ///
    /// A buffer with several top level statements parses to a `Block`; a
    /// single statement parses to that statement's node directly. An input
    /// with no statements at all parses to an empty `Block` whose
    /// expression range is the zero length span at offset 0.
    pub fn parse(&mut self, buffer: &SourceBuffer) -> Result<Node, ParseError> {
        let tokens = self.lexer.lex(buffer)?;
        let mut cursor = Cursor {
            buffer,
            tokens,
            pos: 0,
        };
        let node = cursor.parse_program()?;
        log::debug!("parsed {} into ({} ...)", buffer.name(), node.node_type());
        Ok(node)
    }
}

/// Per-parse state: the token vector and a position into it
struct Cursor<'a> {
    buffer: &'a SourceBuffer,
    tokens: Vec<SpannedToken>,
    pos: usize,
}

/// A parsed node together with the byte span it was built from
type Spanned = (Node, ByteRange<usize>);

impl<'a> Cursor<'a> {
    // ---- token access -------------------------------------------------

    fn peek_nth(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.pos + n).map(|(token, _)| *token)
    }

    fn peek(&self) -> Option<Token> {
        self.peek_nth(0)
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Consumes the next token if it matches, returning its span
    fn eat(&mut self, token: Token) -> Option<ByteRange<usize>> {
        if self.peek() == Some(token) {
            let span = self.tokens[self.pos].1.clone();
            self.pos += 1;
            Some(span)
        } else {
            None
        }
    }

    /// Consumes the next token if it is one of `wanted`
    fn eat_one_of(&mut self, wanted: &[Token]) -> Option<(Token, ByteRange<usize>)> {
        let token = self.peek()?;
        if wanted.contains(&token) {
            let span = self.tokens[self.pos].1.clone();
            self.pos += 1;
            Some((token, span))
        } else {
            None
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<ByteRange<usize>, ParseError> {
        match self.eat(token) {
            Some(span) => Ok(span),
            None => Err(self.unexpected(expected)),
        }
    }

    fn at_separator(&self) -> bool {
        self.peek().map_or(false, |token| token.is_separator())
    }

    fn skip_separators(&mut self) {
        while self.at_separator() {
            self.pos += 1;
        }
    }

    /// Demands at least one statement separator, then swallows any extras
    fn expect_separator(&mut self) -> Result<(), ParseError> {
        if !self.at_separator() {
            return Err(self.unexpected("newline or ';'"));
        }
        self.skip_separators();
        Ok(())
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some((token, span)) => {
                let at = self.buffer.decompose(span.start);
                ParseError::UnexpectedToken {
                    found: *token,
                    expected: expected.to_string(),
                    at,
                    source_context: format_source_context(self.buffer, at),
                }
            }
            None => ParseError::UnexpectedEof {
                expected: expected.to_string(),
            },
        }
    }

    // ---- span and node helpers ----------------------------------------

    fn slice(&self, span: &ByteRange<usize>) -> &str {
        &self.buffer.text()[span.clone()]
    }

    fn range(&self, span: ByteRange<usize>) -> SourceRange {
        self.buffer.range(span)
    }

    /// A `Name` node; `name` and `expression` share the identifier's span
    fn name_node(&self, span: ByteRange<usize>) -> Node {
        let range = self.range(span.clone());
        Node::new(
            NodeKind::Name {
                name: self.slice(&span).to_string(),
            },
            SourceMap::new(range.clone()).with_name(range),
        )
    }

    fn int_node(&self, span: ByteRange<usize>) -> Result<Node, ParseError> {
        let text = self.slice(&span);
        let value: i64 = text.parse().map_err(|_| ParseError::IntOutOfRange {
            text: text.to_string(),
            at: self.buffer.decompose(span.start),
        })?;
        Ok(Node::new(
            NodeKind::Int { value },
            SourceMap::new(self.range(span)),
        ))
    }

    fn str_node(&self, span: ByteRange<usize>) -> Node {
        let text = self.slice(&span);
        // Strip the surrounding quotes; mica strings have no escapes
        let value = text[1..text.len() - 1].to_string();
        Node::new(NodeKind::Str { value }, SourceMap::new(self.range(span)))
    }

    // ---- grammar ------------------------------------------------------

    fn parse_program(&mut self) -> Result<Node, ParseError> {
        self.skip_separators();
        let mut parsed: Vec<Spanned> = Vec::new();
        while !self.at_eof() {
            parsed.push(self.parse_stmt()?);
            if self.at_eof() {
                break;
            }
            self.expect_separator()?;
        }

        match parsed.len() {
            0 => Ok(Node::new(
                NodeKind::Block { stmts: vec![] },
                SourceMap::new(self.range(0..0)),
            )),
            1 => {
                let (node, _) = parsed.remove(0);
                Ok(node)
            }
            _ => {
                let span = parsed[0].1.start..parsed[parsed.len() - 1].1.end;
                let map = SourceMap::new(self.range(span));
                let stmts = parsed.into_iter().map(|(node, _)| node).collect();
                Ok(Node::new(NodeKind::Block { stmts }, map))
            }
        }
    }

    fn parse_stmt(&mut self) -> Result<Spanned, ParseError> {
        if self.peek() == Some(Token::KwDef) {
            self.parse_def()
        } else {
            self.parse_expr()
        }
    }

    fn parse_def(&mut self) -> Result<Spanned, ParseError> {
        let def_span = self.expect(Token::KwDef, "'def'")?;
        let name_span = self.expect(Token::Ident, "function name")?;
        let name = self.slice(&name_span).to_string();
        self.expect_separator()?;
        let (body, _) = self.parse_body(&[Token::KwEnd], "'end'")?;
        let end_span = self.expect(Token::KwEnd, "'end'")?;

        let span = def_span.start..end_span.end;
        let map = SourceMap::new(self.range(span.clone()))
            .with_keyword(self.range(def_span))
            .with_name(self.range(name_span))
            .with_end(self.range(end_span));
        Ok((
            Node::new(
                NodeKind::Def {
                    name,
                    body: Box::new(body),
                },
                map,
            ),
            span,
        ))
    }

    /// Statements up to (not through) one of `terminators`, wrapped in a
    /// `Block` node whatever their number
    fn parse_body(&mut self, terminators: &[Token], expected: &str) -> Result<Spanned, ParseError> {
        self.skip_separators();
        let mut parsed: Vec<Spanned> = Vec::new();
        loop {
            match self.peek() {
                Some(token) if terminators.contains(&token) => break,
                Some(_) => {}
                None => return Err(self.unexpected(expected)),
            }
            parsed.push(self.parse_stmt()?);
            match self.peek() {
                Some(token) if terminators.contains(&token) => break,
                Some(_) => self.expect_separator()?,
                None => return Err(self.unexpected(expected)),
            }
            self.skip_separators();
        }
        if parsed.is_empty() {
            return Err(self.unexpected("statement"));
        }

        let span = parsed[0].1.start..parsed[parsed.len() - 1].1.end;
        let map = SourceMap::new(self.range(span.clone()));
        let stmts = parsed.into_iter().map(|(node, _)| node).collect();
        Ok((Node::new(NodeKind::Block { stmts }, map), span))
    }

    fn parse_expr(&mut self) -> Result<Spanned, ParseError> {
        // Assignment needs two tokens of lookahead: a bare identifier
        // followed by '=' (not '==', which lexes as one token)
        if self.peek() == Some(Token::Ident) && self.peek_nth(1) == Some(Token::Eq) {
            let name_span = self.tokens[self.pos].1.clone();
            self.pos += 1;
            let op_span = self.tokens[self.pos].1.clone();
            self.pos += 1;

            let target = self.name_node(name_span.clone());
            let (value, value_span) = self.parse_expr()?;

            let span = name_span.start..value_span.end;
            let map = SourceMap::new(self.range(span.clone())).with_operator(self.range(op_span));
            Ok((
                Node::new(
                    NodeKind::Assign {
                        target: Box::new(target),
                        value: Box::new(value),
                    },
                    map,
                ),
                span,
            ))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> Result<Spanned, ParseError> {
        self.parse_binary_level(&[Token::EqEq, Token::Lt, Token::Gt], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Spanned, ParseError> {
        self.parse_binary_level(&[Token::Plus, Token::Minus], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Spanned, ParseError> {
        self.parse_binary_level(&[Token::Star, Token::Slash], Self::parse_primary)
    }

    /// One left-associative precedence level
    fn parse_binary_level(
        &mut self,
        operators: &[Token],
        next: fn(&mut Self) -> Result<Spanned, ParseError>,
    ) -> Result<Spanned, ParseError> {
        let (mut node, mut span) = next(self)?;
        while let Some((_, op_span)) = self.eat_one_of(operators) {
            let op = self.slice(&op_span).to_string();
            let (rhs, rhs_span) = next(self)?;

            let full = span.start..rhs_span.end;
            let map =
                SourceMap::new(self.range(full.clone())).with_operator(self.range(op_span));
            node = Node::new(
                NodeKind::BinaryOp {
                    op,
                    lhs: Box::new(node),
                    rhs: Box::new(rhs),
                },
                map,
            );
            span = full;
        }
        Ok((node, span))
    }

    fn parse_primary(&mut self) -> Result<Spanned, ParseError> {
        match self.peek() {
            Some(Token::Int) => {
                let span = self.tokens[self.pos].1.clone();
                self.pos += 1;
                Ok((self.int_node(span.clone())?, span))
            }
            Some(Token::Str) => {
                let span = self.tokens[self.pos].1.clone();
                self.pos += 1;
                Ok((self.str_node(span.clone()), span))
            }
            Some(Token::Ident) => {
                let name_span = self.tokens[self.pos].1.clone();
                self.pos += 1;
                if self.peek() == Some(Token::LParen) {
                    self.parse_call_args(name_span)
                } else {
                    Ok((self.name_node(name_span.clone()), name_span))
                }
            }
            Some(Token::LParen) => self.parse_group(),
            Some(Token::KwIf) => self.parse_if(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_call_args(&mut self, name_span: ByteRange<usize>) -> Result<Spanned, ParseError> {
        let lparen_span = self.expect(Token::LParen, "'('")?;
        let mut args = Vec::new();
        if self.peek() != Some(Token::RParen) {
            loop {
                let (arg, _) = self.parse_expr()?;
                args.push(arg);
                if self.eat(Token::Comma).is_none() {
                    break;
                }
            }
        }
        let rparen_span = self.expect(Token::RParen, "')'")?;

        let span = name_span.start..rparen_span.end;
        let map = SourceMap::new(self.range(span.clone()))
            .with_name(self.range(name_span.clone()))
            .with_begin(self.range(lparen_span))
            .with_end(self.range(rparen_span));
        Ok((
            Node::new(
                NodeKind::Call {
                    name: self.slice(&name_span).to_string(),
                    args,
                },
                map,
            ),
            span,
        ))
    }

    fn parse_group(&mut self) -> Result<Spanned, ParseError> {
        let lparen_span = self.expect(Token::LParen, "'('")?;
        let (inner, _) = self.parse_expr()?;
        let rparen_span = self.expect(Token::RParen, "')'")?;

        let span = lparen_span.start..rparen_span.end;
        let map = SourceMap::new(self.range(span.clone()))
            .with_begin(self.range(lparen_span))
            .with_end(self.range(rparen_span));
        Ok((
            Node::new(
                NodeKind::Group {
                    inner: Box::new(inner),
                },
                map,
            ),
            span,
        ))
    }

    fn parse_if(&mut self) -> Result<Spanned, ParseError> {
        let if_span = self.expect(Token::KwIf, "'if'")?;
        let (cond, _) = self.parse_expr()?;

        // The condition ends at 'then' or at a statement separator
        let then_span = self.eat(Token::KwThen);
        if then_span.is_none() && !self.at_separator() {
            return Err(self.unexpected("'then' or newline"));
        }

        let (then_body, _) = self.parse_body(&[Token::KwElse, Token::KwEnd], "'else' or 'end'")?;

        let mut else_span = None;
        let mut else_body = None;
        if let Some(span) = self.eat(Token::KwElse) {
            else_span = Some(span);
            let (body, _) = self.parse_body(&[Token::KwEnd], "'end'")?;
            else_body = Some(Box::new(body));
        }
        let end_span = self.expect(Token::KwEnd, "'end'")?;

        let span = if_span.start..end_span.end;
        let mut map = SourceMap::new(self.range(span.clone()))
            .with_keyword(self.range(if_span))
            .with_end(self.range(end_span));
        if let Some(then_span) = then_span {
            map = map.with_begin(self.range(then_span));
        }
        if let Some(else_span) = else_span {
            map = map.with_else(self.range(else_span));
        }
        Ok((
            Node::new(
                NodeKind::If {
                    cond: Box::new(cond),
                    then_body: Box::new(then_body),
                    else_body,
                },
                map,
            ),
            span,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Node {
        let buffer = SourceBuffer::new("(test)", source);
        Parser::standard().parse(&buffer).expect("parse failed")
    }

    fn parse_err(source: &str) -> ParseError {
        let buffer = SourceBuffer::new("(test)", source);
        Parser::standard().parse(&buffer).unwrap_err()
    }

    /// Slices a map slot's span back out of the source
    fn slot_text<'s>(source: &'s str, node: &Node, slot: &str) -> &'s str {
        let map = node.map.as_ref().expect("node has no map");
        let range = map
            .entries()
            .iter()
            .find(|(label, _)| *label == slot)
            .and_then(|(_, range)| *range)
            .unwrap_or_else(|| panic!("slot {slot} not set"));
        &source[range.span.clone()]
    }

    #[test]
    fn test_literals() {
        assert_eq!(parse("42").to_string(), "(int 42)");
        assert_eq!(parse("\"hi\"").to_string(), "(str \"hi\")");
        assert_eq!(parse("foo").to_string(), "(name foo)");
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").to_string(),
            "(binop + (int 1) (binop * (int 2) (int 3)))"
        );
        assert_eq!(
            parse("1 * 2 + 3").to_string(),
            "(binop + (binop * (int 1) (int 2)) (int 3))"
        );
        assert_eq!(
            parse("a < b + 1").to_string(),
            "(binop < (name a) (binop + (name b) (int 1)))"
        );
    }

    #[test]
    fn test_grouping_overrides_precedence() {
        assert_eq!(
            parse("(1 + 2) * 3").to_string(),
            "(binop * (group (binop + (int 1) (int 2))) (int 3))"
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(
            parse("a = b = 1").to_string(),
            "(assign (name a) (assign (name b) (int 1)))"
        );
    }

    #[test]
    fn test_equality_is_not_assignment() {
        assert_eq!(
            parse("a == b").to_string(),
            "(binop == (name a) (name b))"
        );
    }

    #[test]
    fn test_call_forms() {
        assert_eq!(parse("run()").to_string(), "(call run)");
        assert_eq!(
            parse("puts(\"hi\", 2)").to_string(),
            "(call puts (str \"hi\") (int 2))"
        );
    }

    #[test]
    fn test_if_forms() {
        assert_eq!(
            parse("if x then y end").to_string(),
            "(if (name x) (block (name y)))"
        );
        assert_eq!(
            parse("if x then y else z end").to_string(),
            "(if (name x) (block (name y)) (block (name z)))"
        );
        assert_eq!(
            parse("if x\ny\nend").to_string(),
            "(if (name x) (block (name y)))"
        );
    }

    #[test]
    fn test_def() {
        assert_eq!(
            parse("def greet\nputs(\"hi\")\nend").to_string(),
            "(def greet (block (call puts (str \"hi\"))))"
        );
    }

    #[test]
    fn test_top_level_block() {
        assert_eq!(
            parse("x = 1\ny = 2").to_string(),
            "(block (assign (name x) (int 1)) (assign (name y) (int 2)))"
        );
        assert_eq!(parse("x = 1; y = 2").to_string(), parse("x = 1\ny = 2").to_string());
    }

    #[test]
    fn test_empty_input_is_empty_block() {
        let node = parse("");
        assert_eq!(node.to_string(), "(block)");
        let map = node.map.expect("empty block still carries a map");
        assert!(map.expression().expect("expression set").is_empty());
    }

    #[test]
    fn test_assign_spans() {
        let source = "foo = bar + 1";
        let node = parse(source);
        assert_eq!(slot_text(source, &node, "expression"), "foo = bar + 1");
        assert_eq!(slot_text(source, &node, "operator"), "=");
    }

    #[test]
    fn test_if_spans() {
        let source = "if x > 1 then y else z end";
        let node = parse(source);
        assert_eq!(slot_text(source, &node, "keyword"), "if");
        assert_eq!(slot_text(source, &node, "begin"), "then");
        assert_eq!(slot_text(source, &node, "else"), "else");
        assert_eq!(slot_text(source, &node, "end"), "end");
        assert_eq!(slot_text(source, &node, "expression"), source);
    }

    #[test]
    fn test_call_spans() {
        let source = "puts(x)";
        let node = parse(source);
        assert_eq!(slot_text(source, &node, "name"), "puts");
        assert_eq!(slot_text(source, &node, "begin"), "(");
        assert_eq!(slot_text(source, &node, "end"), ")");
    }

    #[test]
    fn test_name_spans_coincide() {
        let source = "foo";
        let node = parse(source);
        assert_eq!(slot_text(source, &node, "name"), "foo");
        assert_eq!(slot_text(source, &node, "expression"), "foo");
    }

    #[test]
    fn test_missing_rparen() {
        let err = parse_err("(1 + 2");
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
        assert!(err.to_string().contains("')'"));
    }

    #[test]
    fn test_unexpected_token_points_at_source() {
        let err = parse_err("x = 1 y = 2");
        let message = err.to_string();
        assert!(message.contains("expected newline or ';'"));
        assert!(message.contains(">>   1 | x = 1 y = 2"));
    }

    #[test]
    fn test_missing_end() {
        let err = parse_err("if x then y");
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_int_out_of_range() {
        let err = parse_err("99999999999999999999");
        assert!(matches!(err, ParseError::IntOutOfRange { .. }));
    }

    #[test]
    fn test_lex_error_propagates() {
        let err = parse_err("x ? y");
        assert!(matches!(err, ParseError::Lex(_)));
    }

    #[test]
    fn test_if_condition_needs_then_or_newline() {
        let err = parse_err("if x y end");
        assert!(err.to_string().contains("'then' or newline"));
    }
}
