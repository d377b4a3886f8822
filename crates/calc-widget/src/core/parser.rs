//! Tokenizer and recursive-descent parser for calculator expressions
//!
//! Only numeric literals and `+ - * / **` are accepted, so the buffer is
//! never handed to anything that could execute it.

use crate::core::{Operation, WidgetError, WidgetResult};

/// Lexical token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Operator (binary, or unary `+`/`-` depending on position)
    Operator(Operation),
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
}

impl AstNode {
    /// Creates a number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }
}

/// Converts an expression string to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer over `input`
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> WidgetResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `None` at end of input
    pub fn next_token(&mut self) -> WidgetResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            '+' | '-' => {
                self.advance();
                // `++`/`--` would be increment/decrement, not two signs
                if self.current_char() == Some(ch) {
                    return Err(WidgetError::malformed(format!(
                        "'{ch}{ch}' at position {}",
                        self.pos - 1
                    )));
                }
                if ch == '+' {
                    Token::Operator(Operation::Add)
                } else {
                    Token::Operator(Operation::Subtract)
                }
            }
            '*' => {
                self.advance();
                if self.current_char() == Some('*') {
                    self.advance();
                    Token::Operator(Operation::Power)
                } else {
                    Token::Operator(Operation::Multiply)
                }
            }
            '/' => {
                self.advance();
                Token::Operator(Operation::Divide)
            }
            _ => {
                return Err(WidgetError::malformed(format!(
                    "unexpected character '{ch}' at position {}",
                    self.pos
                )));
            }
        };

        Ok(Some(token))
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> WidgetResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| WidgetError::malformed(format!("invalid number '{num_str}'")))?;

        Ok(Token::Number(value))
    }
}

/// Most binary operators one expression may hold
///
/// The tree is left-deep, so this bounds evaluation depth.
pub const MAX_OPERATORS: usize = 1_000;

/// Recursive descent parser
///
/// Grammar (left-to-right within every level):
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= power (('*' | '/') power)*
/// power      ::= unary ('**' unary)*
/// unary      ::= ('-' | '+')* NUMBER
/// ```
/// A signed operand directly to the left of `**` is rejected (`-2**2`).
/// A run of signs folds into at most one negation.
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    operators: usize,
}

impl Parser {
    /// Creates a parser over tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            operators: 0,
        }
    }

    /// Parses an expression string into an AST
    pub fn parse_str(input: &str) -> WidgetResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(WidgetError::malformed("empty expression"));
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        let mut parser = Self::new(tokens);
        let ast = parser.parse()?;

        if parser.pos < parser.tokens.len() {
            return Err(WidgetError::malformed(format!(
                "unexpected token at position {}",
                parser.pos
            )));
        }

        Ok(ast)
    }

    /// Parses the token stream into an AST
    pub fn parse(&mut self) -> WidgetResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(WidgetError::malformed("empty expression"));
        }
        self.parse_expression()
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn combine(&mut self, left: AstNode, op: Operation, right: AstNode) -> WidgetResult<AstNode> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(WidgetError::malformed("expression nested too deeply"));
        }
        Ok(AstNode::binary(left, op, right))
    }

    fn parse_expression(&mut self) -> WidgetResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = self.combine(left, op, right)?;
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> WidgetResult<AstNode> {
        let mut left = self.parse_power()?;

        while let Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_power()?;
            left = self.combine(left, op, right)?;
        }

        Ok(left)
    }

    fn parse_power(&mut self) -> WidgetResult<AstNode> {
        let signed = matches!(
            self.current(),
            Some(Token::Operator(Operation::Add | Operation::Subtract))
        );
        let mut left = self.parse_unary()?;

        while matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            if signed {
                return Err(WidgetError::malformed(
                    "signed operand on the left of '**'",
                ));
            }
            self.advance();
            let right = self.parse_unary()?;
            left = self.combine(left, Operation::Power, right)?;
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> WidgetResult<AstNode> {
        let mut negative = false;
        loop {
            let token = self
                .advance()
                .cloned()
                .ok_or_else(|| WidgetError::malformed("expression ends with an operator"))?;

            match token {
                Token::Number(n) => {
                    let node = AstNode::number(n);
                    return Ok(if negative { AstNode::negate(node) } else { node });
                }
                Token::Operator(Operation::Subtract) => negative = !negative,
                Token::Operator(Operation::Add) => {}
                Token::Operator(op) => {
                    return Err(WidgetError::malformed(format!(
                        "unexpected operator '{}'",
                        op.symbol()
                    )));
                }
            }
        }
    }
}
