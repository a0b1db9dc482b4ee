//! Pratt-style recursive descent parser: tokens to [`Program`].
mod error;

pub use error::ParseError;

use crate::ast::{
    Assignment, Block, Call, DecimalLiteral, Expression, FunctionLiteral, FunctionThread,
    Identifier, If, Index, Infix, IntegerLiteral, LetBinding, Prefix, Program, Statement,
    StringLiteral,
};
use crate::lexer::{Token, TokenKind};

type PResult<T> = Result<T, ParseError>;

pub fn parse(tokens: Vec<Token>) -> PResult<Program> {
    Parser::new(tokens).parse_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn is_op(&self, text: &str) -> bool {
        matches!(self.peek(), Some(t) if t.kind == TokenKind::Operator && t.text == text)
    }

    fn expect_op(&mut self, text: &str) -> PResult<()> {
        if self.is_op(text) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::new(format!(
                "expected '{text}', found {}",
                self.describe_current()
            )))
        }
    }

    fn describe_current(&self) -> String {
        match self.peek() {
            Some(t) => format!("'{}'", t.text),
            None => "end of input".to_string(),
        }
    }

    fn parse_program(mut self) -> PResult<Program> {
        let mut statements = Vec::new();
        while self.peek().is_some() {
            if self.is_op(";") {
                self.advance();
                continue;
            }
            if let Some(t) = self.peek() {
                if t.kind == TokenKind::Comment {
                    let text = self.advance().unwrap().text;
                    statements.push(Statement::Comment(text));
                    continue;
                }
            }
            let expr = self.parse_expression()?;
            statements.push(Statement::Expression(expr));
        }
        Ok(Program::new(statements))
    }

    /// Entry point: lowest precedence, plus the assignment special case.
    fn parse_expression(&mut self) -> PResult<Expression> {
        let left = self.parse_or()?;
        if self.is_op("=") {
            if let Expression::Identifier(name) = left {
                self.advance();
                let value = self.parse_expression()?;
                return Ok(Expression::Assignment(Assignment {
                    name,
                    value: Box::new(value),
                }));
            }
            return Err(ParseError::new(
                "left-hand side of '=' must be an identifier",
            ));
        }
        Ok(left)
    }

    // Precedence 1: `||`
    fn parse_or(&mut self) -> PResult<Expression> {
        let mut left = self.parse_and()?;
        while self.is_op("||") {
            self.advance();
            let right = self.parse_and()?;
            left = infix(left, "||", right);
        }
        Ok(left)
    }

    // Precedence 2: `&&`
    fn parse_and(&mut self) -> PResult<Expression> {
        let mut left = self.parse_compare()?;
        while self.is_op("&&") {
            self.advance();
            let right = self.parse_compare()?;
            left = infix(left, "&&", right);
        }
        Ok(left)
    }

    // Precedence 3: `== != > < >= <=`
    fn parse_compare(&mut self) -> PResult<Expression> {
        let mut left = self.parse_thread()?;
        while let Some(op) = self.current_op_in(&["==", "!=", ">=", "<=", ">", "<"]) {
            self.advance();
            let right = self.parse_thread()?;
            left = infix(left, &op, right);
        }
        Ok(left)
    }

    // Precedence 4: `|>`, left-associative, flattened into `FunctionThread`.
    fn parse_thread(&mut self) -> PResult<Expression> {
        let initial = self.parse_compose()?;
        if !self.is_op("|>") {
            return Ok(initial);
        }
        let mut functions = Vec::new();
        while self.is_op("|>") {
            self.advance();
            functions.push(self.parse_compose()?);
        }
        Ok(Expression::FunctionThread(FunctionThread {
            initial: Box::new(initial),
            functions,
        }))
    }

    // Precedence 5: `>>`, right-associative, flattened into `FunctionComposition`.
    fn parse_compose(&mut self) -> PResult<Expression> {
        let first = self.parse_additive()?;
        if !self.is_op(">>") {
            return Ok(first);
        }
        let mut functions = vec![first];
        while self.is_op(">>") {
            self.advance();
            functions.push(self.parse_additive()?);
        }
        Ok(Expression::FunctionComposition(functions))
    }

    // Precedence 6: `+ -`
    fn parse_additive(&mut self) -> PResult<Expression> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.current_op_in(&["+", "-"]) {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = infix(left, &op, right);
        }
        Ok(left)
    }

    // Precedence 7: `* /`
    fn parse_multiplicative(&mut self) -> PResult<Expression> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.current_op_in(&["*", "/"]) {
            self.advance();
            let right = self.parse_unary()?;
            left = infix(left, &op, right);
        }
        Ok(left)
    }

    // Precedence 9: prefix unary `-` (binds tighter than `* /`).
    fn parse_unary(&mut self) -> PResult<Expression> {
        if self.is_op("-") && !self.next_is_operator_value_boundary() {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Prefix(Prefix {
                operator: "-".to_string(),
                operand: Box::new(operand),
            }));
        }
        self.parse_postfix()
    }

    /// True when the `-` at the current position is acting as a bare
    /// identifier (e.g. the third argument to `fold(0, -, xs)`) rather than
    /// unary negation: it's immediately followed by `,` or `)`.
    fn next_is_operator_value_boundary(&self) -> bool {
        matches!(self.peek_at(1), Some(t) if t.kind == TokenKind::Operator && (t.text == "," || t.text == ")"))
    }

    // Precedence 8: postfix call `(...)` and index `[...]`.
    fn parse_postfix(&mut self) -> PResult<Expression> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.is_op("(") {
                self.advance();
                let arguments = self.parse_comma_separated(")")?;
                self.expect_op(")")?;
                expr = Expression::Call(Call {
                    function: Box::new(expr),
                    arguments,
                });
            } else if self.is_op("[") {
                self.advance();
                let index = self.parse_expression()?;
                self.expect_op("]")?;
                expr = Expression::Index(Index {
                    left: Box::new(expr),
                    index: Box::new(index),
                });
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_comma_separated(&mut self, terminator: &str) -> PResult<Vec<Expression>> {
        let mut items = Vec::new();
        if self.is_op(terminator) {
            return Ok(items);
        }
        items.push(self.parse_expression()?);
        while self.is_op(",") {
            self.advance();
            if self.is_op(terminator) {
                break;
            }
            items.push(self.parse_expression()?);
        }
        Ok(items)
    }

    // Prefix dispatch: literals, grouping, collections, `let`, `if`, functions.
    fn parse_primary(&mut self) -> PResult<Expression> {
        let Some(token) = self.peek().cloned() else {
            return Err(ParseError::new("unexpected end of input"));
        };

        match token.kind {
            TokenKind::Int => {
                self.advance();
                Ok(Expression::Integer(IntegerLiteral { value: token.text }))
            }
            TokenKind::Dec => {
                self.advance();
                Ok(Expression::Decimal(DecimalLiteral { value: token.text }))
            }
            TokenKind::Str => {
                self.advance();
                Ok(Expression::String(StringLiteral {
                    value: unquote(&token.text),
                }))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::Boolean(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::Boolean(false))
            }
            TokenKind::Nil => {
                self.advance();
                Ok(Expression::Nil)
            }
            TokenKind::Id => {
                self.advance();
                Ok(Expression::Identifier(Identifier::new(token.text)))
            }
            TokenKind::Let => self.parse_let(),
            TokenKind::If => self.parse_if(),
            TokenKind::Operator => self.parse_operator_primary(&token),
            TokenKind::Comment => Err(ParseError::new("unexpected comment inside expression")),
            TokenKind::Mut | TokenKind::Else => Err(ParseError::new(format!(
                "unexpected '{}'",
                token.text
            ))),
        }
    }

    fn parse_operator_primary(&mut self, token: &Token) -> PResult<Expression> {
        match token.text.as_str() {
            "+" | "*" | "/" => {
                self.advance();
                Ok(Expression::Identifier(Identifier::new(token.text.clone())))
            }
            "-" => {
                self.advance();
                Ok(Expression::Identifier(Identifier::new("-")))
            }
            "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_op(")")?;
                Ok(expr)
            }
            "[" => {
                self.advance();
                let items = self.parse_comma_separated("]")?;
                self.expect_op("]")?;
                Ok(Expression::List(items))
            }
            "{" => {
                self.advance();
                let items = self.parse_comma_separated("}")?;
                self.expect_op("}")?;
                Ok(Expression::Set(items))
            }
            "#{" => {
                self.advance();
                let mut entries = Vec::new();
                if !self.is_op("}") {
                    entries.push(self.parse_dict_entry()?);
                    while self.is_op(",") {
                        self.advance();
                        if self.is_op("}") {
                            break;
                        }
                        entries.push(self.parse_dict_entry()?);
                    }
                }
                self.expect_op("}")?;
                Ok(Expression::Dictionary(entries))
            }
            "||" => {
                self.advance();
                let body = self.parse_function_body()?;
                Ok(Expression::Function(FunctionLiteral {
                    parameters: Vec::new(),
                    body,
                }))
            }
            "|" => {
                self.advance();
                let mut parameters = Vec::new();
                if !self.is_op("|") {
                    parameters.push(self.parse_identifier()?);
                    while self.is_op(",") {
                        self.advance();
                        parameters.push(self.parse_identifier()?);
                    }
                }
                self.expect_op("|")?;
                let body = self.parse_function_body()?;
                Ok(Expression::Function(FunctionLiteral { parameters, body }))
            }
            other => Err(ParseError::new(format!("unexpected token '{other}'"))),
        }
    }

    fn parse_identifier(&mut self) -> PResult<Identifier> {
        match self.advance() {
            Some(t) if t.kind == TokenKind::Id => Ok(Identifier::new(t.text)),
            other => Err(ParseError::new(format!(
                "expected identifier, found {}",
                other.map(|t| t.text).unwrap_or_else(|| "end of input".into())
            ))),
        }
    }

    fn parse_dict_entry(&mut self) -> PResult<(Expression, Expression)> {
        let key = self.parse_expression()?;
        self.expect_op(":")?;
        let value = self.parse_expression()?;
        Ok((key, value))
    }

    fn parse_let(&mut self) -> PResult<Expression> {
        self.advance(); // `let`
        let mutable = matches!(self.peek(), Some(t) if t.kind == TokenKind::Mut);
        if mutable {
            self.advance();
        }
        let name = self.parse_identifier()?;
        self.expect_op("=")?;
        let value = self.parse_expression()?;
        Ok(Expression::Let(LetBinding {
            mutable,
            name,
            value: Box::new(value),
        }))
    }

    fn parse_if(&mut self) -> PResult<Expression> {
        self.advance(); // `if`
        let condition = self.parse_expression()?;
        let consequence = self.parse_block()?;
        match self.advance() {
            Some(t) if t.kind == TokenKind::Else => {}
            other => {
                return Err(ParseError::new(format!(
                    "expected 'else', found {}",
                    other.map(|t| t.text).unwrap_or_else(|| "end of input".into())
                )))
            }
        }
        let alternative = self.parse_block()?;
        Ok(Expression::If(If {
            condition: Box::new(condition),
            consequence,
            alternative,
        }))
    }

    fn parse_block(&mut self) -> PResult<Block> {
        self.expect_op("{")?;
        let mut statements = Vec::new();
        while !self.is_op("}") {
            if self.peek().is_none() {
                return Err(ParseError::new("unterminated block, expected '}'"));
            }
            if self.is_op(";") {
                self.advance();
                continue;
            }
            if let Some(t) = self.peek() {
                if t.kind == TokenKind::Comment {
                    let text = self.advance().unwrap().text;
                    statements.push(Statement::Comment(text));
                    continue;
                }
            }
            let expr = self.parse_expression()?;
            statements.push(Statement::Expression(expr));
        }
        self.expect_op("}")?;
        Ok(Block::new(statements))
    }

    /// If the next token opens a block, parse it; otherwise parse a single
    /// expression and wrap it in a one-statement block.
    fn parse_function_body(&mut self) -> PResult<Block> {
        if self.is_op("{") {
            self.parse_block()
        } else {
            let expr = self.parse_expression()?;
            Ok(Block::new(vec![Statement::Expression(expr)]))
        }
    }

    fn current_op_in(&self, ops: &[&str]) -> Option<String> {
        let t = self.peek()?;
        if t.kind != TokenKind::Operator {
            return None;
        }
        ops.iter().find(|o| **o == t.text).map(|o| o.to_string())
    }
}

fn infix(left: Expression, op: &str, right: Expression) -> Expression {
    Expression::Infix(Infix {
        left: Box::new(left),
        operator: op.to_string(),
        right: Box::new(right),
    })
}

/// Strips the surrounding quotes from a `Str` token's verbatim slice and
/// resolves backslash escapes, producing the unquoted runtime string.
fn unquote(raw: &str) -> String {
    let inner = raw.strip_prefix('"').unwrap_or(raw);
    let inner = inner.strip_suffix('"').unwrap_or(inner);
    unescape::unescape(inner).unwrap_or_else(|| inner.to_string())
}
