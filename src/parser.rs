pub mod error;

use std::collections::HashMap;
use std::io::BufRead;
use std::rc::Rc;

use log::debug;

use crate::ast::{BinaryOperator, Program, Statement, VariableValue};
use crate::lexer::Lexer;
use crate::runtime::class::{Class, Method};
use crate::runtime::comparators::{self, Comparator};
use crate::token::Token;

pub use error::{ParseError, ParseResult};

/// Recursive-descent parser over a pulling [`Lexer`].
///
/// Classes are recorded in `declared_classes` once their whole definition has
/// parsed, so later statements can instantiate or subclass them by name.
pub struct Parser<R> {
    lexer: Lexer<R>,
    declared_classes: HashMap<String, Rc<Class>>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        Self {
            lexer,
            declared_classes: HashMap::new(),
        }
    }

    pub fn parse_program(mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while *self.current() != Token::Eof {
            statements.push(self.parse_statement()?);
        }
        debug!(
            "parsed {} top-level statements, {} classes",
            statements.len(),
            self.declared_classes.len()
        );
        Ok(Program { statements })
    }

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current() {
            Token::Class => {
                let line = self.line();
                self.advance()?;
                self.parse_class_definition(line)
            }
            Token::If => self.parse_condition(),
            _ => {
                let statement = self.parse_simple_statement()?;
                self.expect(Token::Newline)?;
                Ok(statement)
            }
        }
    }

    fn parse_simple_statement(&mut self) -> ParseResult<Statement> {
        match self.current() {
            Token::Return => {
                self.advance()?;
                Ok(Statement::Return(Box::new(self.parse_test()?)))
            }
            Token::Print => {
                self.advance()?;
                let args = if *self.current() == Token::Newline {
                    Vec::new()
                } else {
                    self.parse_test_list()?
                };
                Ok(Statement::Print(args))
            }
            _ => self.parse_assignment_or_call(),
        }
    }

    /// `NEWLINE INDENT Statement+ DEDENT`, as a compound statement.
    fn parse_suite(&mut self) -> ParseResult<Statement> {
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;
        let mut body = Vec::new();
        while *self.current() != Token::Dedent {
            body.push(self.parse_statement()?);
        }
        self.expect(Token::Dedent)?;
        Ok(Statement::Compound(body))
    }

    fn parse_class_definition(&mut self, line: usize) -> ParseResult<Statement> {
        let name = self.expect_identifier()?;

        let parent = if self.current().is_char('(') {
            self.advance()?;
            let base = self.expect_identifier()?;
            self.expect_char(')')?;
            let parent = self.declared_classes.get(&base).cloned().ok_or_else(|| {
                ParseError::UnknownBaseClass {
                    base,
                    class: name.clone(),
                    line,
                }
            })?;
            Some(parent)
        } else {
            None
        };

        self.expect_char(':')?;
        self.expect(Token::Newline)?;
        self.expect(Token::Indent)?;
        if *self.current() != Token::Def {
            return Err(self.error(&Token::Def.to_string()));
        }
        let methods = self.parse_methods()?;
        self.expect(Token::Dedent)?;

        if self.declared_classes.contains_key(&name) {
            return Err(ParseError::DuplicateClass { name, line });
        }
        debug!(
            "declared class {name} with {} methods{}",
            methods.len(),
            parent
                .as_ref()
                .map(|parent| format!(", parent {}", parent.name()))
                .unwrap_or_default()
        );
        let class = Rc::new(Class::new(name.clone(), methods, parent));
        self.declared_classes.insert(name, class.clone());
        Ok(Statement::ClassDefinition(class))
    }

    fn parse_methods(&mut self) -> ParseResult<Vec<Method>> {
        let mut methods = Vec::new();
        while *self.current() == Token::Def {
            self.advance()?;
            let name = self.expect_identifier()?;
            self.expect_char('(')?;

            let mut formal_params = Vec::new();
            if matches!(self.current(), Token::Identifier(_)) {
                formal_params.push(self.expect_identifier()?);
                while self.current().is_char(',') {
                    self.advance()?;
                    formal_params.push(self.expect_identifier()?);
                }
            }

            self.expect_char(')')?;
            self.expect_char(':')?;
            let body = self.parse_suite()?;
            methods.push(Method {
                name,
                formal_params,
                body,
            });
        }
        Ok(methods)
    }

    fn parse_condition(&mut self) -> ParseResult<Statement> {
        self.expect(Token::If)?;
        let condition = self.parse_test()?;
        self.expect_char(':')?;
        let if_body = self.parse_suite()?;

        let else_body = if *self.current() == Token::Else {
            self.advance()?;
            self.expect_char(':')?;
            Some(Box::new(self.parse_suite()?))
        } else {
            None
        };

        Ok(Statement::IfElse {
            condition: Box::new(condition),
            if_body: Box::new(if_body),
            else_body,
        })
    }

    fn parse_assignment_or_call(&mut self) -> ParseResult<Statement> {
        let line = self.line();
        let (path, last) = self.parse_dotted_ids()?;

        if self.current().is_char('=') {
            self.advance()?;
            let value = Box::new(self.parse_test()?);
            if path.is_empty() {
                Ok(Statement::Assignment { name: last, value })
            } else {
                Ok(Statement::FieldAssignment {
                    object: VariableValue::dotted(path),
                    field: last,
                    value,
                })
            }
        } else if self.current().is_char('(') {
            self.parse_call(path, last, line)
        } else {
            Err(self.error("'=' or '('"))
        }
    }

    /// Parses `Id ('.' Id)*`, splitting off the final segment.
    fn parse_dotted_ids(&mut self) -> ParseResult<(Vec<String>, String)> {
        let mut path = Vec::new();
        let mut last = self.expect_identifier()?;
        while self.current().is_char('.') {
            self.advance()?;
            let next = self.expect_identifier()?;
            path.push(std::mem::replace(&mut last, next));
        }
        Ok((path, last))
    }

    /// Parses the argument list of a call and resolves what is being called.
    ///
    /// A dotted path is a method call on the object it names. A bare name is
    /// either a declared class (instantiation) or the `str` builtin.
    fn parse_call(&mut self, path: Vec<String>, name: String, line: usize) -> ParseResult<Statement> {
        self.expect_char('(')?;
        let args = if self.current().is_char(')') {
            Vec::new()
        } else {
            self.parse_test_list()?
        };
        self.expect_char(')')?;

        if !path.is_empty() {
            return Ok(Statement::MethodCall {
                object: Box::new(Statement::VariableValue(VariableValue::dotted(path))),
                method: name,
                args,
            });
        }
        if let Some(class) = self.declared_classes.get(&name) {
            return Ok(Statement::NewInstance {
                class: class.clone(),
                args,
            });
        }
        if name == "str" {
            return match <[Statement; 1]>::try_from(args) {
                Ok([arg]) => Ok(Statement::Stringify(Box::new(arg))),
                Err(args) => Err(ParseError::StrArity {
                    count: args.len(),
                    line,
                }),
            };
        }
        Err(ParseError::FreeFunction { name, line })
    }

    fn parse_test_list(&mut self) -> ParseResult<Vec<Statement>> {
        let mut items = vec![self.parse_test()?];
        while self.current().is_char(',') {
            self.advance()?;
            items.push(self.parse_test()?);
        }
        Ok(items)
    }

    fn parse_test(&mut self) -> ParseResult<Statement> {
        let mut result = self.parse_and_test()?;
        while *self.current() == Token::Or {
            self.advance()?;
            let right = self.parse_and_test()?;
            result = Statement::Or {
                left: Box::new(result),
                right: Box::new(right),
            };
        }
        Ok(result)
    }

    fn parse_and_test(&mut self) -> ParseResult<Statement> {
        let mut result = self.parse_not_test()?;
        while *self.current() == Token::And {
            self.advance()?;
            let right = self.parse_not_test()?;
            result = Statement::And {
                left: Box::new(result),
                right: Box::new(right),
            };
        }
        Ok(result)
    }

    fn parse_not_test(&mut self) -> ParseResult<Statement> {
        if *self.current() == Token::Not {
            self.advance()?;
            Ok(Statement::Not(Box::new(self.parse_not_test()?)))
        } else {
            self.parse_comparison()
        }
    }

    fn parse_comparison(&mut self) -> ParseResult<Statement> {
        let left = self.parse_expression()?;
        let comparator: Comparator = match self.current() {
            Token::Char('<') => comparators::less,
            Token::Char('>') => comparators::greater,
            Token::Eq => comparators::equal,
            Token::NotEq => comparators::not_equal,
            Token::LessOrEq => comparators::less_or_equal,
            Token::GreaterOrEq => comparators::greater_or_equal,
            _ => return Ok(left),
        };
        self.advance()?;
        let right = self.parse_expression()?;
        Ok(Statement::Comparison {
            comparator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_expression(&mut self) -> ParseResult<Statement> {
        let mut expr = self.parse_term()?;
        loop {
            let op = match self.current() {
                Token::Char('+') => BinaryOperator::Add,
                Token::Char('-') => BinaryOperator::Sub,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_term()?;
            expr = Statement::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_term(&mut self) -> ParseResult<Statement> {
        let mut expr = self.parse_factor()?;
        loop {
            let op = match self.current() {
                Token::Char('*') => BinaryOperator::Mult,
                Token::Char('/') => BinaryOperator::Div,
                _ => break,
            };
            self.advance()?;
            let right = self.parse_factor()?;
            expr = Statement::binary(expr, op, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> ParseResult<Statement> {
        match self.current() {
            Token::Char('(') => {
                self.advance()?;
                let expr = self.parse_test()?;
                self.expect_char(')')?;
                Ok(expr)
            }
            Token::Char('-') => {
                self.advance()?;
                let operand = self.parse_factor()?;
                Ok(Statement::binary(
                    operand,
                    BinaryOperator::Mult,
                    Statement::NumericConst(-1),
                ))
            }
            Token::Number(value) => {
                let value = *value;
                self.advance()?;
                Ok(Statement::NumericConst(value))
            }
            Token::String(value) => {
                let value = value.clone();
                self.advance()?;
                Ok(Statement::StringConst(value))
            }
            Token::True => {
                self.advance()?;
                Ok(Statement::BoolConst(true))
            }
            Token::False => {
                self.advance()?;
                Ok(Statement::BoolConst(false))
            }
            Token::None => {
                self.advance()?;
                Ok(Statement::NoneConst)
            }
            Token::Identifier(_) => {
                let line = self.line();
                let (mut path, last) = self.parse_dotted_ids()?;
                if self.current().is_char('(') {
                    self.parse_call(path, last, line)
                } else {
                    path.push(last);
                    Ok(Statement::VariableValue(VariableValue::dotted(path)))
                }
            }
            _ => Err(self.error("expression")),
        }
    }

    fn current(&self) -> &Token {
        self.lexer.current_token()
    }

    fn line(&self) -> usize {
        self.lexer.line_number()
    }

    fn advance(&mut self) -> ParseResult<()> {
        self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> ParseResult<()> {
        if *self.current() == expected {
            self.advance()
        } else {
            Err(self.error(&expected.to_string()))
        }
    }

    fn expect_char(&mut self, expected: char) -> ParseResult<()> {
        self.expect(Token::Char(expected))
    }

    fn expect_identifier(&mut self) -> ParseResult<String> {
        if let Token::Identifier(name) = self.current() {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.error("identifier"))
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current().clone(),
            line: self.line(),
        }
    }
}

pub fn parse_program<R: BufRead>(lexer: Lexer<R>) -> ParseResult<Program> {
    Parser::new(lexer).parse_program()
}

pub fn parse(source: &str) -> ParseResult<Program> {
    parse_program(Lexer::new(source.as_bytes())?)
}
