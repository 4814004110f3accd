//! Recursive-descent parser for the query language.
//!
//! The parser is deliberately forgiving. Only four conditions are hard
//! failures: a statement that is not a SELECT, a missing FROM table, and a
//! join that is not a single two-table equality (the fourth, an unknown
//! table, is the executor's to raise). Anything else degrades: a WHERE or
//! HAVING body that is not one of the supported comparison forms parses to
//! "match everything", an unrecognizable SELECT item is dropped, a
//! non-numeric LIMIT is ignored. Each recovery consumes the offending
//! clause body and resynchronizes on the next clause keyword.

use std::iter::Peekable;

use super::ast::{
    AggregateFunc, Direction, JoinClause, OrderBy, Predicate, SelectItem, SelectStatement,
};
use super::lexer::{Keyword, Lexer, Token};
use crate::error::{Error, Result};
use crate::types::Value;

pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl Parser<'_> {
    /// Parses a query string into a SELECT statement.
    pub fn parse(statement: &str) -> Result<SelectStatement> {
        Parser {
            lexer: Lexer::new(statement).peekable(),
        }
        .parse_statement()
    }

    /// Peeks the next token without consuming it.
    fn peek(&mut self) -> Option<&Token> {
        self.lexer.peek()
    }

    /// Fetches the next token.
    fn next(&mut self) -> Option<Token> {
        self.lexer.next()
    }

    /// Consumes the next token if it equals the given one, returning true.
    fn next_is(&mut self, token: Token) -> bool {
        if self.peek() == Some(&token) {
            self.next();
            return true;
        }
        false
    }

    /// Fetches the next token if it is an identifier.
    fn next_ident(&mut self) -> Option<String> {
        match self.peek() {
            Some(Token::Ident(_)) => match self.next() {
                Some(Token::Ident(ident)) => Some(ident),
                _ => None,
            },
            _ => None,
        }
    }

    /// True if the next token opens a clause (or the input is exhausted).
    /// Used to resynchronize after a malformed clause body.
    fn at_clause_boundary(&mut self) -> bool {
        matches!(
            self.peek(),
            None | Some(Token::Keyword(
                Keyword::Where
                    | Keyword::Group
                    | Keyword::Having
                    | Keyword::Order
                    | Keyword::Limit
            ))
        )
    }

    /// Skips tokens until the next clause boundary.
    fn recover_to_clause_boundary(&mut self) {
        while !self.at_clause_boundary() {
            self.next();
        }
    }

    fn parse_statement(&mut self) -> Result<SelectStatement> {
        if !self.next_is(Keyword::Select.into()) {
            return Err(Error::UnsupportedQueryKind);
        }
        let select = self.parse_select_items();

        if !self.next_is(Keyword::From.into()) {
            return Err(Error::MissingTable);
        }
        let table = self.next_ident().ok_or(Error::MissingTable)?;
        let alias = self.parse_table_alias();

        let join = match self.peek() {
            Some(Token::Keyword(Keyword::Join)) => {
                Some(self.parse_join(&table, alias.as_deref())?)
            }
            _ => None,
        };

        let mut statement = SelectStatement {
            select,
            table,
            alias,
            join,
            predicate: None,
            group_by: Vec::new(),
            having: None,
            order_by: None,
            limit: None,
        };

        // Remaining clauses, in whatever order they appear. Tokens between
        // clauses that belong to no clause are dropped.
        while let Some(token) = self.next() {
            match token {
                Token::Keyword(Keyword::Where) => {
                    statement.predicate = self.parse_predicate();
                }
                Token::Keyword(Keyword::Group) => {
                    if self.next_is(Keyword::By.into()) {
                        statement.group_by = self.parse_ident_list();
                    }
                }
                Token::Keyword(Keyword::Having) => {
                    statement.having = self.parse_predicate();
                }
                Token::Keyword(Keyword::Order) => {
                    if self.next_is(Keyword::By.into()) {
                        statement.order_by = self.parse_order_by();
                    }
                }
                Token::Keyword(Keyword::Limit) => {
                    statement.limit = self.parse_limit();
                }
                _ => {}
            }
        }

        Ok(statement)
    }

    /// Parses the SELECT list up to FROM. Items that are not a `*`, a column
    /// or a recognized aggregate call are skipped, not errors.
    fn parse_select_items(&mut self) -> Vec<SelectItem> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None | Some(Token::Keyword(Keyword::From)) => break,
                _ => {}
            }
            if let Some(item) = self.parse_select_item() {
                items.push(item);
            }
            // Resynchronize on the item boundary, dropping whatever is left
            // of a malformed item.
            loop {
                match self.peek() {
                    None | Some(Token::Comma) | Some(Token::Keyword(Keyword::From)) => break,
                    _ => {
                        self.next();
                    }
                }
            }
            self.next_is(Token::Comma);
        }
        items
    }

    /// Parses one SELECT item, or None if the next tokens do not form one.
    /// Always consumes at least one token, so the caller makes progress.
    fn parse_select_item(&mut self) -> Option<SelectItem> {
        match self.next()? {
            Token::Asterisk => Some(SelectItem::All),
            Token::Ident(name) => {
                if self.next_is(Token::OpenParen) {
                    let func = AggregateFunc::from_name(&name)?;
                    let field = match self.next()? {
                        Token::Asterisk => "*".to_owned(),
                        Token::Ident(field) => field,
                        _ => return None,
                    };
                    if !self.next_is(Token::CloseParen) {
                        return None;
                    }
                    let alias = self.parse_as_alias();
                    Some(SelectItem::Aggregate { func, field, alias })
                } else {
                    let alias = self.parse_as_alias();
                    Some(SelectItem::Column { name, alias })
                }
            }
            _ => None,
        }
    }

    /// Parses an `AS alias` suffix, if present.
    fn parse_as_alias(&mut self) -> Option<String> {
        if self.next_is(Keyword::As.into()) {
            return self.next_ident();
        }
        None
    }

    /// Parses a table alias: `AS alias` or a bare identifier.
    fn parse_table_alias(&mut self) -> Option<String> {
        if self.next_is(Keyword::As.into()) {
            return self.next_ident();
        }
        self.next_ident()
    }

    /// Parses `JOIN table [AS alias] ON qual.field = qual.field`, resolving
    /// each qualifier against the two tables' names and aliases. Anything
    /// beyond a single two-table equality is unsupported.
    fn parse_join(&mut self, left_table: &str, left_alias: Option<&str>) -> Result<JoinClause> {
        self.next(); // JOIN
        let table = self
            .next_ident()
            .ok_or_else(|| Error::UnsupportedJoinCondition("missing join table".into()))?;
        let alias = self.parse_table_alias();
        if !self.next_is(Keyword::On.into()) {
            return Err(Error::UnsupportedJoinCondition("missing ON clause".into()));
        }
        let (first_qualifier, first_field) = self.parse_qualified_field()?;
        if !self.next_is(Token::Equal) {
            return Err(Error::UnsupportedJoinCondition(
                "only an equality join condition is supported".into(),
            ));
        }
        let (second_qualifier, second_field) = self.parse_qualified_field()?;

        // A second condition (AND, OR, another JOIN, …) is unsupported, so
        // after the column pair the statement must continue with a clause.
        if !self.at_clause_boundary() {
            return Err(Error::UnsupportedJoinCondition(
                "only a single join condition is supported".into(),
            ));
        }

        let names_left = |qualifier: &str| {
            qualifier.eq_ignore_ascii_case(left_table)
                || left_alias.is_some_and(|a| qualifier.eq_ignore_ascii_case(a))
        };
        let names_right = |qualifier: &str| {
            qualifier.eq_ignore_ascii_case(&table)
                || alias
                    .as_deref()
                    .is_some_and(|a| qualifier.eq_ignore_ascii_case(a))
        };

        let (left_field, right_field) = if names_left(&first_qualifier)
            && names_right(&second_qualifier)
        {
            (first_field, second_field)
        } else if names_left(&second_qualifier) && names_right(&first_qualifier) {
            (second_field, first_field)
        } else {
            return Err(Error::UnsupportedJoinCondition(format!(
                "join condition does not reference both tables: {}.{} = {}.{}",
                first_qualifier, first_field, second_qualifier, second_field
            )));
        };

        Ok(JoinClause {
            table,
            alias,
            left_field,
            right_field,
        })
    }

    /// Parses a `table.column` reference for a join condition.
    fn parse_qualified_field(&mut self) -> Result<(String, String)> {
        let qualifier = self.next_ident().ok_or_else(|| {
            Error::UnsupportedJoinCondition("join condition must use table.column".into())
        })?;
        if !self.next_is(Token::Period) {
            return Err(Error::UnsupportedJoinCondition(
                "join condition must use table.column".into(),
            ));
        }
        let field = self.next_ident().ok_or_else(|| {
            Error::UnsupportedJoinCondition("join condition must use table.column".into())
        })?;
        Ok((qualifier, field))
    }

    /// Parses a WHERE/HAVING body. The body must be exactly one of the
    /// supported comparison forms and must end at a clause boundary;
    /// otherwise the whole body is consumed and the predicate becomes None,
    /// which matches every row.
    fn parse_predicate(&mut self) -> Option<Predicate> {
        let predicate = self.parse_comparison();
        if predicate.is_none() || !self.at_clause_boundary() {
            self.recover_to_clause_boundary();
            return None;
        }
        predicate
    }

    /// Parses a single comparison: `field LIKE 'p'`, `field > n`,
    /// `field < n`, `field = 'v'` or `field = n`.
    fn parse_comparison(&mut self) -> Option<Predicate> {
        let field = self.next_ident()?;
        match self.next()? {
            Token::Keyword(Keyword::Like) => match self.next()? {
                Token::String(pattern) => Some(Predicate::Like { field, pattern }),
                _ => None,
            },
            Token::GreaterThan => {
                let value = self.next_number()?;
                Some(Predicate::GreaterThan { field, value })
            }
            Token::LessThan => {
                let value = self.next_number()?;
                Some(Predicate::LessThan { field, value })
            }
            Token::Equal => match self.next()? {
                Token::String(s) => Some(Predicate::Equal {
                    field,
                    value: Value::Str(s),
                }),
                Token::Number(n) => Some(Predicate::Equal {
                    field,
                    value: Value::number(n.parse().ok()?),
                }),
                _ => None,
            },
            _ => None,
        }
    }

    /// Fetches the next token if it is a number, parsed as f64.
    fn next_number(&mut self) -> Option<f64> {
        match self.peek() {
            Some(Token::Number(_)) => match self.next() {
                Some(Token::Number(n)) => n.parse().ok(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Parses a comma-separated identifier list (GROUP BY columns).
    fn parse_ident_list(&mut self) -> Vec<String> {
        let mut idents = Vec::new();
        while let Some(ident) = self.next_ident() {
            idents.push(ident);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        idents
    }

    /// Parses `field [ASC|DESC]`; a malformed body is dropped.
    fn parse_order_by(&mut self) -> Option<OrderBy> {
        let field = match self.next_ident() {
            Some(field) => field,
            None => {
                self.recover_to_clause_boundary();
                return None;
            }
        };
        let direction = if self.next_is(Keyword::Desc.into()) {
            Direction::Desc
        } else {
            self.next_is(Keyword::Asc.into());
            Direction::Asc
        };
        Some(OrderBy { field, direction })
    }

    /// Parses a LIMIT count. Anything but a non-negative integer means
    /// "no limit".
    fn parse_limit(&mut self) -> Option<usize> {
        match self.peek() {
            Some(Token::Number(_)) => match self.next() {
                Some(Token::Number(n)) => n.parse().ok(),
                _ => None,
            },
            _ => None,
        }
    }
}
