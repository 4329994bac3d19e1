// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Query evaluator for [`MemoryStore`](super::MemoryStore).
//!
//! Query text is parsed with `sqlparser` ([`GenericDialect`]); this module
//! only walks the resulting AST. Supported subset:
//!
//! ```text
//! SELECT * FROM <alias> [WHERE <term> (AND <term>)*]
//!
//! term    := path ('=' | '!=' | '<>') operand
//!          | CONTAINS '(' path ',' operand ')'
//!          | STARTSWITH '(' path ',' operand ')'
//!          | '(' term ')'
//! path    := alias ('.' field)+
//! operand := @param | "string" | 'string' | number | true | false | null
//! ```
//!
//! Only the projection, the source and the `WHERE` clause are inspected.
//! Comparisons against a missing field are false, for `!=` too.

use serde_json::{Number, Value};
use sqlparser::{
    ast::{
        BinaryOperator, Expr, FunctionArg, FunctionArgExpr, FunctionArguments, Ident, SelectItem,
        SetExpr, Statement, TableFactor, TableWithJoins, Value as SqlValue
    },
    dialect::GenericDialect,
    parser::Parser
};

use crate::{SqlQuery, StoreError};

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Param(String),
    Literal(Value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Contains,
    StartsWith
}

#[derive(Debug, Clone, PartialEq)]
enum Predicate {
    Compare {
        path:    Vec<String>,
        negated: bool,
        operand: Operand
    },
    Call {
        function: Function,
        path:     Vec<String>,
        operand:  Operand
    }
}

/// Parsed `WHERE` clause. An empty filter matches every document.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Filter {
    predicates: Vec<Predicate>
}

impl Filter {
    /// Parse a full query text.
    pub(crate) fn parse(text: &str) -> Result<Self, StoreError> {
        let statements = Parser::parse_sql(&GenericDialect {}, text)
            .map_err(|err| bad_query(&err.to_string()))?;
        let [Statement::Query(query)] = statements.as_slice() else {
            return Err(bad_query("expected a single SELECT statement"));
        };
        let SetExpr::Select(select) = query.body.as_ref() else {
            return Err(bad_query("expected a plain SELECT"));
        };
        if !matches!(select.projection.as_slice(), [SelectItem::Wildcard(_)]) {
            return Err(bad_query("only `SELECT *` is supported"));
        }

        let alias = source_alias(&select.from)?;
        let mut filter = Self::default();
        if let Some(selection) = &select.selection {
            collect(selection, &alias, &mut filter.predicates)?;
        }
        Ok(filter)
    }

    /// Evaluate against one document, resolving parameters from `query`.
    pub(crate) fn matches(&self, document: &Value, query: &SqlQuery) -> Result<bool, StoreError> {
        for predicate in &self.predicates {
            if !predicate.matches(document, query)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Predicate {
    fn matches(&self, document: &Value, query: &SqlQuery) -> Result<bool, StoreError> {
        match self {
            Self::Compare {
                path,
                negated,
                operand
            } => {
                let expected = operand.resolve(query)?;
                Ok(lookup(document, path)
                    .is_some_and(|actual| values_equal(actual, expected) != *negated))
            }
            Self::Call {
                function,
                path,
                operand
            } => {
                let Value::String(needle) = operand.resolve(query)? else {
                    return Ok(false);
                };
                Ok(match lookup(document, path) {
                    Some(Value::String(haystack)) => match function {
                        Function::Contains => haystack.contains(needle.as_str()),
                        Function::StartsWith => haystack.starts_with(needle.as_str())
                    },
                    _ => false
                })
            }
        }
    }
}

impl Operand {
    fn resolve<'a>(&'a self, query: &'a SqlQuery) -> Result<&'a Value, StoreError> {
        match self {
            Self::Literal(value) => Ok(value),
            Self::Param(name) => query
                .parameter(name)
                .ok_or_else(|| StoreError::BadRequest(format!("parameter {name} is not bound")))
        }
    }
}

fn lookup<'a>(document: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter().try_fold(document, |value, segment| value.get(segment))
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.as_f64() == right.as_f64(),
        _ => left == right
    }
}

/// Name the `WHERE` paths must start with: the alias, else the container.
fn source_alias(from: &[TableWithJoins]) -> Result<String, StoreError> {
    match from {
        [
            TableWithJoins {
                relation: TableFactor::Table { name, alias, .. },
                joins,
                ..
            }
        ] if joins.is_empty() => Ok(match alias {
            Some(alias) => alias.name.value.clone(),
            None => name.to_string()
        }),
        _ => Err(bad_query("expected a single container in FROM"))
    }
}

/// Flatten an `AND` tree into predicates.
fn collect(expr: &Expr, alias: &str, predicates: &mut Vec<Predicate>) -> Result<(), StoreError> {
    match expr {
        Expr::Nested(inner) => collect(inner, alias, predicates),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right
        } => {
            collect(left, alias, predicates)?;
            collect(right, alias, predicates)
        }
        Expr::BinaryOp {
            left,
            op,
            right
        } => {
            let negated = match op {
                BinaryOperator::Eq => false,
                BinaryOperator::NotEq => true,
                _ => return Err(bad_query(&format!("operator `{op}`")))
            };
            predicates.push(Predicate::Compare {
                path:    path(left, alias)?,
                negated,
                operand: operand(right)?
            });
            Ok(())
        }
        Expr::Function(call) => {
            let name = call.name.to_string();
            let function = if name.eq_ignore_ascii_case("CONTAINS") {
                Function::Contains
            } else if name.eq_ignore_ascii_case("STARTSWITH") {
                Function::StartsWith
            } else {
                return Err(bad_query(&format!("function `{name}`")));
            };
            let args = arguments(&call.args)?;
            let [target, value] = args.as_slice() else {
                return Err(bad_query(&format!("`{name}` takes two arguments")));
            };
            predicates.push(Predicate::Call {
                function,
                path:    path(target, alias)?,
                operand: operand(value)?
            });
            Ok(())
        }
        _ => Err(bad_query(&format!("condition `{expr}`")))
    }
}

fn arguments(args: &FunctionArguments) -> Result<Vec<&Expr>, StoreError> {
    let FunctionArguments::List(list) = args else {
        return Err(bad_query("expected an argument list"));
    };
    list.args
        .iter()
        .map(|arg| match arg {
            FunctionArg::Unnamed(FunctionArgExpr::Expr(expr)) => Ok(expr),
            _ => Err(bad_query(&format!("argument `{arg}`")))
        })
        .collect()
}

fn path(expr: &Expr, alias: &str) -> Result<Vec<String>, StoreError> {
    if let Expr::CompoundIdentifier(idents) = expr
        && let Some((root, fields)) = idents.split_first()
        && root.value == alias
        && !fields.is_empty()
    {
        return Ok(fields.iter().map(|field| field.value.clone()).collect());
    }
    Err(bad_query(&format!("`{expr}` is not a field path of `{alias}`")))
}

/// `@name` tokenizes as an identifier under [`GenericDialect`] and as a
/// placeholder under dialects without `@` identifiers; both are parameters.
/// A double-quoted word is an identifier to `sqlparser` but a string here.
fn operand(expr: &Expr) -> Result<Operand, StoreError> {
    match expr {
        Expr::Identifier(Ident {
            value,
            quote_style: None,
            ..
        }) if value.starts_with('@') => Ok(Operand::Param(value.clone())),
        Expr::Identifier(Ident {
            value,
            quote_style: Some('"'),
            ..
        }) => Ok(Operand::Literal(Value::String(value.clone()))),
        Expr::Value(value) => literal(value),
        _ => Err(bad_query(&format!("operand `{expr}`")))
    }
}

fn literal(value: &SqlValue) -> Result<Operand, StoreError> {
    let literal = match value {
        SqlValue::Placeholder(name) => return Ok(Operand::Param(name.clone())),
        SqlValue::SingleQuotedString(text) | SqlValue::DoubleQuotedString(text) => {
            Value::String(text.clone())
        }
        SqlValue::Number(number, _) => number
            .parse::<Number>()
            .map(Value::Number)
            .map_err(|_| bad_query(&format!("number `{number}`")))?,
        SqlValue::Boolean(flag) => Value::Bool(*flag),
        SqlValue::Null => Value::Null,
        _ => return Err(bad_query(&format!("literal `{value}`")))
    };
    Ok(Operand::Literal(literal))
}

fn bad_query(reason: &str) -> StoreError {
    StoreError::BadRequest(format!("unsupported query: {reason}"))
}
