//! The interactive command surface: meta commands plus the two-statement
//! command language (`insert <id> <username> <email>` and `select`).
//!
//! This layer only parses and prints; every storage decision belongs to
//! [`Table`] and the validation in [`Row::new`].

use thiserror::Error;

use crate::{
    storage::table::Table,
    types::{
        error::{DatabaseError, Result},
        row::Row,
    },
};

#[derive(Debug, PartialEq)]
pub enum Statement {
    Insert(Row),
    Select,
}

#[derive(Debug, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PrepareError {
    #[error("syntax error, could not parse statement")]
    SyntaxError,

    #[error("string is too long")]
    StringTooLong,

    #[error("id must be non-negative")]
    NegativeId,

    #[error("unrecognized keyword at start of '{0}'")]
    UnrecognizedStatement(String),
}

/// Parse a dot-command. `None` means the command is not recognized.
pub fn prepare_meta_command(input: &str) -> Option<MetaCommand> {
    match input.trim().trim_start_matches('.') {
        "exit" => Some(MetaCommand::Exit),
        _ => None,
    }
}

pub fn prepare_statement(input: &str) -> std::result::Result<Statement, PrepareError> {
    let trimmed = input.trim();
    if trimmed.starts_with("insert") {
        return prepare_insert(trimmed);
    }
    if trimmed.starts_with("select") {
        return Ok(Statement::Select);
    }
    Err(PrepareError::UnrecognizedStatement(trimmed.to_string()))
}

fn prepare_insert(input: &str) -> std::result::Result<Statement, PrepareError> {
    let args: Vec<&str> = input.split_whitespace().collect();
    if args.len() != 4 {
        return Err(PrepareError::SyntaxError);
    }
    let id: i32 = args[1].parse().map_err(|_| PrepareError::SyntaxError)?;
    let row = Row::new(id, args[2], args[3]).map_err(|err| match err {
        DatabaseError::NegativeId(_) => PrepareError::NegativeId,
        DatabaseError::FieldTooLong { .. } => PrepareError::StringTooLong,
        _ => PrepareError::SyntaxError,
    })?;
    Ok(Statement::Insert(row))
}

/// Run a prepared statement. A select returns the rows it produced; an
/// insert returns an empty list.
pub fn execute_statement(statement: &Statement, table: &mut Table) -> Result<Vec<Row>> {
    match statement {
        Statement::Insert(row) => {
            table.insert(row)?;
            Ok(Vec::new())
        }
        Statement::Select => table.scan(),
    }
}

pub fn format_row(row: &Row) -> String {
    format!("({}, {}, {})", row.id(), row.username(), row.email())
}
