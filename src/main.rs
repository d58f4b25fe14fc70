use std::process::ExitCode;

use gudang::{
    repl::{self, MetaCommand},
    storage::table::Table,
    types::error::DatabaseError,
};
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gudang=warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(filename) = std::env::args().nth(1) else {
        eprintln!("Must supply a database filename.");
        return ExitCode::FAILURE;
    };

    let table = match Table::open(&filename) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("Error opening {filename}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("Error initializing line editor: {err}");
            return ExitCode::FAILURE;
        }
    };

    run(&mut editor, table)
}

fn run(editor: &mut DefaultEditor, mut table: Table) -> ExitCode {
    loop {
        let line = match editor.readline("gudang> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error reading input: {err}");
                break;
            }
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(input);

        if input.starts_with('.') {
            match repl::prepare_meta_command(input) {
                Some(MetaCommand::Exit) => break,
                None => {
                    println!("Unrecognized command '{input}'");
                    continue;
                }
            }
        }

        let statement = match repl::prepare_statement(input) {
            Ok(statement) => statement,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match repl::execute_statement(&statement, &mut table) {
            Ok(rows) => {
                for row in &rows {
                    println!("{}", repl::format_row(row));
                }
                println!("Executed.");
            }
            Err(DatabaseError::CapacityExceeded { .. }) => {
                println!("Error: table full.");
            }
            Err(err) => {
                println!("Error: {err}");
            }
        }
    }

    match table.close() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error closing database: {err}");
            ExitCode::FAILURE
        }
    }
}
