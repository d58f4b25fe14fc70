use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt database file: {length} bytes is not a whole number of pages")]
    CorruptFile { length: u64 },

    #[error("leaf node is full (max {max_cells} cells)")]
    CapacityExceeded { max_cells: usize },

    #[error("{field} is too long ({actual} bytes, max {max})")]
    FieldTooLong {
        field: &'static str,
        actual: usize,
        max: usize,
    },

    #[error("id must be non-negative, got {0}")]
    NegativeId(i32),

    #[error("stored {field} is not valid UTF-8")]
    InvalidFieldEncoding { field: &'static str },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
