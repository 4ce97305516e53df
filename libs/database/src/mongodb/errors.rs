use mongodb::error::{Error, ErrorKind, WriteFailure};

/// Server code for a unique index violation.
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// Whether a write failed because it violated a unique index.
pub fn is_duplicate_key(err: &Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}
