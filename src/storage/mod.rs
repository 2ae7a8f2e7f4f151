//! Storage layer
//!
//! Plain file access for the command-line front end: whole-file text reads and
//! atomic writes. The ledger core never touches the filesystem.

pub mod file_io;

pub use file_io::{read_json, read_text, write_json_atomic, write_text_atomic};
