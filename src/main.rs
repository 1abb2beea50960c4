//! Erio CLI Entry Point
//!
//! Reads an Erio source program from standard input in full, interprets it,
//! and writes its output to standard output. Exits with code 0 on success;
//! on a lexer, parser, or runtime error, prints the error to standard error
//! and exits with a non-zero code. No arguments, configuration files, or
//! environment variables are consulted — the whole interface is the two
//! standard streams.

use std::io::{self, Read, Write};
use std::process;

fn main() {
    let mut source = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut source) {
        eprintln!("failed to read source from stdin: {}", e);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match erio::run_to_sink(&source, &mut handle) {
        Ok(()) => {
            let _ = handle.flush();
        }
        Err(e) => {
            let _ = handle.flush();
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}
