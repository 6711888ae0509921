//! Splits a few log lines into their fields with the scanner combinators.
//!
//! Each line is `LEVEL module: message`. The walk below reads the level up
//! to the first space, the module up to the literal `": "`, and takes the
//! message as whatever remains, without copying any text until printing.
//!
//! Run with
//!
//! ```bash
//! cargo run -p utfscan --example fields
//! ```

use utfscan::{AtEnd, ScanError, Scanner, UnicodeClasses};

fn main() -> Result<(), ScanError> {
    let log = "\
INFO server: listening on :8080
WARN störage: fsync took 1.2s
ERROR net: peer reset
";

    let mut scan = Scanner::new(log);
    while !scan.at_end() {
        let mut line = scan.read_line(&UnicodeClasses)?;
        let _ = scan.eat_char('\n');
        if line.is_empty() {
            continue;
        }

        let level = line.read_until_char(' ', AtEnd::Fail)?;
        line.expect_char(' ')?;
        let module = line.read_until_str(": ", AtEnd::Fail)?;
        assert!(line.eat_str(": ")?);
        let message = line.read_to_end();

        println!(
            "{:5} [{}] {}",
            level.as_str(),
            module.as_str(),
            message.as_str()
        );
    }
    Ok(())
}
