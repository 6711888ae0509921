#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use utfscan::{AtEnd, ScanError, Scanner};

#[derive(Arbitrary, Debug)]
enum Op {
    Advance,
    Retreat,
    AdvanceBy(u8),
    RetreatBy(u8),
    Peek,
    EatChar(char),
    EatAny([char; 3]),
    EatStr(String),
    ExpectChar(char),
    ReadCount(u8),
    ReadUntilChar(char, bool),
    ReadUntilStr(String, bool),
    ReadToEnd,
    ReadWhileChar(char),
    Window(u8, u8),
}

#[derive(Arbitrary, Debug)]
struct Plan {
    text: String,
    ops: Vec<Op>,
}

fn policy(fail: bool) -> AtEnd {
    if fail { AtEnd::Fail } else { AtEnd::Stop }
}

// Drives random operation sequences and checks the engine's core laws: the
// cursor never leaves the range or a scalar boundary (`remaining()` would
// panic on either), failed matches restore the position, and spans always
// re-slice the input text.
fuzz_target!(|plan: Plan| {
    let mut scan = Scanner::new(&plan.text);

    for op in plan.ops {
        let before = scan.remaining().len();
        match op {
            Op::Advance => {
                let moved = scan.advance().is_ok();
                assert_eq!(moved, before > 0);
            }
            Op::Retreat => {
                let moved = scan.retreat().is_ok();
                assert_eq!(moved, scan.as_str().len() > before);
            }
            Op::AdvanceBy(n) => {
                if scan.advance_by(usize::from(n)).is_err() {
                    assert!(scan.at_end());
                }
            }
            Op::RetreatBy(n) => {
                if scan.retreat_by(usize::from(n)).is_err() {
                    assert_eq!(scan.remaining(), scan.as_str());
                }
            }
            Op::Peek => {
                assert_eq!(scan.peek().is_err(), scan.at_end());
                let _ = scan.peek_or_nul();
            }
            Op::EatChar(ch) => {
                if !scan.eat_char(ch) {
                    assert_eq!(scan.remaining().len(), before);
                }
            }
            Op::EatAny(set) => {
                if !scan.eat_any(&set) {
                    assert_eq!(scan.remaining().len(), before);
                }
            }
            Op::EatStr(s) => match scan.eat_str(&s) {
                Ok(true) => assert_eq!(scan.remaining().len(), before - s.len()),
                Ok(false) => assert_eq!(scan.remaining().len(), before),
                Err(err) => assert_eq!(err, ScanError::EmptyTarget),
            },
            Op::ExpectChar(ch) => {
                if scan.expect_char(ch).is_err() {
                    assert_eq!(scan.remaining().len(), before);
                }
            }
            Op::ReadCount(n) => {
                let n = usize::from(n);
                if let Ok(text) = scan.read_count(n) {
                    assert_eq!(text.chars().count(), n);
                }
            }
            Op::ReadUntilChar(ch, fail) => match scan.read_until_char(ch, policy(fail)) {
                Ok(span) => assert!(!span.as_str().contains(ch)),
                Err(_) => assert_eq!(scan.remaining().len(), before),
            },
            Op::ReadUntilStr(needle, fail) => match scan.read_until_str(&needle, policy(fail)) {
                Ok(span) => {
                    assert_eq!(span.as_str().len() + scan.remaining().len(), before);
                }
                Err(_) => assert_eq!(scan.remaining().len(), before),
            },
            Op::ReadToEnd => {
                let span = scan.read_to_end();
                assert_eq!(span.as_str().len(), before);
                assert!(scan.at_end());
            }
            Op::ReadWhileChar(ch) => {
                let _ = scan.read_while_char(ch);
            }
            Op::Window(lo, hi) => {
                if let Ok(sub) = scan.window(usize::from(lo), usize::from(hi)) {
                    assert!(plan.text.contains(sub.as_str()));
                }
            }
        }
        // Whatever happened, the cursor must still sit on a boundary inside
        // the range.
        let _ = scan.remaining();
    }
});
