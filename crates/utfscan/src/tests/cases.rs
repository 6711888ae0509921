//! Parameterized scenario grids over the public surface.

use rstest::rstest;

use crate::{AtEnd, ScanError, Scanner};

#[rstest]
#[case("hello, world", ',', "hello", ", world")]
#[case("héllo—wörld", '—', "héllo", "—wörld")]
#[case(",lead", ',', "", ",lead")]
#[case("päth/näme", '/', "päth", "/näme")]
fn until_char_spans_exclude_the_delimiter(
    #[case] input: &str,
    #[case] delim: char,
    #[case] span: &str,
    #[case] rest: &str,
) {
    let mut scan = Scanner::new(input);
    let field = scan.read_until_char(delim, AtEnd::Fail).unwrap();
    assert_eq!(field.as_str(), span);
    assert!(!field.as_str().contains(delim));
    assert_eq!(scan.peek(), Ok(delim));
    assert_eq!(scan.remaining(), rest);
}

#[rstest]
#[case("aaab", 'a', 3, "b")]
#[case("bbb", 'a', 0, "bbb")]
#[case("aa", 'a', 2, "")]
#[case("ééx", 'é', 2, "x")]
fn while_char_counts_the_run(
    #[case] input: &str,
    #[case] ch: char,
    #[case] count: usize,
    #[case] rest: &str,
) {
    let mut scan = Scanner::new(input);
    assert_eq!(scan.read_while_char(ch), count);
    assert_eq!(scan.remaining(), rest);
}

#[rstest]
#[case("ababab", "aba", "", "ababab")]
#[case("xxabxx", "ab", "xx", "abxx")]
#[case("aab", "ab", "a", "ab")]
#[case("needle at the end", "end", "needle at the ", "end")]
fn until_str_finds_the_first_occurrence(
    #[case] input: &str,
    #[case] needle: &str,
    #[case] span: &str,
    #[case] rest: &str,
) {
    let mut scan = Scanner::new(input);
    let field = scan.read_until_str(needle, AtEnd::Fail).unwrap();
    assert_eq!(field.as_str(), span);
    assert_eq!(scan.remaining(), rest);
}

#[rstest]
#[case("xx", "xxx")]
#[case("", "x")]
#[case("ab", "abc")]
fn too_short_input_fails_the_match_and_rewinds(#[case] input: &str, #[case] target: &str) {
    let mut scan = Scanner::new(input);
    assert_eq!(scan.eat_str(target), Ok(false));
    assert_eq!(scan.remaining(), input);
}

#[test]
fn empty_targets_are_rejected_everywhere() {
    let mut scan = Scanner::new("abc");
    assert_eq!(scan.eat_str(""), Err(ScanError::EmptyTarget));
    assert_eq!(
        scan.read_until_str("", AtEnd::Fail).unwrap_err(),
        ScanError::EmptyTarget
    );
    assert_eq!(scan.remaining(), "abc");
}

#[rstest]
#[case("one two", ' ', AtEnd::Fail, true)]
#[case("onetwo", ' ', AtEnd::Fail, false)]
#[case("onetwo", ' ', AtEnd::Stop, true)]
fn at_end_policy_decides_the_no_match_outcome(
    #[case] input: &str,
    #[case] delim: char,
    #[case] policy: AtEnd,
    #[case] succeeds: bool,
) {
    let mut scan = Scanner::new(input);
    assert_eq!(scan.read_until_char(delim, policy).is_ok(), succeeds);
}
