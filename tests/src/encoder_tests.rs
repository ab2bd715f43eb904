//! Encoder behavior across the character table and both policies

use morse_core::{encode, pattern, EncodedMessage, InvalidCharPolicy, Symbol};
use proptest::prelude::*;
use rstest::rstest;

/// Build an expected sequence from a compact notation:
/// `.` dit, `-` dah, ` ` character space, `_` word space
fn seq<const N: usize>(notation: &str) -> EncodedMessage<N> {
    let mut symbols = EncodedMessage::new();
    for mark in notation.as_bytes() {
        let symbol = match mark {
            b'.' => Symbol::Dit,
            b'-' => Symbol::Dah,
            b'_' => Symbol::ElementSpace,
            _ => Symbol::CharSpace,
        };
        symbols.push(symbol).unwrap();
    }
    symbols
}

#[rstest]
#[case('a', ".-")]
#[case('e', ".")]
#[case('q', "--.-")]
#[case('t', "-")]
#[case('z', "--..")]
#[case('0', "-----")]
#[case('5', ".....")]
#[case('9', "----.")]
#[case('.', ".-.-.-")]
#[case('?', "..--..")]
#[case('/', "-..-.")]
#[case('+', ".-.-.")]
#[case('@', ".--.-.")]
fn character_codes(#[case] c: char, #[case] expected: &str) {
    assert_eq!(pattern(c), Some(expected));
}

#[test]
fn every_documented_character_encodes_cleanly() {
    for c in "abcdefghijklmnopqrstuvwxyz0123456789.,:?'-/()\"=+*@ ".chars() {
        let message = c.to_string();
        let (_, ok) = encode::<32>(&message, InvalidCharPolicy::ErrorCode);
        assert!(ok, "{c:?} should encode");
    }
}

#[rstest]
#[case("SOS", "... --- ...")]
#[case("sos", "... --- ...")]
#[case("cq dx", "-.-. --.- _ -.. -..-")]
#[case("73", "--... ...--")]
fn message_sequences(#[case] message: &str, #[case] expected: &str) {
    let (symbols, ok) = encode::<128>(message, InvalidCharPolicy::ErrorCode);
    assert!(ok);
    assert_eq!(symbols, seq::<128>(expected));
}

#[rstest]
#[case(InvalidCharPolicy::ErrorCode, ".- ........ -...")]
#[case(InvalidCharPolicy::Ignore, ".- -...")]
fn invalid_character_policies(#[case] policy: InvalidCharPolicy, #[case] expected: &str) {
    let (symbols, ok) = encode::<64>("A#B", policy);
    assert!(!ok);
    assert_eq!(symbols, seq::<64>(expected));
}

#[test]
fn empty_message_is_a_success() {
    let (symbols, ok) = encode::<16>("", InvalidCharPolicy::ErrorCode);
    assert!(ok);
    assert!(symbols.is_empty());
}

#[test]
fn unmappable_message_under_ignore_is_empty() {
    let (symbols, ok) = encode::<16>("#~#", InvalidCharPolicy::Ignore);
    assert!(!ok);
    assert!(symbols.is_empty());
}

proptest! {
    #[test]
    fn encoding_is_deterministic(message in "[ -~]{0,40}") {
        for policy in [InvalidCharPolicy::Ignore, InvalidCharPolicy::ErrorCode] {
            let first = encode::<512>(&message, policy);
            let second = encode::<512>(&message, policy);
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn encoding_ignores_ascii_case(message in "[a-zA-Z0-9 ]{0,40}") {
        let lowered = message.to_ascii_lowercase();
        prop_assert_eq!(
            encode::<512>(&message, InvalidCharPolicy::ErrorCode),
            encode::<512>(&lowered, InvalidCharPolicy::ErrorCode)
        );
    }

    #[test]
    fn documented_characters_always_succeed(message in "[a-z0-9 .,:?'/()\"=+*@-]{0,40}") {
        let (_, ok) = encode::<512>(&message, InvalidCharPolicy::ErrorCode);
        prop_assert!(ok);
    }

    #[test]
    fn ignore_never_outputs_more_than_error_code(message in "[ -~]{0,40}") {
        let (ignored, _) = encode::<512>(&message, InvalidCharPolicy::Ignore);
        let (coded, _) = encode::<512>(&message, InvalidCharPolicy::ErrorCode);
        prop_assert!(ignored.len() <= coded.len());
    }
}
