//! Text to Morse symbol encoding

use crate::types::{EncodedMessage, InvalidCharPolicy, Symbol};

/// Eight dits, the Morse error prosign, substituted for unmapped characters
/// under [`InvalidCharPolicy::ErrorCode`]. Longer than any table entry, so a
/// listener cannot mistake it for a letter.
pub const ERROR_CODE: &str = "........";

/// Dot/dash pattern for a normalized (lowercase) character
///
/// Covers the 26 letters, 10 digits and the common punctuation set. The
/// space character is not in the table; [`encode`] handles it as word
/// spacing.
pub const fn pattern(c: char) -> Option<&'static str> {
    let code = match c {
        // Letters
        'a' => ".-",
        'b' => "-...",
        'c' => "-.-.",
        'd' => "-..",
        'e' => ".",
        'f' => "..-.",
        'g' => "--.",
        'h' => "....",
        'i' => "..",
        'j' => ".---",
        'k' => "-.-",
        'l' => ".-..",
        'm' => "--",
        'n' => "-.",
        'o' => "---",
        'p' => ".--.",
        'q' => "--.-",
        'r' => ".-.",
        's' => "...",
        't' => "-",
        'u' => "..-",
        'v' => "...-",
        'w' => ".--",
        'x' => "-..-",
        'y' => "-.--",
        'z' => "--..",

        // Digits
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",

        // Punctuation
        '.' => ".-.-.-",
        ',' => "--..--",
        ':' => "---...",
        '?' => "..--..",
        '\'' => ".----.",
        '-' => "-....-",
        '/' => "-..-.",
        '(' => "-.--.",
        ')' => "-.--.-",
        '"' => ".-..-.",
        '=' => "-...-",
        '+' => ".-.-.",
        '*' => "-..-",
        '@' => ".--.-.",

        _ => return None,
    };
    Some(code)
}

/// Encode a message into its Morse symbol sequence
///
/// Pure and stateless: the same (message, policy) pair always produces the
/// same result. The returned flag is true only if every character was
/// translated and the sequence fit within `N` symbols; unmapped characters
/// are handled per `policy` and the rest of the message is still encoded.
pub fn encode<const N: usize>(
    message: &str,
    policy: InvalidCharPolicy,
) -> (EncodedMessage<N>, bool) {
    let mut symbols = EncodedMessage::new();
    let mut complete = true;

    for (i, raw) in message.chars().enumerate() {
        // One character space between consecutive translated characters
        if i != 0 && symbols.push(Symbol::CharSpace).is_err() {
            return (symbols, false);
        }

        let c = raw.to_ascii_lowercase();

        // A space stands alone in the output. The character spaces inserted
        // around it stretch the word break to three units, except at the
        // ends of the message where it fades into the surrounding silence.
        if c == ' ' {
            if symbols.push(Symbol::ElementSpace).is_err() {
                return (symbols, false);
            }
            continue;
        }

        match pattern(c) {
            Some(code) => {
                if push_pattern(&mut symbols, code).is_err() {
                    return (symbols, false);
                }
            }
            None => {
                complete = false;
                match policy {
                    InvalidCharPolicy::ErrorCode => {
                        if push_pattern(&mut symbols, ERROR_CODE).is_err() {
                            return (symbols, false);
                        }
                    }
                    InvalidCharPolicy::Ignore => {
                        // Retract the character space inserted for this
                        // character, so dropped characters leave no gap
                        if i != 0 {
                            symbols.pop();
                        }
                    }
                }
            }
        }
    }

    (symbols, complete)
}

/// Append a dot/dash pattern as symbols, failing on capacity overflow
fn push_pattern<const N: usize>(
    symbols: &mut EncodedMessage<N>,
    code: &str,
) -> Result<(), ()> {
    for mark in code.as_bytes() {
        let symbol = if *mark == b'-' { Symbol::Dah } else { Symbol::Dit };
        symbols.push(symbol).map_err(|_| ())?;
    }
    Ok(())
}
