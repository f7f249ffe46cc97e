//! Compact delta encoding of an edit script.
//!
//! A delta is a tab-separated list of tokens: `=n` keeps `n` code points of
//! the old text, `-n` deletes `n` code points, and `+text` inserts
//! percent-encoded text. Together with the old text it rebuilds the script.
//!
//! ```text
//! =4	-1	+ed	=6	-3	+a	=5	+old dog
//! ```

use crate::error::{DiffError, DiffResult};
use crate::op::{EditOp, EditScript, Op};

/// Characters left unescaped in insert text besides ASCII alphanumerics.
const UNRESERVED: &str = " -_.!~*'();/?:@&=+$,#";

impl EditScript {
    /// Encode the script as a delta against its old text.
    pub fn to_delta(&self) -> String {
        self.ops
            .iter()
            .map(|o| match o.op {
                Op::Insert => format!("+{}", encode_insert(&o.text)),
                Op::Delete => format!("-{}", o.text.chars().count()),
                Op::Equal => format!("={}", o.text.chars().count()),
            })
            .collect::<Vec<_>>()
            .join("\t")
    }

    /// Rebuild a script from the old text and a delta produced by
    /// [`EditScript::to_delta`].
    pub fn from_delta(old: &str, delta: &str) -> DiffResult<Self> {
        let source: Vec<char> = old.chars().collect();
        let mut pointer: usize = 0;
        let mut ops = Vec::new();

        for token in delta.split('\t') {
            let mut chars = token.chars();
            let Some(op) = chars.next() else {
                // Blank tokens are tolerated.
                continue;
            };
            let param = chars.as_str();
            match op {
                '+' => ops.push(EditOp::insert(decode_insert(param)?)),
                '-' | '=' => {
                    let count: usize = param.parse().map_err(|_| DiffError::InvalidDelta {
                        token: token.to_string(),
                        reason: "expected a code point count".into(),
                    })?;
                    let end = match pointer.checked_add(count) {
                        Some(end) if end <= source.len() => end,
                        _ => {
                            return Err(DiffError::DeltaLengthMismatch {
                                consumed: pointer.saturating_add(count),
                                expected: source.len(),
                            })
                        }
                    };
                    let text: String = source[pointer..end].iter().collect();
                    pointer = end;
                    ops.push(if op == '=' {
                        EditOp::equal(text)
                    } else {
                        EditOp::delete(text)
                    });
                }
                _ => {
                    return Err(DiffError::InvalidDelta {
                        token: token.to_string(),
                        reason: format!("unknown operation {op:?}"),
                    })
                }
            }
        }

        if pointer != source.len() {
            return Err(DiffError::DeltaLengthMismatch {
                consumed: pointer,
                expected: source.len(),
            });
        }
        Ok(Self { ops })
    }
}

fn encode_insert(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() || UNRESERVED.contains(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{byte:02X}"));
            }
        }
    }
    out
}

fn decode_insert(param: &str) -> DiffResult<String> {
    // Reject malformed escapes up front; the decoder passes them through.
    let bytes = param.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(DiffError::InvalidEscape(param.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    urlencoding::decode(param)
        .map(|s| s.into_owned())
        .map_err(|_| DiffError::InvalidEscape(param.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EditScript {
        EditScript::from(vec![
            EditOp::equal("jump"),
            EditOp::delete("s"),
            EditOp::insert("ed"),
            EditOp::equal(" over "),
            EditOp::delete("the"),
            EditOp::insert("a"),
            EditOp::equal(" lazy"),
            EditOp::insert("old dog"),
        ])
    }

    #[test]
    fn encodes_tokens() {
        assert_eq!(sample().to_delta(), "=4\t-1\t+ed\t=6\t-3\t+a\t=5\t+old dog");
    }

    #[test]
    fn decodes_against_old_text() {
        let script = sample();
        let old = script.old_text();
        assert_eq!(old, "jumps over the lazy");
        assert_eq!(EditScript::from_delta(&old, &script.to_delta()), Ok(script));
    }

    #[test]
    fn rejects_length_mismatch() {
        let delta = sample().to_delta();
        assert!(matches!(
            EditScript::from_delta("jumps over the lazyx", &delta),
            Err(DiffError::DeltaLengthMismatch { .. })
        ));
        assert!(matches!(
            EditScript::from_delta("umps over the lazy", &delta),
            Err(DiffError::DeltaLengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_counts_past_the_end() {
        let delta = format!("=1\t-{}", usize::MAX);
        assert_eq!(
            EditScript::from_delta("abc", &delta),
            Err(DiffError::DeltaLengthMismatch {
                consumed: usize::MAX,
                expected: 3,
            })
        );
        assert!(matches!(
            EditScript::from_delta("abc", &format!("={}", usize::MAX)),
            Err(DiffError::DeltaLengthMismatch { .. })
        ));
    }

    #[test]
    fn rejects_bad_escape() {
        assert!(matches!(
            EditScript::from_delta("", "+%c3%xy"),
            Err(DiffError::InvalidEscape(_))
        ));
        // Truncated multi-byte sequence.
        assert!(matches!(
            EditScript::from_delta("", "+%c3"),
            Err(DiffError::InvalidEscape(_))
        ));
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert!(matches!(
            EditScript::from_delta("abc", "*3"),
            Err(DiffError::InvalidDelta { .. })
        ));
        assert!(matches!(
            EditScript::from_delta("abc", "=x"),
            Err(DiffError::InvalidDelta { .. })
        ));
    }

    #[test]
    fn special_characters_are_escaped() {
        let script = EditScript::from(vec![
            EditOp::equal("\u{0680} \x00 \t %"),
            EditOp::delete("\u{0681} \x01 \n ^"),
            EditOp::insert("\u{0682} \x02 \\ |"),
        ]);
        let delta = script.to_delta();
        assert_eq!(delta, "=7\t-7\t+%DA%82 %02 %5C %7C");
        assert_eq!(
            EditScript::from_delta(&script.old_text(), &delta),
            Ok(script)
        );
    }

    #[test]
    fn unreserved_characters_pass_through() {
        let text = "A-Z a-z 0-9 - _ . ! ~ * ' ( ) ; / ? : @ & = + $ , # ";
        let script = EditScript::from(vec![EditOp::insert(text)]);
        let delta = script.to_delta();
        assert_eq!(delta, format!("+{text}"));
        assert_eq!(EditScript::from_delta("", &delta), Ok(script));
    }
}
