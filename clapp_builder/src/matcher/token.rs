#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A token of the normalized sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub(crate) text: String,
    /// The index of the original token this was produced from.
    pub(crate) source: usize,
    /// The character offset into the original tokens, laid end to end.
    pub(crate) offset: usize,
}

impl Token {
    fn new(text: impl Into<String>, source: usize, offset: usize) -> Self {
        Self {
            text: text.into(),
            source,
            offset,
        }
    }

    pub(crate) fn is_dashed(&self) -> bool {
        self.text.starts_with('-')
    }
}

/// Produce the normalized token sequence.
///
/// 1. `--key=value` and `-k=value` split at the first `=`.
/// 2. `-abc` expands to `-a -b -c`.
///
/// The input is never mutated; each output token remembers where it came from.
pub(crate) fn normalize(tokens: &[&str]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut base = 0;

    for (source, token) in tokens.iter().enumerate() {
        let (key, value) = match token.split_once('=') {
            Some((key, value)) if key.starts_with('-') => (key, Some(value)),
            _ => (*token, None),
        };

        let key_length = key.chars().count();

        if key_length > 2 && key.starts_with('-') && !key.starts_with("--") {
            for (position, c) in key.chars().enumerate().skip(1) {
                out.push(Token::new(format!("-{c}"), source, base + position));
            }
        } else {
            out.push(Token::new(key, source, base));
        }

        if let Some(value) = value {
            out.push(Token::new(value, source, base + key_length + 1));
        }

        base += token.chars().count();
    }

    #[cfg(feature = "tracing_debug")]
    {
        debug!(
            "Normalized {tokens:?} into {:?}.",
            out.iter().map(|t| t.text.as_str()).collect::<Vec<&str>>()
        );
    }

    out
}
