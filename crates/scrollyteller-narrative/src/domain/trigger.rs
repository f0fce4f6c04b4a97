//! Trigger decomposition.
//!
//! Triggers are author-edited strings such as `"year:1962 snippet:intro"`.
//! Decomposition is best-effort: well-formed `key:value` tokens land in the
//! state mapping and anything else is counted and dropped.

use std::collections::BTreeMap;

use serde::Serialize;

/// Key/value state parsed from a trigger.
pub type TriggerState = BTreeMap<String, String>;

/// Outcome of decomposing a trigger string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggerDecomposition {
    /// Parsed pairs. Later duplicates overwrite earlier ones.
    pub state: TriggerState,
    /// Number of tokens dropped because they had no key/value separator or
    /// an empty key.
    pub dropped: usize,
}

/// Separates a key from its value inside one token.
pub const PAIR_SEPARATOR: char = ':';

/// Splits `trigger` into `key:value` pairs.
///
/// Tokens are separated by whitespace or commas and trimmed. Each token is
/// split at its first `:`; the key must be non-empty, the value may be empty.
#[must_use]
pub fn decompose_trigger(trigger: &str) -> TriggerDecomposition {
    let mut decomposition = TriggerDecomposition::default();

    for token in trigger
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
    {
        match token.split_once(PAIR_SEPARATOR) {
            Some((key, value)) if !key.trim().is_empty() => {
                decomposition
                    .state
                    .insert(key.trim().to_owned(), value.trim().to_owned());
            }
            _ => decomposition.dropped += 1,
        }
    }

    decomposition
}
