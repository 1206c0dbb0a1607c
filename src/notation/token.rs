use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{Move, MoveParseError};

const PREFIX: char = 'M';

/// Compact textual move token: `"M"` followed by coordinate text.
///
/// Tokens built from a [`Move`] carry its UCI text (`Me2e4`). The PGN
/// tokenizer also emits verbatim tokens (`M` + raw movetext) for pieces of
/// text it could not resolve; those fail to decode against any position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MoveToken(String);

impl MoveToken {
    #[must_use]
    pub fn from_move(mv: Move) -> Self {
        MoveToken(format!("{PREFIX}{mv}"))
    }

    /// Wrap unresolved movetext as a token.
    #[must_use]
    pub fn verbatim(raw: &str) -> Self {
        MoveToken(format!("{PREFIX}{raw}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text after the prefix
    #[must_use]
    pub fn body(&self) -> &str {
        &self.0[PREFIX.len_utf8()..]
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for MoveToken {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(PREFIX) {
            Ok(MoveToken(s.to_string()))
        } else {
            Err(MoveParseError::MissingPrefix {
                token: s.to_string(),
            })
        }
    }
}

impl From<Move> for MoveToken {
    fn from(mv: Move) -> Self {
        MoveToken::from_move(mv)
    }
}
