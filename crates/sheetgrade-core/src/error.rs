//! Parse error types.
//!
//! Only the multi-set table parser fails hard. The question and answer-key
//! cascades report "nothing recognized" as an empty result instead.

use thiserror::Error;

use crate::model::SetLabel;

/// Errors raised while recovering structure from extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No line names all three set columns, so the text is not a multi-set table.
    #[error("could not find SET A, SET B, SET C headers in the answer table")]
    MissingHeader,

    /// Row parsing finished without a single answer for one of the sets.
    #[error("no answers found for {set}, please check the table format")]
    EmptySet { set: SetLabel },

    /// A set was requested that the parsed table does not contain.
    #[error("set '{requested}' not found, available: {}", available.join(", "))]
    UnknownSet {
        requested: String,
        available: Vec<String>,
    },
}

impl ParseError {
    /// Returns `true` for structural table failures (a missing header or an
    /// empty set column), as opposed to a bad lookup after a good parse.
    pub fn is_format_error(&self) -> bool {
        matches!(self, ParseError::MissingHeader | ParseError::EmptySet { .. })
    }

    /// The set named by this error, if any.
    pub fn set(&self) -> Option<SetLabel> {
        match self {
            ParseError::EmptySet { set } => Some(*set),
            _ => None,
        }
    }
}
