//! User-activatable controls and their textual form.

use core::fmt;
use core::num::ParseIntError;
use core::str::FromStr;

use thiserror::Error;

/// One control on the rendered counter surface.
///
/// Each control maps to exactly one counter operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Increment,
    Reset,
    Decrement,
    IncrementBy(i64),
}

impl Control {
    /// Label shown on the control.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Control::Increment => f.write_str("Increment"),
            Control::Reset => f.write_str("Reset"),
            Control::Decrement => f.write_str("Decrement"),
            Control::IncrementBy(amount) => write!(f, "Increment by {amount}"),
        }
    }
}

/// Errors produced when parsing a [`Control`] from console input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseControlError {
    #[error("empty input")]
    Empty,

    #[error("unknown control: {0:?}")]
    Unknown(String),

    #[error("invalid amount {input:?}: {source}")]
    InvalidAmount {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

impl FromStr for Control {
    type Err = ParseControlError;

    /// Accepts the control labels case-insensitively plus a few shorthands:
    /// `inc`/`+`, `0`, `dec`/`-`, `by <n>` and `+<n>`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        let words: Vec<&str> = normalized.split_whitespace().collect();

        match words.as_slice() {
            [] => Err(ParseControlError::Empty),
            ["increment" | "inc" | "+"] => Ok(Control::Increment),
            ["reset" | "0"] => Ok(Control::Reset),
            ["decrement" | "dec" | "-"] => Ok(Control::Decrement),
            ["increment", "by", amount] | ["by", amount] => parse_amount(amount),
            [single] if single.len() > 1 && single.starts_with('+') => parse_amount(&single[1..]),
            _ => Err(ParseControlError::Unknown(input.trim().to_string())),
        }
    }
}

fn parse_amount(text: &str) -> Result<Control, ParseControlError> {
    text.parse::<i64>()
        .map(Control::IncrementBy)
        .map_err(|source| ParseControlError::InvalidAmount {
            input: text.to_string(),
            source,
        })
}
