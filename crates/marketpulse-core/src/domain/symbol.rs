use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker for a stock or crypto asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(ValidationError::SymbolTooLong {
                len,
                max: MAX_SYMBOL_LEN,
            });
        }

        if let Some(first) = normalized.chars().next() {
            if !first.is_ascii_alphabetic() {
                return Err(ValidationError::SymbolInvalidStart { ch: first });
            }
        }

        for (index, ch) in normalized.chars().enumerate() {
            let valid = ch.is_ascii_alphanumeric() || ch == '.' || ch == '-';
            if !valid {
                return Err(ValidationError::SymbolInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    /// Only for compile-time defaults that are known to be valid.
    pub(crate) fn from_static(value: &'static str) -> Self {
        Self(String::from(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// Currency pair such as `EUR/USD`.
///
/// Accepts `EUR/USD` or `EURUSD` on input. Displays with the slash and uses
/// the compact form in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ForexPair {
    base: String,
    quote: String,
}

impl ForexPair {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim().to_ascii_uppercase();
        let invalid = || ValidationError::InvalidForexPair {
            value: input.to_owned(),
        };

        let (base, quote) = match normalized.split_once('/') {
            Some((base, quote)) => (base.to_owned(), quote.to_owned()),
            None if normalized.len() == 6 => match (normalized.get(..3), normalized.get(3..)) {
                (Some(base), Some(quote)) => (base.to_owned(), quote.to_owned()),
                _ => return Err(invalid()),
            },
            None => return Err(invalid()),
        };

        let is_code = |code: &str| code.len() == 3 && code.chars().all(|ch| ch.is_ascii_alphabetic());
        if !is_code(&base) || !is_code(&quote) {
            return Err(invalid());
        }

        Ok(Self { base, quote })
    }

    pub(crate) fn from_static(base: &'static str, quote: &'static str) -> Self {
        Self {
            base: String::from(base),
            quote: String::from(quote),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Compact `EURUSD` form used as a path segment.
    pub fn compact(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl Display for ForexPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl TryFrom<String> for ForexPair {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ForexPair> for String {
    fn from(value: ForexPair) -> Self {
        value.to_string()
    }
}
