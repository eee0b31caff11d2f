//! Weight readings

use std::fmt;

use crate::error::{Error, Result};

/// A single immediate weight reading
///
/// The value is kept as the instrument printed it; this driver does not
/// decide how many decimals are meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightReading {
    /// Numeric value, as printed by the instrument
    pub value: String,

    /// Unit string (e.g. `"g"`)
    pub unit: String,
}

impl WeightReading {
    /// Parse the first line of an `IP` response: `"<value> <unit> ..."`.
    ///
    /// Tokens beyond value and unit (stability flags) are ignored.
    pub fn parse(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();

        let value = tokens
            .next()
            .ok_or_else(|| Error::MalformedReading(line.to_string()))?;
        let unit = tokens
            .next()
            .ok_or_else(|| Error::MalformedReading(line.to_string()))?;

        Ok(Self {
            value: value.to_string(),
            unit: unit.to_string(),
        })
    }
}

impl fmt::Display for WeightReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
