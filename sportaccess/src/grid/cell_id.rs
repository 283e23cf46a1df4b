use crate::AccessError;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// identifier of a YKR grid cell (the `YKR_ID` attribute). stable across runs and
/// shared by the grid dataset and the travel time matrix files.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CellId(pub u64);

impl CellId {
    /// interprets a floating point attribute value (as stored in dBase numeric fields)
    /// as a cell identifier. fails on fractional, negative, non-finite or out of
    /// range values.
    pub fn try_from_f64(value: f64) -> Result<CellId, AccessError> {
        // u64::MAX as f64 rounds up to 2^64, which is itself out of range
        if value.is_finite() && value >= 0.0 && value < u64::MAX as f64 && value.fract() == 0.0 {
            Ok(CellId(value as u64))
        } else {
            Err(AccessError::InvalidInputError(format!(
                "'{value}' is not a valid cell identifier"
            )))
        }
    }
}

impl From<u64> for CellId {
    fn from(value: u64) -> Self {
        CellId(value)
    }
}

impl Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CellId {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<u64>() {
            Ok(id) => Ok(CellId(id)),
            // dBase exports sometimes carry integral ids as "5785640.0"
            Err(_) => match trimmed.parse::<f64>() {
                Ok(f) => CellId::try_from_f64(f),
                Err(_) => Err(AccessError::InvalidInputError(format!(
                    "'{s}' is not a valid cell identifier"
                ))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CellId;
    use std::str::FromStr;

    #[test]
    fn test_parse_integral_forms() {
        assert_eq!(CellId::from_str("5785640").unwrap(), CellId(5785640));
        assert_eq!(CellId::from_str(" 5785640 ").unwrap(), CellId(5785640));
        assert_eq!(CellId::from_str("5785640.0").unwrap(), CellId(5785640));
    }

    #[test]
    fn test_parse_rejects_non_ids() {
        assert!(CellId::from_str("abc").is_err());
        assert!(CellId::from_str("-5").is_err());
        assert!(CellId::from_str("1e30").is_err());
        assert!(CellId::try_from_f64(2f64.powi(64)).is_err());
        assert!(CellId::from_str("12.5").is_err());
        assert!(CellId::from_str("").is_err());
    }
}
