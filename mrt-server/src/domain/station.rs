//! Station identifier and stop-code types.

use std::fmt;

use super::LocalizedName;

/// Error returned when parsing an invalid station identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station id {value:?}: {reason}")]
pub struct InvalidStationId {
    value: String,
    reason: &'static str,
}

/// A station's public identifier (e.g. `BGS` for Bugis).
///
/// Station ids are non-empty sequences of uppercase ASCII letters and
/// digits. This type guarantees that any `StationId` value is valid by
/// construction.
///
/// # Examples
///
/// ```
/// use mrt_server::domain::StationId;
///
/// let bugis = StationId::parse("BGS").unwrap();
/// assert_eq!(bugis.as_str(), "BGS");
///
/// // Lowercase is rejected
/// assert!(StationId::parse("bgs").is_err());
///
/// // Empty is rejected
/// assert!(StationId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a station id from a string.
    ///
    /// The input must be non-empty and consist of uppercase ASCII letters
    /// and digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                value: s.to_string(),
                reason: "must not be empty",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidStationId {
                    value: s.to_string(),
                    reason: "must be uppercase ASCII letters and digits",
                });
            }
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error returned when parsing an invalid stop code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop code {value:?}: {reason}")]
pub struct InvalidStopCode {
    value: String,
    reason: &'static str,
}

/// A line-stop code: a station's identity on one particular line.
///
/// A station that sits on two lines carries two stop codes, one per line
/// (e.g. `EW12` and `DT14` both denote Bugis). Stop codes are unique
/// across the whole network: each code belongs to exactly one station and
/// exactly one line.
///
/// Codes start with an uppercase ASCII letter, followed by uppercase
/// letters, digits, and dashes.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StopCode(String);

impl StopCode {
    /// Parse a stop code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStopCode> {
        let Some(first) = s.bytes().next() else {
            return Err(InvalidStopCode {
                value: s.to_string(),
                reason: "must not be empty",
            });
        };

        if !first.is_ascii_uppercase() {
            return Err(InvalidStopCode {
                value: s.to_string(),
                reason: "must start with an uppercase ASCII letter",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() && b != b'-' {
                return Err(InvalidStopCode {
                    value: s.to_string(),
                    reason: "must be uppercase ASCII letters, digits, and dashes",
                });
            }
        }

        Ok(StopCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopCode({})", self.0)
    }
}

impl fmt::Display for StopCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A physical station: its id, display names, and the stop codes it
/// carries, one per line it sits on.
///
/// The order of `codes` is meaningful: adjacent codes in the list form the
/// station's transfer chain when the graph is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    /// Public identifier
    pub id: StationId,
    /// Display names
    pub name: LocalizedName,
    /// Stop codes, one per line through this station. May be empty for a
    /// station that sits on no line.
    pub codes: Vec<StopCode>,
}

impl Station {
    /// Creates a station from its parts.
    pub fn new(id: StationId, name: LocalizedName, codes: Vec<StopCode>) -> Self {
        Self { id, name, codes }
    }

    /// Returns true if this station carries the given stop code.
    pub fn owns(&self, code: &StopCode) -> bool {
        self.codes.iter().any(|c| c == code)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn valid_station_id() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z][A-Z0-9]{0,5}").unwrap()
    }

    fn valid_stop_code() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z][A-Z0-9-]{0,7}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn station_id_roundtrip(s in valid_station_id()) {
            let id = StationId::parse(&s).unwrap();
            prop_assert_eq!(id.as_str(), s.as_str());
        }

        #[test]
        fn stop_code_roundtrip(s in valid_stop_code()) {
            let code = StopCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Lowercase input is always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,6}") {
            prop_assert!(StationId::parse(&s).is_err());
            prop_assert!(StopCode::parse(&s).is_err());
        }

        /// Codes may not start with a digit or dash
        #[test]
        fn leading_non_letter_rejected(s in "[0-9-][A-Z0-9-]{0,5}") {
            prop_assert!(StopCode::parse(&s).is_err());
        }
    }
}
