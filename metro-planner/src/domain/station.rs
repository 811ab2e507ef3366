//! Station identifier types.

use std::fmt;

/// The largest number of stations a network can hold: one per letter A-Z.
pub const MAX_STATIONS: usize = 26;

/// Error returned when a station label or index is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station: {reason}")]
pub struct InvalidStation {
    reason: &'static str,
}

/// A station on the metro network.
///
/// Stations are identified by a 0-based index and labelled with a single
/// uppercase letter: index 0 is `A`, index 1 is `B`, and so on. Whether the
/// station exists on a particular network is checked by the network, not
/// by this type.
///
/// # Examples
///
/// ```
/// use metro_planner::domain::Station;
///
/// let d = Station::parse("D").unwrap();
/// assert_eq!(d.index(), 3);
/// assert_eq!(d.label(), 'D');
///
/// // Lowercase is rejected by the strict parser
/// assert!(Station::parse("d").is_err());
///
/// // Only single letters are labels
/// assert!(Station::parse("DE").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Station(u8);

impl Station {
    /// Build a station from its 0-based index.
    pub fn from_index(index: usize) -> Result<Self, InvalidStation> {
        if index >= MAX_STATIONS {
            return Err(InvalidStation {
                reason: "index must be 0-25",
            });
        }
        Ok(Station(index as u8))
    }

    /// Parse a station from its label.
    ///
    /// The input must be exactly one uppercase ASCII letter (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidStation> {
        let bytes = s.as_bytes();

        if bytes.len() != 1 {
            return Err(InvalidStation {
                reason: "must be exactly 1 character",
            });
        }

        let b = bytes[0];
        if !b.is_ascii_uppercase() {
            return Err(InvalidStation {
                reason: "must be an uppercase ASCII letter A-Z",
            });
        }

        Ok(Station(b - b'A'))
    }

    /// Parse a station label typed by a user.
    ///
    /// Trims surrounding whitespace and uppercases before parsing.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStation> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the 0-based index of this station.
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the letter label of this station.
    pub fn label(&self) -> char {
        (b'A' + self.0) as char
    }
}

impl fmt::Debug for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Station({})", self.label())
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Label and index agree in both directions
        #[test]
        fn index_label_roundtrip(index in 0usize..MAX_STATIONS) {
            let station = Station::from_index(index).unwrap();
            let reparsed = Station::parse(&station.label().to_string()).unwrap();
            prop_assert_eq!(reparsed, station);
            prop_assert_eq!(reparsed.index(), index);
        }

        /// Multi-character strings are always rejected
        #[test]
        fn long_labels_rejected(s in "[A-Z]{2,6}") {
            prop_assert!(Station::parse(&s).is_err());
        }
    }
}
