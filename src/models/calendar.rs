use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ProcessingError, Result};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Season of each month, indexed by `Month as usize`
pub const SEASON_BY_MONTH: [Season; 12] = [
    Season::Winter,
    Season::Winter,
    Season::Spring,
    Season::Spring,
    Season::Spring,
    Season::Summer,
    Season::Summer,
    Season::Summer,
    Season::Fall,
    Season::Fall,
    Season::Fall,
    Season::Winter,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from a 1-indexed ordinal (1 = January)
    pub fn from_ordinal(ordinal: u32) -> Option<Self> {
        ordinal
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index as usize))
            .copied()
    }

    pub fn ordinal(&self) -> u32 {
        *self as u32 + 1
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[*self as usize]
    }

    pub fn season(&self) -> Season {
        SEASON_BY_MONTH[*self as usize]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self> {
        MONTH_NAMES
            .iter()
            .position(|name| *name == s)
            .map(|index| Self::ALL[index])
            .ok_or_else(|| ProcessingError::Transform(format!("Unknown month name: '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_from_ordinal() {
        assert_eq!(Month::from_ordinal(1), Some(Month::January));
        assert_eq!(Month::from_ordinal(3), Some(Month::March));
        assert_eq!(Month::from_ordinal(12), Some(Month::December));
        assert_eq!(Month::from_ordinal(0), None);
        assert_eq!(Month::from_ordinal(13), None);
    }

    #[test]
    fn test_month_names_line_up_with_variants() {
        for (ordinal, month) in (1..=12).zip(Month::ALL) {
            assert_eq!(month.ordinal(), ordinal);
            assert_eq!(month.name(), MONTH_NAMES[ordinal as usize - 1]);
            assert_eq!(month.name().parse::<Month>().unwrap(), month);
        }
        assert!("Smarch".parse::<Month>().is_err());
    }

    #[test]
    fn test_season_table() {
        let expected = [
            (Month::March, Season::Spring),
            (Month::April, Season::Spring),
            (Month::May, Season::Spring),
            (Month::June, Season::Summer),
            (Month::July, Season::Summer),
            (Month::August, Season::Summer),
            (Month::September, Season::Fall),
            (Month::October, Season::Fall),
            (Month::November, Season::Fall),
            (Month::December, Season::Winter),
            (Month::January, Season::Winter),
            (Month::February, Season::Winter),
        ];

        for (month, season) in expected {
            assert_eq!(month.season(), season, "{}", month);
        }
    }

    #[test]
    fn test_every_season_has_three_months() {
        for season in Season::ALL {
            let months = SEASON_BY_MONTH.iter().filter(|s| **s == season).count();
            assert_eq!(months, 3, "{}", season);
        }
    }
}
