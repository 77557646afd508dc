use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::domain::errors::RosterError;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Weekday on which a team presents
///
/// # Invariants
/// - Value is in `0..=6`, counted from Sunday
///
/// # Example
/// ```
/// use presenter_rotation_api::domain::team::value_objects::PresentationDay;
///
/// let day = PresentationDay::new(3).expect("valid day");
/// assert_eq!(day.name(), "Wednesday");
/// assert!(PresentationDay::new(7).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct PresentationDay(u8);

impl PresentationDay {
    /// Validates a raw weekday number
    pub fn new(value: i64) -> Result<Self, RosterError> {
        match u8::try_from(value) {
            Ok(day) if day <= 6 => Ok(Self(day)),
            _ => Err(RosterError::validation(format!(
                "Invalid presentation_day: {} (expected 0-6)",
                value
            ))),
        }
    }

    /// Returns the day as `0..=6` with Sunday = 0
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the English day name
    pub fn name(&self) -> &'static str {
        DAY_NAMES[usize::from(self.0)]
    }

    /// Returns the matching chrono weekday
    pub fn weekday(&self) -> Weekday {
        match self.0 {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }
}

impl TryFrom<i64> for PresentationDay {
    type Error = RosterError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PresentationDay> for u8 {
    fn from(day: PresentationDay) -> Self {
        day.0
    }
}

impl std::fmt::Display for PresentationDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn accepts_every_weekday() {
        for value in 0..=6 {
            assert!(PresentationDay::new(value).is_ok());
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(PresentationDay::new(-1).is_err());
        assert!(PresentationDay::new(7).is_err());
        assert!(PresentationDay::new(256).is_err());
    }

    #[test]
    fn weekday_agrees_with_chrono_numbering() {
        for value in 0..=6 {
            let day = PresentationDay::new(value).unwrap();
            assert_eq!(
                i64::from(day.weekday().num_days_from_sunday()),
                value
            );
        }
    }

    #[test]
    fn day_display() {
        assert_eq!(PresentationDay::new(0).unwrap().to_string(), "Sunday");
        assert_eq!(PresentationDay::new(1).unwrap().to_string(), "Monday");
        assert_eq!(PresentationDay::new(6).unwrap().to_string(), "Saturday");
    }

    #[test]
    fn serde_round_trips_as_integer() {
        let day: PresentationDay = serde_json::from_str("4").unwrap();

        assert_eq!(day.name(), "Thursday");
        assert_eq!(serde_json::to_string(&day).unwrap(), "4");
        assert!(serde_json::from_str::<PresentationDay>("9").is_err());
    }
}
