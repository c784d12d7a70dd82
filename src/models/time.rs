use serde::*;

/// Minutes in a calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Clock time within a working day, stored as minute-of-day.
/// 0 = midnight, 1439 = 23:59.
///
/// Slots are displayed and persisted with a 12-hour label ("9:00 AM"), but
/// all comparisons and arithmetic use the minute-of-day value so label
/// formatting can never change slot identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Create from a minute-of-day value. Returns `None` past 23:59.
    pub fn from_minutes(minute_of_day: u16) -> Option<Self> {
        if minute_of_day < MINUTES_PER_DAY {
            Some(Self(minute_of_day))
        } else {
            None
        }
    }

    /// Create from 24-hour clock components.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self((hour * 60 + minute) as u16))
    }

    /// Raw minute-of-day value.
    pub fn minute_of_day(&self) -> u16 {
        self.0
    }

    /// Hour component (0-23).
    pub fn hour(&self) -> u32 {
        u32::from(self.0) / 60
    }

    /// Minute component (0-59).
    pub fn minute(&self) -> u32 {
        u32::from(self.0) % 60
    }

    /// Advance by `minutes`, or `None` when the result would pass midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let total = u32::from(self.0) + minutes;
        u16::try_from(total).ok().and_then(Self::from_minutes)
    }

    /// Display label in the portal's 12-hour format, e.g. "9:00 AM",
    /// "12:30 PM". No leading zero on the hour.
    pub fn label(&self) -> String {
        let meridiem = if self.hour() < 12 { "AM" } else { "PM" };
        let hour12 = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour12, self.minute(), meridiem)
    }

    /// Parse a 12-hour label back into a clock time.
    ///
    /// Accepts exactly the shape `label()` produces (meridiem case is
    /// tolerated). Returns `None` for anything else.
    pub fn parse_label(label: &str) -> Option<Self> {
        let (time_part, meridiem) = label.trim().split_once(' ')?;
        let (hour_part, minute_part) = time_part.split_once(':')?;
        let hour12: u32 = hour_part.parse().ok()?;
        let minute: u32 = minute_part.parse().ok()?;
        if !(1..=12).contains(&hour12) || minute > 59 {
            return None;
        }
        let hour = match meridiem.to_ascii_uppercase().as_str() {
            "AM" => hour12 % 12,
            "PM" => hour12 % 12 + 12,
            _ => return None,
        };
        Self::from_hm(hour, minute)
    }

    /// Convert to chrono NaiveTime.
    pub fn to_naive_time(&self) -> chrono::NaiveTime {
        chrono::NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
            .unwrap_or(chrono::NaiveTime::MIN)
    }
}

impl From<chrono::NaiveTime> for ClockTime {
    fn from(t: chrono::NaiveTime) -> Self {
        use chrono::Timelike;
        Self((t.hour() * 60 + t.minute()) as u16)
    }
}

impl std::fmt::Display for ClockTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::ClockTime;

    #[test]
    fn test_from_hm() {
        let t = ClockTime::from_hm(9, 30).unwrap();
        assert_eq!(t.hour(), 9);
        assert_eq!(t.minute(), 30);
        assert_eq!(t.minute_of_day(), 570);
    }

    #[test]
    fn test_from_hm_rejects_out_of_range() {
        assert!(ClockTime::from_hm(24, 0).is_none());
        assert!(ClockTime::from_hm(9, 60).is_none());
    }

    #[test]
    fn test_from_minutes_bounds() {
        assert!(ClockTime::from_minutes(0).is_some());
        assert!(ClockTime::from_minutes(1439).is_some());
        assert!(ClockTime::from_minutes(1440).is_none());
    }

    #[test]
    fn test_label_morning() {
        assert_eq!(ClockTime::from_hm(9, 0).unwrap().label(), "9:00 AM");
        assert_eq!(ClockTime::from_hm(10, 5).unwrap().label(), "10:05 AM");
    }

    #[test]
    fn test_label_afternoon() {
        assert_eq!(ClockTime::from_hm(13, 30).unwrap().label(), "1:30 PM");
        assert_eq!(ClockTime::from_hm(23, 59).unwrap().label(), "11:59 PM");
    }

    #[test]
    fn test_label_noon_and_midnight() {
        assert_eq!(ClockTime::from_hm(0, 0).unwrap().label(), "12:00 AM");
        assert_eq!(ClockTime::from_hm(12, 0).unwrap().label(), "12:00 PM");
    }

    #[test]
    fn test_parse_label_roundtrip() {
        for minute in [0u16, 1, 540, 570, 719, 720, 721, 1439] {
            let t = ClockTime::from_minutes(minute).unwrap();
            assert_eq!(ClockTime::parse_label(&t.label()), Some(t));
        }
    }

    #[test]
    fn test_parse_label_tolerates_case_and_whitespace() {
        assert_eq!(
            ClockTime::parse_label(" 9:00 am "),
            ClockTime::from_hm(9, 0)
        );
    }

    #[test]
    fn test_parse_label_rejects_garbage() {
        assert!(ClockTime::parse_label("").is_none());
        assert!(ClockTime::parse_label("9:00").is_none());
        assert!(ClockTime::parse_label("0:30 AM").is_none());
        assert!(ClockTime::parse_label("13:00 PM").is_none());
        assert!(ClockTime::parse_label("9:75 AM").is_none());
        assert!(ClockTime::parse_label("nine AM").is_none());
    }

    #[test]
    fn test_checked_add_minutes() {
        let t = ClockTime::from_hm(23, 30).unwrap();
        assert_eq!(t.checked_add_minutes(29), ClockTime::from_hm(23, 59));
        assert!(t.checked_add_minutes(30).is_none());
    }

    #[test]
    fn test_ordering() {
        let a = ClockTime::from_hm(9, 0).unwrap();
        let b = ClockTime::from_hm(9, 30).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_naive_time_conversion() {
        let t: ClockTime = chrono::NaiveTime::from_hms_opt(14, 45, 12).unwrap().into();
        assert_eq!(t.hour(), 14);
        assert_eq!(t.minute(), 45);
        assert_eq!(t.to_naive_time().format("%H:%M").to_string(), "14:45");
    }
}
