use std::fmt;

use chrono::{DateTime, Datelike, Duration, IsoWeek, NaiveDate, NaiveTime, Utc};

/// A Monday-based ISO-8601 week as the half-open UTC interval `[start, end)`.
///
/// Membership is equivalent to comparing ISO year and week number, so the
/// days around New Year land in whichever ISO year owns their week.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    week: IsoWeek,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeekWindow {
    /// The ISO week that `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        let days_since_monday = i64::from(date.weekday().num_days_from_monday());
        let monday = date - Duration::days(days_since_monday);
        let start = monday.and_time(NaiveTime::MIN).and_utc();

        Self {
            week: date.iso_week(),
            start,
            end: start + Duration::weeks(1),
        }
    }

    /// The week immediately before this one.
    pub fn previous(&self) -> Self {
        Self::containing(self.start.date_naive() - Duration::days(1))
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant < self.end
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn iso_week(&self) -> IsoWeek {
        self.week
    }
}

impl fmt::Display for WeekWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.week.year(), self.week.week())
    }
}
