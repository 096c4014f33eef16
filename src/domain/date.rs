//! Date value used by task nodes.
//!
//! Records carry epoch seconds; nodes carry [`GanttDate`]. The conversion and
//! all day arithmetic happen in the UTC offset of a [`Calendar`].

use std::fmt;

use chrono::{DateTime, FixedOffset, Months, NaiveTime, Offset, Utc};

/// An instant on the chart timeline, bound to a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GanttDate(DateTime<FixedOffset>);

impl GanttDate {
    /// Builds a date from epoch seconds.
    ///
    /// Epochs outside chrono's representable range saturate to the first or
    /// last instant whose local time in `offset` is still representable.
    pub fn from_unix(secs: i64, offset: FixedOffset) -> Self {
        let shift = i64::from(offset.local_minus_utc());
        let lo = DateTime::<Utc>::MIN_UTC.timestamp() + (-shift).max(0);
        let hi = DateTime::<Utc>::MAX_UTC.timestamp() - shift.max(0);
        let utc = DateTime::<Utc>::from_timestamp(secs.clamp(lo, hi), 0).unwrap_or_default();
        Self(utc.with_timezone(&offset))
    }

    /// Epoch seconds of this instant.
    pub fn unix_time(&self) -> i64 {
        self.0.timestamp()
    }

    pub fn offset(&self) -> FixedOffset {
        *self.0.offset()
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.0
    }

    /// Shifts by whole calendar months; negative values go back.
    ///
    /// The day of month is clamped to the last day of the target month
    /// (Mar 31 - 1 month = Feb 28/29). Overflow leaves the date unchanged.
    pub fn add_months(&self, months: i32) -> Self {
        let delta = Months::new(months.unsigned_abs());
        let shifted = if months >= 0 {
            self.0.checked_add_months(delta)
        } else {
            self.0.checked_sub_months(delta)
        };
        Self(shifted.unwrap_or(self.0))
    }

    /// 00:00:00 of the same calendar day.
    pub fn start_of_day(&self) -> Self {
        self.at_time(NaiveTime::MIN)
    }

    /// 23:59:59 of the same calendar day.
    pub fn end_of_day(&self) -> Self {
        self.at_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
    }

    /// Same local day at `time`; unchanged when the result falls outside
    /// chrono's range.
    fn at_time(&self, time: NaiveTime) -> Self {
        let local = self.0.date_naive().and_time(time);
        let secs = local.and_utc().timestamp() - i64::from(self.offset().local_minus_utc());
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|utc| Self(utc.with_timezone(&self.offset())))
            .unwrap_or(*self)
    }
}

impl fmt::Display for GanttDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S %:z"))
    }
}

/// Date context a tree is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
    backfill_months: u32,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            offset: utc_offset(),
            backfill_months: 1,
        }
    }
}

impl Calendar {
    pub fn new(offset: FixedOffset, backfill_months: u32) -> Self {
        Self {
            offset,
            backfill_months,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Length of the range derived when a record supplies only one bound.
    pub fn backfill_months(&self) -> u32 {
        self.backfill_months
    }

    /// Converts an epoch-seconds value from a record into a date.
    pub fn normalize(&self, secs: i64) -> GanttDate {
        GanttDate::from_unix(secs, self.offset)
    }

    /// Derives the missing bound of a half-open range.
    ///
    /// Returns the pair unchanged when both or neither bound is present.
    pub fn backfill(
        &self,
        start: Option<GanttDate>,
        end: Option<GanttDate>,
    ) -> (Option<GanttDate>, Option<GanttDate>) {
        let months = i32::try_from(self.backfill_months).unwrap_or(i32::MAX);
        match (start, end) {
            (Some(start), None) => (Some(start), Some(start.add_months(months).end_of_day())),
            (None, Some(end)) => (Some(end.add_months(-months).start_of_day()), Some(end)),
            other => other,
        }
    }
}

fn utc_offset() -> FixedOffset {
    Utc.fix()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> i64 {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap().timestamp()
    }

    #[test]
    fn given_mid_day_when_snapping_then_hits_day_bounds() {
        let date = GanttDate::from_unix(utc(2024, 1, 15, 10, 30, 0), utc_offset());
        assert_eq!(date.start_of_day().unix_time(), utc(2024, 1, 15, 0, 0, 0));
        assert_eq!(date.end_of_day().unix_time(), utc(2024, 1, 15, 23, 59, 59));
    }

    #[test]
    fn given_month_end_when_going_back_one_month_then_clamps_day() {
        let date = GanttDate::from_unix(utc(2024, 3, 31, 12, 0, 0), utc_offset());
        assert_eq!(date.add_months(-1).unix_time(), utc(2024, 2, 29, 12, 0, 0));
    }

    #[test]
    fn given_positive_offset_when_snapping_then_uses_local_day() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        // 23:30 UTC on Jan 15 is 01:30 on Jan 16 at +02:00
        let date = GanttDate::from_unix(utc(2024, 1, 15, 23, 30, 0), plus_two);
        assert_eq!(date.start_of_day().unix_time(), utc(2024, 1, 15, 22, 0, 0));
    }

    #[test]
    fn given_out_of_range_epoch_when_normalizing_then_saturates() {
        let date = GanttDate::from_unix(i64::MAX, utc_offset());
        assert_eq!(date.unix_time(), DateTime::<Utc>::MAX_UTC.timestamp());
    }

    #[rstest]
    #[case(i64::MAX, 2 * 3600)]
    #[case(i64::MIN, -5 * 3600)]
    #[case(i64::MAX, -5 * 3600)]
    #[case(i64::MIN, 2 * 3600)]
    fn given_extreme_epoch_and_offset_when_snapping_then_stays_representable(
        #[case] secs: i64,
        #[case] offset_secs: i32,
    ) {
        let offset = FixedOffset::east_opt(offset_secs).unwrap();
        let date = GanttDate::from_unix(secs, offset);

        let start = date.start_of_day();
        let end = date.end_of_day();
        assert!(start <= date && date <= end);
        assert!(!date.to_string().is_empty());

        let calendar = Calendar::new(offset, 1);
        let (s, e) = calendar.backfill(Some(date), None);
        assert!(s <= e);
        let (s, e) = calendar.backfill(None, Some(date));
        assert!(s <= e);
    }

    #[test]
    fn given_only_one_bound_when_backfilling_then_derives_the_other() {
        let calendar = Calendar::default();
        let start = calendar.normalize(utc(2024, 1, 15, 10, 30, 0));
        let (s, e) = calendar.backfill(Some(start), None);
        assert_eq!(s, Some(start));
        assert_eq!(e.unwrap().unix_time(), utc(2024, 2, 15, 23, 59, 59));

        assert_eq!(calendar.backfill(None, None), (None, None));
    }
}
