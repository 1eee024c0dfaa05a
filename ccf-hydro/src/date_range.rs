use chrono::NaiveDate;
use std::mem::replace;

/// A calendar-day iterator that yields each date from the start date
/// through the end date (inclusive).
///
/// Used to enumerate every UTC day spanned by an hourly record set so that
/// days without observations still get a daily record.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Number of days left in the range, zero if start is after end.
    pub fn num_days(&self) -> usize {
        let days = (self.1 - self.0).num_days() + 1;
        usize::try_from(days).unwrap_or(0)
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 > self.1 {
            return None;
        }
        match self.0.succ_opt() {
            Some(next) => Some(replace(&mut self.0, next)),
            None => {
                // NaiveDate::MAX has no successor; close the range after it.
                let last = self.0;
                self.1 = last.pred_opt().unwrap_or(last);
                self.0 = last;
                Some(last)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.num_days();
        (n, Some(n))
    }
}
