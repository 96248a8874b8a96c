//! Monthly date windows
//!
//! A [`MonthlySchedule`] turns an anchor date and a terminal date into a
//! sequence of contiguous one-month [`DateWindow`]s. Month arithmetic uses
//! chrono's `checked_add_months`, which clamps to the last day of a shorter
//! month (2023-01-31 + 1 month = 2023-02-28).
//!
//! Window `i` always starts at `anchor + i months` and ends at
//! `anchor + (i + 1) months`, so the windows stay contiguous and a clamped
//! month never shifts the windows after it.

use super::errors::BatchError;
use super::result::Result;
use chrono::{Months, NaiveDate};
use std::fmt;

/// Format used in output directory names
pub const COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Format handed to the exporter
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// First day of the default schedule
pub fn default_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 1, 1).expect("2023-01-01 is a valid date")
}

/// Terminal date of the default schedule
pub fn default_terminal() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).expect("2024-01-01 is a valid date")
}

/// A one-month interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Window covering the calendar month that begins at `start`
    ///
    /// # Errors
    ///
    /// Returns a validation error if `start + 1 month` is out of chrono's range.
    pub fn starting(start: NaiveDate) -> Result<Self> {
        let end = add_months(start, 1)?;
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// `YYYYMMDD_YYYYMMDD`, used as the leaf directory name
    pub fn compact_label(&self) -> String {
        format!(
            "{}_{}",
            self.start.format(COMPACT_DATE_FORMAT),
            self.end.format(COMPACT_DATE_FORMAT)
        )
    }

    pub fn start_iso(&self) -> String {
        self.start.format(ISO_DATE_FORMAT).to_string()
    }

    pub fn end_iso(&self) -> String {
        self.end.format(ISO_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start_iso(), self.end_iso())
    }
}

/// Anchor and terminal date for monthly window generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlySchedule {
    anchor: NaiveDate,
    terminal: NaiveDate,
}

impl MonthlySchedule {
    /// Creates a schedule running from `anchor` up to `terminal`
    ///
    /// # Errors
    ///
    /// Returns a validation error unless `anchor` is strictly before `terminal`.
    pub fn new(anchor: NaiveDate, terminal: NaiveDate) -> Result<Self> {
        if anchor >= terminal {
            return Err(BatchError::Validation(format!(
                "Schedule start {anchor} must be before end {terminal}"
            )));
        }
        Ok(Self { anchor, terminal })
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    pub fn terminal(&self) -> NaiveDate {
        self.terminal
    }

    /// Iterates the windows of this schedule in chronological order
    ///
    /// Iteration ends at the first window whose start reaches the terminal
    /// date. When the terminal is month-aligned with the anchor this is the
    /// exact-equality stop; otherwise the last window overshoots the terminal
    /// instead of looping forever.
    pub fn windows(&self) -> MonthlyWindows {
        MonthlyWindows {
            anchor: self.anchor,
            terminal: self.terminal,
            index: 0,
        }
    }
}

impl Default for MonthlySchedule {
    fn default() -> Self {
        Self {
            anchor: default_anchor(),
            terminal: default_terminal(),
        }
    }
}

/// Iterator over the windows of a [`MonthlySchedule`]
#[derive(Debug, Clone)]
pub struct MonthlyWindows {
    anchor: NaiveDate,
    terminal: NaiveDate,
    index: u32,
}

impl Iterator for MonthlyWindows {
    type Item = DateWindow;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.anchor.checked_add_months(Months::new(self.index))?;
        if start >= self.terminal {
            return None;
        }
        let end = self
            .anchor
            .checked_add_months(Months::new(self.index.checked_add(1)?))?;
        self.index += 1;
        Some(DateWindow { start, end })
    }
}

fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        BatchError::Validation(format!("{date} + {months} month(s) is out of range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_schedule_has_twelve_contiguous_windows() {
        let windows: Vec<DateWindow> = MonthlySchedule::default().windows().collect();

        assert_eq!(windows.len(), 12);
        assert_eq!(windows[0].start(), ymd(2023, 1, 1));
        assert_eq!(windows[11].end(), ymd(2024, 1, 1));
        for pair in windows.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
            assert!(pair[0].start() < pair[0].end());
        }
    }

    #[test]
    fn test_window_starting_adds_one_calendar_month() {
        let window = DateWindow::starting(ymd(2023, 3, 1)).unwrap();
        assert_eq!(window.end(), ymd(2023, 4, 1));
        assert_eq!(window.compact_label(), "20230301_20230401");
        assert_eq!(window.start_iso(), "2023-03-01");
        assert_eq!(window.end_iso(), "2023-04-01");
    }

    #[test]
    fn test_month_end_anchor_clamps_without_drift() {
        let schedule = MonthlySchedule::new(ymd(2023, 1, 31), ymd(2023, 6, 1)).unwrap();
        let starts: Vec<NaiveDate> = schedule.windows().map(|w| w.start()).collect();

        assert_eq!(
            starts,
            vec![
                ymd(2023, 1, 31),
                ymd(2023, 2, 28),
                ymd(2023, 3, 31),
                ymd(2023, 4, 30),
                ymd(2023, 5, 31),
            ]
        );
    }

    #[test]
    fn test_leap_year_clamp() {
        let window = DateWindow::starting(ymd(2024, 1, 31)).unwrap();
        assert_eq!(window.end(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_misaligned_terminal_still_terminates() {
        let schedule = MonthlySchedule::new(ymd(2023, 1, 1), ymd(2023, 3, 15)).unwrap();
        let windows: Vec<DateWindow> = schedule.windows().collect();

        assert_eq!(windows.len(), 3);
        assert_eq!(windows[2].start(), ymd(2023, 3, 1));
        assert_eq!(windows[2].end(), ymd(2023, 4, 1));
    }

    #[test]
    fn test_schedule_rejects_inverted_range() {
        assert!(MonthlySchedule::new(ymd(2024, 1, 1), ymd(2023, 1, 1)).is_err());
        assert!(MonthlySchedule::new(ymd(2023, 1, 1), ymd(2023, 1, 1)).is_err());
    }

    #[test]
    fn test_window_display() {
        let window = DateWindow::starting(ymd(2023, 12, 1)).unwrap();
        assert_eq!(window.to_string(), "2023-12-01..2024-01-01");
    }
}
