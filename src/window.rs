// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Calendar month window covered by a digest.
//!
//! A [`DateWindow`] is the closed day interval spanning the month that
//! precedes a reference date. Boundaries are kept both as [`NaiveDate`]
//! values and as zero-padded `YYYY-MM-DD` strings so GitHub timestamps can be
//! compared lexically without parsing.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::error::Error;

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Closed `[start, end]` interval describing the reported month.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct DateWindow
{
    start:     NaiveDate,
    end:       NaiveDate,
    start_key: String,
    end_key:   String,
}

impl DateWindow
{
    /// Builds the window for the month preceding `reference`'s month.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the preceding month falls outside the
    /// range representable by [`NaiveDate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use activity_digest::DateWindow;
    /// use chrono::NaiveDate;
    ///
    /// let reference = NaiveDate::from_ymd_opt(2024, 1, 15,).expect("valid date",);
    /// let window = DateWindow::previous_month(reference,)?;
    /// assert_eq!(window.start_str(), "2023-12-01");
    /// assert_eq!(window.end_str(), "2023-12-31");
    /// assert_eq!(window.label(), "December 2023");
    /// # Ok::<(), activity_digest::Error>(())
    /// ```
    pub fn previous_month(reference: NaiveDate,) -> Result<Self, Error,>
    {
        let out_of_range = || Error::validation(format!("no month precedes {reference}"),);

        let end = reference
            .with_day(1,)
            .and_then(|first| first.pred_opt(),)
            .ok_or_else(out_of_range,)?;
        let start = end.with_day(1,).ok_or_else(out_of_range,)?;

        Ok(Self {
            start,
            end,
            start_key: start.format(DAY_FORMAT,).to_string(),
            end_key: end.format(DAY_FORMAT,).to_string(),
        },)
    }

    /// Resolves the window from an optional override, falling back to `now`.
    ///
    /// The override accepts an RFC 3339 instant (`2023-02-01T08:00:00Z`) or a
    /// bare date (`2023-02-01`). Instants are converted to UTC before the
    /// calendar day is taken.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the override cannot be parsed.
    pub fn resolve(date_override: Option<&str,>, now: DateTime<Utc,>,) -> Result<Self, Error,>
    {
        let reference = match date_override.map(str::trim,).filter(|v| !v.is_empty(),) {
            Some(value,) => parse_reference(value,)?,
            None => now.date_naive(),
        };

        Self::previous_month(reference,)
    }

    /// First day of the window.
    pub fn start(&self,) -> NaiveDate
    {
        self.start
    }

    /// Last day of the window.
    pub fn end(&self,) -> NaiveDate
    {
        self.end
    }

    /// First day formatted as `YYYY-MM-DD`.
    pub fn start_str(&self,) -> &str
    {
        &self.start_key
    }

    /// Last day formatted as `YYYY-MM-DD`.
    pub fn end_str(&self,) -> &str
    {
        &self.end_key
    }

    /// Human readable `Month Year` label, e.g. `January 2023`.
    pub fn label(&self,) -> String
    {
        self.start.format("%B %Y",).to_string()
    }

    /// Returns `true` when the timestamp's calendar day lies inside the window.
    ///
    /// Only the leading `YYYY-MM-DD` portion of the ISO 8601 timestamp is
    /// inspected; anything shorter never matches.
    pub fn contains(&self, timestamp: &str,) -> bool
    {
        timestamp
            .get(..10,)
            .is_some_and(|day| day >= self.start_key.as_str() && day <= self.end_key.as_str(),)
    }
}

fn parse_reference(value: &str,) -> Result<NaiveDate, Error,>
{
    if let Ok(instant,) = DateTime::parse_from_rfc3339(value,) {
        return Ok(instant.with_timezone(&Utc,).date_naive(),);
    }

    NaiveDate::parse_from_str(value, DAY_FORMAT,).map_err(|e| {
        Error::validation(format!(
            "date override '{value}' must be an RFC 3339 instant or YYYY-MM-DD date: {e}"
        ),)
    },)
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    fn date(year: i32, month: u32, day: u32,) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day,).expect("valid date",)
    }

    proptest! {
        #[test]
        fn window_spans_whole_previous_month(year in 1971i32..2100, month in 1u32..=12, day in 1u32..=28) {
            let window = DateWindow::previous_month(date(year, month, day)).expect("window");
            let first_of_input = date(year, month, 1);

            prop_assert_eq!(window.start().day(), 1);
            prop_assert_eq!(window.end().succ_opt(), Some(first_of_input));
            prop_assert_eq!(window.start().month(), window.end().month());
            prop_assert_eq!(window.start().year(), window.end().year());
        }
    }

    #[test]
    fn override_selects_previous_month()
    {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0,).single().expect("valid instant",);
        let window = DateWindow::resolve(Some("2023-02-01",), now,).expect("valid window",);

        assert_eq!(window.start_str(), "2023-01-01");
        assert_eq!(window.end_str(), "2023-01-31");
        assert_eq!(window.label(), "January 2023");
    }

    #[test]
    fn january_rolls_back_to_december()
    {
        let window = DateWindow::previous_month(date(2024, 1, 31,),).expect("valid window",);
        assert_eq!(window.start(), date(2023, 12, 1));
        assert_eq!(window.end(), date(2023, 12, 31));
    }

    #[test]
    fn leap_february_ends_on_29th()
    {
        let window = DateWindow::previous_month(date(2024, 3, 10,),).expect("valid window",);
        assert_eq!(window.end_str(), "2024-02-29");
    }

    #[test]
    fn rfc3339_override_uses_utc_day()
    {
        let now = Utc::now();
        let window =
            DateWindow::resolve(Some("2023-03-01T01:30:00+05:00",), now,).expect("valid window",);
        assert_eq!(window.label(), "January 2023");
    }

    #[test]
    fn missing_override_uses_now()
    {
        let now = Utc.with_ymd_and_hms(2025, 7, 4, 12, 0, 0,).single().expect("valid instant",);
        let window = DateWindow::resolve(None, now,).expect("valid window",);
        assert_eq!(window.label(), "June 2025");
    }

    #[test]
    fn invalid_override_is_rejected()
    {
        let error = DateWindow::resolve(Some("next tuesday",), Utc::now(),)
            .expect_err("expected parse failure",);
        assert!(matches!(error, Error::Validation { .. }));
    }

    #[test]
    fn contains_compares_day_prefix_inclusively()
    {
        let window = DateWindow::previous_month(date(2023, 2, 1,),).expect("valid window",);

        assert!(window.contains("2023-01-01T00:00:00Z"));
        assert!(window.contains("2023-01-31T23:59:59Z"));
        assert!(!window.contains("2022-12-31T23:59:59Z"));
        assert!(!window.contains("2023-02-01T00:00:00Z"));
        assert!(!window.contains("2023-01"));
    }
}
