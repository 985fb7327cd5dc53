//! Inclusive date-time windows used to bound queries.

use time::{Date, PrimitiveDateTime, Time};

use crate::error::WindowError;

/// Last representable moment of a day at millisecond precision.
pub const END_OF_DAY: Time = time::macros::time!(23:59:59.999);

/// Inclusive `[begin, end]` range of timestamps.
///
/// A window can never be inverted: [`DateWindow::new`] rejects
/// `begin > end` instead of swapping or clamping the bounds.
///
/// # Example
///
/// ```
/// use fluxview_types::DateWindow;
/// use time::macros::{date, datetime};
///
/// let window = DateWindow::whole_days(date!(2022-01-12), date!(2022-01-14))?;
/// assert_eq!(window.begin(), datetime!(2022-01-12 00:00:00));
/// assert_eq!(window.end(), datetime!(2022-01-14 23:59:59.999));
///
/// assert!(DateWindow::whole_days(date!(2022-01-14), date!(2022-01-12)).is_err());
/// # Ok::<(), fluxview_types::WindowError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateWindow {
    begin: PrimitiveDateTime,
    end: PrimitiveDateTime,
}

impl DateWindow {
    /// Create a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Inverted`] if `begin` is after `end`.
    pub fn new(begin: PrimitiveDateTime, end: PrimitiveDateTime) -> Result<Self, WindowError> {
        if begin > end {
            return Err(WindowError::Inverted { begin, end });
        }
        Ok(Self { begin, end })
    }

    /// The window covering one calendar day, `00:00:00.000` to `23:59:59.999`.
    #[must_use]
    pub fn day(date: Date) -> Self {
        Self {
            begin: date.midnight(),
            end: date.with_time(END_OF_DAY),
        }
    }

    /// The window covering every day from `first` through `last`.
    ///
    /// # Errors
    ///
    /// Returns [`WindowError::Inverted`] if `first` is after `last`.
    pub fn whole_days(first: Date, last: Date) -> Result<Self, WindowError> {
        Self::new(first.midnight(), last.with_time(END_OF_DAY))
    }

    #[must_use]
    pub fn begin(&self) -> PrimitiveDateTime {
        self.begin
    }

    #[must_use]
    pub fn end(&self) -> PrimitiveDateTime {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn test_new_accepts_equal_bounds() {
        let at = datetime!(2022-01-12 08:00);
        let window = DateWindow::new(at, at).unwrap();
        assert_eq!(window.begin(), window.end());
    }

    #[test]
    fn test_new_rejects_inverted_bounds() {
        let begin = datetime!(2022-01-13 00:00);
        let end = datetime!(2022-01-12 00:00);

        let err = DateWindow::new(begin, end).unwrap_err();
        assert_eq!(err, WindowError::Inverted { begin, end });
    }

    #[test]
    fn test_day_window_bounds() {
        let window = DateWindow::day(date!(2022 - 01 - 17));
        assert_eq!(window.begin(), datetime!(2022-01-17 00:00:00.000));
        assert_eq!(window.end(), datetime!(2022-01-17 23:59:59.999));
    }

    #[test]
    fn test_whole_days_spans_first_midnight_to_last_day_end() {
        let window = DateWindow::whole_days(date!(2022 - 01 - 12), date!(2022 - 01 - 17)).unwrap();
        assert_eq!(window.begin(), datetime!(2022-01-12 00:00:00.000));
        assert_eq!(window.end(), datetime!(2022-01-17 23:59:59.999));
    }

    #[test]
    fn test_whole_days_single_day_matches_day() {
        let d = date!(2022 - 02 - 01);
        assert_eq!(DateWindow::whole_days(d, d).unwrap(), DateWindow::day(d));
    }
}
