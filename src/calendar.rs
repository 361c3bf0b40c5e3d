//! Month math for the calendar grid. All dates are plain calendar dates;
//! there is no time zone handling anywhere in this module.

use crate::planner::{filter_posts, posts_for_date};
use crate::post::{ContentPost, TypeFilter};
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// First day of the month containing `reference`.
pub fn first_of_month(reference: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(reference.year(), reference.month(), 1)
        .expect("first of an existing month is always valid")
}

/// Last day of the month containing `reference`: first of the next month
/// minus one day, so 28/29/30/31-day months all come out of the calendar
/// rules rather than a lookup table.
pub fn last_of_month(reference: NaiveDate) -> NaiveDate {
    advance_month(reference, 1) - Duration::days(1)
}

/// Every date of the month containing `reference`, first to last, ascending.
pub fn days_in_month(reference: NaiveDate) -> Vec<NaiveDate> {
    let end = last_of_month(reference);
    let mut days = Vec::with_capacity(31);
    let mut current = first_of_month(reference);
    while current <= end {
        days.push(current);
        current = current + Duration::days(1);
    }
    days
}

/// First-of-month one month forward (`direction = 1`) or backward
/// (`direction = -1`) from the month containing `reference`, rolling the
/// year over at the December/January boundary.
pub fn advance_month(reference: NaiveDate, direction: i32) -> NaiveDate {
    let months = reference.year() * 12 + reference.month0() as i32 + direction;
    let year = months.div_euclid(12);
    let month0 = months.rem_euclid(12) as u32;
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .expect("first of a computed month is always valid")
}

/// Whether `date` falls in the month being displayed.
pub fn is_in_month(date: NaiveDate, reference: NaiveDate) -> bool {
    date.year() == reference.year() && date.month() == reference.month()
}

/// Whether `date` is the caller-supplied "today". The clock stays outside
/// the core; callers pass whatever "now" they want cells classified against.
pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// One day slot in the month grid, annotated with the posts scheduled on it
/// under the active filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub today: bool,
    pub posts: Vec<ContentPost>,
}

/// Builds the full grid for the month containing `reference`: one cell per
/// calendar day, each bucketing the filtered posts that fall on it. This is
/// the single render pass the UI makes per frame.
pub fn month_grid(
    reference: NaiveDate,
    today: NaiveDate,
    posts: &[ContentPost],
    filter: TypeFilter,
    search: &str,
) -> Vec<DayCell> {
    let filtered = filter_posts(posts, filter, search);
    days_in_month(reference)
        .into_iter()
        .map(|date| DayCell {
            date,
            in_month: is_in_month(date, reference),
            today: is_today(date, today),
            posts: posts_for_date(&filtered, date),
        })
        .collect()
}
