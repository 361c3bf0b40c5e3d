use chrono::{Datelike, NaiveDate};
use content_calendar::{
    TypeFilter, advance_month, days_in_month, first_of_month, is_in_month, is_today, month_grid,
    sample_posts,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn days_in_month_matches_true_day_counts() {
    let expected = [
        (2024, 1, 31),
        (2024, 2, 29), // leap year
        (2023, 2, 28),
        (2024, 4, 30),
        (2024, 12, 31),
        (1900, 2, 28), // century, not a leap year
        (2000, 2, 29), // 400-year rule
    ];
    for (year, month, count) in expected {
        let days = days_in_month(d(year, month, 1));
        assert_eq!(days.len(), count, "{year}-{month:02}");
    }
}

#[test]
fn days_in_month_is_strictly_ascending_without_gaps() {
    let days = days_in_month(d(2024, 2, 14));
    assert_eq!(days.first().copied().unwrap(), d(2024, 2, 1));
    assert_eq!(days.last().copied().unwrap(), d(2024, 2, 29));
    for pair in days.windows(2) {
        assert_eq!(pair[1], pair[0].succ_opt().unwrap());
    }
}

#[test]
fn days_in_month_ignores_the_day_component_of_the_reference() {
    assert_eq!(days_in_month(d(2024, 10, 1)), days_in_month(d(2024, 10, 31)));
}

#[test]
fn advance_month_round_trips() {
    for month in 1..=12 {
        let reference = d(2024, month, 15);
        let back = advance_month(advance_month(reference, 1), -1);
        assert_eq!(back, first_of_month(reference));
    }
}

#[test]
fn advance_month_handles_year_rollover() {
    assert_eq!(advance_month(d(2024, 12, 31), 1), d(2025, 1, 1));
    assert_eq!(advance_month(d(2024, 1, 1), -1), d(2023, 12, 1));
}

#[test]
fn cell_predicates_classify_dates() {
    let reference = d(2024, 10, 15);
    assert!(is_in_month(d(2024, 10, 1), reference));
    assert!(!is_in_month(d(2024, 11, 1), reference));
    assert!(!is_in_month(d(2023, 10, 1), reference));

    let today = d(2024, 10, 23);
    assert!(is_today(d(2024, 10, 23), today));
    assert!(!is_today(d(2024, 10, 22), today));
}

#[test]
fn month_grid_annotates_cells_with_filtered_posts() {
    let posts = sample_posts();
    let today = d(2024, 10, 23);
    let cells = month_grid(d(2024, 10, 1), today, &posts, TypeFilter::All, "");

    assert_eq!(cells.len(), 31);
    assert!(cells.iter().all(|cell| cell.in_month));
    assert_eq!(cells.iter().filter(|cell| cell.today).count(), 1);

    let day_23 = cells.iter().find(|cell| cell.date == today).unwrap();
    assert!(day_23.today);
    assert_eq!(day_23.posts.len(), 1);
    assert_eq!(day_23.posts[0].content, "Team building activity - rock climbing!");

    let day_1 = &cells[0];
    assert!(day_1.posts.is_empty());
}

#[test]
fn month_grid_respects_the_active_filters() {
    let posts = sample_posts();
    let today = d(2024, 10, 23);
    let cells = month_grid(
        d(2024, 10, 1),
        today,
        &posts,
        TypeFilter::from_str("image").unwrap(),
        "",
    );
    let scheduled: usize = cells.iter().map(|cell| cell.posts.len()).sum();
    assert_eq!(scheduled, 2);
    for cell in &cells {
        for post in &cell.posts {
            assert_eq!(post.post_type.as_str(), "image");
        }
    }
}
