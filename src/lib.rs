pub mod calendar;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod planner;
pub mod post;
pub(crate) mod post_validation;

pub use calendar::{
    DayCell, advance_month, days_in_month, first_of_month, is_in_month, is_today, last_of_month,
    month_grid,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqlitePostStore;
pub use persistence::{
    PersistenceError, PostStore, load_posts_from_csv, load_posts_from_json, save_posts_to_csv,
    save_posts_to_json, validate_posts,
};
pub use planner::{
    PlannerError, create_post, delete_post, filter_posts, find_post, next_post_id, posts_for_date,
    update_post,
};
pub use post::{ContentPost, PostDraft, PostPatch, PostType, TypeFilter, sample_posts};
