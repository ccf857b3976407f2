//! Read queries over the preference graph.

pub mod preferences;
pub mod recommend;

pub use preferences::{get_user_most_viewed_category, get_user_preferences};
pub use recommend::{get_recommendation, DEFAULT_K};
