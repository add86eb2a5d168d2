mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use crate::db::Category;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

/// Categories as the `{id: type}` object the clients expect.
pub type CategoryMap = BTreeMap<i64, String>;

fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
