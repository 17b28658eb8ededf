mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use crate::db::Category;

// Categories go over the wire as {"<id>": "<type>"}.
fn category_label_map(categories: Vec<Category>) -> BTreeMap<String, String> {
    categories
        .into_iter()
        .map(|c| (c.id.to_string(), c.label))
        .collect()
}
