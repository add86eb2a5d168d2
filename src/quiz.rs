//! Drawing the next unseen quiz question.

use std::collections::HashSet;

use rand::Rng;

use crate::db::Question;

/// Which questions a quiz draws from. Category id `0` means every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    pub fn from_category_id(id: Option<i64>) -> Self {
        match id {
            None | Some(0) => Self::All,
            Some(id) => Self::Category(id),
        }
    }

    /// Metric label for this scope.
    pub fn label(&self) -> String {
        match self {
            Self::All => "all".to_owned(),
            Self::Category(id) => id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizDraw {
    Next(Question),
    /// Every candidate has already been asked.
    Exhausted,
}

/// Picks one candidate whose id is not in `asked`, uniformly at random.
pub fn draw_question<R>(candidates: Vec<Question>, asked: &HashSet<i64>, rng: &mut R) -> QuizDraw
where
    R: Rng + ?Sized,
{
    let mut unseen: Vec<Question> = candidates
        .into_iter()
        .filter(|question| !asked.contains(&question.id))
        .collect();
    if unseen.is_empty() {
        return QuizDraw::Exhausted;
    }
    let pick = rng.gen_range(0..unseen.len());
    QuizDraw::Next(unseen.swap_remove(pick))
}
