//! Random selection of the next unseen quiz question.

use std::collections::HashSet;

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::db::Question;

/// Which questions a quiz round draws from. Category id `0` means every category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizScope {
    All,
    Category(i64),
}

impl QuizScope {
    pub fn from_category_id(id: i64) -> Self {
        if id == 0 {
            QuizScope::All
        } else {
            QuizScope::Category(id)
        }
    }

    pub fn admits(&self, question: &Question) -> bool {
        match self {
            QuizScope::All => true,
            QuizScope::Category(id) => question.category == *id,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuizScope::All => "all",
            QuizScope::Category(_) => "category",
        }
    }
}

/// Draws uniformly among `candidates` that are in `scope` and not in
/// `previous`. `None` means the quiz is exhausted.
pub fn pick_question<R>(
    candidates: Vec<Question>,
    scope: QuizScope,
    previous: &HashSet<i64>,
    rng: &mut R,
) -> Option<Question>
where
    R: Rng + ?Sized,
{
    candidates
        .into_iter()
        .filter(|q| scope.admits(q) && !previous.contains(&q.id))
        .choose(rng)
}
