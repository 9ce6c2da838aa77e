use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::db::Question;

/// Which questions a quiz draws from. Clients send `{"id": 0}` for every category,
/// the string `"0"` is read the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "QuizCategoryBody")]
pub enum QuizCategory {
    All,
    Category(i64),
}

// the client also sends the category's `type`, only the id matters here
#[derive(Deserialize)]
struct QuizCategoryBody {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

impl From<QuizCategoryBody> for QuizCategory {
    fn from(body: QuizCategoryBody) -> Self {
        match body.id {
            0 => QuizCategory::All,
            id => QuizCategory::Category(id),
        }
    }
}

/// The question to ask next. Once every candidate has been asked the quiz is
/// exhausted, which goes over the wire as an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextQuestion {
    Question(Question),
    Exhausted,
}

impl Serialize for NextQuestion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            NextQuestion::Question(question) => question.serialize(serializer),
            NextQuestion::Exhausted => serializer.serialize_str(""),
        }
    }
}

/// Shuffles a copy of `candidates` and returns the first one not in `previous`.
pub fn select_unseen<R>(candidates: &[Question], previous: &[i64], rng: &mut R) -> NextQuestion
where
    R: Rng + ?Sized,
{
    let asked: HashSet<i64> = previous.iter().copied().collect();
    let mut shuffled: Vec<&Question> = candidates.iter().collect();
    shuffled.shuffle(rng);
    shuffled
        .into_iter()
        .find(|q| !asked.contains(&q.id))
        .map(|q| NextQuestion::Question(q.clone()))
        .unwrap_or(NextQuestion::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn question(id: i64) -> Question {
        Question {
            id,
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            difficulty: 1,
            category: 1,
        }
    }

    #[test]
    fn skips_previous_questions() {
        let candidates: Vec<Question> = (1..=5).map(question).collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            match select_unseen(&candidates, &[1, 2, 3, 5], &mut rng) {
                NextQuestion::Question(q) => assert_eq!(q.id, 4),
                NextQuestion::Exhausted => panic!("question 4 was never asked"),
            }
        }
    }

    #[test]
    fn exhausted_when_everything_was_asked() {
        let candidates: Vec<Question> = (1..=3).map(question).collect();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_unseen(&candidates, &[3, 2, 1], &mut rng),
            NextQuestion::Exhausted
        );
        assert_eq!(select_unseen(&[], &[], &mut rng), NextQuestion::Exhausted);
    }

    #[test]
    fn selection_is_random() {
        let candidates: Vec<Question> = (1..=10).map(question).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let picked: HashSet<i64> = (0..50)
            .filter_map(|_| match select_unseen(&candidates, &[], &mut rng) {
                NextQuestion::Question(q) => Some(q.id),
                NextQuestion::Exhausted => None,
            })
            .collect();
        assert!(picked.len() > 1);
    }

    #[test]
    fn does_not_reorder_candidates() {
        let candidates: Vec<Question> = (1..=10).map(question).collect();
        let before = candidates.clone();
        select_unseen(&candidates, &[], &mut StdRng::seed_from_u64(3));
        assert_eq!(candidates, before);
    }

    #[test]
    fn exhausted_serializes_as_empty_string() {
        assert_eq!(serde_json::to_value(NextQuestion::Exhausted).unwrap(), json!(""));
        assert_eq!(
            serde_json::to_value(NextQuestion::Question(question(9))).unwrap(),
            json!({
                "id": 9,
                "question": "question 9",
                "answer": "answer 9",
                "difficulty": 1,
                "category": 1
            })
        );
    }

    #[test]
    fn category_zero_means_all() {
        let all: QuizCategory = serde_json::from_value(json!({"type": "click", "id": 0})).unwrap();
        assert_eq!(all, QuizCategory::All);
        let all: QuizCategory = serde_json::from_value(json!({"id": "0"})).unwrap();
        assert_eq!(all, QuizCategory::All);
        let science: QuizCategory =
            serde_json::from_value(json!({"type": "Science", "id": "1"})).unwrap();
        assert_eq!(science, QuizCategory::Category(1));
    }
}
