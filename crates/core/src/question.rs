//! Question repository - the question set loaded once at startup.
//!
//! The source document maps tier names to lists of records:
//!
//! ```json
//! { "easy": [ { "question": "...", "answers": ["a", "b"], "answer_divs": 2, "correct_order": [1, 0] } ] }
//! ```
//!
//! Only the `easy` tier is played; other keys are never looked at and a missing
//! or `null` tier is simply empty. Records that fail to decode or break the
//! slot/order invariant are skipped and counted rather than failing the load.

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{InsufficientData, InvalidQuestion, LoadError};
use crate::types::{FragmentId, QUESTION_TIER};

/// One ordering question. Immutable once loaded.
///
/// Every slot takes a distinct fragment, so a `correct_order` that names the
/// same index twice can never be matched; such records fail [`Question::validate`]
/// and are skipped at load. Fragments with identical text are fine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    /// Answer fragments, addressed by index. Duplicate text is allowed.
    #[serde(rename = "answers")]
    pub fragments: Vec<String>,
    #[serde(rename = "answer_divs")]
    pub slot_count: usize,
    pub correct_order: Vec<FragmentId>,
}

impl Question {
    /// Build a question whose slot count matches `correct_order`.
    pub fn new<S: Into<String>>(
        text: impl Into<String>,
        fragments: impl IntoIterator<Item = S>,
        correct_order: Vec<FragmentId>,
    ) -> Self {
        Self {
            text: text.into(),
            fragments: fragments.into_iter().map(Into::into).collect(),
            slot_count: correct_order.len(),
            correct_order,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidQuestion> {
        if self.slot_count == 0 {
            return Err(InvalidQuestion::NoSlots);
        }
        if self.correct_order.len() != self.slot_count {
            return Err(InvalidQuestion::SlotCountMismatch {
                slot_count: self.slot_count,
                order_len: self.correct_order.len(),
            });
        }
        let count = self.fragments.len();
        if let Some(&index) = self.correct_order.iter().find(|&&i| i >= count) {
            return Err(InvalidQuestion::FragmentOutOfRange { index, count });
        }
        let mut seen = vec![false; count];
        for &index in &self.correct_order {
            if std::mem::replace(&mut seen[index], true) {
                return Err(InvalidQuestion::RepeatedFragment(index));
            }
        }
        Ok(())
    }

    /// Element-wise comparison of a board reading against the correct order.
    ///
    /// An empty slot (`None`) never matches.
    pub fn is_correct(&self, order: &[Option<FragmentId>]) -> bool {
        order.len() == self.correct_order.len()
            && order
                .iter()
                .zip(&self.correct_order)
                .all(|(got, want)| *got == Some(*want))
    }
}

/// The full question set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionRepository {
    questions: Vec<Question>,
    skipped: usize,
}

impl QuestionRepository {
    /// Build from already-decoded questions, dropping invalid ones.
    pub fn from_questions(questions: Vec<Question>) -> Self {
        let mut repo = Self::default();
        for (i, q) in questions.into_iter().enumerate() {
            repo.admit(i, q);
        }
        repo
    }

    /// Parse a question document held in memory.
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        let mut tiers: Map<String, Value> = serde_json::from_str(source)?;
        let records: Vec<Value> = match tiers.remove(QUESTION_TIER) {
            None | Some(Value::Null) => Vec::new(),
            Some(tier) => serde_json::from_value(tier)?,
        };

        let mut repo = Self::default();
        for (i, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Question>(record) {
                Ok(q) => repo.admit(i, q),
                Err(err) => {
                    warn!(record = i, %err, "skipping undecodable question");
                    repo.skipped += 1;
                }
            }
        }

        info!(
            tier = QUESTION_TIER,
            loaded = repo.questions.len(),
            skipped = repo.skipped,
            "question source parsed"
        );
        Ok(repo)
    }

    /// Read and parse the question document at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading question source");
        let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&source)
    }

    fn admit(&mut self, record: usize, question: Question) {
        match question.validate() {
            Ok(()) => self.questions.push(question),
            Err(err) => {
                warn!(record, %err, "skipping invalid question");
                self.skipped += 1;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Records dropped during loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Draw `n` distinct questions uniformly without replacement.
    ///
    /// The whole set is Fisher-Yates shuffled before truncating to `n`.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<Question>, InsufficientData> {
        if self.questions.len() < n {
            return Err(InsufficientData {
                required: n,
                available: self.questions.len(),
            });
        }

        let mut order: Vec<usize> = (0..self.questions.len()).collect();
        order.shuffle(rng);
        order.truncate(n);
        Ok(order.into_iter().map(|i| self.questions[i].clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn numbered(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| Question::new(format!("q{i}"), ["a", "b", "c"], vec![2, 0, 1]))
            .collect()
    }

    #[test]
    fn test_parse_easy_tier_only() {
        let doc = r#"{
            "easy": [
                {"question": "Order it", "answers": ["x", "y"], "answer_divs": 2, "correct_order": [1, 0]}
            ],
            "hard": [
                {"question": "Ignored", "answers": ["z"], "answer_divs": 1, "correct_order": [0]}
            ]
        }"#;
        let repo = QuestionRepository::from_json(doc).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.questions()[0].text, "Order it");
        assert_eq!(repo.questions()[0].fragments, vec!["x", "y"]);
        assert_eq!(repo.questions()[0].correct_order, vec![1, 0]);
    }

    #[test]
    fn test_missing_tier_is_empty_repository() {
        let repo = QuestionRepository::from_json(r#"{"hard": []}"#).unwrap();
        assert!(repo.is_empty());
    }

    #[test]
    fn test_sibling_keys_of_any_type_are_ignored() {
        let doc = r#"{
            "version": 2,
            "hard": null,
            "meta": {"author": "x"},
            "easy": [
                {"question": "Order it", "answers": ["x", "y"], "answer_divs": 2, "correct_order": [1, 0]}
            ]
        }"#;
        let repo = QuestionRepository::from_json(doc).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.skipped(), 0);
    }

    #[test]
    fn test_null_tier_is_empty_repository() {
        let repo = QuestionRepository::from_json(r#"{"easy": null, "hard": 3}"#).unwrap();
        assert!(repo.is_empty());
        assert_eq!(repo.skipped(), 0);
    }

    #[test]
    fn test_tier_that_is_not_a_list_is_parse_error() {
        let err = QuestionRepository::from_json(r#"{"easy": "nope"}"#).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = QuestionRepository::from_json("[1, 2").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn test_invalid_records_are_skipped() {
        let doc = r#"{"easy": [
            {"question": "ok", "answers": ["a", "b"], "answer_divs": 2, "correct_order": [0, 1]},
            {"question": "count", "answers": ["a", "b"], "answer_divs": 3, "correct_order": [0, 1]},
            {"question": "range", "answers": ["a"], "answer_divs": 1, "correct_order": [4]},
            {"question": "shape"}
        ]}"#;
        let repo = QuestionRepository::from_json(doc).unwrap();
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.skipped(), 3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = QuestionRepository::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_duplicate_fragment_text_is_kept() {
        let q = Question::new("dup", ["x", "x", "y"], vec![0, 1, 2]);
        assert!(q.validate().is_ok());
        let repo = QuestionRepository::from_questions(vec![q]);
        assert_eq!(repo.questions()[0].fragments.len(), 3);
    }

    #[test]
    fn test_repeated_index_is_unsolvable() {
        let q = Question::new("rep", ["a", "b"], vec![1, 1]);
        assert_eq!(q.validate(), Err(InvalidQuestion::RepeatedFragment(1)));
    }

    #[test]
    fn test_is_correct() {
        let q = Question::new("q", ["a", "b", "c"], vec![2, 0, 1]);
        assert!(q.is_correct(&[Some(2), Some(0), Some(1)]));
        assert!(!q.is_correct(&[Some(0), Some(1), Some(2)]));
        assert!(!q.is_correct(&[Some(2), None, Some(1)]));
        assert!(!q.is_correct(&[Some(2), Some(0)]));
    }

    #[test]
    fn test_sample_exact_size_and_distinct() {
        let repo = QuestionRepository::from_questions(numbered(25));
        let mut rng = StdRng::seed_from_u64(7);
        let sample = repo.sample(20, &mut rng).unwrap();
        assert_eq!(sample.len(), 20);

        let mut texts: Vec<&str> = sample.iter().map(|q| q.text.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), 20);
        assert!(sample.iter().all(|q| repo.questions().contains(q)));
    }

    #[test]
    fn test_sample_insufficient() {
        let repo = QuestionRepository::from_questions(numbered(15));
        let mut rng = StdRng::seed_from_u64(7);
        let err = repo.sample(20, &mut rng).unwrap_err();
        assert_eq!(
            err,
            InsufficientData {
                required: 20,
                available: 15
            }
        );
    }

    #[test]
    fn test_sample_whole_set_is_permutation() {
        let repo = QuestionRepository::from_questions(numbered(20));
        let mut rng = StdRng::seed_from_u64(99);
        let sample = repo.sample(20, &mut rng).unwrap();
        let mut texts: Vec<String> = sample.into_iter().map(|q| q.text).collect();
        texts.sort();
        let mut expected: Vec<String> = (0..20).map(|i| format!("q{i}")).collect();
        expected.sort();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_sample_same_seed_is_reproducible() {
        let repo = QuestionRepository::from_questions(numbered(40));
        let a = repo.sample(20, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = repo.sample(20, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }
}
