//! The question model.
//!
//! A [`Question`] pairs the fields every kind shares (header, body, marks)
//! with a [`QuestionKind`] payload carrying what is specific to one kind, so
//! the kind and its payload can never disagree. Construction goes through
//! validating constructors; there is no way to build an invalid question.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::ValidationError;

/// Variant payload of a question.
///
/// Correct indexes for multi-choice questions live in a `BTreeSet` so the
/// answer key always lists them in option order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    TrueFalse {
        answer: bool,
    },
    SingleChoice {
        options: Vec<String>,
        correct: usize,
    },
    MultiChoice {
        options: Vec<String>,
        correct: BTreeSet<usize>,
    },
}

impl QuestionKind {
    /// Short label naming the kind, used in audit entries.
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::TrueFalse { .. } => "true/false",
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::MultiChoice { .. } => "multi-choice",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A student's response to one question, shaped like the question kind it
/// answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Bool(bool),
    Choice(usize),
    Choices(BTreeSet<usize>),
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Bool(value) => write!(f, "{value}"),
            Response::Choice(index) => write!(f, "{}", option_label(*index)),
            Response::Choices(indexes) => {
                let labels: Vec<String> =
                    indexes.iter().map(|i| option_label(*i).to_string()).collect();
                write!(f, "{}", labels.join(","))
            }
        }
    }
}

/// One exam question.
///
/// Identity is deliberately narrow: two questions with the same header and
/// body are the same question, whatever their marks or kind. Equality and
/// hashing follow that rule so catalogs and journals can look questions up
/// by prompt alone.
#[derive(Debug, Clone)]
pub struct Question {
    header: String,
    body: String,
    marks: u32,
    kind: QuestionKind,
}

impl Question {
    /// Builds a true/false question.
    pub fn true_false(
        header: impl Into<String>,
        body: impl Into<String>,
        marks: u32,
        answer: bool,
    ) -> Result<Self, ValidationError> {
        Self::build(header.into(), body.into(), marks, QuestionKind::TrueFalse { answer })
    }

    /// Builds a single-choice question; `correct` indexes into `options`.
    pub fn single_choice<I, S>(
        header: impl Into<String>,
        body: impl Into<String>,
        marks: u32,
        options: I,
        correct: usize,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        validate_options(&options)?;
        if correct >= options.len() {
            return Err(ValidationError::ChoiceOutOfRange {
                index: correct,
                count: options.len(),
            });
        }
        Self::build(
            header.into(),
            body.into(),
            marks,
            QuestionKind::SingleChoice { options, correct },
        )
    }

    /// Builds a multi-choice question; every index in `correct` must point
    /// into `options` and at least one option must be marked correct.
    pub fn multi_choice<I, S, C>(
        header: impl Into<String>,
        body: impl Into<String>,
        marks: u32,
        options: I,
        correct: C,
    ) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        C: IntoIterator<Item = usize>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        validate_options(&options)?;
        let correct: BTreeSet<usize> = correct.into_iter().collect();
        if correct.is_empty() {
            return Err(ValidationError::NoCorrectChoices);
        }
        if let Some(&index) = correct.iter().find(|&&i| i >= options.len()) {
            return Err(ValidationError::ChoiceOutOfRange {
                index,
                count: options.len(),
            });
        }
        Self::build(
            header.into(),
            body.into(),
            marks,
            QuestionKind::MultiChoice { options, correct },
        )
    }

    fn build(
        header: String,
        body: String,
        marks: u32,
        kind: QuestionKind,
    ) -> Result<Self, ValidationError> {
        if header.trim().is_empty() {
            return Err(ValidationError::EmptyHeader);
        }
        if body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        if marks == 0 {
            return Err(ValidationError::ZeroMarks);
        }
        Ok(Self {
            header,
            body,
            marks,
            kind,
        })
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn marks(&self) -> u32 {
        self.marks
    }

    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// Compares two questions by marks, ascending.
    ///
    /// This is a named comparator rather than an `Ord` impl: question
    /// identity is the (header, body) pair, and an `Ord` over marks would
    /// disagree with it. Use as `questions.sort_by(Question::cmp_by_marks)`.
    pub fn cmp_by_marks(&self, other: &Question) -> Ordering {
        self.marks.cmp(&other.marks)
    }

    /// Ordered option labels for display: `a) …`, `b) …`.
    ///
    /// Labels are derived from position, never stored. True/false questions
    /// project the fixed pair `a) True`, `b) False`.
    pub fn labeled_options(&self) -> Vec<String> {
        match &self.kind {
            QuestionKind::TrueFalse { .. } => {
                vec!["a) True".to_string(), "b) False".to_string()]
            }
            QuestionKind::SingleChoice { options, .. }
            | QuestionKind::MultiChoice { options, .. } => options
                .iter()
                .enumerate()
                .map(|(i, option)| format!("{}) {option}", option_label(i)))
                .collect(),
        }
    }

    /// Checks a response against the correct answer.
    ///
    /// A response of the wrong shape for this question's kind is simply
    /// incorrect.
    pub fn is_correct(&self, response: &Response) -> bool {
        match (&self.kind, response) {
            (QuestionKind::TrueFalse { answer }, Response::Bool(given)) => answer == given,
            (QuestionKind::SingleChoice { correct, .. }, Response::Choice(given)) => {
                correct == given
            }
            (QuestionKind::MultiChoice { correct, .. }, Response::Choices(given)) => {
                correct == given
            }
            _ => false,
        }
    }

    /// Parses a free-form input line into a response for this question.
    ///
    /// The inverse of [`labeled_options`](Self::labeled_options): true/false
    /// questions accept `true`/`false` words or the `a`/`b` labels, choice
    /// questions accept option letters (comma or space separated for
    /// multi-choice). Returns `None` when the input does not map onto this
    /// question.
    pub fn parse_response(&self, input: &str) -> Option<Response> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }
        match &self.kind {
            QuestionKind::TrueFalse { .. } => match input.as_str() {
                "true" | "t" | "yes" | "a" => Some(Response::Bool(true)),
                "false" | "f" | "no" | "b" => Some(Response::Bool(false)),
                _ => None,
            },
            QuestionKind::SingleChoice { options, .. } => {
                let index = label_index(&input)?;
                (index < options.len()).then_some(Response::Choice(index))
            }
            QuestionKind::MultiChoice { options, .. } => {
                let mut indexes = BTreeSet::new();
                for part in input.split([',', ' ']).filter(|p| !p.is_empty()) {
                    let index = label_index(part)?;
                    if index >= options.len() {
                        return None;
                    }
                    indexes.insert(index);
                }
                (!indexes.is_empty()).then_some(Response::Choices(indexes))
            }
        }
    }

    /// The answer-key line a practice exam reveals once finished.
    pub fn answer_key(&self) -> String {
        match &self.kind {
            QuestionKind::TrueFalse { answer } => {
                format!("Correct Answer: {}", if *answer { "True" } else { "False" })
            }
            QuestionKind::SingleChoice { options, correct } => {
                format!("Correct Answer: {}) {}", option_label(*correct), options[*correct])
            }
            QuestionKind::MultiChoice { options, correct } => {
                let keyed: Vec<String> = correct
                    .iter()
                    .map(|&i| format!("{}) {}", option_label(i), options[i]))
                    .collect();
                format!("Correct Answers: {}", keyed.join(", "))
            }
        }
    }
}

// Identity is the (header, body) pair: marks and kind do not distinguish
// two questions.
impl PartialEq for Question {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header && self.body == other.body
    }
}

impl Eq for Question {}

impl Hash for Question {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.header.hash(state);
        self.body.hash(state);
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({} marks)",
            self.kind.label(),
            self.header,
            self.body,
            self.marks
        )
    }
}

/// Positional option label: 0 → 'a', 1 → 'b'. Wraps past 'z'.
fn option_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

fn label_index(part: &str) -> Option<usize> {
    let mut chars = part.chars();
    let letter = chars.next()?;
    if chars.next().is_some() || !letter.is_ascii_lowercase() {
        return None;
    }
    Some((letter as u8 - b'a') as usize)
}

fn validate_options(options: &[String]) -> Result<(), ValidationError> {
    if options.is_empty() {
        return Err(ValidationError::NoOptions);
    }
    if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
        return Err(ValidationError::BlankOption { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebra() -> Question {
        Question::true_false("Q1", "2x+3=7, x=2?", 5, true).unwrap()
    }

    fn derivative() -> Question {
        Question::single_choice(
            "Calculus",
            "What is the derivative of x²?",
            10,
            ["2x", "x", "2", "x²"],
            0,
        )
        .unwrap()
    }

    fn oop() -> Question {
        Question::multi_choice(
            "Programming Concepts",
            "Which of the following are object-oriented programming principles?",
            15,
            ["Encapsulation", "Recursion", "Inheritance", "Polymorphism", "Sorting"],
            [0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn constructors_accept_valid_arguments() {
        let q = algebra();
        assert_eq!(q.header(), "Q1");
        assert_eq!(q.marks(), 5);
        assert!(matches!(q.kind(), QuestionKind::TrueFalse { answer: true }));

        let q = derivative();
        assert!(matches!(q.kind(), QuestionKind::SingleChoice { correct: 0, .. }));

        let q = oop();
        match q.kind() {
            QuestionKind::MultiChoice { correct, .. } => {
                assert_eq!(correct.iter().copied().collect::<Vec<_>>(), vec![0, 2, 3]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn empty_header_and_body_are_rejected() {
        assert_eq!(
            Question::true_false("", "body", 5, true).unwrap_err(),
            ValidationError::EmptyHeader
        );
        assert_eq!(
            Question::true_false("header", "   ", 5, true).unwrap_err(),
            ValidationError::EmptyBody
        );
    }

    #[test]
    fn zero_marks_are_rejected() {
        assert_eq!(
            Question::true_false("header", "body", 0, false).unwrap_err(),
            ValidationError::ZeroMarks
        );
    }

    #[test]
    fn out_of_range_correct_index_is_rejected() {
        let result =
            Question::single_choice("Calculus", "derivative?", 10, ["2x", "x", "2", "x²"], 4);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::ChoiceOutOfRange { index: 4, count: 4 }
        );
    }

    #[test]
    fn choice_option_lists_are_validated() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Question::single_choice("h", "b", 5, empty, 0).unwrap_err(),
            ValidationError::NoOptions
        );
        assert_eq!(
            Question::single_choice("h", "b", 5, ["ok", " "], 0).unwrap_err(),
            ValidationError::BlankOption { index: 1 }
        );
        assert_eq!(
            Question::multi_choice("h", "b", 5, ["a", "b"], []).unwrap_err(),
            ValidationError::NoCorrectChoices
        );
        assert_eq!(
            Question::multi_choice("h", "b", 5, ["a", "b"], [0, 2]).unwrap_err(),
            ValidationError::ChoiceOutOfRange { index: 2, count: 2 }
        );
    }

    #[test]
    fn identity_is_header_and_body_only() {
        let tf = Question::true_false("Q1", "same prompt", 5, true).unwrap();
        let sc = Question::single_choice("Q1", "same prompt", 20, ["x", "y"], 1).unwrap();
        let other = Question::true_false("Q1", "different prompt", 5, true).unwrap();

        assert_eq!(tf, sc);
        assert_ne!(tf, other);

        let mut set = std::collections::HashSet::new();
        set.insert(tf);
        assert!(set.contains(&sc));
    }

    #[test]
    fn clone_is_deep_and_value_equal() {
        let q = algebra();
        let copy = q.clone();
        assert_eq!(q, copy);
        assert_eq!(q.kind(), copy.kind());

        let q = derivative();
        let copy = q.clone();
        assert_eq!(q.kind(), copy.kind());
        match (q.kind(), copy.kind()) {
            (
                QuestionKind::SingleChoice { options: a, .. },
                QuestionKind::SingleChoice { options: b, .. },
            ) => assert_ne!(a.as_ptr(), b.as_ptr(), "options storage must be independent"),
            _ => unreachable!(),
        }
    }

    #[test]
    fn sorting_by_marks_is_ascending() {
        let mut questions = vec![derivative(), algebra(), oop()];
        questions.sort_by(Question::cmp_by_marks);
        let marks: Vec<u32> = questions.iter().map(Question::marks).collect();
        assert_eq!(marks, vec![5, 10, 15]);
    }

    #[test]
    fn labeled_options_derive_from_position() {
        assert_eq!(algebra().labeled_options(), vec!["a) True", "b) False"]);
        assert_eq!(
            derivative().labeled_options(),
            vec!["a) 2x", "b) x", "c) 2", "d) x²"]
        );
    }

    #[test]
    fn correctness_check_is_variant_specific() {
        assert!(algebra().is_correct(&Response::Bool(true)));
        assert!(!algebra().is_correct(&Response::Bool(false)));

        assert!(derivative().is_correct(&Response::Choice(0)));
        assert!(!derivative().is_correct(&Response::Choice(3)));

        let right: BTreeSet<usize> = [0, 2, 3].into_iter().collect();
        let wrong: BTreeSet<usize> = [0, 2].into_iter().collect();
        assert!(oop().is_correct(&Response::Choices(right)));
        assert!(!oop().is_correct(&Response::Choices(wrong)));
    }

    #[test]
    fn mismatched_response_shape_is_incorrect() {
        assert!(!algebra().is_correct(&Response::Choice(0)));
        assert!(!derivative().is_correct(&Response::Bool(true)));
    }

    #[test]
    fn parse_response_follows_the_labels() {
        assert_eq!(algebra().parse_response("true"), Some(Response::Bool(true)));
        assert_eq!(algebra().parse_response("B"), Some(Response::Bool(false)));
        assert_eq!(algebra().parse_response("maybe"), None);

        assert_eq!(derivative().parse_response(" a "), Some(Response::Choice(0)));
        assert_eq!(derivative().parse_response("d"), Some(Response::Choice(3)));
        assert_eq!(derivative().parse_response("e"), None, "out of range");

        let expected: BTreeSet<usize> = [0, 2, 3].into_iter().collect();
        assert_eq!(
            oop().parse_response("a, c, d"),
            Some(Response::Choices(expected.clone()))
        );
        assert_eq!(oop().parse_response("a c d"), Some(Response::Choices(expected)));
        assert_eq!(oop().parse_response("a,z"), None);
        assert_eq!(oop().parse_response(""), None);
    }

    #[test]
    fn answer_key_lines() {
        assert_eq!(algebra().answer_key(), "Correct Answer: True");
        assert_eq!(derivative().answer_key(), "Correct Answer: a) 2x");
        assert_eq!(
            oop().answer_key(),
            "Correct Answers: a) Encapsulation, c) Inheritance, d) Polymorphism"
        );
    }

    #[test]
    fn display_embeds_kind_header_body_and_marks() {
        assert_eq!(
            algebra().to_string(),
            "[true/false] Q1: 2x+3=7, x=2? (5 marks)"
        );
        assert_eq!(
            derivative().to_string(),
            "[single-choice] Calculus: What is the derivative of x²? (10 marks)"
        );
    }
}
