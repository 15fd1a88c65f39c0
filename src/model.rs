// Quiz content: steps, their three phases, and the images behind them.
// Visual expectation: every step shows a question picture (with a hidden colour
// mask), then an answer picture, then an explanation picture.

use crate::error::Error;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Mask behind a question image.
/// `number_of_objects` = how many distinct danger colours the user must find.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskInfo {
    pub mask: String,
    pub number_of_objects: usize,
}

/// Image identifier plus its optional mask (only question items carry one).
/// The original and its mask MUST share pixel size and on-screen frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub original: String,
    #[serde(default)]
    pub mask: Option<MaskInfo>,
}

/// One phase of a step: a picture and an optional caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepItem {
    pub image: ImageDescriptor,
    #[serde(default)]
    pub text: Option<String>,
}

/// One unit of quiz content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizStep {
    pub question: StepItem,
    pub answer: StepItem,
    pub explanation: StepItem,
}

/// Which phase of the current step is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepState {
    #[default]
    Question,
    Answer,
    Explanation,
}

impl QuizStep {
    /// Required finds for this step; 0 when the question has no mask.
    pub fn number_of_objects(&self) -> usize {
        self.question
            .image
            .mask
            .as_ref()
            .map_or(0, |m| m.number_of_objects)
    }
}

impl StepItem {
    fn plain(original: &str, text: Option<&str>) -> Self {
        Self {
            image: ImageDescriptor { original: original.into(), mask: None },
            text: text.map(Into::into),
        }
    }

    fn masked(original: &str, mask: &str, number_of_objects: usize, text: &str) -> Self {
        Self {
            image: ImageDescriptor {
                original: original.into(),
                mask: Some(MaskInfo { mask: mask.into(), number_of_objects }),
            },
            text: Some(text.into()),
        }
    }
}

/// The built-in deck: apple, pear, cake, broccoli (1, 2, 3, 4 objects).
pub fn reference_deck() -> Vec<QuizStep> {
    let step = |name: &str, objects: usize, question: &str, answer: &str| QuizStep {
        question: StepItem::masked(
            &format!("{name}_question"),
            &format!("{name}_mask"),
            objects,
            question,
        ),
        answer: StepItem::plain(&format!("{name}_answer"), Some(answer)),
        explanation: StepItem::plain(&format!("{name}_explanation"), None),
    };

    vec![
        step("apple", 1, "Where is the apple here?", "Here is the apple!"),
        step("pear", 2, "Where are the pears here?", "Here are the pears!"),
        step("cake", 3, "How many cakes do you see here?", "Correct, here are 3 cakes!"),
        step("broccoli", 4, "Find all broccoli here", "Yep! Here are four of them"),
    ]
}

/// Check the structural rules a deck must satisfy before the quiz owns it.
/// A question without a mask is tolerated (it can be passed with zero finds).
pub fn validate_deck(steps: &[QuizStep]) -> Result<(), Error> {
    if steps.is_empty() {
        return Err(Error::Deck("deck has no steps".into()));
    }

    for (i, step) in steps.iter().enumerate() {
        match &step.question.image.mask {
            Some(m) if m.number_of_objects == 0 => {
                return Err(Error::Deck(format!(
                    "step {i} ({}): number_of_objects must be positive",
                    step.question.image.original
                )));
            }
            Some(_) => {}
            None => warn!(
                "step {i} ({}): question has no mask, it can be passed without any taps",
                step.question.image.original
            ),
        }

        for (phase, item) in [("answer", &step.answer), ("explanation", &step.explanation)] {
            if item.image.mask.is_some() {
                return Err(Error::Deck(format!(
                    "step {i} ({}): {phase} image must not carry a mask",
                    item.image.original
                )));
            }
        }
    }
    Ok(())
}

/// Parse a JSON deck (an array of steps) and validate it.
pub fn parse_deck(json: &str) -> Result<Vec<QuizStep>, Error> {
    let steps: Vec<QuizStep> =
        serde_json::from_str(json).map_err(|e| Error::Deck(format!("Parse JSON: {e}")))?;
    validate_deck(&steps)?;
    Ok(steps)
}

pub fn load_deck(path: &Path) -> Result<Vec<QuizStep>, Error> {
    let json = fs::read_to_string(path)
        .map_err(|e| Error::Deck(format!("Read {}: {e}", path.display())))?;
    parse_deck(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_deck_has_four_masked_questions() {
        let deck = reference_deck();
        let objects: Vec<usize> = deck.iter().map(QuizStep::number_of_objects).collect();
        assert_eq!(objects, vec![1, 2, 3, 4]);
        assert_eq!(deck[0].question.image.original, "apple_question");
        assert_eq!(deck[3].question.image.mask.as_ref().map(|m| m.mask.as_str()), Some("broccoli_mask"));
        assert!(deck.iter().all(|s| s.answer.image.mask.is_none()));
        assert!(deck.iter().all(|s| s.explanation.text.is_none()));
        assert!(validate_deck(&deck).is_ok());
    }

    #[test]
    fn empty_deck_is_rejected() {
        assert!(matches!(validate_deck(&[]), Err(Error::Deck(_))));
    }

    #[test]
    fn masked_answer_is_rejected() {
        let mut deck = reference_deck();
        deck[1].answer.image.mask = Some(MaskInfo { mask: "x".into(), number_of_objects: 1 });
        assert!(matches!(validate_deck(&deck), Err(Error::Deck(_))));
    }

    #[test]
    fn zero_objects_is_rejected() {
        let mut deck = reference_deck();
        if let Some(m) = deck[0].question.image.mask.as_mut() {
            m.number_of_objects = 0;
        }
        assert!(matches!(validate_deck(&deck), Err(Error::Deck(_))));
    }

    #[test]
    fn unmasked_question_is_tolerated() {
        let mut deck = reference_deck();
        deck[2].question.image.mask = None;
        assert!(validate_deck(&deck).is_ok());
        assert_eq!(deck[2].number_of_objects(), 0);
    }

    #[test]
    fn parses_json_deck_with_optional_fields() {
        let json = r#"[
            {
                "question": {
                    "image": { "original": "cat_question",
                               "mask": { "mask": "cat_mask", "number_of_objects": 2 } },
                    "text": "Find the cats"
                },
                "answer": { "image": { "original": "cat_answer" }, "text": "Two cats" },
                "explanation": { "image": { "original": "cat_explanation" } }
            }
        ]"#;

        let deck = parse_deck(json).expect("valid deck");
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].number_of_objects(), 2);
        assert_eq!(deck[0].answer.text.as_deref(), Some("Two cats"));
        assert_eq!(deck[0].explanation.text, None);
    }

    #[test]
    fn bundled_json_deck_matches_the_built_in_one() {
        let deck = parse_deck(include_str!("../decks/reference.json")).expect("valid deck");
        assert_eq!(deck, reference_deck());
    }

    #[test]
    fn malformed_json_is_a_deck_error() {
        assert!(matches!(parse_deck("{ not json"), Err(Error::Deck(_))));
        assert!(matches!(parse_deck("[]"), Err(Error::Deck(_))));
    }
}
