// What the window should show for the current quiz state.
// Visual expectation:
// - Question: question picture, "Question" caption, "Found X out of Y", and the
//   answer key only once every danger is found.
// - Answer: answer picture + text, explanation key.
// - Explanation: explanation picture, next key.
// Re-built from scratch after every tap/key; the quiz never pushes updates.

use crate::model::StepState;
use crate::quiz::QuizFlowState;

/// A button the user can press in the current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ShowAnswer,
    ShowExplanation,
    NextStep,
}

impl Action {
    /// Run the matching transition.
    pub fn apply(self, state: &mut QuizFlowState) {
        match self {
            Action::ShowAnswer => state.switch_to_answer_state(),
            Action::ShowExplanation => state.switch_to_explanation_state(),
            Action::NextStep => state.switch_to_next_step(),
        }
    }

    /// First key pressed this frame that the current phase accepts.
    /// Keys the phase does not offer are skipped, not treated as a veto.
    pub fn first_allowed(pressed: &[Action], allowed: &[Action]) -> Option<Action> {
        pressed.iter().copied().find(|a| allowed.contains(a))
    }

    pub fn hint(self) -> &'static str {
        match self {
            Action::ShowAnswer => "A: show answer",
            Action::ShowExplanation => "E: explanation",
            Action::NextStep => "N: next",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen<'a> {
    pub caption: Option<&'static str>,
    pub step: (usize, usize),    // 1-based position in the deck, deck size
    pub image: &'a str,          // identifier of the picture to show
    pub mask: Option<&'a str>,   // identifier of the mask to sample taps from
    pub text: Option<&'a str>,
    pub dangers_found: Option<String>,
    pub actions: Vec<Action>,
}

impl<'a> Screen<'a> {
    pub fn of(state: &'a QuizFlowState) -> Self {
        let step = state.current_step_data();
        let position = (state.current_step_index() + 1, state.quiz_data().len());
        match state.step_state() {
            StepState::Question => Screen {
                caption: Some("Question"),
                step: position,
                image: &step.question.image.original,
                mask: step.question.image.mask.as_ref().map(|m| m.mask.as_str()),
                text: step.question.text.as_deref(),
                dangers_found: Some(state.dangers_found_label()),
                actions: if state.can_go_forward() { vec![Action::ShowAnswer] } else { Vec::new() },
            },
            StepState::Answer => Screen {
                caption: Some("Answer"),
                step: position,
                image: &step.answer.image.original,
                mask: None,
                text: step.answer.text.as_deref(),
                dangers_found: None,
                actions: vec![Action::ShowExplanation],
            },
            StepState::Explanation => Screen {
                caption: None,
                step: position,
                image: &step.explanation.image.original,
                mask: None,
                text: step.explanation.text.as_deref(),
                dangers_found: None,
                actions: vec![Action::NextStep],
            },
        }
    }

    /// Taps only mean something while a mask is on screen.
    pub fn accepts_taps(&self) -> bool {
        self.mask.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::reference_deck;
    use crate::types::Color;

    fn fresh() -> QuizFlowState {
        QuizFlowState::new([Color::RED, Color::GREEN], reference_deck()).expect("valid deck")
    }

    #[test]
    fn question_hides_answer_until_all_found() {
        let mut q = fresh();
        let s = Screen::of(&q);
        assert_eq!(s.caption, Some("Question"));
        assert_eq!(s.step, (1, 4));
        assert_eq!(s.image, "apple_question");
        assert_eq!(s.mask, Some("apple_mask"));
        assert_eq!(s.text, Some("Where is the apple here?"));
        assert_eq!(s.dangers_found.as_deref(), Some("Found 0 out of 1"));
        assert!(s.actions.is_empty());
        assert!(s.accepts_taps());

        q.register_selected_color(Color::RED);
        let s = Screen::of(&q);
        assert_eq!(s.actions, vec![Action::ShowAnswer]);
        assert_eq!(s.dangers_found.as_deref(), Some("Found 1 out of 1"));
    }

    #[test]
    fn answer_and_explanation_screens() {
        let mut q = fresh();
        q.register_selected_color(Color::RED);

        Action::ShowAnswer.apply(&mut q);
        let s = Screen::of(&q);
        assert_eq!(s.caption, Some("Answer"));
        assert_eq!(s.image, "apple_answer");
        assert_eq!(s.text, Some("Here is the apple!"));
        assert_eq!(s.dangers_found, None);
        assert!(!s.accepts_taps());
        assert!(s.actions.contains(&Action::ShowExplanation));
        assert!(!s.actions.contains(&Action::NextStep));

        Action::ShowExplanation.apply(&mut q);
        let s = Screen::of(&q);
        assert_eq!(s.caption, None);
        assert_eq!(s.image, "apple_explanation");
        assert_eq!(s.text, None);
        assert_eq!(s.actions, vec![Action::NextStep]);
    }

    #[test]
    fn disallowed_key_does_not_hide_an_allowed_one() {
        let pressed = [Action::ShowAnswer, Action::NextStep];
        assert_eq!(Action::first_allowed(&pressed, &[Action::NextStep]), Some(Action::NextStep));
        assert_eq!(Action::first_allowed(&pressed, &[]), None);
        assert_eq!(Action::first_allowed(&[], &[Action::NextStep]), None);
    }

    #[test]
    fn answer_key_is_offered_right_after_the_last_find() {
        let mut q = fresh();
        q.register_selected_color(Color::RED);
        let allowed = Screen::of(&q).actions;
        assert_eq!(Action::first_allowed(&[Action::ShowAnswer], &allowed), Some(Action::ShowAnswer));
    }

    #[test]
    fn next_action_opens_the_following_question() {
        let mut q = fresh();
        Action::NextStep.apply(&mut q);
        let s = Screen::of(&q);
        assert_eq!(s.image, "pear_question");
        assert_eq!(s.step, (2, 4));
        assert_eq!(s.dangers_found.as_deref(), Some("Found 0 out of 2"));
    }
}
