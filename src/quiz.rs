// Quiz progression: question -> answer -> explanation -> next question, forever.
// Visual expectation: the user taps every danger on the question picture, the
// "Found X out of Y" label counts up, and once X == Y the answer can be shown.
// Wrapping past the last step reshuffles the deck.

use crate::error::Error;
use crate::model::{validate_deck, QuizStep, StepState};
use crate::types::Color;
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// The whole mutable quiz. Only the four transition methods below change it.
#[derive(Debug, Clone)]
pub struct QuizFlowState {
    dangerous_mask_colors: HashSet<Color>,    // palette that counts as "danger"
    quiz_data: Vec<QuizStep>,                 // never empty; reordered only on wrap
    current_step_index: usize,                // always < quiz_data.len()
    step_state: StepState,
    found_colors_for_current_image: HashSet<Color>,
}

impl QuizFlowState {
    /// Start at the first step's question with nothing found.
    /// Fails only when the deck itself is unusable (see `validate_deck`).
    pub fn new(palette: impl IntoIterator<Item = Color>, steps: Vec<QuizStep>) -> Result<Self, Error> {
        validate_deck(&steps)?;
        let dangerous_mask_colors: HashSet<Color> = palette.into_iter().collect();
        info!(
            "Quiz ready: {} steps, {} danger colours",
            steps.len(),
            dangerous_mask_colors.len()
        );

        Ok(Self {
            dangerous_mask_colors,
            quiz_data: steps,
            current_step_index: 0,
            step_state: StepState::Question,
            found_colors_for_current_image: HashSet::new(),
        })
    }

    /* ---------------------------- transitions ---------------------------- */

    /// Record a tapped mask colour. Colours outside the palette (safe areas,
    /// transparent out-of-bounds taps) are ignored; repeats are deduplicated.
    /// Returns true when this call found a new danger.
    pub fn register_selected_color(&mut self, color: Color) -> bool {
        if !self.dangerous_mask_colors.contains(&color) {
            debug!("Tap on safe area ({color:?})");
            return false;
        }
        let new = self.found_colors_for_current_image.insert(color);
        debug!(
            "Tap on danger {color:?} ({}), {}",
            if new { "new" } else { "already found" },
            self.dangers_found_label()
        );
        new
    }

    /// Not gated on `can_go_forward`; the caller decides when to offer it.
    pub fn switch_to_answer_state(&mut self) {
        self.step_state = StepState::Answer;
    }

    pub fn switch_to_explanation_state(&mut self) {
        self.step_state = StepState::Explanation;
    }

    /// Advance using the thread-local RNG for the wrap-around reshuffle.
    pub fn switch_to_next_step(&mut self) {
        self.switch_to_next_step_with(&mut rand::thread_rng());
    }

    /// Advance one step; from the last step go back to 0 and reshuffle the deck.
    /// Either way the found-set is cleared and the new step opens on its question.
    pub fn switch_to_next_step_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.current_step_index + 1 >= self.quiz_data.len() {
            self.current_step_index = 0;
            self.quiz_data.shuffle(rng); // Fisher-Yates, uniform
            info!("Deck finished, reshuffled {} steps", self.quiz_data.len());
        } else {
            self.current_step_index += 1;
        }

        self.found_colors_for_current_image.clear();
        self.step_state = StepState::Question;
        info!(
            "Step {} of {}: {}",
            self.current_step_index + 1,
            self.quiz_data.len(),
            self.current_step_data().question.image.original
        );
    }

    /* ------------------------------ queries ------------------------------ */

    pub fn current_step_data(&self) -> &QuizStep {
        &self.quiz_data[self.current_step_index]
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn step_state(&self) -> StepState {
        self.step_state
    }

    pub fn quiz_data(&self) -> &[QuizStep] {
        &self.quiz_data
    }

    pub fn found_colors(&self) -> &HashSet<Color> {
        &self.found_colors_for_current_image
    }

    /// True exactly when every required danger of this question has been found.
    pub fn can_go_forward(&self) -> bool {
        self.found_colors_for_current_image.len() == self.current_step_data().number_of_objects()
    }

    pub fn dangers_found_label(&self) -> String {
        format!(
            "Found {} out of {}",
            self.found_colors_for_current_image.len(),
            self.current_step_data().number_of_objects()
        )
    }
}
