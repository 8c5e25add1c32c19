// crates/tui/src/state.rs
//! Browser state that is not owned by the deck

use mentorscroll_core::Quiz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Deck,
    Help,
}

/// Answer picked for the quiz on the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizAnswer {
    pub choice: usize,
    pub correct: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub view: View,
    pub should_quit: bool,
    pub status_message: Option<String>,

    /// The current card is arriving; draw it in place even though the deck
    /// still reports a direction
    pub entering: bool,

    pub answer: Option<QuizAnswer>,

    /// Terminal width in columns, used for edge zones
    pub width: u16,

    /// Digits typed after `g`, while a jump is being entered
    pub jump_input: Option<String>,
}

impl BrowserState {
    pub fn new() -> Self {
        Self {
            width: 80,
            ..Self::default()
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_help(&mut self) {
        self.view = match self.view {
            View::Deck => View::Help,
            View::Help => View::Deck,
        };
    }

    /// Records `choice` against `quiz`, keeping the first answer
    ///
    /// Returns false for an out of range choice or a quiz already answered.
    pub fn answer(&mut self, quiz: &Quiz, choice: usize) -> bool {
        if self.answer.is_some() || choice >= quiz.options().len() {
            return false;
        }
        let correct = quiz.is_correct(choice);
        self.answer = Some(QuizAnswer { choice, correct });
        if correct {
            self.set_status("Correct!");
        } else {
            self.set_status(format!("Not quite. The answer is {}", quiz.correct_option()));
        }
        true
    }

    pub fn begin_jump(&mut self) {
        self.jump_input = Some(String::new());
        self.set_status("Go to card: ");
    }

    /// Appends a digit to the pending jump; ignored when no jump is pending
    pub fn push_jump_digit(&mut self, digit: char) {
        if let Some(input) = self.jump_input.as_mut() {
            if digit.is_ascii_digit() && input.len() < 6 {
                input.push(digit);
            }
            let prompt = format!("Go to card: {}", input);
            self.set_status(prompt);
        }
    }

    pub fn pop_jump_digit(&mut self) {
        if let Some(input) = self.jump_input.as_mut() {
            input.pop();
            let prompt = format!("Go to card: {}", input);
            self.set_status(prompt);
        }
    }

    pub fn cancel_jump(&mut self) {
        self.jump_input = None;
        self.clear_status();
    }

    /// Ends the pending jump and returns the zero-based index typed
    ///
    /// Card numbers are typed one-based; blank input and `0` yield `None`.
    pub fn take_jump(&mut self) -> Option<usize> {
        let input = self.jump_input.take()?;
        self.clear_status();
        input.parse::<usize>().ok()?.checked_sub(1)
    }

    /// Forgets per-card state when a new card becomes current
    pub fn card_changed(&mut self) {
        self.answer = None;
        self.entering = true;
        self.clear_status();
    }
}
