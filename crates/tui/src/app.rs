// crates/tui/src/app.rs
//! Deck browser application logic

use crate::{
    error::TuiResult,
    events::{AppEvent, DragTracker, EventHandler},
    state::{BrowserState, View},
    theme::{Theme, ThemeType},
    ui,
};
use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};
use mentorscroll_config::DeckConfig;
use mentorscroll_core::{Quiz, ReelCard};
use mentorscroll_deck::{
    CardTransform, Clock, DeckEvent, DeckNavigator, InputEvent, InputMapper, NavKey, SystemClock,
    TransitionTimings,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;

/// Transition timings described by the `[deck]` config section
pub fn timings_from(config: &DeckConfig) -> TransitionTimings {
    TransitionTimings {
        nav_exit: Duration::from_millis(config.nav_exit_ms),
        nav_enter: Duration::from_millis(config.nav_enter_ms),
        shuffle_exit: Duration::from_millis(config.shuffle_exit_ms),
        shuffle_enter: Duration::from_millis(config.shuffle_enter_ms),
    }
}

/// The deck browser
///
/// Keys, mouse drags and edge clicks all go through one [`InputMapper`] so
/// every source navigates the same way.
pub struct App<C: Clock = SystemClock> {
    state: BrowserState,
    deck: DeckNavigator<C>,
    mapper: InputMapper,
    drag: DragTracker,
    rng: StdRng,
    theme: Theme,
}

impl App<SystemClock> {
    pub fn new(cards: Vec<ReelCard>) -> Self {
        Self::from_deck(DeckNavigator::new(cards))
    }
}

impl<C: Clock> App<C> {
    pub fn from_deck(deck: DeckNavigator<C>) -> Self {
        Self {
            state: BrowserState::new(),
            deck,
            mapper: InputMapper::default(),
            drag: DragTracker::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
            theme: Theme::default(),
        }
    }

    /// Applies timings and the drag threshold from `[deck]`
    pub fn with_config(mut self, config: &DeckConfig) -> Self {
        self.deck = self.deck.with_timings(timings_from(config));
        self.mapper = InputMapper::new(config.drag_threshold);
        self
    }

    pub fn with_theme(mut self, theme_type: ThemeType) -> Self {
        self.theme = Theme::new(theme_type);
        self
    }

    /// Makes shuffling reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn deck(&self) -> &DeckNavigator<C> {
        &self.deck
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Placement of every drawn card, bottom of the stack first
    ///
    /// While the new card is entering it is drawn in place.
    pub fn visible_cards(&self) -> Vec<(usize, CardTransform)> {
        let current = self.deck.current_index();
        self.deck
            .visible()
            .into_iter()
            .map(|(index, transform)| {
                if self.state.entering && Some(index) == current {
                    (index, CardTransform::IDENTITY)
                } else {
                    (index, transform)
                }
            })
            .collect()
    }

    /// Runs until the user quits
    pub fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &EventHandler,
    ) -> TuiResult<()> {
        self.state.width = terminal.size()?.width;
        log::info!("Browsing {} cards", self.deck.len());

        while !self.state.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            match events.next()? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers),
                AppEvent::Mouse(mouse) => self.handle_mouse(&mouse),
                AppEvent::Quit => self.state.quit(),
                AppEvent::Resize(width, _) => self.state.width = width,
                AppEvent::Tick => {}
            }
            self.handle_tick();
        }

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.state.quit();
            return;
        }
        if self.state.jump_input.is_some() {
            self.handle_jump_key(code);
            return;
        }

        match code {
            KeyCode::Char('q') => {
                self.state.quit();
                return;
            }
            KeyCode::Char('?') => {
                self.state.toggle_help();
                return;
            }
            KeyCode::Esc => {
                if self.state.view == View::Help {
                    self.state.view = View::Deck;
                } else {
                    self.state.quit();
                }
                return;
            }
            KeyCode::Char('t') => {
                let next = self.theme.theme_type.next();
                self.theme = Theme::new(next);
                self.state.set_status(format!("Theme: {}", next.name()));
                return;
            }
            _ => {}
        }

        if self.state.view != View::Deck {
            return;
        }

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.handle_input(InputEvent::Key(NavKey::Left));
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.handle_input(InputEvent::Key(NavKey::Right));
            }
            KeyCode::Char('s') => {
                self.deck.shuffle(&mut self.rng);
            }
            KeyCode::Char('g') => self.state.begin_jump(),
            KeyCode::Home => {
                self.jump_to(0);
            }
            KeyCode::End => {
                self.jump_to(self.deck.len().saturating_sub(1));
            }
            KeyCode::Char(c @ 'a'..='d') => self.answer_quiz(c as usize - 'a' as usize),
            KeyCode::Char(c @ '1'..='4') => self.answer_quiz(c as usize - '1' as usize),
            _ => {}
        }
    }

    /// Makes card `index` current without a transition
    ///
    /// Dropped while the deck is moving or when `index` is out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if !self.deck.jump_to(index) {
            return false;
        }
        self.state.card_changed();
        self.state.entering = false;
        true
    }

    fn handle_jump_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() => self.state.push_jump_digit(c),
            KeyCode::Backspace => self.state.pop_jump_digit(),
            KeyCode::Enter => {
                if let Some(index) = self.state.take_jump() {
                    if !self.jump_to(index) && index >= self.deck.len() {
                        self.state.set_status(format!("No card {}", index + 1));
                    }
                }
            }
            _ => self.state.cancel_jump(),
        }
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) {
        if self.state.view != View::Deck {
            return;
        }
        if let Some(input) = self.drag.feed(mouse, self.state.width) {
            self.handle_input(input);
        }
    }

    /// Maps raw input and forwards it to the deck
    ///
    /// Returns whether the deck accepted a navigation request.
    pub fn handle_input(&mut self, input: InputEvent) -> bool {
        match self.mapper.map(input) {
            Some(command) => self.deck.handle(command),
            None => false,
        }
    }

    /// Advances the deck and updates per-card state
    pub fn handle_tick(&mut self) -> Vec<DeckEvent> {
        let events = self.deck.tick();
        for event in &events {
            match event {
                DeckEvent::IndexChanged { .. } => self.state.card_changed(),
                DeckEvent::TransitionFinished { .. } => self.state.entering = false,
            }
        }
        events
    }

    fn current_quiz(&self) -> Option<&Quiz> {
        self.deck
            .current_card()
            .and_then(ReelCard::content)
            .and_then(|content| content.quiz.as_ref())
    }

    fn answer_quiz(&mut self, choice: usize) {
        if self.deck.is_transitioning() {
            return;
        }
        let Some(quiz) = self.current_quiz().cloned() else {
            return;
        };
        if self.state.answer(&quiz, choice) {
            log::debug!("Quiz answered with option {}", choice);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentorscroll_core::{ContentType, ExpertSlug, ParsedContent};
    use mentorscroll_deck::ManualClock;

    fn cards(n: usize) -> Vec<ReelCard> {
        (0..n)
            .map(|i| {
                ReelCard::generated(
                    ExpertSlug::new("dr-quantum"),
                    format!("topic {}", i),
                    ContentType::Hook,
                    ParsedContent::titled(format!("Card {}", i)),
                )
            })
            .collect()
    }

    fn app(n: usize) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let deck = DeckNavigator::with_clock(cards(n), clock.clone());
        (App::from_deck(deck).with_seed(7), clock)
    }

    fn settle(app: &mut App<ManualClock>, clock: &ManualClock) {
        clock.advance(Duration::from_secs(1));
        app.handle_tick();
    }

    #[test]
    fn test_arrow_keys_navigate() {
        let (mut app, clock) = app(3);

        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        settle(&mut app, &clock);
        assert_eq!(app.deck().current_index(), Some(1));

        app.handle_key(KeyCode::Char('h'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('h'), KeyModifiers::NONE);
        settle(&mut app, &clock);
        assert_eq!(app.deck().current_index(), Some(0));
    }

    #[test]
    fn test_entering_card_drawn_in_place() {
        let (mut app, clock) = app(5);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);

        clock.advance(Duration::from_millis(300));
        app.handle_tick();
        assert!(app.state().entering);
        let top = app.visible_cards().last().copied();
        assert_eq!(top, Some((1, CardTransform::IDENTITY)));

        clock.advance(Duration::from_millis(100));
        app.handle_tick();
        assert!(!app.state().entering);
        assert!(!app.deck().is_transitioning());
    }

    #[test]
    fn test_keys_ignored_in_help() {
        let (mut app, clock) = app(3);
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        settle(&mut app, &clock);
        assert_eq!(app.deck().current_index(), Some(0));

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.state().view, View::Deck);
        assert!(!app.should_quit());
    }

    #[test]
    fn test_shuffle_moves_elsewhere() {
        let (mut app, clock) = app(4);
        app.handle_key(KeyCode::Char('s'), KeyModifiers::NONE);
        settle(&mut app, &clock);
        assert_ne!(app.deck().current_index(), Some(0));
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _) = app(1);
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit());

        let (mut app, _) = self::app(1);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.should_quit());
    }

    #[test]
    fn test_config_applies_threshold() {
        let (app, _) = app(2);
        let mut config = DeckConfig::default();
        config.drag_threshold = 120.0;
        let mut app = app.with_config(&config);

        assert!(!app.handle_input(InputEvent::Drag { dx: -100.0, dy: 0.0 }));
        assert!(app.handle_input(InputEvent::Drag { dx: -130.0, dy: 0.0 }));
        assert_eq!(
            app.deck().timings().nav_exit,
            Duration::from_millis(config.nav_exit_ms)
        );
    }

    #[test]
    fn test_jump_keys() {
        let (mut app, clock) = app(5);

        app.handle_key(KeyCode::End, KeyModifiers::NONE);
        assert_eq!(app.deck().current_index(), Some(4));
        assert!(!app.deck().is_transitioning());

        app.handle_key(KeyCode::Home, KeyModifiers::NONE);
        assert_eq!(app.deck().current_index(), Some(0));

        app.handle_key(KeyCode::Char('g'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('3'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.deck().current_index(), Some(2));
        assert!(app.state().answer.is_none());

        // Entering the card after a jump must not pin the next exit in place
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        clock.advance(Duration::from_millis(100));
        app.handle_tick();
        assert!(!app.state().entering);
        settle(&mut app, &clock);
        assert_eq!(app.deck().current_index(), Some(3));
    }

    #[test]
    fn test_jump_out_of_range_and_cancel() {
        let (mut app, _) = app(3);

        app.handle_key(KeyCode::Char('g'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('9'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.deck().current_index(), Some(0));
        assert_eq!(app.state().status_message.as_deref(), Some("No card 9"));

        app.handle_key(KeyCode::Char('g'), KeyModifiers::NONE);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert!(app.state().jump_input.is_none());
        assert!(!app.should_quit());
    }

    #[test]
    fn test_theme_cycles() {
        let (mut app, _) = app(1);
        app.handle_key(KeyCode::Char('t'), KeyModifiers::NONE);
        assert_eq!(app.theme().theme_type, ThemeType::Light);
        assert_eq!(app.state().status_message.as_deref(), Some("Theme: Light"));
    }
}
