//! Deck position and the transition lock

use crate::clock::{Clock, SystemClock};
use crate::input::NavCommand;
use crate::tag::{DeckId, RequestTag};
use crate::transform::{self, CardTransform};
use mentorscroll_core::ReelCard;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Direction of the transition in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Next,
    Previous,
    Shuffle,
}

/// Exit and enter delays for each kind of transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionTimings {
    pub nav_exit: Duration,
    pub nav_enter: Duration,
    pub shuffle_exit: Duration,
    pub shuffle_enter: Duration,
}

impl TransitionTimings {
    /// No delays; every transition settles on the next tick
    pub const INSTANT: TransitionTimings = TransitionTimings {
        nav_exit: Duration::ZERO,
        nav_enter: Duration::ZERO,
        shuffle_exit: Duration::ZERO,
        shuffle_enter: Duration::ZERO,
    };

    fn for_direction(&self, direction: Direction) -> (Duration, Duration) {
        match direction {
            Direction::Next | Direction::Previous => (self.nav_exit, self.nav_enter),
            Direction::Shuffle => (self.shuffle_exit, self.shuffle_enter),
        }
    }

    /// Time from start of a transition until the lock is released
    pub fn total(&self, direction: Direction) -> Duration {
        let (exit, enter) = self.for_direction(direction);
        exit + enter
    }
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            nav_exit: Duration::from_millis(300),
            nav_enter: Duration::from_millis(100),
            shuffle_exit: Duration::from_millis(500),
            shuffle_enter: Duration::from_millis(400),
        }
    }
}

/// Coarse navigator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStatus {
    /// No cards; every operation is a no-op
    Empty,
    Idle,
    Transitioning,
}

/// Something observable that happened during [`DeckNavigator::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckEvent {
    IndexChanged { from: usize, to: usize },
    TransitionFinished { direction: Direction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Old card leaving; index not yet moved
    Exiting { target: usize, until: Instant },
    /// New card arriving; index already moved
    Entering { until: Instant },
}

/// Owns the card collection and the single current pointer into it
///
/// Navigation is split into an exit phase and an enter phase. The index only
/// moves at the boundary between them, and while either phase is running every
/// navigation request is dropped. Phases advance when the host calls
/// [`tick`](Self::tick).
pub struct DeckNavigator<C: Clock = SystemClock> {
    id: DeckId,
    cards: Vec<ReelCard>,
    current: usize,
    phase: Phase,
    direction: Option<Direction>,
    timings: TransitionTimings,
    clock: C,
}

impl DeckNavigator<SystemClock> {
    pub fn new(cards: Vec<ReelCard>) -> Self {
        Self::with_clock(cards, SystemClock)
    }
}

impl<C: Clock> DeckNavigator<C> {
    pub fn with_clock(cards: Vec<ReelCard>, clock: C) -> Self {
        Self {
            id: DeckId::new(),
            cards,
            current: 0,
            phase: Phase::Idle,
            direction: None,
            timings: TransitionTimings::default(),
            clock,
        }
    }

    /// Starts at `index`, or at 0 if it is out of range
    pub fn starting_at(mut self, index: usize) -> Self {
        if index < self.cards.len() {
            self.current = index;
        } else if !self.cards.is_empty() {
            log::warn!(
                "Start index {} out of range for {} cards, starting at 0",
                index,
                self.cards.len()
            );
        }
        self
    }

    pub fn with_timings(mut self, timings: TransitionTimings) -> Self {
        self.timings = timings;
        self
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[ReelCard] {
        &self.cards
    }

    pub fn card(&self, index: usize) -> Option<&ReelCard> {
        self.cards.get(index)
    }

    pub fn current_index(&self) -> Option<usize> {
        (!self.cards.is_empty()).then_some(self.current)
    }

    pub fn current_card(&self) -> Option<&ReelCard> {
        self.cards.get(self.current)
    }

    /// Direction of the transition in flight, if any
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn status(&self) -> DeckStatus {
        if self.cards.is_empty() {
            DeckStatus::Empty
        } else if self.is_transitioning() {
            DeckStatus::Transitioning
        } else {
            DeckStatus::Idle
        }
    }

    pub fn timings(&self) -> TransitionTimings {
        self.timings
    }

    /// Moves one card forward, wrapping at the end
    ///
    /// Returns false if the request was dropped.
    pub fn next(&mut self) -> bool {
        if !self.can_start("next") {
            return false;
        }
        let target = (self.current + 1) % self.cards.len();
        self.begin(Direction::Next, target);
        true
    }

    /// Moves one card back, wrapping at the start
    pub fn prev(&mut self) -> bool {
        if !self.can_start("prev") {
            return false;
        }
        let len = self.cards.len();
        let target = (self.current + len - 1) % len;
        self.begin(Direction::Previous, target);
        true
    }

    /// Moves to a uniformly random card other than the current one
    ///
    /// A single card deck has nowhere to go, so this is a no-op there.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if !self.can_start("shuffle") {
            return false;
        }
        let len = self.cards.len();
        if len < 2 {
            log::debug!("Shuffle ignored: only one card");
            return false;
        }
        let mut target = rng.random_range(0..len - 1);
        if target >= self.current {
            target += 1;
        }
        self.begin(Direction::Shuffle, target);
        true
    }

    /// Sets the index directly, skipping the transition
    ///
    /// Ignored while a transition is running, when `index` is already current,
    /// or when it is out of range.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if self.is_transitioning() || index == self.current || index >= self.cards.len() {
            log::debug!("Jump to {} ignored", index);
            return false;
        }
        self.current = index;
        true
    }

    /// Applies a normalized input command
    pub fn handle(&mut self, command: NavCommand) -> bool {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Previous => self.prev(),
        }
    }

    /// Advances any phase whose deadline has passed
    ///
    /// Both phases may complete in one call if enough time went by.
    pub fn tick(&mut self) -> Vec<DeckEvent> {
        let now = self.clock.now();
        let mut events = Vec::new();

        loop {
            match self.phase {
                Phase::Exiting { target, until } if now >= until => {
                    let from = self.current;
                    self.current = target;
                    let (_, enter) = self.timings.for_direction(self.direction_or_next());
                    self.phase = Phase::Entering {
                        until: until + enter,
                    };
                    events.push(DeckEvent::IndexChanged { from, to: target });
                }
                Phase::Entering { until } if now >= until => {
                    let direction = self.direction_or_next();
                    self.phase = Phase::Idle;
                    self.direction = None;
                    events.push(DeckEvent::TransitionFinished { direction });
                }
                _ => break,
            }
        }

        events
    }

    /// When the next phase boundary is due, if a transition is running
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.phase {
            Phase::Idle => None,
            Phase::Exiting { until, .. } | Phase::Entering { until } => Some(until),
        }
    }

    /// Adds cards at the end without disturbing the current position
    pub fn append<I: IntoIterator<Item = ReelCard>>(&mut self, cards: I) {
        let before = self.cards.len();
        self.cards.extend(cards);
        log::debug!(
            "Appended {} cards to deck {}",
            self.cards.len() - before,
            self.id
        );
    }

    /// Placement for the card at `index`, or `None` if it is not drawn
    pub fn transform_for(&self, index: usize) -> Option<CardTransform> {
        transform::transform_for(index, self.current, self.cards.len(), self.direction)
    }

    /// Indices that are drawn, bottom of the stack first
    pub fn visible(&self) -> Vec<(usize, CardTransform)> {
        let mut drawn: Vec<(usize, CardTransform)> = (0..self.cards.len())
            .filter_map(|i| self.transform_for(i).map(|t| (i, t)))
            .collect();
        drawn.sort_by_key(|(_, t)| t.stack_order);
        drawn
    }

    /// Identity of the current card, for tagging an async request
    pub fn tag_current(&self) -> Option<RequestTag> {
        self.current_card().map(|card| RequestTag::new(self.id, card.id))
    }

    /// True if a request tagged with `tag` still concerns what is on screen
    pub fn is_current(&self, tag: &RequestTag) -> bool {
        tag.deck() == self.id && self.current_card().is_some_and(|c| c.id == tag.card())
    }

    fn can_start(&self, op: &str) -> bool {
        if self.cards.is_empty() {
            log::debug!("{} ignored: deck is empty", op);
            return false;
        }
        if self.is_transitioning() {
            log::debug!("{} dropped: transition in flight", op);
            return false;
        }
        true
    }

    fn begin(&mut self, direction: Direction, target: usize) {
        let (exit, _) = self.timings.for_direction(direction);
        self.direction = Some(direction);
        self.phase = Phase::Exiting {
            target,
            until: self.clock.now() + exit,
        };
    }

    fn direction_or_next(&self) -> Direction {
        self.direction.unwrap_or(Direction::Next)
    }
}
