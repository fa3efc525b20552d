use crate::cards::Card;
use serde::{Deserialize, Serialize};

/// A betting decision submitted for the player whose turn it is.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    /// Give up the hand; chips already committed stay in the pot
    Fold,
    /// Match the table bet, or as much of it as the stack allows
    Call,
    /// Put this many more chips in; the table bet becomes the player's new total
    Raise(u32),
}

/// Default chip count for a newly seated player
pub const STARTING_CHIPS: u32 = 1_000;

/// A seated player. Identity is the seat index; the name is for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    chips: u32,
    /// Zero or two hole cards
    hole: Vec<Card>,
    /// Chips committed during the current betting round
    current_bet: u32,
    folded: bool,
    all_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            hole: Vec::with_capacity(2),
            current_bet: 0,
            folded: false,
            all_in: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn hole_cards(&self) -> &[Card] {
        &self.hole
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    /// Moves up to `amount` chips from the stack into this round's bet and
    /// returns what was actually paid. Emptying the stack marks the player all-in.
    pub(crate) fn commit(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.chips);
        self.chips -= paid;
        self.current_bet += paid;
        if self.chips == 0 {
            self.all_in = true;
        }
        paid
    }

    /// Moves `amount` of this round's bet back to the stack.
    pub(crate) fn withdraw(&mut self, amount: u32) -> u32 {
        let returned = amount.min(self.current_bet);
        self.current_bet -= returned;
        self.chips += returned;
        if returned > 0 {
            self.all_in = false;
        }
        returned
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
    }

    pub(crate) fn clear_bet(&mut self) {
        self.current_bet = 0;
    }

    pub(crate) fn add_chips(&mut self, amount: u32) {
        self.chips = self.chips.saturating_add(amount);
    }

    /// Clears last hand's cards and flags and takes the new hole cards.
    pub(crate) fn begin_hand(&mut self, hole: Vec<Card>) {
        self.hole = hole;
        self.current_bet = 0;
        self.folded = false;
        self.all_in = false;
    }
}
