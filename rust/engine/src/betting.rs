//! Betting-round bookkeeping: who acts next, when a street is finished,
//! and how chips move from stacks into the pot.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::rules::ValidatedAction;

/// Where a hand stands. `Showdown` is terminal until the session is reset
/// or a new hand is started.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Waiting,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// The street that follows this one once its betting round is complete.
    pub fn next(self) -> Stage {
        match self {
            Stage::Waiting => Stage::Waiting,
            Stage::Preflop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River | Stage::Showdown => Stage::Showdown,
        }
    }

    /// Community cards dealt when the hand enters this stage.
    pub fn cards_to_deal(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            Stage::Waiting | Stage::Preflop | Stage::Showdown => 0,
        }
    }

    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Waiting => "waiting",
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        })
    }
}

/// Chips in the middle and the bet every live player must match this round.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TableBets {
    pub pot: u32,
    pub current_bet: u32,
}

/// What the table does after an accepted action.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Transition {
    /// Betting continues with this seat
    NextPlayer(usize),
    /// Every live player has matched the bet or is all-in
    RoundComplete,
    /// Only one player has not folded; the hand ends without further betting
    LastPlayerStanding,
}

/// Posts blinds from seats 0 and 1. Short stacks post what they have.
/// The caller guarantees at least two players.
pub fn post_blinds(players: &mut [Player], bets: &mut TableBets, small_blind: u32, big_blind: u32) {
    let small = players[0].commit(small_blind);
    let big = players[1].commit(big_blind);
    bets.pot = small + big;
    bets.current_bet = big_blind;
}

/// Moves the priced action's chips into the pot and returns what was paid.
/// A raise sets the table bet to the raiser's new round total, even when a
/// capped all-in leaves that below the previous table bet. A call-down
/// takes chips back out of the pot and pays nothing.
pub fn apply_action(players: &mut [Player], bets: &mut TableBets, index: usize, action: ValidatedAction) -> u32 {
    let player = &mut players[index];
    let paid = match action {
        ValidatedAction::Fold => {
            player.fold();
            0
        }
        ValidatedAction::Call(amount) => player.commit(amount),
        ValidatedAction::CallDown(amount) => {
            let returned = player.withdraw(amount);
            bets.pot -= returned;
            0
        }
        ValidatedAction::Raise(amount) => {
            let paid = player.commit(amount);
            bets.current_bet = player.current_bet();
            paid
        }
    };
    bets.pot += paid;
    paid
}

pub fn live_players(players: &[Player]) -> usize {
    players.iter().filter(|p| !p.is_folded()).count()
}

pub fn is_round_complete(players: &[Player], current_bet: u32) -> bool {
    players
        .iter()
        .filter(|p| !p.is_folded())
        .all(|p| p.current_bet() == current_bet || p.is_all_in())
}

/// Next seat after `from` (wrapping) that has not folded.
pub fn next_to_act(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&i| !players[i].is_folded())
}

/// First seat in turn order that has not folded.
pub fn first_to_act(players: &[Player]) -> Option<usize> {
    players.iter().position(|p| !p.is_folded())
}

/// Decides what follows an action by `actor`.
pub fn after_action(players: &[Player], bets: &TableBets, actor: usize) -> Transition {
    if live_players(players) <= 1 {
        return Transition::LastPlayerStanding;
    }
    if is_round_complete(players, bets.current_bet) {
        return Transition::RoundComplete;
    }
    match next_to_act(players, actor) {
        Some(next) => Transition::NextPlayer(next),
        None => Transition::LastPlayerStanding,
    }
}

/// Zeroes per-round bets before the next street.
pub fn clear_round(players: &mut [Player], bets: &mut TableBets) {
    for p in players.iter_mut() {
        p.clear_bet();
    }
    bets.current_bet = 0;
}
