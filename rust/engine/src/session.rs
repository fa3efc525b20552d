use chrono::Utc;
use serde::Serialize;

use crate::best::{best_hand, BestHand};
use crate::betting::{self, Stage, TableBets, Transition};
use crate::cards::Card;
use crate::config::{TableConfig, MIN_PLAYERS};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{format_hand_id, ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction};
use crate::rules::validate_action;

/// One table's game: seats, deck, board, pot and street.
///
/// Operations either apply completely or return an error and leave the
/// session as it was. There is no internal locking; a front end serving
/// concurrent requests must serialize calls (e.g. hold it in a mutex).
///
/// # Examples
///
/// ```
/// use holdem_engine::betting::Stage;
/// use holdem_engine::config::TableConfig;
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::session::GameSession;
///
/// let mut game = GameSession::new(TableConfig { seed: Some(7), ..TableConfig::default() })?;
/// game.add_player("ann")?;
/// game.add_player("bob")?;
/// game.start()?;
///
/// // heads-up: the small blind acts first and folds
/// game.act(0, PlayerAction::Fold)?;
/// assert_eq!(game.stage(), Stage::Showdown);
///
/// let result = game.resolve()?;
/// assert_eq!(result.winner, "bob");
/// assert_eq!(game.players()[1].chips(), 1_010);
/// # Ok::<(), holdem_engine::errors::GameError>(())
/// ```
#[derive(Debug)]
pub struct GameSession {
    config: TableConfig,
    players: Vec<Player>,
    deck: Deck,
    community: Vec<Card>,
    bets: TableBets,
    active: usize,
    stage: Stage,
    /// Set when a hand reaches showdown and cleared once its pot is awarded
    awaiting_resolution: bool,
    hands_played: u32,
    hand: Option<HandRecord>,
    last_record: Option<HandRecord>,
}

/// Outcome of [`GameSession::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub winner_index: usize,
    pub winner: String,
    pub pot: u32,
    /// `None` when the winner was the only player left
    pub winning_hand: Option<BestHand>,
}

/// Read-only projection of a seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub name: String,
    pub chips: u32,
    pub hand: Vec<Card>,
    pub current_bet: u32,
    pub folded: bool,
    pub all_in: bool,
}

/// Read-only projection of the whole table for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStateView {
    pub players: Vec<PlayerView>,
    pub community_cards: Vec<Card>,
    pub pot: u32,
    pub current_bet: u32,
    pub active_player: usize,
    pub stage: Stage,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl GameSession {
    pub fn new(config: TableConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: TableConfig) -> Self {
        let deck = Self::deck_for(&config, 0);
        Self {
            config,
            players: Vec::new(),
            deck,
            community: Vec::with_capacity(5),
            bets: TableBets::default(),
            active: 0,
            stage: Stage::Waiting,
            awaiting_resolution: false,
            hands_played: 0,
            hand: None,
            last_record: None,
        }
    }

    fn deck_for(config: &TableConfig, hand_number: u32) -> Deck {
        match config.seed {
            Some(seed) => Deck::new_with_seed(seed.wrapping_add(u64::from(hand_number))),
            None => Deck::new(),
        }
    }

    /// Seats a player at the next free seat and returns its index.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<usize, GameError> {
        if self.players.len() >= self.config.max_players {
            return Err(GameError::TableFull {
                capacity: self.config.max_players,
            });
        }
        if self.stage.is_betting() || self.awaiting_resolution {
            return Err(GameError::HandInProgress);
        }
        let name = name.into();
        tracing::info!(player = %name, seat = self.players.len(), "player joined");
        self.players
            .push(Player::new(name, self.config.starting_chips));
        Ok(self.players.len() - 1)
    }

    /// Shuffles a fresh deck, deals two hole cards to everyone, posts the
    /// blinds from seats 0 and 1 and opens preflop betting.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                required: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        if self.stage.is_betting() || self.awaiting_resolution {
            return Err(GameError::HandInProgress);
        }

        let hand_number = self.hands_played + 1;
        let mut deck = Self::deck_for(&self.config, hand_number);
        // one card per seat per pass, two passes
        let mut holes = vec![Vec::with_capacity(2); self.players.len()];
        for _ in 0..2 {
            for hole in holes.iter_mut() {
                hole.push(deck.draw()?);
            }
        }

        for (player, hole) in self.players.iter_mut().zip(holes) {
            player.begin_hand(hole);
        }
        self.deck = deck;
        self.hands_played = hand_number;
        self.community.clear();
        self.bets = TableBets::default();
        betting::post_blinds(
            &mut self.players,
            &mut self.bets,
            self.config.small_blind,
            self.config.big_blind,
        );
        // heads-up wraps back to the small blind
        self.active = if self.players.len() > 2 { 2 } else { 0 };
        self.stage = Stage::Preflop;
        self.awaiting_resolution = false;

        let hand_id = format_hand_id(&Utc::now().format("%Y%m%d").to_string(), hand_number);
        tracing::info!(
            hand_id = %hand_id,
            players = self.players.len(),
            seed = self.deck.seed(),
            "hand started"
        );
        self.hand = Some(HandRecord {
            hand_id,
            seed: self.deck.seed(),
            players: self.players.iter().map(|p| p.name().to_string()).collect(),
            actions: Vec::new(),
            board: Vec::new(),
            showdown: None,
            ts: None,
        });
        Ok(())
    }

    /// Applies `action` for seat `index`, then moves the turn, closes the
    /// street, or ends the hand when only one player is left.
    pub fn act(&mut self, index: usize, action: PlayerAction) -> Result<(), GameError> {
        let priced = validate_action(
            &self.players,
            self.active,
            self.stage,
            self.bets.current_bet,
            index,
            action,
        )
        .inspect_err(|reason| {
            tracing::warn!(player = index, action = ?action, %reason, "action rejected");
        })?;

        // work on copies so a failure below leaves the session untouched
        let mut players = self.players.clone();
        let mut bets = self.bets;
        let paid = betting::apply_action(&mut players, &mut bets, index, priced);
        let returned = (self.bets.pot + paid).saturating_sub(bets.pot);
        let transition = betting::after_action(&players, &bets, index);
        if transition == Transition::RoundComplete
            && self.deck.remaining() < self.stage.next().cards_to_deal()
        {
            return Err(GameError::EmptyDeck);
        }

        tracing::debug!(
            player = index,
            action = ?action,
            paid,
            returned,
            pot = bets.pot,
            "action accepted"
        );
        let stage = self.stage;
        self.players = players;
        self.bets = bets;
        if let Some(hand) = self.hand.as_mut() {
            hand.actions.push(ActionRecord {
                player_index: index,
                player: self.players[index].name().to_string(),
                stage,
                action,
                paid,
                returned,
            });
        }

        match transition {
            Transition::NextPlayer(next) => self.active = next,
            Transition::RoundComplete => self.advance_stage()?,
            Transition::LastPlayerStanding => {
                tracing::debug!(from = %self.stage, "one player left, hand over");
                self.enter_showdown();
            }
        }
        Ok(())
    }

    fn advance_stage(&mut self) -> Result<(), GameError> {
        betting::clear_round(&mut self.players, &mut self.bets);
        self.active = betting::first_to_act(&self.players).unwrap_or(0);
        let next = self.stage.next();
        for _ in 0..next.cards_to_deal() {
            let card = self.deck.draw()?;
            self.community.push(card);
        }
        tracing::debug!(from = %self.stage, to = %next, board = self.community.len(), "street complete");
        if next == Stage::Showdown {
            self.enter_showdown();
        } else {
            self.stage = next;
        }
        Ok(())
    }

    fn enter_showdown(&mut self) {
        self.stage = Stage::Showdown;
        self.awaiting_resolution = true;
    }

    /// Awards the whole pot. A lone survivor wins without a hand comparison;
    /// otherwise the best hand wins and an exact tie goes to the earliest
    /// seat. Pots are never split.
    pub fn resolve(&mut self) -> Result<Resolution, GameError> {
        if self.stage != Stage::Showdown || !self.awaiting_resolution {
            return Err(GameError::NoActiveHand);
        }
        let live: Vec<usize> = (0..self.players.len())
            .filter(|&i| !self.players[i].is_folded())
            .collect();

        let (winner_index, winning_hand) = match live.as_slice() {
            [] => return Err(GameError::NoActiveHand),
            [only] => (*only, None),
            _ => {
                let mut best: Option<(usize, BestHand)> = None;
                for &i in &live {
                    let hand = best_hand(self.players[i].hole_cards(), &self.community)?;
                    if best.as_ref().map_or(true, |(_, b)| hand.score > b.score) {
                        best = Some((i, hand));
                    }
                }
                match best {
                    Some((i, hand)) => (i, Some(hand)),
                    None => return Err(GameError::NoActiveHand),
                }
            }
        };

        let pot = self.bets.pot;
        self.players[winner_index].add_chips(pot);
        self.bets.pot = 0;
        self.awaiting_resolution = false;

        let resolution = Resolution {
            winner_index,
            winner: self.players[winner_index].name().to_string(),
            pot,
            winning_hand,
        };
        tracing::info!(
            winner = %resolution.winner,
            pot,
            hand = ?resolution.winning_hand.as_ref().map(|h| h.score.category),
            "pot awarded"
        );

        if let Some(mut record) = self.hand.take() {
            record.board = self.community.clone();
            record.showdown = Some(ShowdownInfo {
                winner_index,
                winner: resolution.winner.clone(),
                pot,
                winning_hand: resolution.winning_hand.clone(),
            });
            self.last_record = Some(record);
        }
        Ok(resolution)
    }

    /// Throws everything away: seats, chips, deck and history.
    pub fn reset(&mut self) {
        tracing::info!("table reset");
        *self = Self::empty(self.config.clone());
    }

    pub fn snapshot(&self) -> GameStateView {
        GameStateView {
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    name: p.name().to_string(),
                    chips: p.chips(),
                    hand: p.hole_cards().to_vec(),
                    current_bet: p.current_bet(),
                    folded: p.is_folded(),
                    all_in: p.is_all_in(),
                })
                .collect(),
            community_cards: self.community.clone(),
            pot: self.bets.pot,
            current_bet: self.bets.current_bet,
            active_player: self.active,
            stage: self.stage,
            small_blind: self.config.small_blind,
            big_blind: self.config.big_blind,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }
    pub fn pot(&self) -> u32 {
        self.bets.pot
    }
    pub fn current_bet(&self) -> u32 {
        self.bets.current_bet
    }
    pub fn active_player(&self) -> usize {
        self.active
    }
    pub fn stage(&self) -> Stage {
        self.stage
    }
    pub fn is_awaiting_resolution(&self) -> bool {
        self.awaiting_resolution
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Record of the most recently resolved hand.
    pub fn last_hand_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::empty(TableConfig::default())
    }
}
