//! Request and response bodies for the JSON API.
use holdem_engine::cards::Card;
use holdem_engine::player::PlayerAction;
use holdem_engine::session::{GameStateView, PlayerView};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardView {
    pub suit: String,
    pub rank: u8,
    /// e.g. "Ace of hearts"
    pub display: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            suit: card.suit.name().to_string(),
            rank: card.rank.value(),
            display: card.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerStateView {
    pub name: String,
    pub chips: u32,
    pub hand: Vec<CardView>,
    pub current_bet: u32,
    pub folded: bool,
    pub all_in: bool,
}

impl From<&PlayerView> for PlayerStateView {
    fn from(p: &PlayerView) -> Self {
        Self {
            name: p.name.clone(),
            chips: p.chips,
            hand: p.hand.iter().map(CardView::from).collect(),
            current_bet: p.current_bet,
            folded: p.folded,
            all_in: p.all_in,
        }
    }
}

/// Body of `GET /api/game_state`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameStateResponse {
    pub players: Vec<PlayerStateView>,
    pub community_cards: Vec<CardView>,
    pub pot: u32,
    pub current_bet: u32,
    pub current_player: usize,
    pub game_stage: String,
    pub small_blind: u32,
    pub big_blind: u32,
}

impl From<&GameStateView> for GameStateResponse {
    fn from(view: &GameStateView) -> Self {
        Self {
            players: view.players.iter().map(PlayerStateView::from).collect(),
            community_cards: view.community_cards.iter().map(CardView::from).collect(),
            pot: view.pot,
            current_bet: view.current_bet,
            current_player: view.active_player,
            game_stage: view.stage.to_string(),
            small_blind: view.small_blind,
            big_blind: view.big_blind,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub name: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Call,
    Raise,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    pub player_index: usize,
    pub action: ActionKind,
    #[serde(default)]
    pub amount: u32,
}

impl ActionRequest {
    /// A raise without an amount is a raise of zero, which the table rejects.
    pub fn to_action(&self) -> PlayerAction {
        match self.action {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Raise => PlayerAction::Raise(self.amount),
        }
    }
}

/// `{success, message}` acknowledgement; `winner` is set when an action
/// finished the hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ack {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
            winner: None,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok()
        }
    }
}
