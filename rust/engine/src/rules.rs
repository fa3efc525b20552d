use crate::betting::Stage;
use crate::errors::ActionRejection;
use crate::player::{Player, PlayerAction as A};

/// An action that passed validation, with its chip cost already capped to
/// the player's stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Call(u32),
    /// Call by a player already above a table bet that an under-raise
    /// lowered: this many chips come back out of the pot
    CallDown(u32),
    Raise(u32),
}

/// Checks that `index` may act now and prices the action.
///
/// # Arguments
///
/// * `players` - Seats in turn order
/// * `active` - Index of the player whose turn it is
/// * `stage` - Current street; only preflop through river accept actions
/// * `table_bet` - The bet every live player must match this round
/// * `index` - Seat submitting the action
/// * `action` - What the player wants to do
///
/// A call always targets the table bet exactly, so a player left above it by
/// an under-raise is priced as [`ValidatedAction::CallDown`].
///
/// # Errors
///
/// Returns an [`ActionRejection`] when there is no betting round, the seat
/// does not exist, it is someone else's turn, the player already folded,
/// or a raise of zero chips is requested.
///
/// # Examples
///
/// ```
/// use holdem_engine::betting::Stage;
/// use holdem_engine::player::{Player, PlayerAction};
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// let players = vec![Player::new("ann", 15), Player::new("bob", 1000)];
///
/// // A raise beyond the stack is capped to what the player has
/// let priced = validate_action(&players, 0, Stage::Flop, 20, 0, PlayerAction::Raise(100));
/// assert_eq!(priced, Ok(ValidatedAction::Raise(15)));
///
/// // Only the active player may act
/// assert!(validate_action(&players, 0, Stage::Flop, 20, 1, PlayerAction::Call).is_err());
/// ```
pub fn validate_action(
    players: &[Player],
    active: usize,
    stage: Stage,
    table_bet: u32,
    index: usize,
    action: A,
) -> Result<ValidatedAction, ActionRejection> {
    if !stage.is_betting() {
        return Err(ActionRejection::NoBettingRound(stage));
    }
    let player = players
        .get(index)
        .ok_or(ActionRejection::UnknownPlayer(index))?;
    if index != active {
        return Err(ActionRejection::NotPlayersTurn {
            expected: active,
            actual: index,
        });
    }
    if player.is_folded() {
        return Err(ActionRejection::PlayerFolded(index));
    }

    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        // an under-raise left this player above the table bet; calling
        // brings their round bet back down to it
        A::Call if player.current_bet() > table_bet => {
            Ok(ValidatedAction::CallDown(player.current_bet() - table_bet))
        }
        A::Call => {
            let to_call = table_bet - player.current_bet();
            Ok(ValidatedAction::Call(to_call.min(player.chips())))
        }
        A::Raise(0) => Err(ActionRejection::ZeroRaise),
        A::Raise(amount) => Ok(ValidatedAction::Raise(amount.min(player.chips()))),
    }
}
