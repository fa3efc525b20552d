use holdem_engine::betting::{
    after_action, apply_action, clear_round, first_to_act, is_round_complete, next_to_act,
    post_blinds, Stage, TableBets, Transition,
};
use holdem_engine::errors::ActionRejection;
use holdem_engine::player::{Player, PlayerAction};
use holdem_engine::rules::{validate_action, ValidatedAction};

fn table(stacks: &[u32]) -> Vec<Player> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &chips)| Player::new(format!("p{i}"), chips))
        .collect()
}

#[test]
fn stages_advance_in_order_and_deal_the_right_counts() {
    let order = [
        Stage::Preflop,
        Stage::Flop,
        Stage::Turn,
        Stage::River,
        Stage::Showdown,
    ];
    for w in order.windows(2) {
        assert_eq!(w[0].next(), w[1]);
    }
    assert_eq!(Stage::Showdown.next(), Stage::Showdown);
    assert_eq!(Stage::Flop.cards_to_deal(), 3);
    assert_eq!(Stage::Turn.cards_to_deal(), 1);
    assert_eq!(Stage::River.cards_to_deal(), 1);
    assert_eq!(Stage::Showdown.cards_to_deal(), 0);
    assert!(!Stage::Waiting.is_betting());
    assert!(!Stage::Showdown.is_betting());
    assert_eq!(serde_json::to_string(&Stage::Preflop).unwrap(), "\"preflop\"");
}

#[test]
fn blinds_come_from_first_two_seats() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    assert_eq!(players[0].chips(), 990);
    assert_eq!(players[1].chips(), 980);
    assert_eq!(players[2].chips(), 1000);
    assert_eq!(bets.pot, 30);
    assert_eq!(bets.current_bet, 20);
}

#[test]
fn short_big_blind_goes_all_in() {
    let mut players = table(&[1000, 15]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    assert_eq!(players[1].chips(), 0);
    assert!(players[1].is_all_in());
    assert_eq!(players[1].current_bet(), 15);
    assert_eq!(bets.pot, 25);
    assert_eq!(bets.current_bet, 20);
}

#[test]
fn validation_order_and_reasons() {
    let players = table(&[1000, 1000]);
    assert_eq!(
        validate_action(&players, 0, Stage::Waiting, 0, 0, PlayerAction::Call),
        Err(ActionRejection::NoBettingRound(Stage::Waiting))
    );
    assert_eq!(
        validate_action(&players, 0, Stage::Showdown, 0, 0, PlayerAction::Fold),
        Err(ActionRejection::NoBettingRound(Stage::Showdown))
    );
    assert_eq!(
        validate_action(&players, 0, Stage::Flop, 0, 5, PlayerAction::Call),
        Err(ActionRejection::UnknownPlayer(5))
    );
    assert_eq!(
        validate_action(&players, 0, Stage::Flop, 0, 1, PlayerAction::Call),
        Err(ActionRejection::NotPlayersTurn {
            expected: 0,
            actual: 1
        })
    );
    assert_eq!(
        validate_action(&players, 0, Stage::Flop, 0, 0, PlayerAction::Raise(0)),
        Err(ActionRejection::ZeroRaise)
    );
}

#[test]
fn folded_player_cannot_act() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    apply_action(&mut players, &mut bets, 1, ValidatedAction::Fold);
    assert_eq!(
        validate_action(&players, 1, Stage::Turn, 0, 1, PlayerAction::Call),
        Err(ActionRejection::PlayerFolded(1))
    );
}

#[test]
fn call_is_priced_from_the_gap_and_capped_by_stack() {
    let mut players = table(&[1000, 1000, 30]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);

    assert_eq!(
        validate_action(&players, 0, Stage::Preflop, 100, 0, PlayerAction::Call),
        Ok(ValidatedAction::Call(90))
    );
    assert_eq!(
        validate_action(&players, 2, Stage::Preflop, 100, 2, PlayerAction::Call),
        Ok(ValidatedAction::Call(30))
    );
    // already matched: nothing owed
    assert_eq!(
        validate_action(&players, 1, Stage::Preflop, 20, 1, PlayerAction::Call),
        Ok(ValidatedAction::Call(0))
    );
}

#[test]
fn raise_sets_table_bet_to_raisers_total() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);

    let paid = apply_action(&mut players, &mut bets, 2, ValidatedAction::Raise(60));
    assert_eq!(paid, 60);
    assert_eq!(players[2].current_bet(), 60);
    assert_eq!(bets.current_bet, 60);
    assert_eq!(bets.pot, 90);
}

#[test]
fn under_raise_lowers_the_table_bet() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);

    // a raise of 5 leaves seat 2 at 5, below the big blind
    apply_action(&mut players, &mut bets, 2, ValidatedAction::Raise(5));
    assert_eq!(bets.current_bet, 5);
    assert_eq!(bets.pot, 35);
}

#[test]
fn call_above_a_lowered_bet_comes_back_down_to_it() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    apply_action(&mut players, &mut bets, 2, ValidatedAction::Raise(5));

    // the big blind is 15 above the new table bet of 5
    assert_eq!(
        validate_action(&players, 1, Stage::Preflop, bets.current_bet, 1, PlayerAction::Call),
        Ok(ValidatedAction::CallDown(15))
    );

    let paid = apply_action(&mut players, &mut bets, 1, ValidatedAction::CallDown(15));
    assert_eq!(paid, 0);
    assert_eq!(players[1].current_bet(), 5);
    assert_eq!(players[1].chips(), 995);
    assert_eq!(bets.pot, 20);
}

#[test]
fn round_completes_when_all_live_players_match() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    assert!(!is_round_complete(&players, bets.current_bet));

    apply_action(&mut players, &mut bets, 2, ValidatedAction::Call(20));
    assert_eq!(after_action(&players, &bets, 2), Transition::NextPlayer(0));

    apply_action(&mut players, &mut bets, 0, ValidatedAction::Call(10));
    assert_eq!(after_action(&players, &bets, 0), Transition::RoundComplete);
    assert_eq!(bets.pot, 60);
}

#[test]
fn all_in_player_does_not_block_completion() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    apply_action(&mut players, &mut bets, 2, ValidatedAction::Raise(1000));
    assert!(players[2].is_all_in());
    apply_action(&mut players, &mut bets, 0, ValidatedAction::Call(990));
    apply_action(&mut players, &mut bets, 1, ValidatedAction::Call(980));
    assert!(is_round_complete(&players, bets.current_bet));
}

#[test]
fn turn_order_skips_folded_and_wraps() {
    let mut players = table(&[1000, 1000, 1000, 1000]);
    let mut bets = TableBets::default();
    apply_action(&mut players, &mut bets, 0, ValidatedAction::Fold);
    apply_action(&mut players, &mut bets, 3, ValidatedAction::Fold);

    assert_eq!(next_to_act(&players, 2), Some(1));
    assert_eq!(next_to_act(&players, 1), Some(2));
    assert_eq!(first_to_act(&players), Some(1));
}

#[test]
fn last_player_standing_ends_the_round() {
    let mut players = table(&[1000, 1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    apply_action(&mut players, &mut bets, 2, ValidatedAction::Fold);
    assert_eq!(after_action(&players, &bets, 2), Transition::NextPlayer(0));
    apply_action(&mut players, &mut bets, 0, ValidatedAction::Fold);
    assert_eq!(after_action(&players, &bets, 0), Transition::LastPlayerStanding);
}

#[test]
fn clear_round_zeroes_bets_but_keeps_pot() {
    let mut players = table(&[1000, 1000]);
    let mut bets = TableBets::default();
    post_blinds(&mut players, &mut bets, 10, 20);
    clear_round(&mut players, &mut bets);
    assert!(players.iter().all(|p| p.current_bet() == 0));
    assert_eq!(bets.current_bet, 0);
    assert_eq!(bets.pot, 30);
}
