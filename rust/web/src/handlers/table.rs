use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

use crate::dto::{Ack, ActionRequest, JoinRequest};
use crate::errors::{ErrorResponse, IntoErrorResponse};
use crate::table::{lock, SharedTable};

/// Seats a new player.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/join`
///
/// # Request Format
/// ```json
/// { "name": "ann" }
/// ```
///
/// # Response Format
/// - **Success (200 OK)**: `{"success": true, "message": "ann joined the game"}`
/// - **Error (409 Conflict)**: `table_full` or `hand_in_progress`
pub async fn join(table: SharedTable, request: JoinRequest) -> Response {
    let result = lock(&table).and_then(|mut t| t.join(&request.name));
    match result {
        Ok(_) => ok(Ack::message(format!("{} joined the game", request.name))),
        Err(err) => err.into_http_response(),
    }
}

/// Deals a new hand to everyone seated.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/start`
///
/// # Response Format
/// - **Success (200 OK)**: `{"success": true, "message": "Game started"}`
/// - **Error (400 Bad Request)**: `not_enough_players`
/// - **Error (409 Conflict)**: `hand_in_progress`
pub async fn start(table: SharedTable) -> Response {
    match lock(&table).and_then(|mut t| t.start()) {
        Ok(()) => ok(Ack::message("Game started")),
        Err(err) => err.into_http_response(),
    }
}

/// Submits a betting action for the player whose turn it is.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/action`
///
/// # Request Format
/// ```json
/// { "player_index": 2, "action": "raise", "amount": 40 }
/// ```
/// `action` is one of `fold`, `call`, `raise`; `amount` is only read for raises.
///
/// # Response Format
/// - **Success (200 OK)**: `{"success": true}`, plus `"winner": "<name>"` when
///   the action ended the hand and the pot was awarded
/// - **Error (400 Bad Request)**: `invalid_action`, with the reason in `details`
pub async fn submit_action(table: SharedTable, request: ActionRequest) -> Response {
    let action = request.to_action();
    let result = lock(&table).and_then(|mut t| t.act(request.player_index, action));
    match result {
        Ok(None) => ok(Ack::ok()),
        Ok(Some(resolution)) => ok(Ack {
            winner: Some(resolution.winner),
            ..Ack::ok()
        }),
        Err(err) => err.into_http_response(),
    }
}

/// Current table state for display.
///
/// # HTTP Method and Path
/// - **Method**: GET
/// - **Path**: `/api/game_state`
///
/// # Response Format
/// `players`, `community_cards` (each `{suit, rank, display}`), `pot`,
/// `current_bet`, `current_player`, `game_stage`, `small_blind`, `big_blind`.
pub async fn game_state(table: SharedTable) -> Response {
    match lock(&table).map(|t| t.state()) {
        Ok(state) => ok(state),
        Err(err) => err.into_http_response(),
    }
}

/// Discards all seats and chips and returns the table to waiting.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/reset`
pub async fn reset(table: SharedTable) -> Response {
    match lock(&table).map(|mut t| t.reset()) {
        Ok(()) => ok(Ack::message("Game reset")),
        Err(err) => err.into_http_response(),
    }
}

fn ok<T: Serialize>(body: T) -> Response {
    reply::with_status(reply::json(&body), StatusCode::OK).into_response()
}

/// Body for a JSON payload that failed to deserialize.
pub fn malformed_body(message: impl Into<String>) -> Response {
    ErrorResponse::new("invalid_request", message).into_response(StatusCode::BAD_REQUEST)
}
