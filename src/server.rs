//! HTTP transport for the lobby.
//!
//! Identity travels in two cookies, `gameName` and `playerName`, whose values
//! are percent-encoded so any name survives the round trip. Every
//! handler takes the registry lock for the whole request, which serializes
//! mutations per process.

use crate::error::LobbyErrorKind;
use crate::session::GamesManager;
use axum::extract::State;
use axum::http::header::{COOKIE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Form, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

const GAME_COOKIE: &str = "gameName";
const PLAYER_COOKIE: &str = "playerName";
const EXPIRED: &str = "Expires=Thu, 01 Jan 1970 00:00:00 GMT";

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    games: Arc<Mutex<GamesManager>>,
}

impl AppState {
    /// Wraps a registry for sharing across requests.
    #[instrument(skip(games))]
    pub fn new(games: GamesManager) -> Self {
        Self {
            games: Arc::new(Mutex::new(games)),
        }
    }

    /// Handle to the shared registry.
    pub fn games(&self) -> &Arc<Mutex<GamesManager>> {
        &self.games
    }
}

/// Builds the lobby router.
#[instrument(skip(state))]
pub fn router(state: AppState) -> Router {
    info!("Building lobby router");
    Router::new()
        .route("/getAvailableGames", get(available_games))
        .route("/createGame", post(create_game))
        .route("/joinGame", post(join_game))
        .route("/gameName", get(game_name))
        .route("/userName", get(user_name))
        .route("/getStatus", get(game_status))
        .route("/game/boardStatus", get(board_status))
        .route("/player", delete(leave_game))
        .with_state(state)
}

/// Game and player names carried by the request's cookies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    /// Value of the `gameName` cookie.
    pub game: Option<String>,
    /// Value of the `playerName` cookie.
    pub player: Option<String>,
}

impl Identity {
    /// Reads identity cookies from request headers.
    ///
    /// Values are percent-decoded. Empty or undecodable values count as absent.
    #[instrument(skip(headers))]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut identity = Self::default();
        let pairs = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.split_once('='));
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let Ok(value) = urlencoding::decode(value) else {
                debug!(key, "Ignoring cookie that is not valid percent-encoding");
                continue;
            };
            match key.trim() {
                GAME_COOKIE => identity.game = Some(value.into_owned()),
                PLAYER_COOKIE => identity.player = Some(value.into_owned()),
                _ => {}
            }
        }
        identity
    }

    /// Both names, when both cookies are present.
    pub fn seat(&self) -> Option<(&str, &str)> {
        Some((self.game.as_deref()?, self.player.as_deref()?))
    }
}

/// Form body of `/createGame` and `/joinGame`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeatRequest {
    /// Game to create or join.
    #[serde(rename = "gameName")]
    pub game_name: Option<String>,
    /// Name of the joining player.
    #[serde(rename = "playerName")]
    pub player_name: Option<String>,
}

impl SeatRequest {
    /// Both names, when both are present and non-blank.
    pub fn names(&self) -> Option<(&str, &str)> {
        let game = self.game_name.as_deref().map(str::trim)?;
        let player = self.player_name.as_deref().map(str::trim)?;
        (!game.is_empty() && !player.is_empty()).then_some((game, player))
    }
}

/// Response of `/createGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    /// Whether the caller now holds a seat in a game.
    pub game_created: bool,
    /// Reason a game was not created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response of `/joinGame`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinGameResponse {
    /// Whether the caller was seated.
    pub status: bool,
}

fn seat_cookies(game: &str, player: &str) -> AppendHeaders<[(axum::http::HeaderName, String); 2]> {
    AppendHeaders([
        (SET_COOKIE, format!("{GAME_COOKIE}={}", urlencoding::encode(game))),
        (SET_COOKIE, format!("{PLAYER_COOKIE}={}", urlencoding::encode(player))),
    ])
}

#[instrument(skip(state))]
async fn available_games(State(state): State<AppState>) -> Response {
    let games = state.games.lock().await;
    Json(games.available_games()).into_response()
}

#[instrument(skip(state, headers))]
async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(request): Form<SeatRequest>,
) -> Response {
    let mut games = state.games.lock().await;

    let identity = Identity::from_headers(&headers);
    if let Some((game, player)) = identity.seat() {
        if games.game(game).is_some_and(|g| g.player_exists(player)) {
            debug!(game, player, "Caller already seated, keeping existing game");
            return Json(CreateGameResponse {
                game_created: true,
                message: None,
            })
            .into_response();
        }
    }

    let Some((game, player)) = request.names() else {
        warn!("Malformed create request");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let created = games
        .create_game(game)
        .and_then(|created| created.try_add_player(player).map(|_| ()));
    match created {
        Ok(()) => {
            info!(game, player, "Game created");
            (
                seat_cookies(game, player),
                Json(CreateGameResponse {
                    game_created: true,
                    message: None,
                }),
            )
                .into_response()
        }
        Err(err) => {
            // A game whose creator could not be seated must not linger.
            if !matches!(err.kind(), LobbyErrorKind::GameNameTaken(_)) {
                games.remove_game_if_empty(game);
            }
            let message = match err.kind() {
                LobbyErrorKind::GameNameTaken(_) => "game name already taken".to_string(),
                other => other.to_string(),
            };
            Json(CreateGameResponse {
                game_created: false,
                message: Some(message),
            })
            .into_response()
        }
    }
}

#[instrument(skip(state))]
async fn join_game(State(state): State<AppState>, Form(request): Form<SeatRequest>) -> Response {
    let Some((game, player)) = request.names() else {
        warn!("Malformed join request");
        return (
            StatusCode::BAD_REQUEST,
            Json(JoinGameResponse { status: false }),
        )
            .into_response();
    };

    let mut games = state.games.lock().await;
    match games.try_add_player_to(game, player) {
        Ok(()) => (
            seat_cookies(game, player),
            Json(JoinGameResponse { status: true }),
        )
            .into_response(),
        Err(err) => {
            debug!(error = %err, "Join refused");
            Json(JoinGameResponse { status: false }).into_response()
        }
    }
}

#[instrument(skip(headers))]
async fn game_name(headers: HeaderMap) -> String {
    Identity::from_headers(&headers).game.unwrap_or_default()
}

#[instrument(skip(headers))]
async fn user_name(headers: HeaderMap) -> String {
    Identity::from_headers(&headers).player.unwrap_or_default()
}

#[instrument(skip(state, headers))]
async fn game_status(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = Identity::from_headers(&headers);
    let games = state.games.lock().await;
    match identity.game.as_deref().and_then(|name| games.game(name)) {
        Some(game) => Json(game.status()).into_response(),
        None => StatusCode::OK.into_response(),
    }
}

#[instrument(skip(state, headers))]
async fn board_status(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = Identity::from_headers(&headers);
    let Some((game, player)) = identity.seat() else {
        return (StatusCode::FOUND, [(LOCATION, "/index")]).into_response();
    };

    let games = state.games.lock().await;
    match games.game(game) {
        Some(entry) if entry.player_exists(player) => Json(entry.board_status()).into_response(),
        _ => {
            warn!(game, player, "Board requested for unknown seat");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

#[instrument(skip(state, headers))]
async fn leave_game(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let identity = Identity::from_headers(&headers);
    let Some((game, player)) = identity.seat() else {
        return StatusCode::BAD_REQUEST.into_response();
    };

    let mut games = state.games.lock().await;
    if let Err(err) = games.remove_player_from(game, player) {
        // The seat is already gone, so the stale identity is cleared anyway.
        warn!(error = %err, "Leave for a seat that is not held");
    }

    let mut cookies = vec![(SET_COOKIE, format!("{PLAYER_COOKIE}=; {EXPIRED}"))];
    if !games.game_exists(game) {
        cookies.push((SET_COOKIE, format!("{GAME_COOKIE}=; {EXPIRED}")));
    }
    (AppendHeaders(cookies), StatusCode::OK).into_response()
}
