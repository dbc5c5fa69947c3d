//! Tests for the HTTP lobby routes.

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Request, Response, StatusCode};
use ludo_lobby::{AppState, Color, ColorAllocator, GamesManager, router};
use tower::ServiceExt;

const EXPIRED: &str = "Expires=Thu, 01 Jan 1970 00:00:00 GMT";

fn app(games: GamesManager) -> (AppState, Router) {
    let state = AppState::new(games);
    (state.clone(), router(state))
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_cookies(method: &str, uri: &str, cookies: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn lobby_with(game: &str, players: &[&str]) -> GamesManager {
    let mut games = GamesManager::new();
    games.create_game(game).unwrap();
    for player in players {
        assert!(games.add_player_to(game, player));
    }
    games
}

#[tokio::test]
async fn test_no_available_games() {
    let (_, app) = app(GamesManager::new());
    let response = app
        .oneshot(Request::get("/getAvailableGames").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "[]");
}

#[tokio::test]
async fn test_available_games_lists_details() {
    let (_, app) = app(lobby_with("ludo", &["ashish"]));
    let response = app
        .oneshot(Request::get("/getAvailableGames").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(
        body_text(response).await,
        r#"[{"name":"ludo","remain":3,"createdBy":"ashish"}]"#
    );
}

#[tokio::test]
async fn test_create_game_sets_cookies() {
    let (state, app) = app(GamesManager::new());
    let response = app
        .oneshot(form("/createGame", "gameName=newGame&playerName=dhana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        ["gameName=newGame", "playerName=dhana"]
    );
    assert_eq!(body_text(response).await, r#"{"gameCreated":true}"#);

    let games = state.games().lock().await;
    assert!(games.game("newGame").unwrap().player_exists("dhana"));
}

#[tokio::test]
async fn test_create_game_with_taken_name() {
    let mut games = GamesManager::new();
    games.create_game("newGame").unwrap();
    let (_, app) = app(games);

    let response = app
        .oneshot(form("/createGame", "gameName=newGame&playerName=dhana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(
        body_text(response).await,
        r#"{"gameCreated":false,"message":"game name already taken"}"#
    );
}

#[tokio::test]
async fn test_create_game_with_malformed_body() {
    let (state, app) = app(GamesManager::new());
    let response = app
        .oneshot(form("/createGame", "gamme=newGame&plaame=dhana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(set_cookies(&response).is_empty());
    assert!(state.games().lock().await.is_empty());
}

#[tokio::test]
async fn test_create_game_when_already_seated() {
    let (state, app) = app(lobby_with("newGame", &["lala"]));
    let mut request = form("/createGame", "gameName=bad&playerName=dhana");
    request
        .headers_mut()
        .insert(COOKIE, "gameName=newGame; playerName=lala".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, r#"{"gameCreated":true}"#);
    assert!(!state.games().lock().await.game_exists("bad"));
}

#[tokio::test]
async fn test_join_game() {
    let (state, app) = app(lobby_with("newGame", &["lala"]));
    let response = app
        .oneshot(form("/joinGame", "gameName=newGame&playerName=ram"))
        .await
        .unwrap();

    assert_eq!(
        set_cookies(&response),
        ["gameName=newGame", "playerName=ram"]
    );
    assert_eq!(body_text(response).await, r#"{"status":true}"#);
    assert_eq!(
        state.games().lock().await.game("newGame").unwrap().player_count(),
        2
    );
}

#[tokio::test]
async fn test_join_game_refused() {
    let (_, app) = app(lobby_with("newGame", &["lala"]));

    let response = app
        .clone()
        .oneshot(form("/joinGame", "gameName=newGame&playerName=lala"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(body_text(response).await, r#"{"status":false}"#);

    let response = app
        .oneshot(form("/joinGame", "gameName=missing&playerName=ram"))
        .await
        .unwrap();
    assert_eq!(body_text(response).await, r#"{"status":false}"#);
}

#[tokio::test]
async fn test_join_game_bad_request() {
    let (_, app) = app(lobby_with("newGame", &["lala"]));

    let response = app
        .clone()
        .oneshot(form("/joinGame", "gameName=&playerName="))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, r#"{"status":false}"#);

    let response = app
        .oneshot(form("/joinGame", "gameName=newGame"))
        .await
        .unwrap();
    assert_eq!(body_text(response).await, r#"{"status":false}"#);
}

#[tokio::test]
async fn test_names_echo_cookies() {
    let (_, app) = app(GamesManager::new());

    let response = app
        .clone()
        .oneshot(with_cookies("GET", "/gameName", "gameName=ludo"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ludo");

    let response = app
        .oneshot(with_cookies("GET", "/userName", "playerName=player"))
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "player");
}

#[tokio::test]
async fn test_status_of_cookie_game() {
    let (_, app) = app(lobby_with("ludo", &["ashish", "joy"]));
    let response = app
        .oneshot(with_cookies("GET", "/getStatus", "gameName=ludo"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let status: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let players = status["players"].as_array().unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0]["name"], "ashish");
    assert_eq!(players[1]["color"], "green");
}

#[tokio::test]
async fn test_status_without_game_is_empty() {
    let (_, app) = app(lobby_with("ludo", &[]));
    let response = app
        .oneshot(Request::get("/getStatus").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "");
}

#[tokio::test]
async fn test_board_status() {
    let (_, app) = app(lobby_with("newGame", &["ashish", "joy"]));
    let response = app
        .oneshot(with_cookies(
            "GET",
            "/game/boardStatus",
            "gameName=newGame; playerName=ashish",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_text(response).await,
        r#"{"red":"ashish","green":"joy"}"#
    );
}

#[tokio::test]
async fn test_board_status_redirects_without_cookies() {
    let (_, app) = app(lobby_with("newGame", &["ashish"]));
    let response = app
        .oneshot(Request::get("/game/boardStatus").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/index");
}

#[tokio::test]
async fn test_board_status_for_unknown_seat() {
    let (_, app) = app(lobby_with("newGame", &["ashish"]));

    let response = app
        .clone()
        .oneshot(with_cookies(
            "GET",
            "/game/boardStatus",
            "gameName=badGame; playerName=badPlayer",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(with_cookies(
            "GET",
            "/game/boardStatus",
            "gameName=newGame; playerName=unknown",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_last_player_leaving_deletes_game() {
    let (state, app) = app(lobby_with("ludo", &["player"]));
    let response = app
        .oneshot(with_cookies(
            "DELETE",
            "/player",
            "playerName=player; gameName=ludo",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        [
            format!("playerName=; {EXPIRED}"),
            format!("gameName=; {EXPIRED}")
        ]
    );
    assert!(!state.games().lock().await.game_exists("ludo"));
}

#[tokio::test]
async fn test_player_leaving_keeps_game() {
    let (state, app) = app(lobby_with("ludo", &["player", "player1", "player2"]));
    let response = app
        .oneshot(with_cookies(
            "DELETE",
            "/player",
            "playerName=player; gameName=ludo",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response), [format!("playerName=; {EXPIRED}")]);

    let games = state.games().lock().await;
    let game = games.game("ludo").unwrap();
    assert_eq!(game.player_count(), 2);
    assert_eq!(game.board_status().get(Color::Red), None);
}

#[tokio::test]
async fn test_leaving_unknown_seat_clears_player_cookie() {
    let (state, app) = app(lobby_with("ludo", &["player1", "player2", "player3"]));
    let response = app
        .oneshot(with_cookies(
            "DELETE",
            "/player",
            "playerName=player; gameName=ludo",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(set_cookies(&response), [format!("playerName=; {EXPIRED}")]);
    assert_eq!(
        state.games().lock().await.game("ludo").unwrap().player_count(),
        3
    );
}

#[tokio::test]
async fn test_leaving_unknown_game_clears_both_cookies() {
    let (_, app) = app(GamesManager::new());
    let response = app
        .oneshot(with_cookies(
            "DELETE",
            "/player",
            "playerName=player; gameName=gone",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        [
            format!("playerName=; {EXPIRED}"),
            format!("gameName=; {EXPIRED}")
        ]
    );
}

#[tokio::test]
async fn test_leaving_without_identity() {
    let (_, app) = app(lobby_with("ludo", &["player"]));
    let response = app
        .oneshot(Request::delete("/player").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cookie_names_are_encoded_through_join_and_leave() {
    let (state, app) = app(lobby_with("ludo", &["lala"]));
    let response = app
        .clone()
        .oneshot(form("/joinGame", "gameName=ludo&playerName=bob%3B+Path%3D%2Fevil"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies, ["gameName=ludo", "playerName=bob%3B%20Path%3D%2Fevil"]);
    assert_eq!(body_text(response).await, r#"{"status":true}"#);
    assert!(
        state
            .games()
            .lock()
            .await
            .game("ludo")
            .unwrap()
            .player_exists("bob; Path=/evil")
    );

    let identity = cookies.join("; ");
    let response = app
        .clone()
        .oneshot(with_cookies("GET", "/userName", &identity))
        .await
        .unwrap();
    assert_eq!(body_text(response).await, "bob; Path=/evil");

    let response = app
        .oneshot(with_cookies("DELETE", "/player", &identity))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let games = state.games().lock().await;
    let game = games.game("ludo").unwrap();
    assert_eq!(game.player_count(), 1);
    assert!(!game.player_exists("bob; Path=/evil"));
}

#[tokio::test]
async fn test_control_characters_in_names_are_encoded() {
    let (state, app) = app(GamesManager::new());
    let response = app
        .oneshot(form("/createGame", "gameName=line%0Abreak&playerName=a%0Ab"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        ["gameName=line%0Abreak", "playerName=a%0Ab"]
    );
    let games = state.games().lock().await;
    assert!(games.game("line\nbreak").unwrap().player_exists("a\nb"));
}

#[derive(Debug)]
struct NoColors;

impl ColorAllocator for NoColors {
    fn next_color(&mut self) -> Color {
        panic!("no colors to hand out")
    }

    fn remaining(&self) -> usize {
        0
    }
}

fn no_colors() -> Box<dyn ColorAllocator> {
    Box::new(NoColors)
}

#[tokio::test]
async fn test_unseatable_creator_leaves_no_game_behind() {
    let (state, app) = app(GamesManager::with_allocator(no_colors));
    let response = app
        .oneshot(form("/createGame", "gameName=ludo&playerName=dhana"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["gameCreated"], false);
    assert!(state.games().lock().await.is_empty());
}

#[tokio::test]
async fn test_taken_name_keeps_existing_empty_game() {
    let mut games = GamesManager::new();
    games.create_game("newGame").unwrap();
    let (state, app) = app(games);

    let response = app
        .oneshot(form("/createGame", "gameName=newGame&playerName=dhana"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(state.games().lock().await.game_exists("newGame"));
}
