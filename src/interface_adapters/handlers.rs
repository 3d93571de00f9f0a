use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::domain::errors::{LeaderboardError, ShareError, WordCheckError};
use crate::interface_adapters::protocol::{
    BestScoreResponse, CheckRequest, CheckResponse, ErrorBody, HealthResponse,
    LeaderboardResponse, STATUS_ERROR, STATUS_SUCCESS, ScoreDto, ShareScoreRequest,
    ShareScoreResponse, SubmitScoreRequest, SubmitScoreResponse,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::leaderboard::Leaderboard;
use crate::use_cases::share::{ShareScore, ShareType};
use crate::use_cases::word_check::CheckWord;

type ApiError = (StatusCode, Json<ErrorBody>);

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorBody {
            status: STATUS_ERROR,
            message: message.to_string(),
        }),
    )
}

// The host gateway injects the caller's identity as headers; absence simply
// means an anonymous player.
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn user_id(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-user-id")
}

fn username(headers: &HeaderMap) -> Option<String> {
    header_value(headers, "x-username")
}

fn leaderboard_error(e: LeaderboardError) -> ApiError {
    match e {
        LeaderboardError::InvalidScore => {
            error_response(StatusCode::BAD_REQUEST, "Invalid score")
        }
        LeaderboardError::StorageFailure => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to access leaderboard",
        ),
    }
}

// GET /api/leaderboard
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<LeaderboardResponse>, ApiError> {
    let board = Leaderboard::new(state.store.clone(), state.clock.clone());
    let scores = board.list().await.map_err(leaderboard_error)?;

    Ok(Json(LeaderboardResponse {
        status: STATUS_SUCCESS,
        scores: scores.into_iter().map(ScoreDto::from).collect(),
    }))
}

// POST /api/leaderboard
pub async fn submit_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, ApiError> {
    let board = Leaderboard::new(state.store.clone(), state.clock.clone());
    board
        .submit(payload.score, user_id(&headers), username(&headers))
        .await
        .map_err(leaderboard_error)?;

    Ok(Json(SubmitScoreResponse {
        status: STATUS_SUCCESS,
        message: "Score added successfully".to_string(),
    }))
}

// GET /api/user/best-score
pub async fn user_best_score(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<BestScoreResponse>, ApiError> {
    let Some(user_id) = user_id(&headers) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "User not authenticated",
        ));
    };

    let board = Leaderboard::new(state.store.clone(), state.clock.clone());
    let best_score = board.best_score(&user_id).await.map_err(leaderboard_error)?;

    Ok(Json(BestScoreResponse {
        status: STATUS_SUCCESS,
        best_score,
    }))
}

// POST /api/share-score
pub async fn share_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShareScoreRequest>,
) -> Result<Json<ShareScoreResponse>, ApiError> {
    // Same bound as the leaderboard: negative or beyond-u32 scores are bogus.
    let Ok(score) = u32::try_from(payload.score) else {
        return Err(error_response(StatusCode::BAD_REQUEST, "Invalid score"));
    };
    let share_type = ShareType::parse(&payload.share_type)
        .map_err(|_| error_response(StatusCode::BAD_REQUEST, "Invalid share type"))?;
    // Publishing happens on behalf of the caller, so identity is required.
    let Some(username) = username(&headers) else {
        return Err(error_response(
            StatusCode::UNAUTHORIZED,
            "User not authenticated",
        ));
    };

    let share = ShareScore::new(state.publisher.clone());
    let mut rng = StdRng::from_entropy();
    let outcome = share
        .execute(score, &username, share_type, payload.post_id, &mut rng)
        .await
        .map_err(|e| match e {
            ShareError::MissingPostId => error_response(
                StatusCode::BAD_REQUEST,
                "Post ID is required for comment shares",
            ),
            ShareError::InvalidShareType => {
                error_response(StatusCode::BAD_REQUEST, "Invalid share type")
            }
            ShareError::PublishFailure => error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to share score",
            ),
        })?;

    Ok(Json(ShareScoreResponse {
        status: STATUS_SUCCESS,
        message: outcome.message,
        url: Some(outcome.url),
    }))
}

// POST /api/check
pub async fn check_guess(
    State(state): State<AppState>,
    Json(payload): Json<CheckRequest>,
) -> Result<Json<CheckResponse>, ApiError> {
    // The solution word is validated at startup; a bad one here is a bug,
    // answered as a generic failure rather than a panic.
    let check = CheckWord::new(state.word_judge.clone(), state.solution_word.to_string())
        .map_err(|_| {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to check guess")
        })?;
    let outcome = check.execute(&payload.guess).await.map_err(|e| match e {
        WordCheckError::InvalidGuess => {
            error_response(StatusCode::BAD_REQUEST, "Guess must be five letters")
        }
        WordCheckError::InvalidSolution | WordCheckError::DictionaryUnavailable => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to check guess")
        }
    })?;

    Ok(Json(CheckResponse {
        status: STATUS_SUCCESS,
        exists: Some(outcome.exists),
        solved: outcome.solved,
        correct: outcome.correct,
        word: outcome.word,
    }))
}

// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_SUCCESS,
        message: "Karma Katcher server is running!",
        timestamp: state.clock.now_epoch_millis(),
    })
}
