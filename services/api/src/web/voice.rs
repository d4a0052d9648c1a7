//! services/api/src/web/voice.rs
//!
//! Voice control. A transcript (typed, produced on the device, or transcribed
//! here from uploaded audio) is parsed into a command, executed against the
//! shared state, and answered with a short sentence that can be spoken back.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use fridge_core::{products, ShoppingItem, SortOption, VoiceCommand};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::web::dto::{SpeakRequest, VoiceCommandRequest, VoiceCommandResponse};
use crate::web::recipes::search_recipes;
use crate::web::state::AppState;

/// How many recipe titles a spoken reply names.
const SPOKEN_RECIPE_COUNT: usize = 3;

fn describe_days(days: i64) -> String {
    match days {
        0 => "expires today".to_string(),
        1 => "expires tomorrow".to_string(),
        n => format!("expires in {} days", n),
    }
}

/// Joins names as "a", "a and b" or "a, b and c" for the given conjunction.
fn spoken_list(names: &[String], conjunction: &str) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} {} {}", init.join(", "), conjunction, last),
    }
}

/// Executes a parsed command and returns the reply to show or speak.
pub async fn execute_command(app_state: &AppState, command: &VoiceCommand) -> String {
    let today = app_state.today();

    match command {
        VoiceCommand::AddItem { name } => {
            let guess = products::guess_by_name(name);
            let days = guess.shelf_life_days;
            let item = guess.into_item(Uuid::new_v4(), today);
            let reply = format!("Added {} to your fridge. It should keep for about {} days.", item.name, days);
            app_state.inventory.lock().await.add(item);
            reply
        }
        VoiceCommand::RemoveItem { name } => {
            let mut inventory = app_state.inventory.lock().await;
            let matches = inventory.search(name, Some(SortOption::ExpiryAsc));
            let target = matches
                .iter()
                .find(|item| item.name.eq_ignore_ascii_case(name))
                .or_else(|| matches.first());
            match target {
                Some(item) => {
                    inventory.remove(item.id);
                    format!("Removed {} from your fridge.", item.name)
                }
                None => format!("I couldn't find {} in your fridge.", name),
            }
        }
        VoiceCommand::RemoveExpired => {
            match app_state.inventory.lock().await.remove_expired(today) {
                0 => "Nothing in your fridge has expired.".to_string(),
                1 => "Removed 1 expired item.".to_string(),
                n => format!("Removed {} expired items.", n),
            }
        }
        VoiceCommand::AddToShoppingList { name } => {
            match app_state.shopping.lock().await.add(ShoppingItem::new(name.as_str(), 1, None)) {
                Ok(_) => format!("Added {} to your shopping list.", name),
                Err(e) => format!("I couldn't add that: {}.", e),
            }
        }
        VoiceCommand::ListExpiring => {
            let alert_days = app_state.preferences.lock().await.expiry_alert_days;
            let expiring = app_state.inventory.lock().await.expiring_within(today, alert_days);
            if expiring.is_empty() {
                return format!("Nothing is expiring in the next {} days.", alert_days);
            }
            let parts: Vec<String> = expiring
                .iter()
                .map(|item| format!("{} {}", item.name, describe_days(item.days_until_expiry(today))))
                .collect();
            format!("{}.", spoken_list(&parts, "and"))
        }
        VoiceCommand::SuggestRecipes => {
            let ingredients = app_state.inventory.lock().await.ingredient_names(today);
            if ingredients.is_empty() {
                return "Your fridge is empty, so I have no recipe ideas yet.".to_string();
            }
            match search_recipes(app_state, &ingredients, SPOKEN_RECIPE_COUNT).await {
                Ok(recipes) if recipes.is_empty() => {
                    "I couldn't find any recipes for what's in your fridge.".to_string()
                }
                Ok(recipes) => {
                    let titles: Vec<String> = recipes
                        .into_iter()
                        .take(SPOKEN_RECIPE_COUNT)
                        .map(|r| r.title)
                        .collect();
                    format!("You could make {}.", spoken_list(&titles, "or"))
                }
                Err(e) => {
                    warn!("Voice recipe lookup failed: {}", e);
                    "I couldn't fetch recipes right now. Please try again.".to_string()
                }
            }
        }
        VoiceCommand::ReadShoppingList => {
            let names: Vec<String> = app_state
                .shopping
                .lock()
                .await
                .items()
                .into_iter()
                .filter(|item| !item.checked)
                .map(|item| item.name)
                .collect();
            if names.is_empty() {
                "Your shopping list is empty.".to_string()
            } else {
                format!("Your shopping list has {}.", spoken_list(&names, "and"))
            }
        }
        VoiceCommand::Unknown { .. } => "Sorry, I didn't catch that.".to_string(),
    }
}

async fn respond(app_state: &AppState, transcript: String) -> VoiceCommandResponse {
    let command = VoiceCommand::parse(&transcript);
    info!("Voice command: {:?}", command);
    let reply = execute_command(app_state, &command).await;
    VoiceCommandResponse {
        transcript,
        command,
        reply,
    }
}

/// Run a voice command from a transcript.
#[utoipa::path(
    post,
    path = "/voice/command",
    request_body = VoiceCommandRequest,
    responses((status = 200, body = VoiceCommandResponse))
)]
pub async fn command_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<VoiceCommandRequest>,
) -> Json<VoiceCommandResponse> {
    Json(respond(&app_state, request.transcript).await)
}

/// Run a voice command from an uploaded audio clip.
///
/// Accepts a multipart/form-data request with a single file part.
#[utoipa::path(
    post,
    path = "/voice/audio",
    request_body(content_type = "multipart/form-data", description = "The recorded command."),
    responses(
        (status = 200, body = VoiceCommandResponse),
        (status = 400, description = "Missing audio"),
        (status = 503, description = "Speech recognition not configured")
    )
)]
pub async fn audio_handler(
    State(app_state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<VoiceCommandResponse>, ApiError> {
    let stt = app_state.stt_adapter()?;

    let field = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart data: {}", e)))?
        .ok_or_else(|| ApiError::BadRequest("Multipart form must include an audio file".to_string()))?;
    let file_name = field.file_name().unwrap_or("command.wav").to_string();
    let data = field
        .bytes()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read audio bytes: {}", e)))?;

    let transcript = stt.transcribe_audio(&file_name, &data).await?;
    Ok(Json(respond(&app_state, transcript).await))
}

/// Speak a reply. Returns MP3 audio.
#[utoipa::path(
    post,
    path = "/voice/speak",
    request_body = SpeakRequest,
    responses(
        (status = 200, description = "MP3 audio", body = Vec<u8>, content_type = "audio/mpeg"),
        (status = 503, description = "Speech synthesis not configured")
    )
)]
pub async fn speak_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<SpeakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let tts = app_state.tts_adapter()?;
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text must not be empty".to_string()));
    }
    let audio = tts.generate_audio(&request.text).await?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], audio))
}
