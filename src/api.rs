//! Game Service HTTP client

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Wire types
// ============================================================================

/// `POST /game/start`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StartResponse {
    pub session_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Creature as sent by the service. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PokemonPayload {
    pub name: Option<String>,
    pub sprites: Option<SpriteSet>,
    pub stats: Option<Vec<StatSlot>>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SpriteSet {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StatSlot {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NamedResource {
    pub name: String,
}

impl PokemonPayload {
    pub fn front_sprite(&self) -> Option<&str> {
        self.sprites
            .as_ref()
            .and_then(|sprites| sprites.front_default.as_deref())
    }
}

/// `POST /game/{session_id}/catch`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CatchResponse {
    pub pokemon: PokemonPayload,
    pub team_size: usize,
    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /game/{session_id}/battle/{index}`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BattleResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub result: String,
    pub score: i64,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub selected_pokemon: Option<PokemonPayload>,
    #[serde(default)]
    pub opponent_pokemon: Option<PokemonPayload>,
}

/// `GET /game/{session_id}/team`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TeamResponse {
    #[serde(default)]
    pub team: Vec<PokemonPayload>,
    pub team_size: usize,
}

/// `GET /game/{session_id}/score`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResponse {
    pub score: i64,
    #[serde(default)]
    pub game_over: bool,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

// ============================================================================
// Client
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("service returned {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Thin client over the Game Service. Cheap to clone.
#[derive(Clone, Debug)]
pub struct GameClient {
    base_url: String,
    http: reqwest::Client,
}

impl GameClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn start(&self) -> Result<StartResponse, ApiError> {
        self.post("/game/start").await
    }

    pub async fn catch(&self, session: &str) -> Result<CatchResponse, ApiError> {
        self.post(&format!("/game/{}/catch", urlencoding::encode(session)))
            .await
    }

    pub async fn battle(&self, session: &str, index: usize) -> Result<BattleResponse, ApiError> {
        self.post(&format!(
            "/game/{}/battle/{}",
            urlencoding::encode(session),
            index
        ))
        .await
    }

    pub async fn team(&self, session: &str) -> Result<TeamResponse, ApiError> {
        self.get(&format!("/game/{}/team", urlencoding::encode(session)))
            .await
    }

    pub async fn score(&self, session: &str) -> Result<ScoreResponse, ApiError> {
        self.get(&format!("/game/{}/score", urlencoding::encode(session)))
            .await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("POST {url}");
        let response = self.http.post(&url).send().await?;
        decode(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await?;
    if !status.is_success() {
        let detail = serde_json::from_slice::<ErrorBody>(&bytes)
            .map(|body| body.detail)
            .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(serde_json::from_slice(&bytes)?)
}
