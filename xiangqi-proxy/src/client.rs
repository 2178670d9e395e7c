use hyper::{client::HttpConnector, Client, Uri};
use tracing::debug;
use xiangqi::{packed::PackedBoard, suggestion::SuggestionResponse, Move};

use crate::errors::ClientError;

/// Where the board UI reaches the backend: through the proxy.
pub const DEFAULT_BASE: &str = "http://127.0.0.1:7070";

/// Talks to the suggestion routes of the backend.
///
/// Every call takes `&mut self`, so a client has at most one request in
/// flight.
#[derive(Clone, Debug)]
pub struct SuggestionClient {
    client: Client<HttpConnector>,
    base: String,
}

impl Default for SuggestionClient {
    fn default() -> SuggestionClient {
        SuggestionClient {
            client: Client::new(),
            base: DEFAULT_BASE.to_owned(),
        }
    }
}

impl SuggestionClient {
    pub fn new() -> SuggestionClient {
        SuggestionClient::default()
    }

    /// Uses a different base URL, for example the backend itself.
    ///
    /// # Errors
    ///
    /// Errors if `base` is not a valid URL.
    pub fn with_base(base: &str) -> Result<SuggestionClient, ClientError> {
        let base = base.trim_end_matches('/');
        base.parse::<Uri>()?;
        Ok(SuggestionClient {
            base: base.to_owned(),
            ..SuggestionClient::default()
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Reports the user's move and asks for the AI reply. `None` if the
    /// backend has no move to suggest.
    pub async fn suggest(&mut self, m: &Move) -> Result<Option<String>, ClientError> {
        self.get(&format!("/api/suggest/{m}")).await
    }

    /// Resets the backend to the initial position.
    pub async fn restart(&mut self) -> Result<(), ClientError> {
        self.get("/api/suggest/restart").await.map(drop)
    }

    /// Tells the backend that the suggested AI move has been played.
    pub async fn apply_ai_step(&mut self, m: &Move) -> Result<(), ClientError> {
        self.get(&format!("/api/suggest/current_apply_ai_step?move={m}"))
            .await
            .map(drop)
    }

    /// Asks the backend for a move from an external engine.
    pub async fn api_move(&mut self, board: &PackedBoard) -> Result<Option<String>, ClientError> {
        self.get(&format!("/api/suggest/getApiMove?board={board}"))
            .await
    }

    async fn get(&mut self, path_and_query: &str) -> Result<Option<String>, ClientError> {
        let uri: Uri = format!("{}{}", self.base, path_and_query).parse()?;
        debug!(%uri, "requesting suggestion");

        let response = self.client.get(uri).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;

        if !status.is_success() {
            // Keep the code and message if the backend explains the failure.
            let failure = serde_json::from_slice::<SuggestionResponse>(&body)
                .ok()
                .and_then(|response| response.into_suggestion().err());
            return Err(failure.map_or(ClientError::Status(status), ClientError::Protocol));
        }

        let response: SuggestionResponse = serde_json::from_slice(&body)?;
        Ok(response.into_suggestion()?)
    }
}
