// AI helper endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ChatTurn, ChatTurnSaved, ErrorExplanation, ExplainErrorRequest};

impl ApiClient {
    /// Ask the back end to explain an error in a code snippet. `POST /explain_error`
    pub async fn explain_error(&self, code_snippet: &str) -> Result<ErrorExplanation, Error> {
        let body = ExplainErrorRequest {
            code_snippet: code_snippet.to_owned(),
        };
        self.post("/explain_error", &body).await
    }

    /// Record one Kia chatbot exchange for `turn.user_id`. `POST /chat_history`
    pub async fn save_chat_history(&self, turn: &ChatTurn) -> Result<ChatTurnSaved, Error> {
        self.post("/chat_history", turn).await
    }
}
