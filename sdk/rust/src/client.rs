use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A ticket as returned by `GET /tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub created_at: String, // ISO-8601
    pub customer_name: String,
    pub channel: String,
    pub subject: String,
    pub status: String,
    pub priority: String,
}

/// Body for `PATCH /tickets/{id}`. `None` fields are omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Detail {
    detail: String,
}

#[derive(Debug, Deserialize)]
struct Message {
    message: String,
}

#[derive(Debug)]
pub enum ClientError {
    Http(reqwest::Error),
    /// Non-success status, with the `detail` field when the body had one.
    Status { status: u16, detail: String },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::Http(e) => write!(f, "HTTP error: {}", e),
            ClientError::Status { status, detail } => write!(f, "status {}: {}", status, detail),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::Http(e)
    }
}

pub struct TicketClient {
    client: Client,
    base_url: String,
}

impl TicketClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (proxies, timeouts, TLS).
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn list_tickets(&self) -> Result<Vec<Ticket>, ClientError> {
        let resp = self.client.get(format!("{}/tickets", self.base_url)).send().await?;
        decode(resp).await
    }

    pub async fn get_ticket(&self, id: i64) -> Result<Ticket, ClientError> {
        let resp = self
            .client
            .get(format!("{}/tickets/{}", self.base_url, id))
            .send()
            .await?;
        decode(resp).await
    }

    /// Returns the service's acknowledgement message.
    pub async fn update_ticket(
        &self,
        id: i64,
        update: &TicketUpdate,
    ) -> Result<String, ClientError> {
        let resp = self
            .client
            .patch(format!("{}/tickets/{}", self.base_url, id))
            .json(update)
            .send()
            .await?;
        let message: Message = decode(resp).await?;
        Ok(message.message)
    }

    /// The raw metrics document.
    pub async fn metrics(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self.client.get(format!("{}/metrics", self.base_url)).send().await?;
        decode(resp).await
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await?;
        let detail = serde_json::from_str::<Detail>(&text)
            .map(|d| d.detail)
            .unwrap_or(text);
        return Err(ClientError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(resp.json::<T>().await?)
}
