//! Blocking Reddit client implementing [`Feed`] for a single subreddit.
//!
//! Authenticates as a "script" app with the password grant, then talks to
//! the OAuth API with a bearer token. No retries; errors surface to the
//! caller as [`FeedError`].

use crate::error::FeedError;
use crate::feed::{Comment, Feed};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const AUTH_BASE: &str = "https://www.reddit.com";
pub const API_BASE: &str = "https://oauth.reddit.com";

/// Reddit returns at most this many listing items per request.
const PAGE_SIZE: usize = 100;
const DELETED_AUTHOR: &str = "[deleted]";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct RedditSettings {
    pub subreddit: String,
    pub user_agent: Option<String>,
    pub auth_base: String,
    pub api_base: String,
}

impl RedditSettings {
    pub fn new(subreddit: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            user_agent: None,
            auth_base: AUTH_BASE.to_string(),
            api_base: API_BASE.to_string(),
        }
    }
}

pub fn default_user_agent(username: &str) -> String {
    format!("acronym-bot/{} by u/{}", env!("CARGO_PKG_VERSION"), username)
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Me {
    name: String,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<Thing>,
    after: Option<String>,
}

#[derive(Deserialize)]
struct Thing {
    kind: String,
    data: CommentData,
}

#[derive(Deserialize)]
struct CommentData {
    id: String,
    #[serde(default)]
    body: String,
    author: Option<String>,
}

#[derive(Deserialize)]
struct PostResponse {
    json: PostResult,
}

#[derive(Deserialize)]
struct PostResult {
    #[serde(default)]
    errors: Vec<serde_json::Value>,
}

impl From<CommentData> for Comment {
    fn from(d: CommentData) -> Self {
        let author = d.author.filter(|a| !a.is_empty() && a != DELETED_AUTHOR);
        Comment {
            id: d.id,
            body: d.body,
            author,
        }
    }
}

// ---------------------------------------------------------------------------
// RedditFeed
// ---------------------------------------------------------------------------

pub struct RedditFeed {
    http: Client,
    api_base: String,
    subreddit: String,
    token: String,
}

impl RedditFeed {
    /// Build the HTTP client and obtain an access token.
    pub fn connect(
        credentials: &RedditCredentials,
        settings: RedditSettings,
    ) -> Result<Self, FeedError> {
        let user_agent = settings
            .user_agent
            .clone()
            .unwrap_or_else(|| default_user_agent(&credentials.username));
        let http = Client::builder().user_agent(user_agent).build()?;

        let url = format!("{}/api/v1/access_token", settings.auth_base);
        let request = http
            .post(url)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[
                ("grant_type", "password"),
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ]);
        let token: TokenResponse = send_json(request).map_err(|e| match e {
            FeedError::Status { status, body } => {
                FeedError::Auth(format!("token request returned {status}: {body}"))
            }
            other => other,
        })?;
        let token = match (token.access_token, token.error) {
            (Some(t), _) => t,
            (None, Some(err)) => return Err(FeedError::Auth(err)),
            (None, None) => return Err(FeedError::Auth("no access token in response".into())),
        };

        tracing::info!(subreddit = %settings.subreddit, "authenticated with reddit");
        Ok(Self {
            http,
            api_base: settings.api_base,
            subreddit: settings.subreddit,
            token,
        })
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.token)
    }
}

impl Feed for RedditFeed {
    fn bot_identity(&self) -> Result<String, FeedError> {
        let me: Me = send_json(self.get("/api/v1/me"))?;
        Ok(me.name)
    }

    fn recent_comments(&self, limit: usize) -> Result<Vec<Comment>, FeedError> {
        let path = format!("/r/{}/comments", self.subreddit);
        let mut comments = Vec::new();
        let mut after: Option<String> = None;

        while comments.len() < limit {
            let page = (limit - comments.len()).min(PAGE_SIZE);
            let mut query = vec![("limit", page.to_string()), ("raw_json", "1".to_string())];
            if let Some(a) = &after {
                query.push(("after", a.clone()));
            }
            let listing: Listing = send_json(self.get(&path).query(&query))?;

            let fetched = listing.data.children.len();
            comments.extend(
                listing
                    .data
                    .children
                    .into_iter()
                    .filter(|t| t.kind == "t1")
                    .map(|t| Comment::from(t.data)),
            );
            match listing.data.after {
                Some(next) if fetched > 0 => after = Some(next),
                _ => break,
            }
        }

        comments.truncate(limit);
        tracing::debug!(count = comments.len(), "fetched comments");
        Ok(comments)
    }

    fn reply(&self, comment_id: &str, body: &str) -> Result<(), FeedError> {
        let thing_id = format!("t1_{comment_id}");
        let request = self.post("/api/comment").form(&[
            ("api_type", "json"),
            ("thing_id", thing_id.as_str()),
            ("text", body),
        ]);
        let response: PostResponse = send_json(request)?;
        if !response.json.errors.is_empty() {
            let errors: Vec<String> = response.json.errors.iter().map(|e| e.to_string()).collect();
            return Err(FeedError::Api(errors.join("; ")));
        }
        Ok(())
    }
}

fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, FeedError> {
    let response = request.send()?;
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
