use crate::{ApiEnvelope, MenuNode, Notice, User};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The payload carried in the `data` field of the response envelope.
    type Response: DeserializeOwned;
    /// The URL path, relative to the configured API base.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// Query string appended to `PATH` for GET requests.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// The full response type of a request.
pub type ResponseOf<R> = ApiEnvelope<<R as ApiRequest>::Response>;

// =========================================================
// Request Definitions
// =========================================================

/// Fetch the menu / permission tree for a signed-in user
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRequest {
    pub user_id: String,
}

impl ApiRequest for MenuRequest {
    type Response = Vec<MenuNode>;
    const PATH: &'static str = "auth/menu";
    const METHOD: HttpMethod = HttpMethod::Get;

    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("userId", self.user_id.clone())]
    }
}

/// Invalidate the server-side session cookie
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LogoutRequest {}

impl ApiRequest for LogoutRequest {
    type Response = ();
    const PATH: &'static str = "auth/logout";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Sign in with id and password
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub id: String,
    pub password: String,
}

impl ApiRequest for LoginRequest {
    type Response = User;
    const PATH: &'static str = "auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// Register a new member account
#[derive(Debug, Serialize, Deserialize)]
pub struct JoinRequest {
    pub id: String,
    pub name: String,
    pub password: String,
}

impl ApiRequest for JoinRequest {
    type Response = ();
    const PATH: &'static str = "auth/join";
    const METHOD: HttpMethod = HttpMethod::Post;
}

/// List notices shown on the board and the home page
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct NoticeListRequest {}

impl ApiRequest for NoticeListRequest {
    type Response = Vec<Notice>;
    const PATH: &'static str = "board/notices";
    const METHOD: HttpMethod = HttpMethod::Get;
}

/// Post a new notice
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub body: String,
}

impl ApiRequest for CreateNoticeRequest {
    type Response = Notice;
    const PATH: &'static str = "board/notices";
    const METHOD: HttpMethod = HttpMethod::Post;
}
