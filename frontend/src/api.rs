//! 后端 API 客户端
//!
//! `PortalBackend` 抽象出会话 / 菜单 / 公告相关的后端调用，
//! 浏览器中由基于 `gloo-net` 的 `PortalApi` 实现，测试中可替换为模拟实现。

use async_trait::async_trait;
use gloo_net::http::Request;
use officehub_shared::protocol::{
    ApiRequest, CreateNoticeRequest, HttpMethod, JoinRequest, LoginRequest, LogoutRequest,
    MenuRequest, NoticeListRequest, ResponseOf,
};
use officehub_shared::{MenuNode, Notice, User};
use web_sys::RequestCredentials;

use crate::config::AppConfig;
use crate::error::{PortalError, PortalResult};

#[async_trait(?Send)]
pub trait PortalBackend {
    async fn login(&self, request: LoginRequest) -> PortalResult<User>;
    async fn join(&self, request: JoinRequest) -> PortalResult<()>;
    async fn fetch_menu(&self, user_id: &str) -> PortalResult<Vec<MenuNode>>;
    /// 使服务端会话 Cookie 失效
    async fn logout(&self) -> PortalResult<()>;
    async fn notices(&self) -> PortalResult<Vec<Notice>>;
    async fn create_notice(&self, request: CreateNoticeRequest) -> PortalResult<Notice>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct PortalApi {
    base_url: String,
    token: Option<String>,
}

impl PortalApi {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: config.api_base_url.clone(),
            token: None,
        }
    }

    /// 附带会话令牌
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 发送请求并拆解 `{ success, data }` 包装
    async fn send<R: ApiRequest>(&self, request: &R) -> PortalResult<Option<R::Response>> {
        let url = self.url(R::PATH);
        let builder = match R::METHOD {
            HttpMethod::Get => Request::get(&url).query(request.query()),
            HttpMethod::Post => Request::post(&url),
        }
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json");

        let builder = match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        };

        let sent = match R::METHOD {
            HttpMethod::Get => builder.send().await,
            HttpMethod::Post => builder
                .json(request)
                .map_err(|e| PortalError::Decode(e.to_string()))?
                .send()
                .await,
        };
        let res = sent.map_err(|e| PortalError::Network(e.to_string()))?;

        if !res.ok() {
            return Err(PortalError::Status(res.status()));
        }

        let envelope = res
            .json::<ResponseOf<R>>()
            .await
            .map_err(|e| PortalError::Decode(e.to_string()))?;
        envelope.into_result().map_err(PortalError::Rejected)
    }
}

#[async_trait(?Send)]
impl PortalBackend for PortalApi {
    async fn login(&self, request: LoginRequest) -> PortalResult<User> {
        self.send(&request).await?.ok_or(PortalError::EmptyPayload)
    }

    async fn join(&self, request: JoinRequest) -> PortalResult<()> {
        self.send(&request).await.map(|_| ())
    }

    async fn fetch_menu(&self, user_id: &str) -> PortalResult<Vec<MenuNode>> {
        let request = MenuRequest {
            user_id: user_id.to_string(),
        };
        self.send(&request).await?.ok_or(PortalError::EmptyPayload)
    }

    async fn logout(&self) -> PortalResult<()> {
        self.send(&LogoutRequest::default()).await.map(|_| ())
    }

    async fn notices(&self) -> PortalResult<Vec<Notice>> {
        Ok(self
            .send(&NoticeListRequest::default())
            .await?
            .unwrap_or_default())
    }

    async fn create_notice(&self, request: CreateNoticeRequest) -> PortalResult<Notice> {
        self.send(&request).await?.ok_or(PortalError::EmptyPayload)
    }
}
