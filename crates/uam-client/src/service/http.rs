use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde_json::json;
use tracing::debug;
use uam_core::{NewUser, User, UserId};

use super::UserService;
use crate::{config::ClientConfig, error::ServiceError};

/// [`UserService`] backed by a REST endpoint
///
/// | Operation            | Request                      |
/// |----------------------|------------------------------|
/// | `get_all_users`      | `GET {base}/users`           |
/// | `get_user`           | `GET {base}/users/{id}`      |
/// | `create_user`        | `POST {base}/users`          |
/// | `update_user`        | `PUT {base}/users/{id}`      |
/// | `delete_user`        | `DELETE {base}/users/{id}`   |
/// | `toggle_user_status` | `PATCH {base}/users/{id}`    |
///
/// Ids are opaque, so `{id}` is always sent as a single percent-encoded
/// path segment.
#[derive(Clone)]
pub struct HttpUserService {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for HttpUserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpUserService")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpUserService {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|err| {
            ServiceError::InvalidBaseUrl {
                url: raw.clone(),
                reason: err.to_string(),
            }
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl {
                url: raw,
                reason: "URL cannot have path segments".to_string(),
            });
        }
        let client = Client::builder().timeout(timeout).build()?;

        debug!(%base_url, "Created user service client");

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/users`, or `{base}/users/{id}` with `id` encoded as one segment
    fn users_url(&self, id: Option<&UserId>) -> Result<Url, ServiceError> {
        if let Some(id) = id
            && matches!(id.as_str(), "" | "." | "..")
        {
            return Err(ServiceError::UnaddressableId(id.clone()));
        }

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ServiceError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: "URL cannot have path segments".to_string(),
                })?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        id: Option<&UserId>,
    ) -> Result<RequestBuilder, ServiceError> {
        let url = self.users_url(id)?;
        debug!(%method, %url, "Sending request");

        let builder = self.client.request(method, url);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Send the request and turn non-2xx responses into errors
    async fn execute(
        request: RequestBuilder,
        id: Option<&UserId>,
    ) -> Result<Response, ServiceError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(ServiceError::NotFound(id.clone()));
        }

        let body = response.text().await.unwrap_or_default();
        Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl UserService for HttpUserService {
    async fn get_all_users(&self) -> Result<Vec<User>, ServiceError> {
        let response = Self::execute(self.request(Method::GET, None)?, None).await?;
        Ok(response.json().await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, ServiceError> {
        let request = self.request(Method::GET, Some(id))?;
        let response = Self::execute(request, Some(id)).await?;
        Ok(response.json().await?)
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ServiceError> {
        let request = self.request(Method::POST, None)?.json(user);
        Self::execute(request, None).await?;
        Ok(())
    }

    async fn update_user(&self, user: &User) -> Result<(), ServiceError> {
        let request = self.request(Method::PUT, Some(&user.id))?.json(user);
        Self::execute(request, Some(&user.id)).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), ServiceError> {
        let request = self.request(Method::DELETE, Some(id))?;
        Self::execute(request, Some(id)).await?;
        Ok(())
    }

    async fn toggle_user_status(&self, user: &User) -> Result<(), ServiceError> {
        let request = self
            .request(Method::PATCH, Some(&user.id))?
            .json(&json!({ "isActive": !user.is_active }));
        Self::execute(request, Some(&user.id)).await?;
        Ok(())
    }
}
