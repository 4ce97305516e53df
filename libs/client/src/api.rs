//! Typed HTTP client for the diner API.

use reqwest::{Client, Method, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    ErrorBody, Item, ItemForm, ItemMessage, ItemPage, ListQuery, MessageResponse, RegisterForm,
    Registered, Session, SignInForm, SignedIn,
};

/// HTTP client for every API endpoint.
///
/// Keeps a cookie jar, so the `auth_token` cookie set by [`sign_in`](Self::sign_in)
/// is sent on later admin calls and cleared by [`logout`](Self::logout).
#[derive(Debug, Clone)]
pub struct DinerClient {
    http: Client,
    base_url: String,
}

impl DinerClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/api{}", self.base_url, path))
    }

    // Items

    #[instrument(skip(self))]
    pub async fn list_items(&self, query: &ListQuery) -> ClientResult<ItemPage> {
        let response = self
            .request(Method::GET, "/items")
            .query(&query.to_pairs())
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: Uuid) -> ClientResult<Item> {
        let response = self
            .request(Method::GET, &format!("/items/{id}"))
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self, form))]
    pub async fn create_item(&self, form: ItemForm) -> ClientResult<ItemMessage> {
        let response = self
            .request(Method::POST, "/items")
            .multipart(multipart_form(form)?)
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self, form))]
    pub async fn update_item(&self, id: Uuid, form: ItemForm) -> ClientResult<ItemMessage> {
        let response = self
            .request(Method::PUT, &format!("/items/{id}"))
            .multipart(multipart_form(form)?)
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> ClientResult<MessageResponse> {
        let response = self
            .request(Method::DELETE, &format!("/items/{id}"))
            .send()
            .await?;
        json(response).await
    }

    // Users

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: &RegisterForm) -> ClientResult<Registered> {
        let response = self
            .request(Method::POST, "/users/register")
            .json(form)
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn sign_in(&self, form: &SignInForm) -> ClientResult<SignedIn> {
        let response = self
            .request(Method::POST, "/users/sign_in")
            .json(form)
            .send()
            .await?;
        json(response).await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> ClientResult<()> {
        let response = self.request(Method::POST, "/users/logout").send().await?;
        check(response).await.map(|_| ())
    }

    /// Current session, or `None` when signed out or the token expired.
    #[instrument(skip(self))]
    pub async fn validate_token(&self) -> ClientResult<Option<Session>> {
        let response = self
            .request(Method::GET, "/auth/validate_token")
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!("No valid session");
            return Ok(None);
        }
        json(response).await.map(Some)
    }
}

fn multipart_form(form: ItemForm) -> ClientResult<multipart::Form> {
    let mut body = multipart::Form::new();
    for (name, value) in form.text_fields() {
        body = body.text(name, value);
    }
    if let Some(file) = form.file {
        let part = multipart::Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        body = body.part("image", part);
    }
    Ok(body)
}

/// Turn non-success responses into [`ClientError::Api`].
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    let details = body.detail_messages();
    let message = body
        .message
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());

    debug!(status = status.as_u16(), %message, "API returned an error");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
        details,
    })
}

async fn json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    Ok(check(response).await?.json().await?)
}
