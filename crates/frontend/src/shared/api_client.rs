//! Thin JSON client over `gloo-net` for the inbound backend.
//!
//! Every request carries the session bearer token when one exists. Failures
//! come back classified as [`ApiError`]; callers never inspect status codes.

use crate::shared::config::api_url;
use crate::system::session;
use contracts::shared::api_error::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match session::access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

fn transport(e: gloo_net::Error) -> ApiError {
    log::error!("request not sent: {}", e);
    ApiError::Transport(e.to_string())
}

async fn check(path: &str, response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &body);
    if !err.is_not_found() {
        log::error!("{} failed: {}", path, err);
    }
    Err(err)
}

async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let response = check(path, response).await?;
    response.json::<T>().await.map_err(|e| {
        log::error!("{}: undecodable response: {}", path, e);
        ApiError::Decode(e.to_string())
    })
}

/// `GET {api_base}{path}` decoded as `T`.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&api_url(path)))
        .header("Cache-Control", "no-cache")
        .send()
        .await
        .map_err(transport)?;
    decode(path, response).await
}

/// `GET` with a query string produced by `serde_qs`.
pub async fn get_json_with_query<Q, T>(path: &str, query: &Q) -> Result<T, ApiError>
where
    Q: Serialize,
    T: DeserializeOwned,
{
    let qs = serde_qs::to_string(query)
        .map_err(|e| ApiError::Validation(format!("invalid query: {}", e)))?;
    let full = if qs.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, qs)
    };
    get_json(&full).await
}

pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Validation(format!("failed to serialize request: {}", e)))?;
    let response = request.send().await.map_err(transport)?;
    decode(path, response).await
}

/// Multipart upload; the browser sets the boundary header itself.
pub async fn post_form<T: DeserializeOwned>(
    path: &str,
    form: web_sys::FormData,
) -> Result<T, ApiError> {
    let request = authorized(Request::post(&api_url(path)))
        .body(form)
        .map_err(|e| ApiError::Validation(format!("failed to build upload: {}", e)))?;
    let response = request.send().await.map_err(transport)?;
    decode(path, response).await
}

pub async fn delete(path: &str) -> Result<(), ApiError> {
    let response = authorized(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(transport)?;
    check(path, response).await.map(|_| ())
}

/// Encodes one path segment (WSNs may contain `/` or spaces).
pub fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}
