//! Internal client implementation.

use parking_lot::RwLock;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use url::Url;

use crate::auth::{self, Credential};
use crate::error::{Error, Result};

/// Name of the header carrying the resolved credential.
const TOKEN_HEADER: &str = "token";

pub(crate) struct ClientInner {
    /// The LoomDB base URL.
    pub(crate) base_url: Url,

    /// Underlying request executor. Its defaults (timeouts, pooling) are
    /// inherited unmodified; the SDK imposes none of its own.
    pub(crate) http: reqwest::Client,

    /// Client-wide default credential. Read once per call at header-build
    /// time, so replacing it never affects an in-flight request.
    pub(crate) token: RwLock<Option<Credential>>,
}

impl ClientInner {
    /// Resolves the effective credential for one call.
    ///
    /// Fails with a configuration error when the operation requires a
    /// credential and neither a call-scoped override nor a default is set.
    /// This runs before any network call.
    pub(crate) fn credential(
        &self,
        call: Option<&Credential>,
        required: bool,
    ) -> Result<Option<Credential>> {
        let default = self.token.read();
        let resolved = auth::resolve(call, default.as_ref()).cloned();
        if required && resolved.is_none() {
            return Err(Error::configuration(
                "operation requires a credential but none is set; \
                 pass one with .with_token(...) or set a default via set_token",
            ));
        }
        Ok(resolved)
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::configuration(format!("invalid URL path {:?}: {}", path, e)))
    }

    fn headers(&self, token: Option<&Credential>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            headers.insert(
                TOKEN_HEADER,
                HeaderValue::from_str(token.as_str())
                    .map_err(|_| Error::configuration("credential is not a valid header value"))?,
            );
        }

        Ok(headers)
    }

    /// Issues one request and decodes the response.
    ///
    /// Exactly one request per call: no retries, no idempotency keys.
    async fn request<T, R>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&T>,
        token: Option<&Credential>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.join(path)?;
        let headers = self.headers(token)?;

        let mut request = self.http.request(method, url).headers(headers);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(Error::from)?;
        Self::handle_response(response).await
    }

    /// Translates a completed response: status >= 400 becomes a service
    /// error carrying the serialized body, anything else is decoded as
    /// JSON.
    async fn handle_response<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::service(status, body));
        }

        response
            .json()
            .await
            .map_err(|e| Error::decode(format!("failed to parse response: {}", e)).with_source(e))
    }

    pub(crate) async fn get<R>(
        &self,
        path: &str,
        query: &[(&str, String)],
        token: Option<&Credential>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.request::<(), R>(Method::GET, path, query, None, token)
            .await
    }

    pub(crate) async fn post<T, R>(
        &self,
        path: &str,
        body: &T,
        token: Option<&Credential>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Some(body), token)
            .await
    }

    pub(crate) async fn post_empty<R>(&self, path: &str, token: Option<&Credential>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.request::<(), R>(Method::POST, path, &[], None, token)
            .await
    }

    pub(crate) async fn patch<T, R>(
        &self,
        path: &str,
        body: &T,
        token: Option<&Credential>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PATCH, path, &[], Some(body), token)
            .await
    }

    pub(crate) async fn put<T, R>(
        &self,
        path: &str,
        body: &T,
        token: Option<&Credential>,
    ) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body), token).await
    }

    pub(crate) async fn delete<R>(&self, path: &str, token: Option<&Credential>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.request::<(), R>(Method::DELETE, path, &[], None, token)
            .await
    }

    /// DELETE where the response body, if any, is not interesting.
    pub(crate) async fn delete_ignore_body(
        &self,
        path: &str,
        token: Option<&Credential>,
    ) -> Result<()> {
        let url = self.join(path)?;
        let headers = self.headers(token)?;

        let response = self
            .http
            .delete(url)
            .headers(headers)
            .send()
            .await
            .map_err(Error::from)?;

        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::service(status, body));
        }
        Ok(())
    }
}
