//! Blocking HTTP calls against the ratings server, one method per endpoint.

use crate::config::ClientConfig;
use crate::error::ClientError;
use common::model::module::ModuleInstanceSummary;
use common::model::professor::ProfessorRating;
use common::requests::{LoginRequest, RegisterRequest, SubmitRatingRequest};
use common::responses::{
    ErrorResponse, LoginResponse, MessageResponse, PairAverageResponse, SubmitRatingResponse,
};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use reqwest::Url;
use serde::de::DeserializeOwned;

pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base` joined with `segments`, always ending in a slash.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    pub fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        let url = self.endpoint(&["register"])?;
        send(self.http.post(url).json(request))
    }

    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ClientError> {
        let url = self.endpoint(&["login"])?;
        send(self.http.post(url).json(request))
    }

    pub fn logout(&self, token: &str) -> Result<MessageResponse, ClientError> {
        let url = self.endpoint(&["logout"])?;
        send(with_token(self.http.post(url), token))
    }

    pub fn modules(&self) -> Result<Vec<ModuleInstanceSummary>, ClientError> {
        let url = self.endpoint(&["api", "modules"])?;
        send(self.http.get(url))
    }

    pub fn professor_ratings(&self) -> Result<Vec<ProfessorRating>, ClientError> {
        let url = self.endpoint(&["api", "professor-ratings"])?;
        send(self.http.get(url))
    }

    pub fn module_average(
        &self,
        professor_id: &str,
        module_code: &str,
    ) -> Result<PairAverageResponse, ClientError> {
        let url = self.endpoint(&[
            "api",
            "professors",
            professor_id,
            "modules",
            module_code,
            "rating",
        ])?;
        send(self.http.get(url))
    }

    pub fn submit_rating(
        &self,
        token: &str,
        request: &SubmitRatingRequest,
    ) -> Result<SubmitRatingResponse, ClientError> {
        let url = self.endpoint(&["api", "ratings"])?;
        send(with_token(self.http.post(url), token).json(request))
    }
}

fn with_token(builder: RequestBuilder, token: &str) -> RequestBuilder {
    builder.header(AUTHORIZATION, format!("Token {token}"))
}

fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
    let response = builder.send()?;
    let status = response.status();
    debug!("{} {}", response.url(), status);
    let body = response.text()?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => error.error,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        Err(_) => body,
    };
    Err(ClientError::Server { status, message })
}
