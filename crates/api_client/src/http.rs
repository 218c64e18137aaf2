use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, Response, Url, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use models::{
    CategoryLimits, CategorySummary, ExpenseRecord, Festival, FestivalPlan, FestivalPlanRequest,
    FinancialProfile, GoalPlan, IncomeRecord, NewExpense, NewUser, ProfileUpdate, PulseAnalysis,
    ScorePrediction, ScoreRequest, ShieldReport, User,
};
use session_store::SessionStore;

use crate::backend::{AuthSession, FinanceBackend};
use crate::error::{ApiError, Result};
use crate::validate::{validate_email, validate_new_expense, validate_password};
use crate::ClientConfig;

/// Real [`FinanceBackend`] over HTTP. One shared `reqwest::Client`; the
/// bearer token comes from the injected session on every request, so a
/// login or logout takes effect immediately without rebuilding the client.
pub struct HttpBackend {
    http: Client,
    base_url: Url,
    session: Arc<SessionStore>,
}

impl HttpBackend {
    pub fn new(config: ClientConfig, session: Arc<SessionStore>) -> Result<Self> {
        // `Url::join` drops the last path segment unless the base ends in '/'.
        let mut base = config.base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url =
            Url::parse(&base).map_err(|_| ApiError::InvalidBaseUrl(config.base_url.clone()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(config.base_url));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidBaseUrl(format!("{}{path}", self.base_url)))
    }

    fn bearer(&self) -> Result<String> {
        self.session.token().ok_or(ApiError::MissingToken)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .get(self.endpoint(path)?)
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let token = self.bearer()?;
        let response = self
            .http
            .post(self.endpoint(path)?)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// POST without a token, for the auth endpoints themselves.
    async fn post_json_anon<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait::async_trait]
impl FinanceBackend for HttpBackend {
    async fn get_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        self.get_json("expenses").await
    }

    async fn create_expense(&self, expense: NewExpense) -> Result<ExpenseRecord> {
        validate_new_expense(&expense).map_err(ApiError::Invalid)?;
        self.post_json("expenses", &expense).await
    }

    async fn delete_expense(&self, id: &str) -> Result<()> {
        let token = self.bearer()?;
        let response = self
            .http
            .delete(self.endpoint(&format!("expenses/{id}"))?)
            .bearer_auth(token)
            .send()
            .await?;
        check_status(response).await
    }

    async fn get_expense_summary(&self) -> Result<Vec<CategorySummary>> {
        self.get_json("expenses/summary").await
    }

    async fn get_income(&self) -> Result<Vec<IncomeRecord>> {
        self.get_json("income").await
    }

    async fn get_limits(&self) -> Result<CategoryLimits> {
        self.get_json("limits").await
    }

    async fn set_limits(&self, limits: &CategoryLimits) -> Result<()> {
        let token = self.bearer()?;
        let response = self
            .http
            .put(self.endpoint("limits")?)
            .bearer_auth(token)
            .json(limits)
            .send()
            .await?;
        check_status(response).await
    }

    async fn pulse_analyze(&self) -> Result<PulseAnalysis> {
        self.post_json("pulse/analyze", &serde_json::json!({})).await
    }

    async fn goals_plan(&self, profile: &FinancialProfile) -> Result<GoalPlan> {
        self.post_json("goals/plan", profile).await
    }

    async fn score_predict(&self, request: &ScoreRequest) -> Result<ScorePrediction> {
        self.post_json("score/predict", request).await
    }

    async fn shield_analyze_text(&self, text: &str) -> Result<ShieldReport> {
        if text.trim().is_empty() {
            return Err(ApiError::Invalid(
                "contract text must not be empty".to_string(),
            ));
        }
        self.post_json("shield/analyze", &ShieldTextRequest { text })
            .await
    }

    async fn shield_analyze_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<ShieldReport> {
        if bytes.is_empty() {
            return Err(ApiError::Invalid("uploaded file is empty".to_string()));
        }
        let token = self.bearer()?;
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new().part("file", part);
        let response = self
            .http
            .post(self.endpoint("shield/analyze-file")?)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    async fn get_festivals(&self) -> Result<Vec<Festival>> {
        self.get_json("festivals").await
    }

    async fn festival_plan(&self, request: &FestivalPlanRequest) -> Result<FestivalPlan> {
        self.post_json("festivals/plan", request).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        validate_email(email).map_err(ApiError::Invalid)?;
        validate_password(password).map_err(ApiError::Invalid)?;
        self.post_json_anon("auth/login", &Credentials { email, password })
            .await
    }

    async fn register(&self, new_user: &NewUser) -> Result<AuthSession> {
        validate_email(&new_user.email).map_err(ApiError::Invalid)?;
        validate_password(&new_user.password).map_err(ApiError::Invalid)?;
        self.post_json_anon("auth/register", new_user).await
    }

    async fn me(&self) -> Result<User> {
        self.get_json("auth/me").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let token = self.bearer()?;
        let response = self
            .http
            .put(self.endpoint("auth/profile")?)
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        decode(response).await
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct ShieldTextRequest<'a> {
    text: &'a str,
}

/// Error payloads come back as `{"detail": ...}` or `{"error": ...}`
/// depending on the endpoint.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await?;
    if !status.is_success() {
        let message = error_message(&body, status.as_u16());
        tracing::warn!(endpoint = %url, status = status.as_u16(), %message, "backend rejected request");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    serde_json::from_str(&body).map_err(|err| {
        tracing::warn!(endpoint = %url, %err, "backend response did not match the expected shape");
        ApiError::Decode(err.to_string())
    })
}

/// Like [`decode`] for endpoints whose success body carries nothing we need.
async fn check_status(response: Response) -> Result<()> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let url = response.url().path().to_string();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status.as_u16());
    tracing::warn!(endpoint = %url, status = status.as_u16(), %message, "backend rejected request");
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}

fn error_message(body: &str, status: u16) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.detail.or(parsed.error) {
            return message;
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {status}")
    } else {
        trimmed.chars().take(200).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Category;

    fn backend(base_url: &str) -> Result<HttpBackend> {
        HttpBackend::new(
            ClientConfig {
                base_url: base_url.to_string(),
                timeout_secs: 1,
            },
            Arc::new(SessionStore::in_memory()),
        )
    }

    #[test]
    fn test_garbage_base_url_is_a_constructor_error() {
        assert!(matches!(
            backend("not a url"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
        assert!(matches!(
            backend("ftp://example.com/api"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn test_endpoints_join_under_the_api_prefix() {
        let backend = backend("http://localhost:8000/api").unwrap();
        let url = backend.endpoint("expenses/summary").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/expenses/summary");
    }

    #[tokio::test]
    async fn test_reads_require_a_token_before_any_network() {
        // Unroutable port: reaching the network would fail differently.
        let backend = backend("http://localhost:1/api").unwrap();
        assert!(matches!(
            backend.get_expenses().await,
            Err(ApiError::MissingToken)
        ));
    }

    #[tokio::test]
    async fn test_invalid_expense_is_rejected_locally() {
        let backend = backend("http://localhost:1/api").unwrap();
        let result = backend
            .create_expense(NewExpense {
                amount: 0.0,
                category: Category::Food,
                description: "Lunch".to_string(),
            })
            .await;
        assert!(matches!(result, Err(ApiError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_bad_login_email_never_leaves_the_process() {
        let backend = backend("http://localhost:1/api").unwrap();
        let result = backend.login("not-an-email", "hunter2").await;
        assert!(matches!(result, Err(ApiError::Invalid(_))));
    }

    #[test]
    fn test_error_message_prefers_the_backend_detail() {
        assert_eq!(
            error_message(r#"{"detail": "expense not found"}"#, 404),
            "expense not found"
        );
        assert_eq!(
            error_message(r#"{"error": "token expired"}"#, 401),
            "token expired"
        );
        assert_eq!(error_message("", 502), "HTTP 502");
        assert_eq!(error_message("upstream body", 500), "upstream body");
    }
}
