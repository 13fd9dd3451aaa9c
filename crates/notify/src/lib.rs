//! Parent SMS delivery over the Gupshup enterprise HTTP gateway.
//!
//! [`SmsDispatcher`] implements [`Notifier`]: one GET request per message,
//! an explicit request timeout and no retry. Configuration is loaded from
//! environment variables; if `SMS_PASSWORD` is not set,
//! [`SmsConfig::from_env`] returns `None` and every send is reported as
//! failed without touching the network.

use std::time::Duration;

use reqwest::StatusCode;
use rollcall_core::attendance::MarkCategory;
use rollcall_core::notifier::{DispatchError, DispatchOutcome, Notifier};
use rollcall_core::templates::MessageTemplates;

/// Default gateway endpoint.
pub const DEFAULT_GATEWAY_URL: &str = "https://enterprise.smsgupshup.com/GatewayAPI/rest";

/// Default sender ID shown on the handset.
pub const DEFAULT_SENDER_ID: &str = "VKSMIS";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Raw outcome reported when no gateway credentials are configured.
pub const NOT_CONFIGURED: &str = "SMS gateway not configured";

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

/// Gateway credentials and endpoint.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub gateway_url: String,
    pub user_id: String,
    pub password: String,
    pub sender_id: String,
    pub timeout: Duration,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_PASSWORD` is not set.
    ///
    /// | Variable           | Required | Default                                             |
    /// |--------------------|----------|-----------------------------------------------------|
    /// | `SMS_PASSWORD`     | yes      |                                                     |
    /// | `SMS_USER_ID`      | no       | empty                                               |
    /// | `SMS_GATEWAY_URL`  | no       | `https://enterprise.smsgupshup.com/GatewayAPI/rest` |
    /// | `SMS_SENDER_ID`    | no       | `VKSMIS`                                            |
    /// | `SMS_TIMEOUT_SECS` | no       | `10`                                                |
    pub fn from_env() -> Option<Self> {
        let password = std::env::var("SMS_PASSWORD").ok()?;
        Some(Self {
            gateway_url: std::env::var("SMS_GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            user_id: std::env::var("SMS_USER_ID").unwrap_or_default(),
            password,
            sender_id: std::env::var("SMS_SENDER_ID")
                .unwrap_or_else(|_| DEFAULT_SENDER_ID.to_string()),
            timeout: Duration::from_secs(
                std::env::var("SMS_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }
}

/// Message templates with optional `SMS_TEMPLATE_ABSENT` / `SMS_TEMPLATE_LATE`
/// overrides.
pub fn templates_from_env() -> MessageTemplates {
    let mut templates = MessageTemplates::default();
    if let Ok(absent) = std::env::var("SMS_TEMPLATE_ABSENT") {
        templates.absent = absent;
    }
    if let Ok(late) = std::env::var("SMS_TEMPLATE_LATE") {
        templates.late = late;
    }
    templates
}

// ---------------------------------------------------------------------------
// Response interpretation
// ---------------------------------------------------------------------------

/// Classify a gateway response.
///
/// The gateway answers `success | <number> | <id>` or `error | <code> | <text>`
/// in plain text, sometimes with a 200 status either way. Delivery counts as
/// successful only for a 2xx status whose body starts with `success`.
pub fn interpret_response(status: StatusCode, body: &str) -> DispatchOutcome {
    let accepted = body
        .trim()
        .get(..7)
        .is_some_and(|head| head.eq_ignore_ascii_case("success"));
    if status.is_success() && accepted {
        DispatchOutcome::delivered(body)
    } else if body.trim().is_empty() {
        DispatchOutcome::rejected(format!("HTTP {}", status.as_u16()))
    } else {
        DispatchOutcome::rejected(body)
    }
}

// ---------------------------------------------------------------------------
// SmsDispatcher
// ---------------------------------------------------------------------------

/// Sends parent notifications through the SMS gateway.
pub struct SmsDispatcher {
    client: reqwest::Client,
    config: Option<SmsConfig>,
    templates: MessageTemplates,
}

impl SmsDispatcher {
    /// Build a dispatcher. `None` yields one that rejects every send.
    pub fn new(
        config: Option<SmsConfig>,
        templates: MessageTemplates,
    ) -> Result<Self, reqwest::Error> {
        let timeout = config
            .as_ref()
            .map(|c| c.timeout)
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            templates,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Query parameters for one `SendMessage` call.
    fn query(config: &SmsConfig, mobile: &str, msg: &str) -> Vec<(&'static str, String)> {
        vec![
            ("method", "SendMessage".to_string()),
            ("send_to", mobile.to_string()),
            ("msg", msg.to_string()),
            ("msg_type", "TEXT".to_string()),
            ("userid", config.user_id.clone()),
            ("auth_scheme", "plain".to_string()),
            ("password", config.password.clone()),
            ("v", "1.1".to_string()),
            ("format", "text".to_string()),
            ("extra", format!("SenderId={}", config.sender_id)),
        ]
    }
}

impl Notifier for SmsDispatcher {
    async fn send(
        &self,
        mobile: &str,
        category: MarkCategory,
        student_name: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some(config) = &self.config else {
            return Ok(DispatchOutcome::rejected(NOT_CONFIGURED));
        };

        let msg = self.templates.render(category, student_name);
        tracing::debug!(category = %category, "Sending SMS");

        let response = self
            .client
            .get(&config.gateway_url)
            .query(&Self::query(config, mobile.trim(), &msg))
            .send()
            .await
            .map_err(DispatchError::new)?;

        let status = response.status();
        let body = response.text().await.map_err(DispatchError::new)?;
        tracing::debug!(status = %status, "SMS gateway responded");

        Ok(interpret_response(status, &body))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(gateway_url: String) -> SmsConfig {
        SmsConfig {
            gateway_url,
            user_id: "2000000001".into(),
            password: "secret".into(),
            sender_id: "VKSMIS".into(),
            timeout: Duration::from_secs(2),
        }
    }

    fn dispatcher(gateway_url: String) -> SmsDispatcher {
        SmsDispatcher::new(Some(test_config(gateway_url)), MessageTemplates::default()).unwrap()
    }

    #[test]
    fn interpret_success_body() {
        let outcome = interpret_response(StatusCode::OK, "success | 919800000000 | 3456");
        assert!(outcome.success);
        assert_eq!(outcome.raw, "success | 919800000000 | 3456");
    }

    #[test]
    fn interpret_success_is_case_insensitive_and_trimmed() {
        assert!(interpret_response(StatusCode::OK, "  SUCCESS | 1").success);
    }

    #[test]
    fn interpret_error_body_with_ok_status() {
        let outcome = interpret_response(StatusCode::OK, "error | 105 | Invalid number");
        assert!(!outcome.success);
        assert_eq!(outcome.raw, "error | 105 | Invalid number");
    }

    #[test]
    fn interpret_non_2xx_is_failure_even_with_success_body() {
        assert!(!interpret_response(StatusCode::BAD_GATEWAY, "success").success);
    }

    #[test]
    fn interpret_empty_body_reports_status() {
        let outcome = interpret_response(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(!outcome.success);
        assert_eq!(outcome.raw, "HTTP 503");
    }

    #[test]
    fn interpret_short_body_is_failure() {
        assert!(!interpret_response(StatusCode::OK, "ok").success);
    }

    #[tokio::test]
    async fn unconfigured_dispatcher_rejects_without_io() {
        let dispatcher = SmsDispatcher::new(None, MessageTemplates::default()).unwrap();
        assert!(!dispatcher.is_configured());

        let outcome = dispatcher
            .send("9800000000", MarkCategory::Absent, "Asha")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.raw, NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn send_uses_gateway_query_format() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest"))
            .and(query_param("method", "SendMessage"))
            .and(query_param("send_to", "9800000000"))
            .and(query_param(
                "msg",
                "Dear Parent, your ward Asha Rao is absent from school today.",
            ))
            .and(query_param("msg_type", "TEXT"))
            .and(query_param("userid", "2000000001"))
            .and(query_param("auth_scheme", "plain"))
            .and(query_param("password", "secret"))
            .and(query_param("v", "1.1"))
            .and(query_param("format", "text"))
            .and(query_param("extra", "SenderId=VKSMIS"))
            .respond_with(ResponseTemplate::new(200).set_body_string("success | 919800000000 | 1"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = dispatcher(format!("{}/rest", server.uri()))
            .send(" 9800000000 ", MarkCategory::Absent, "Asha Rao")
            .await
            .unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn send_renders_late_template() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param(
                "msg",
                "Dear Parent, your ward Ravi arrived late to school today.",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_string("success | 1"))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = dispatcher(server.uri())
            .send("9800000001", MarkCategory::Late, "Ravi")
            .await
            .unwrap();
        assert!(outcome.success);
    }

    #[tokio::test]
    async fn provider_error_is_ok_with_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("error | 175 | Invalid number"))
            .mount(&server)
            .await;

        let outcome = dispatcher(server.uri())
            .send("123", MarkCategory::Absent, "Asha")
            .await
            .unwrap();
        assert!(!outcome.success);
        assert!(outcome.raw.contains("Invalid number"));
    }

    #[tokio::test]
    async fn http_error_status_is_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let outcome = dispatcher(server.uri())
            .send("9800000000", MarkCategory::Absent, "Asha")
            .await
            .unwrap();
        assert!(!outcome.success);
    }

    #[tokio::test]
    async fn slow_gateway_times_out_as_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("success | 1")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let mut config = test_config(server.uri());
        config.timeout = Duration::from_millis(200);
        let dispatcher = SmsDispatcher::new(Some(config), MessageTemplates::default()).unwrap();

        let result = dispatcher
            .send("9800000000", MarkCategory::Absent, "Asha")
            .await;
        let err = result.unwrap_err();
        assert!(err.to_string().starts_with("SMS transport failed"));
    }
}
