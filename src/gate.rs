//! Credential gate - the authorization decision made before any handler runs.
//!
//! Every inbound request is evaluated exactly once and ends in one of two
//! terminal states:
//!
//! - [`Verdict::Forward`]: the request continues, unmodified, to routing
//! - [`Verdict::Reject`]: the request stops with `401 Unauthorized` and
//!   `WWW-Authenticate: Basic`
//!
//! # Decision Flow
//!
//! 1. Path contains an exempt pattern (case-insensitive) → forward
//! 2. `X-User-Token` header absent → reject
//! 3. Header does not start with `"Basic "` (case-sensitive) → reject
//! 4. Payload is not base64, not UTF-8, or has no `:` → reject
//! 5. Principal and secret match the reference credential exactly → forward,
//!    otherwise reject
//!
//! Decode failures are typed as [`CredentialError`] and converted to a
//! rejection inside the gate. They never reach the caller as a server error.
//!
//! The gate holds only immutable configuration, so one instance is shared
//! across all requests without locking.

use std::fmt;

use axum::{
    http::{HeaderMap, Request, StatusCode, header},
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Header carrying the credential.
pub const CREDENTIAL_HEADER: &str = "x-user-token";

/// Scheme prefix the credential header must start with, including the single space.
pub const BASIC_SCHEME_PREFIX: &str = "Basic ";

/// Value of the `WWW-Authenticate` header on rejection.
pub const BASIC_CHALLENGE: &str = "Basic";

/// The principal/secret pair a decoded credential must equal.
#[derive(Clone, PartialEq, Eq)]
pub struct ReferenceCredential {
    principal: String,
    secret: String,
}

impl ReferenceCredential {
    pub fn new(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: secret.into(),
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Ordinal comparison on both halves; no case folding or normalization.
    fn matches(&self, credential: &Credential) -> bool {
        self.principal == credential.principal && self.secret == credential.secret
    }
}

impl fmt::Debug for ReferenceCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceCredential")
            .field("principal", &self.principal)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Path substrings that bypass credential checks.
///
/// Matching is a raw, case-insensitive substring test on the whole path:
/// `/api/favicon-report` is exempt when `favicon` is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptPaths {
    patterns: Vec<String>,
}

impl ExemptPaths {
    /// Builds the set, lowercasing each pattern once. Empty patterns are
    /// dropped since they would exempt every path.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        Self { patterns }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, path: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        let path = path.to_lowercase();
        self.patterns.iter().any(|p| path.contains(p.as_str()))
    }
}

/// Immutable gate configuration, fixed at startup.
#[derive(Debug, Clone)]
pub struct GateConfig {
    pub credential: ReferenceCredential,
    pub exempt_paths: ExemptPaths,
}

/// Why a request was not authorized.
///
/// Messages describe the category only and never include header contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("credential header missing")]
    MissingHeader,

    #[error("credential header is not visible ASCII")]
    NonAsciiHeader,

    #[error("credential header does not use the Basic scheme")]
    UnsupportedScheme,

    #[error("credential payload is not valid base64")]
    InvalidBase64,

    #[error("credential payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("credential payload has no ':' separator")]
    MissingSeparator,

    #[error("credential does not match")]
    Mismatch,
}

/// A credential decoded from the header. Lives for one evaluation only.
struct Credential {
    principal: String,
    secret: String,
}

impl Credential {
    /// Decodes `Basic <base64(principal:secret)>`.
    ///
    /// The secret is everything after the first `:` and may contain further colons.
    fn parse(header_value: &str) -> Result<Self, CredentialError> {
        let encoded = header_value
            .strip_prefix(BASIC_SCHEME_PREFIX)
            .ok_or(CredentialError::UnsupportedScheme)?
            .trim();

        let bytes = STANDARD
            .decode(encoded)
            .map_err(|_| CredentialError::InvalidBase64)?;
        let decoded = String::from_utf8(bytes).map_err(|_| CredentialError::InvalidUtf8)?;

        let (principal, secret) = decoded
            .split_once(':')
            .ok_or(CredentialError::MissingSeparator)?;

        Ok(Self {
            principal: principal.to_string(),
            secret: secret.to_string(),
        })
    }
}

/// The `401` response a rejected request ends with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge {
    pub status: StatusCode,
    pub scheme: &'static str,
}

impl Challenge {
    pub fn basic() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            scheme: BASIC_CHALLENGE,
        }
    }
}

impl IntoResponse for Challenge {
    fn into_response(self) -> Response {
        (self.status, [(header::WWW_AUTHENTICATE, self.scheme)]).into_response()
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Forward,
    Reject(Challenge),
}

/// Decides whether a request may proceed past the pipeline's entry point.
#[derive(Debug, Clone)]
pub struct CredentialGate {
    config: GateConfig,
}

impl CredentialGate {
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Evaluates a request. Reads only its path and headers.
    pub fn evaluate<B>(&self, request: &Request<B>) -> Verdict {
        self.evaluate_parts(request.uri().path(), request.headers())
    }

    pub fn evaluate_parts(&self, path: &str, headers: &HeaderMap) -> Verdict {
        if self.config.exempt_paths.matches(path) {
            tracing::trace!(path, "exempt path, skipping credential check");
            return Verdict::Forward;
        }

        match self.authorize(headers) {
            Ok(()) => Verdict::Forward,
            Err(reason) => {
                tracing::debug!(path, %reason, "request rejected by credential gate");
                Verdict::Reject(Challenge::basic())
            }
        }
    }

    fn authorize(&self, headers: &HeaderMap) -> Result<(), CredentialError> {
        let value = headers
            .get(CREDENTIAL_HEADER)
            .ok_or(CredentialError::MissingHeader)?
            .to_str()
            .map_err(|_| CredentialError::NonAsciiHeader)?;

        let credential = Credential::parse(value)?;

        if self.config.credential.matches(&credential) {
            Ok(())
        } else {
            Err(CredentialError::Mismatch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::HeaderValue};
    use proptest::prelude::*;

    fn gate() -> CredentialGate {
        CredentialGate::new(GateConfig {
            credential: ReferenceCredential::new("admin", "Admin@123$"),
            exempt_paths: ExemptPaths::new(["swagger", "favicon"]),
        })
    }

    fn request(path: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(token) = token {
            builder = builder.header("X-User-Token", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn basic(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    fn is_reject(verdict: Verdict) -> bool {
        verdict == Verdict::Reject(Challenge::basic())
    }

    fn authorize(token: &str) -> Result<(), CredentialError> {
        let mut headers = HeaderMap::new();
        headers.insert(CREDENTIAL_HEADER, HeaderValue::from_str(token).unwrap());
        gate().authorize(&headers)
    }

    // ── Exempt paths ─────────────────────────────────────────────────

    #[test]
    fn test_exempt_paths_forward_without_header() {
        let gate = gate();
        for path in ["/swagger/index.html", "/favicon.ico", "/SWAGGER/v1/swagger.json", "/FavIcon.ico"] {
            assert_eq!(gate.evaluate(&request(path, None)), Verdict::Forward, "{path}");
        }
    }

    #[test]
    fn test_exempt_paths_ignore_bad_header() {
        let verdict = gate().evaluate(&request("/swagger", Some("Bearer nope")));
        assert_eq!(verdict, Verdict::Forward);
    }

    #[test]
    fn test_exempt_match_is_substring() {
        let verdict = gate().evaluate(&request("/api/favicon-report", None));
        assert_eq!(verdict, Verdict::Forward);
    }

    #[test]
    fn test_exempt_match_uses_encoded_path() {
        let verdict = gate().evaluate(&request("/%73wagger/index.html", None));
        assert!(is_reject(verdict));
    }

    #[test]
    fn test_exempt_paths_drop_empty_patterns() {
        let exempt = ExemptPaths::new(["", "  ", "Health"]);
        assert_eq!(exempt.len(), 1);
        assert!(exempt.matches("/health"));
        assert!(!exempt.matches("/api/v1/catalog"));
    }

    #[test]
    fn test_no_exempt_patterns_matches_nothing() {
        let exempt = ExemptPaths::default();
        assert!(exempt.is_empty());
        assert!(!exempt.matches("/swagger"));
    }

    // ── Rejections ───────────────────────────────────────────────────

    #[test]
    fn test_missing_header_rejects() {
        let verdict = gate().evaluate(&request("/api/v1/catalog", None));
        assert!(is_reject(verdict));
    }

    #[test]
    fn test_wrong_scheme_rejects() {
        assert_eq!(authorize("Bearer abc"), Err(CredentialError::UnsupportedScheme));
        assert_eq!(authorize("Basicabc"), Err(CredentialError::UnsupportedScheme));
    }

    #[test]
    fn test_lowercase_scheme_rejects() {
        let token = format!("basic {}", STANDARD.encode("admin:Admin@123$"));
        assert_eq!(authorize(&token), Err(CredentialError::UnsupportedScheme));
    }

    #[test]
    fn test_wrong_secret_rejects() {
        assert_eq!(authorize(&basic("admin:wrongpass")), Err(CredentialError::Mismatch));
    }

    #[test]
    fn test_missing_colon_rejects() {
        assert_eq!(
            authorize(&basic("nonexistent-colon-string")),
            Err(CredentialError::MissingSeparator)
        );
    }

    #[test]
    fn test_invalid_base64_rejects() {
        assert_eq!(authorize("Basic !!!notb64!!!"), Err(CredentialError::InvalidBase64));
    }

    #[test]
    fn test_invalid_utf8_rejects() {
        let token = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':', b'x']));
        assert_eq!(authorize(&token), Err(CredentialError::InvalidUtf8));
    }

    #[test]
    fn test_non_ascii_header_rejects() {
        let mut headers = HeaderMap::new();
        headers.insert(
            CREDENTIAL_HEADER,
            HeaderValue::from_bytes(b"Basic \xe9t\xe9").unwrap(),
        );
        assert_eq!(gate().authorize(&headers), Err(CredentialError::NonAsciiHeader));
    }

    #[test]
    fn test_principal_is_case_sensitive() {
        assert_eq!(authorize(&basic("Admin:Admin@123$")), Err(CredentialError::Mismatch));
    }

    #[test]
    fn test_secret_is_not_normalized() {
        assert_eq!(authorize(&basic("admin:admin@123$")), Err(CredentialError::Mismatch));
        assert_eq!(authorize(&basic("admin: Admin@123$")), Err(CredentialError::Mismatch));
    }

    #[test]
    fn test_reject_challenge_response() {
        let response = Challenge::basic().into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[header::WWW_AUTHENTICATE], "Basic");
    }

    #[test]
    fn test_rejection_reasons_never_echo_input() {
        let principal = "admin";
        let secret = "Admin@123$";
        let payload = STANDARD.encode(format!("{principal}:{secret}"));
        let tokens = [
            format!("Bearer {payload}"),
            format!("Basic {payload}!"),
            format!("Basic {}", STANDARD.encode(format!("{principal}{secret}"))),
            format!("Basic {}", STANDARD.encode(format!("{principal}:wrong-{secret}"))),
        ];

        for token in &tokens {
            let reason = authorize(token).unwrap_err().to_string();
            assert!(!reason.contains(principal), "{reason}");
            assert!(!reason.contains(secret), "{reason}");
            assert!(!reason.contains(&payload), "{reason}");
            assert!(!reason.contains(token.as_str()), "{reason}");
        }

        let reasons = [
            CredentialError::MissingHeader,
            CredentialError::NonAsciiHeader,
            CredentialError::UnsupportedScheme,
            CredentialError::InvalidBase64,
            CredentialError::InvalidUtf8,
            CredentialError::MissingSeparator,
            CredentialError::Mismatch,
        ];
        for reason in reasons {
            let message = reason.to_string();
            assert!(!message.contains(principal) && !message.contains(secret), "{message}");
        }
    }

    // ── Acceptance ───────────────────────────────────────────────────

    #[test]
    fn test_reference_credential_forwards() {
        let verdict = gate().evaluate(&request("/api/v1/basket/alice", Some(&basic("admin:Admin@123$"))));
        assert_eq!(verdict, Verdict::Forward);
    }

    #[test]
    fn test_payload_whitespace_is_trimmed() {
        let token = format!("Basic   {}  ", STANDARD.encode("admin:Admin@123$"));
        assert_eq!(authorize(&token), Ok(()));
    }

    #[test]
    fn test_secret_keeps_extra_colons() {
        let gate = CredentialGate::new(GateConfig {
            credential: ReferenceCredential::new("svc", "a:b:c"),
            exempt_paths: ExemptPaths::default(),
        });
        let verdict = gate.evaluate(&request("/api", Some(&basic("svc:a:b:c"))));
        assert_eq!(verdict, Verdict::Forward);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = Request::builder()
            .uri("/api/v1/catalog")
            .header("x-USER-token", basic("admin:Admin@123$"))
            .body(Body::empty())
            .unwrap();
        assert_eq!(gate().evaluate(&request), Verdict::Forward);
    }

    #[test]
    fn test_reference_credential_debug_redacts_secret() {
        let debug = format!("{:?}", ReferenceCredential::new("admin", "Admin@123$"));
        assert!(debug.contains("admin"));
        assert!(!debug.contains("Admin@123$"));
    }

    // ── Properties ───────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_exempt_paths_forward_in_any_case(
            prefix in "[a-zA-Z0-9/_-]{0,16}",
            suffix in "[a-zA-Z0-9/._-]{0,16}",
            pattern in prop::sample::select(vec!["swagger", "favicon"]),
            upper in prop::collection::vec(any::<bool>(), 7),
            token in prop::option::of("[ -~]{0,32}"),
        ) {
            let cased: String = pattern
                .chars()
                .zip(upper)
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect();
            let path = format!("/{prefix}{cased}{suffix}");

            let mut headers = HeaderMap::new();
            if let Some(token) = token {
                headers.insert(CREDENTIAL_HEADER, HeaderValue::from_str(&token).unwrap());
            }

            prop_assert_eq!(gate().evaluate_parts(&path, &headers), Verdict::Forward);
        }

        #[test]
        fn prop_garbage_tokens_never_forward(token in "[ -~]{0,64}") {
            let mut headers = HeaderMap::new();
            headers.insert(CREDENTIAL_HEADER, HeaderValue::from_str(&token).unwrap());

            prop_assert!(is_reject(gate().evaluate_parts("/api/v1/catalog", &headers)));
        }

        #[test]
        fn prop_wrong_credentials_never_forward(principal in "[a-zA-Z0-9]{0,12}", secret in "[ -~]{0,24}") {
            prop_assume!(principal != "admin" || secret != "Admin@123$");

            let token = basic(&format!("{principal}:{secret}"));
            let mut headers = HeaderMap::new();
            headers.insert(CREDENTIAL_HEADER, HeaderValue::from_str(&token).unwrap());

            prop_assert!(is_reject(gate().evaluate_parts("/api/v1/basket", &headers)));
        }

        #[test]
        fn prop_evaluation_is_idempotent(path in "/[a-z/]{0,24}", token in prop::option::of("[ -~]{0,48}")) {
            let gate = gate();
            let mut headers = HeaderMap::new();
            if let Some(token) = token {
                headers.insert(CREDENTIAL_HEADER, HeaderValue::from_str(&token).unwrap());
            }

            prop_assert_eq!(gate.evaluate_parts(&path, &headers), gate.evaluate_parts(&path, &headers));
        }
    }
}
