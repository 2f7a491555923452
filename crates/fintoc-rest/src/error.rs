//! Error types and the server-error translator
//!
//! The Fintoc API reports failures as `{"error": {"type", "code", "message",
//! "param", "doc_url"}}` bodies. [`ApiError::from_payload`] maps the
//! `type`/`code` pair onto the [`ApiErrorKind`] taxonomy, falling back to
//! [`ApiErrorKind::Generic`] when the name is not recognized. Local failures
//! (transport, decoding, signing) keep their own variants and are never
//! folded into the server taxonomy.

use serde::Deserialize;

/// Fallback documentation pointer when the API omits `doc_url`
const DEFAULT_DOC_URL: &str = "https://fintoc.com/docs";

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum FintocError {
    /// The API reported a structured error
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-2xx response whose body was not a decodable error payload
    #[error("HTTP error: status {status}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body, when non-empty
        body: Option<String>,
    },

    /// The HTTP request itself failed
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A response body was expected to be JSON but was not
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A `Link` pagination header segment did not match `<url>; rel="name"`
    #[error("Malformed link header segment: {0}")]
    LinkHeader(String),

    /// The requested operation is not declared by the manager
    #[error("{manager} has no operation '{operation}'")]
    UnsupportedOperation {
        /// Manager (or resource) that rejected the call
        manager: &'static str,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// A resource is missing the field that identifies it
    #[error("Missing identifier field '{field}' on {kind} resource")]
    MissingIdentifier {
        /// Resource kind name
        kind: &'static str,
        /// Expected identifier field
        field: &'static str,
    },

    /// Request signing failed (bad key, signing error)
    #[error(transparent)]
    Signature(#[from] fintoc_auth::SignatureError),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

impl FintocError {
    /// The server-reported error kind, if this is an API error
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self {
            Self::Api(err) => Some(err.kind),
            _ => None,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, FintocError>;

/// A structured error reported by the Fintoc API
#[derive(Debug, thiserror::Error)]
#[error("{message}\nPlease check the docs at: {doc_url}")]
pub struct ApiError {
    /// Mapped taxonomy kind
    pub kind: ApiErrorKind,
    /// Raw `type` value from the payload
    pub error_type: Option<String>,
    /// Raw `code` value from the payload
    pub code: Option<String>,
    /// Human-readable message
    pub message: String,
    /// Offending parameter, when reported
    pub param: Option<String>,
    /// Documentation URL
    pub doc_url: String,
}

impl ApiError {
    /// Translate a decoded error payload into the taxonomy
    ///
    /// The `code` is consulted first (refinements such as
    /// `missing_resource` arrive there), then the `type`; an unrecognized
    /// pair maps to [`ApiErrorKind::Generic`].
    pub fn from_payload(payload: ErrorPayload) -> Self {
        let from_code = payload
            .code
            .as_deref()
            .map(ApiErrorKind::from_name)
            .filter(|kind| *kind != ApiErrorKind::Generic);
        let kind = from_code.unwrap_or_else(|| {
            payload
                .error_type
                .as_deref()
                .map(ApiErrorKind::from_name)
                .unwrap_or(ApiErrorKind::Generic)
        });

        Self {
            kind,
            error_type: payload.error_type,
            code: payload.code,
            message: payload.message.unwrap_or_default(),
            param: payload.param,
            doc_url: payload.doc_url.unwrap_or_else(|| DEFAULT_DOC_URL.to_string()),
        }
    }
}

/// Wire shape of an API error body
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    /// The error object itself
    pub error: ErrorPayload,
}

/// Wire shape of the `error` object
#[derive(Debug, Deserialize)]
pub struct ErrorPayload {
    /// Snake-cased error type, e.g. `invalid_request_error`
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    /// Optional refinement code, e.g. `missing_resource`
    pub code: Option<String>,
    /// Human-readable message
    pub message: Option<String>,
    /// Offending parameter
    pub param: Option<String>,
    /// Documentation URL
    pub doc_url: Option<String>,
}

/// Server-reported error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Authentication,
    InvalidApiKey,
    InvalidRequest,
    MissingResource,
    InvalidLinkToken,
    InvalidUsername,
    InvalidHolderType,
    MissingParameter,
    EmptyString,
    UnrecognizedRequest,
    InvalidDate,
    Link,
    InvalidCredentials,
    LockedCredentials,
    Institution,
    UnavailableInstitution,
    Api,
    InternalServer,
    /// Fallback for unrecognized type/code names
    Generic,
}

/// Error families, for callers that branch on the broad category rather
/// than the refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Authentication,
    InvalidRequest,
    Link,
    Institution,
    Api,
    Generic,
}

impl ApiErrorKind {
    /// Map a snake-cased error name onto the taxonomy. An `_error` suffix
    /// is tolerated, so `missing_resource` and `missing_resource_error`
    /// resolve identically.
    pub fn from_name(name: &str) -> Self {
        match name.strip_suffix("_error").unwrap_or(name) {
            "authentication" => Self::Authentication,
            "invalid_api_key" => Self::InvalidApiKey,
            "invalid_request" => Self::InvalidRequest,
            "missing_resource" => Self::MissingResource,
            "invalid_link_token" => Self::InvalidLinkToken,
            "invalid_username" => Self::InvalidUsername,
            "invalid_holder_type" => Self::InvalidHolderType,
            "missing_parameter" => Self::MissingParameter,
            "empty_string" => Self::EmptyString,
            "unrecognized_request" => Self::UnrecognizedRequest,
            "invalid_date" => Self::InvalidDate,
            "link" => Self::Link,
            "invalid_credentials" => Self::InvalidCredentials,
            "locked_credentials" => Self::LockedCredentials,
            "institution" => Self::Institution,
            "unavailable_institution" => Self::UnavailableInstitution,
            "api" => Self::Api,
            "internal_server" => Self::InternalServer,
            _ => Self::Generic,
        }
    }

    /// The family this refinement belongs to
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Authentication | Self::InvalidApiKey => ErrorClass::Authentication,
            Self::InvalidRequest
            | Self::MissingResource
            | Self::InvalidLinkToken
            | Self::InvalidUsername
            | Self::InvalidHolderType
            | Self::MissingParameter
            | Self::EmptyString
            | Self::UnrecognizedRequest
            | Self::InvalidDate => ErrorClass::InvalidRequest,
            Self::Link | Self::InvalidCredentials | Self::LockedCredentials => ErrorClass::Link,
            Self::Institution | Self::UnavailableInstitution => ErrorClass::Institution,
            Self::Api | Self::InternalServer => ErrorClass::Api,
            Self::Generic => ErrorClass::Generic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(error_type: Option<&str>, code: Option<&str>) -> ErrorPayload {
        ErrorPayload {
            error_type: error_type.map(String::from),
            code: code.map(String::from),
            message: Some("This is a test error message".to_string()),
            param: None,
            doc_url: None,
        }
    }

    #[test]
    fn test_type_mapping() {
        let err = ApiError::from_payload(payload(Some("api_error"), None));
        assert_eq!(err.kind, ApiErrorKind::Api);
        assert_eq!(err.kind.class(), ErrorClass::Api);
    }

    #[test]
    fn test_code_refines_type() {
        let err = ApiError::from_payload(payload(
            Some("invalid_request_error"),
            Some("missing_resource"),
        ));
        assert_eq!(err.kind, ApiErrorKind::MissingResource);
        assert_eq!(err.kind.class(), ErrorClass::InvalidRequest);
    }

    #[test]
    fn test_unknown_code_falls_back_to_type() {
        let err = ApiError::from_payload(payload(Some("link_error"), Some("brand_new_code")));
        assert_eq!(err.kind, ApiErrorKind::Link);
    }

    #[test]
    fn test_unknown_everything_is_generic() {
        let err = ApiError::from_payload(payload(Some("mystery_error"), None));
        assert_eq!(err.kind, ApiErrorKind::Generic);
        let err = ApiError::from_payload(payload(None, None));
        assert_eq!(err.kind, ApiErrorKind::Generic);
    }

    #[test]
    fn test_error_suffix_is_optional() {
        assert_eq!(
            ApiErrorKind::from_name("missing_resource_error"),
            ApiErrorKind::from_name("missing_resource"),
        );
    }

    #[test]
    fn test_display_includes_docs_pointer() {
        let err = ApiError::from_payload(payload(Some("api_error"), None));
        let text = err.to_string();
        assert!(text.contains("This is a test error message"));
        assert!(text.contains("https://fintoc.com/docs"));
    }

    #[test]
    fn test_unsupported_operation_names_both_parts() {
        let err = FintocError::UnsupportedOperation {
            manager: "ChargesManager",
            operation: "update",
        };
        let text = err.to_string();
        assert!(text.contains("ChargesManager"));
        assert!(text.contains("update"));
    }
}
