//! Response envelope.
//!
//! The API wraps every payload as `{ "code": ..., "data": ... }`, with
//! `error_type` and `error_msg` alongside on failures.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, Result};

/// A response wrapper carrying the HTTP status plus the decoded payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T = ()> {
    /// Raw HTTP status code of the response.
    pub code: u16,
    /// Error class reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Human-readable error reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
    /// Decoded payload. Only filled in when the body was decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Body fields taken from the wire. The body's own `code` is ignored.
#[derive(Deserialize)]
struct Body<T> {
    error_type: Option<String>,
    error_msg: Option<String>,
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Creates an envelope holding only a status code.
    pub fn status(code: u16) -> Self {
        Self {
            code,
            error_type: None,
            error_msg: None,
            data: None,
        }
    }

    /// Returns true for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Consumes the envelope, returning the payload if any.
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Decodes a response body into an envelope stamped with `code`.
    pub fn decode(code: u16, body: &[u8]) -> Result<Self> {
        let body: Body<T> = serde_json::from_slice(body)
            .map_err(|source| ClientError::Decode { status: code, source })?;

        Ok(Self {
            code,
            error_type: body.error_type,
            error_msg: body.error_msg,
            data: body.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Post {
        id: String,
        views: u32,
    }

    #[test]
    fn test_decode_payload() {
        let body = br#"{"code":201,"data":{"id":"abc","views":3}}"#;
        let env = Envelope::<Post>::decode(201, body).unwrap();

        assert_eq!(env.code, 201);
        assert!(env.is_success());
        assert_eq!(
            env.into_data(),
            Some(Post {
                id: "abc".to_string(),
                views: 3
            })
        );
    }

    #[test]
    fn test_decode_keeps_http_status() {
        let body = br#"{"code":200,"data":{"id":"abc","views":0}}"#;
        let env = Envelope::<Post>::decode(202, body).unwrap();
        assert_eq!(env.code, 202);
    }

    #[test]
    fn test_decode_error_body() {
        let body = br#"{"code":404,"error_type":"not_found","error_msg":"Post not found."}"#;
        let env = Envelope::<Post>::decode(404, body).unwrap();

        assert_eq!(env.code, 404);
        assert!(!env.is_success());
        assert_eq!(env.error_type.as_deref(), Some("not_found"));
        assert_eq!(env.error_msg.as_deref(), Some("Post not found."));
        assert!(env.data.is_none());
    }

    #[test]
    fn test_decode_malformed() {
        let err = Envelope::<Post>::decode(200, b"<html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);

        let err = Envelope::<Post>::decode(200, br#"{"data":{"id":7}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_status_envelope() {
        let env = Envelope::<()>::status(204);
        assert_eq!(env.code, 204);
        assert!(env.is_success());
        assert!(env.data.is_none());
    }
}
