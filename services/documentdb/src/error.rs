// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::RequestError;
use thiserror::Error;

/// Errors returned by the DocumentDB client.
#[derive(Debug, Error)]
pub enum Error {
    /// The resource link is too short or malformed to address a resource.
    #[error("invalid resource path: {0:?}")]
    InvalidResourcePath(String),

    /// The configured master key is not valid base64.
    #[error("invalid master key: {0}")]
    InvalidKey(String),

    /// The service rejected a query with `400 Bad Request`.
    #[error("the sql syntax provided is invalid")]
    InvalidSqlSyntax,

    /// The service rejected the request with `401 Unauthorized`.
    #[error("the request could not be authenticated")]
    Unauthorized,

    /// Any other non-success response, carrying the decoded body.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The client configuration is incomplete or invalid.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Payload could not be serialized or deserialized.
    #[error("json payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport failures and other signing errors, passed through unchanged.
    #[error(transparent)]
    Core(docdb_core::Error),
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for docdb_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(err) => err,
            Error::InvalidResourcePath(_) => {
                docdb_core::Error::request_invalid(err.to_string()).with_source(err)
            }
            Error::InvalidKey(_) => {
                docdb_core::Error::credential_invalid(err.to_string()).with_source(err)
            }
            Error::ConfigInvalid(_) => {
                docdb_core::Error::config_invalid(err.to_string()).with_source(err)
            }
            _ => docdb_core::Error::unexpected(err.to_string()).with_source(err),
        }
    }
}

impl From<docdb_core::Error> for Error {
    fn from(err: docdb_core::Error) -> Self {
        // Recover the typed error when it travelled through `SignRequest`.
        let recovered = match err.downcast_source_ref::<Error>() {
            Some(Error::InvalidResourcePath(path)) => Some(Error::InvalidResourcePath(path.clone())),
            Some(Error::InvalidKey(msg)) => Some(Error::InvalidKey(msg.clone())),
            Some(Error::ConfigInvalid(msg)) => Some(Error::ConfigInvalid(msg.clone())),
            _ => None,
        };

        recovered.unwrap_or(Error::Core(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Error::Core(err.into())
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Error::Core(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_core::ErrorKind;

    #[test]
    fn test_typed_error_survives_core_round_trip() {
        let core: docdb_core::Error = Error::InvalidResourcePath("/".to_string()).into();
        assert_eq!(core.kind(), ErrorKind::RequestInvalid);

        match Error::from(core) {
            Error::InvalidResourcePath(path) => assert_eq!(path, "/"),
            other => panic!("unexpected error: {other:?}"),
        }

        let core: docdb_core::Error = Error::InvalidKey("bad base64".to_string()).into();
        assert_eq!(core.kind(), ErrorKind::CredentialInvalid);
        assert!(matches!(Error::from(core), Error::InvalidKey(_)));
    }

    #[test]
    fn test_untyped_core_error_passes_through() {
        let core = docdb_core::Error::unexpected("connection reset");
        match Error::from(core) {
            Error::Core(err) => {
                assert_eq!(err.kind(), ErrorKind::Unexpected);
                assert_eq!(err.to_string(), "connection reset");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_request_error_display() {
        let err = Error::from(RequestError {
            code: "NotFound".to_string(),
            message: "Resource Not Found".to_string(),
        });
        assert_eq!(err.to_string(), "NotFound, Resource Not Found");
    }
}
