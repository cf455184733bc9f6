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

use crate::constants::*;
use crate::resource::{parse_resource, ResourceInfo};
use crate::{Credential, Error, Result};
use async_trait::async_trait;
use docdb_core::hash::{base64_decode, base64_hmac_sha256};
use docdb_core::time::{format_http_date, now, DateTime};
use docdb_core::{Context, SignRequest};
use http::request::Parts;
use http::{header, HeaderValue};
use log::debug;

/// RequestSigner that implements DocumentDB master key authorization.
///
/// The resource is taken from a [`ResourceInfo`] in the request extensions
/// when present. Otherwise the request path must be the resource link of the
/// addressed resource, e.g. `/dbs/{db}/colls/{coll}/docs/{doc}`.
#[derive(Debug)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for DocumentDB.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

impl Default for RequestSigner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut Parts,
        credential: Option<&Self::Credential>,
    ) -> docdb_core::Result<()> {
        let Some(cred) = credential else {
            return Err(docdb_core::Error::credential_invalid(
                "master key credential is required",
            ));
        };

        let x_ms_date = format_http_date(self.time.unwrap_or_else(now));

        let info = match req.extensions.get::<ResourceInfo>() {
            Some(info) => info.clone(),
            None => {
                let path =
                    percent_encoding::percent_decode_str(req.uri.path()).decode_utf8_lossy();
                parse_resource(&path)?
            }
        };
        let date = match req.headers.get(header::DATE) {
            Some(v) => v.to_str()?,
            None => "",
        };

        let string_to_sign = string_to_sign(
            req.method.as_str(),
            info.resource_type.as_str(),
            &info.resource_id,
            &x_ms_date,
            date,
        );
        debug!("calculated string to sign: {string_to_sign:?}");

        let signature = sign(&string_to_sign, &cred.master_key)?;
        let mut authorization = HeaderValue::from_str(&build_auth_header(&signature))?;
        authorization.set_sensitive(true);
        let x_ms_date = HeaderValue::from_str(&x_ms_date)?;

        // Nothing is attached until every value above has been computed.
        req.headers.insert(X_MS_DATE, x_ms_date);
        req.headers.insert(header::AUTHORIZATION, authorization);
        Ok(())
    }
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// lowercase(
///     Verb + "\n" +
///     ResourceType + "\n" +
///     ResourceId + "\n" +
///     x-ms-date + "\n" +
///     Date + "\n" +
///     ""
/// )
/// ```
///
/// The service recomputes the same string, any deviation in order or in the
/// trailing empty field makes it reject the request.
pub fn string_to_sign(
    method: &str,
    resource_type: &str,
    resource_id: &str,
    x_ms_date: &str,
    date: &str,
) -> String {
    [method, resource_type, resource_id, x_ms_date, date, ""]
        .join("\n")
        .to_lowercase()
}

/// Sign `string_to_sign` with a base64 encoded master key.
///
/// Returns the standard base64 encoding of the HMAC-SHA256 digest, or
/// [`Error::InvalidKey`] if `key` is not valid base64.
pub fn sign(string_to_sign: &str, key: &str) -> Result<String> {
    let key = base64_decode(key).map_err(|e| Error::InvalidKey(e.to_string()))?;
    Ok(base64_hmac_sha256(&key, string_to_sign.as_bytes()))
}

/// Build the value of the `Authorization` header for a master key signature.
///
/// The whole `type=master&ver=1.0&sig=<signature>` token is query escaped,
/// delimiters included.
pub fn build_auth_header(signature: &str) -> String {
    let token = format!("type={MASTER_TOKEN}&ver={TOKEN_VERSION}&sig={signature}");
    form_urlencoded::byte_serialize(token.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_core::time::parse_rfc3339;
    use docdb_core::ErrorKind;
    use http::Request;
    use pretty_assertions::assert_eq;

    const MASTER_KEY: &str = "ZG9jZGItbWFzdGVyLWtleS1mb3Itc2lnbmluZy10ZXN0cy0wMTIzNDU2Nzg5YWJjZGVm";
    const X_MS_DATE_VALUE: &str = "Thu, 27 Apr 2017 00:51:12 GMT";

    fn test_time() -> DateTime {
        parse_rfc3339("2017-04-27T00:51:12Z").expect("must be valid")
    }

    fn parts(method: http::Method, uri: &str) -> Parts {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    fn decode_auth_header(value: &HeaderValue) -> String {
        percent_encoding::percent_decode_str(value.to_str().unwrap())
            .decode_utf8()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_string_to_sign() {
        let s = string_to_sign("GET", "docs", "Doc1", X_MS_DATE_VALUE, "");
        assert_eq!(s, "get\ndocs\ndoc1\nthu, 27 apr 2017 00:51:12 gmt\n\n");
    }

    #[test]
    fn test_sign_golden_vector() {
        let s = string_to_sign("GET", "docs", "doc1", X_MS_DATE_VALUE, "");
        let sig = sign(&s, MASTER_KEY).unwrap();

        assert_eq!(sig, "dLqgxFp5F0/70t+CS/ihw7SaiWELpFb57ZBn+V9OO6w=");
        assert_eq!(sig.len(), 44);
    }

    #[test]
    fn test_sign_is_deterministic() {
        let s = string_to_sign("GET", "docs", "doc1", X_MS_DATE_VALUE, "");
        assert_eq!(sign(&s, MASTER_KEY).unwrap(), sign(&s, MASTER_KEY).unwrap());
    }

    #[test]
    fn test_sign_changes_with_every_field() {
        let base = sign(
            &string_to_sign("GET", "docs", "doc1", X_MS_DATE_VALUE, ""),
            MASTER_KEY,
        )
        .unwrap();

        let cases = [
            (
                string_to_sign("DELETE", "docs", "doc1", X_MS_DATE_VALUE, ""),
                "v8bJc1zbpXOhnW014X2BtQ4YgDhD3yGfM92lj3OKVB8=",
            ),
            (
                string_to_sign("GET", "dbs", "doc1", X_MS_DATE_VALUE, ""),
                "8hma2g4aULrD4vSCIH940Pf3ri7QwFFICpPHlDdFLNY=",
            ),
            (
                string_to_sign("GET", "docs", "doc2", X_MS_DATE_VALUE, ""),
                "EUtSXp0QGJWBJGnq1MR6VHneLm48d2OaM/yD3kbPCdE=",
            ),
            (
                string_to_sign("GET", "docs", "doc1", "Thu, 27 Apr 2017 00:51:13 GMT", ""),
                "D6H26vCLI7DaoWyTCmzC2H8wxBbBQMl8wrlAeWbC/U8=",
            ),
        ];

        for (s, expected) in cases {
            let sig = sign(&s, MASTER_KEY).unwrap();
            assert_ne!(sig, base, "signature must change for {s:?}");
            assert_eq!(sig, expected);
        }
    }

    #[test]
    fn test_sign_invalid_key() {
        let err = sign("get\ndocs\ndoc1\n\n\n", "not base64!").expect_err("must fail");
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn test_build_auth_header() {
        let sig = "dLqgxFp5F0/70t+CS/ihw7SaiWELpFb57ZBn+V9OO6w=";
        let header = build_auth_header(sig);

        assert_eq!(
            header,
            "type%3Dmaster%26ver%3D1.0%26sig%3DdLqgxFp5F0%2F70t%2BCS%2Fihw7SaiWELpFb57ZBn%2BV9OO6w%3D"
        );
        let decoded = percent_encoding::percent_decode_str(&header)
            .decode_utf8()
            .unwrap();
        assert_eq!(decoded, format!("type=master&ver=1.0&sig={sig}"));
    }

    #[tokio::test]
    async fn test_sign_request_document() {
        let _ = env_logger::builder().is_test(true).try_init();

        let ctx = Context::new();
        let cred = Credential::with_master_key(MASTER_KEY);
        let signer = RequestSigner::new().with_time(test_time());

        let mut req = parts(
            http::Method::GET,
            "https://account.documents.azure.com/dbs/mydb/colls/mycoll/docs/doc1/",
        );
        signer
            .sign_request(&ctx, &mut req, Some(&cred))
            .await
            .unwrap();

        assert_eq!(req.headers[X_MS_DATE], X_MS_DATE_VALUE);
        let authorization = &req.headers[header::AUTHORIZATION];
        assert!(authorization.is_sensitive());

        let decoded = decode_auth_header(authorization);
        let sig = decoded
            .strip_prefix("type=master&ver=1.0&sig=")
            .expect("must carry master token metadata");
        assert_eq!(sig.len(), 44);
        assert_eq!(sig, "dLqgxFp5F0/70t+CS/ihw7SaiWELpFb57ZBn+V9OO6w=");
    }

    #[tokio::test]
    async fn test_sign_request_root_feed() {
        let cred = Credential::with_master_key(MASTER_KEY);
        let signer = RequestSigner::new().with_time(test_time());

        let mut req = parts(http::Method::POST, "https://account.documents.azure.com/dbs");
        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await
            .unwrap();

        let decoded = decode_auth_header(&req.headers[header::AUTHORIZATION]);
        assert_eq!(
            decoded,
            "type=master&ver=1.0&sig=gSV3avhx03GzgtAACtY/Pc5flDoK0dBe5vFArfVaDrc="
        );
    }

    #[tokio::test]
    async fn test_sign_request_decodes_path() {
        let cred = Credential::with_master_key(MASTER_KEY);
        let signer = RequestSigner::new().with_time(test_time());

        // `%64oc1` decodes to `doc1`.
        let mut req = parts(
            http::Method::GET,
            "https://account.documents.azure.com/dbs/mydb/colls/mycoll/docs/%64oc1",
        );
        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await
            .unwrap();

        let decoded = decode_auth_header(&req.headers[header::AUTHORIZATION]);
        assert!(decoded.ends_with("dLqgxFp5F0/70t+CS/ihw7SaiWELpFb57ZBn+V9OO6w="));
    }

    #[tokio::test]
    async fn test_sign_request_prefers_resource_info_extension() {
        let cred = Credential::with_master_key(MASTER_KEY);
        let signer = RequestSigner::new().with_time(test_time());

        let mut req = parts(
            http::Method::GET,
            "https://gateway.example.com/cosmos/dbs/mydb/colls/mycoll/docs/doc1",
        );
        req.extensions
            .insert(parse_resource("dbs/mydb/colls/mycoll/docs/doc1").unwrap());
        signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await
            .unwrap();

        let decoded = decode_auth_header(&req.headers[header::AUTHORIZATION]);
        assert_eq!(
            decoded,
            "type=master&ver=1.0&sig=dLqgxFp5F0/70t+CS/ihw7SaiWELpFb57ZBn+V9OO6w="
        );
    }

    #[tokio::test]
    async fn test_sign_request_failure_leaves_request_untouched() {
        let signer = RequestSigner::new().with_time(test_time());

        // Bad key.
        let cred = Credential::with_master_key("not base64!");
        let mut req = parts(
            http::Method::GET,
            "https://account.documents.azure.com/dbs/mydb/",
        );
        let err = signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(req.headers.is_empty());

        // Bad path.
        let cred = Credential::with_master_key(MASTER_KEY);
        let mut req = parts(http::Method::GET, "https://account.documents.azure.com/");
        let err = signer
            .sign_request(&Context::new(), &mut req, Some(&cred))
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
        assert!(matches!(
            Error::from(err),
            Error::InvalidResourcePath(path) if path == "/"
        ));
        assert!(req.headers.is_empty());

        // No credential.
        let err = signer
            .sign_request(&Context::new(), &mut req, None)
            .await
            .expect_err("must fail");
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
        assert!(req.headers.is_empty());
    }
}
