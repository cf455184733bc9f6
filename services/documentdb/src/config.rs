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

use std::fmt::{Debug, Formatter};

use docdb_core::utils::Redact;
use docdb_core::Context;
use http::Uri;

use crate::constants::*;
use crate::{Error, Result};

/// Config carries all the configuration for the DocumentDB client.
///
/// It is supplied once when the client is built and never changes afterwards.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCUMENTDB_ENDPOINT`]
    /// - env value: [`DATABASE_URL`]
    pub endpoint: Option<String>,
    /// `master_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCUMENTDB_MASTER_KEY`]
    /// - env value: [`DATABASE_KEY`]
    pub master_key: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("master_key", &self.master_key.as_ref().map(Redact::from))
            .finish()
    }
}

impl Config {
    /// Create a config with both values set.
    pub fn new(endpoint: impl Into<String>, master_key: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            master_key: Some(master_key.into()),
        }
    }

    /// Load config from env, keeping the values that are already set.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var_any(&[DOCUMENTDB_ENDPOINT, DATABASE_URL]);
        }
        if self.master_key.is_none() {
            self.master_key = ctx.env_var_any(&[DOCUMENTDB_MASTER_KEY, DATABASE_KEY]);
        }
        self
    }

    /// Validate the configured endpoint and return it without trailing slash.
    ///
    /// The endpoint must be an absolute `http` or `https` URI without query.
    /// A path prefix is kept and resource links are appended to it.
    pub fn endpoint(&self) -> Result<String> {
        let endpoint = self
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::ConfigInvalid("endpoint is required".to_string()))?;

        let uri: Uri = endpoint
            .parse()
            .map_err(|e| Error::ConfigInvalid(format!("endpoint {endpoint:?} is invalid: {e}")))?;
        let absolute = uri.authority().is_some() && uri.query().is_none();
        match uri.scheme_str() {
            Some("http") | Some("https") if absolute => {}
            _ => {
                return Err(Error::ConfigInvalid(format!(
                    "endpoint {endpoint:?} must be an absolute http(s) uri without query"
                )))
            }
        }

        Ok(endpoint.trim_end_matches('/').to_string())
    }
}
