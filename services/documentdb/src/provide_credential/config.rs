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

use async_trait::async_trait;
use docdb_core::{Context, ProvideCredential, Result};

use crate::{Config, Credential};

/// ConfigCredentialProvider returns the master key set in a [`Config`].
#[derive(Clone, Debug)]
pub struct ConfigCredentialProvider {
    config: Config,
}

impl ConfigCredentialProvider {
    /// Create a provider backed by `config`.
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(self
            .config
            .master_key
            .as_deref()
            .filter(|v| !v.is_empty())
            .map(Credential::with_master_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_config_credential_provider() {
        let provider = ConfigCredentialProvider::new(Config::new("https://localhost", "a2V5"));
        let cred = provider.provide_credential(&Context::new()).await.unwrap();
        assert_eq!(cred.map(|v| v.master_key), Some("a2V5".to_string()));

        let provider = ConfigCredentialProvider::new(Config::default());
        assert!(provider
            .provide_credential(&Context::new())
            .await
            .unwrap()
            .is_none());
    }
}
