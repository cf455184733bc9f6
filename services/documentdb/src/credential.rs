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

use docdb_core::utils::Redact;
use docdb_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Master key credential for the DocumentDB REST API.
///
/// The key is kept as the base64 text it was configured with and only
/// decoded while signing.
#[derive(Clone, Default)]
pub struct Credential {
    /// Base64 encoded master key of the account.
    pub master_key: String,
}

impl Credential {
    /// Create a credential from a base64 encoded master key.
    pub fn with_master_key(master_key: impl Into<String>) -> Self {
        Self {
            master_key: master_key.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("master_key", &Redact::from(&self.master_key))
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        !self.master_key.is_empty()
    }
}
