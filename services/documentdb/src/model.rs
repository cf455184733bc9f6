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

//! Payloads exchanged with the DocumentDB REST API.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// System properties every resource carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// User supplied id.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Service generated resource id.
    #[serde(rename = "_rid", default, skip_serializing_if = "String::is_empty")]
    pub rid: String,
    /// Self link, e.g. `dbs/AbcA==/colls/AbcAIJ+9aQ=/`.
    #[serde(rename = "_self", default, skip_serializing_if = "String::is_empty")]
    pub self_link: String,
    /// Entity tag used for optimistic concurrency.
    #[serde(rename = "_etag", default, skip_serializing_if = "String::is_empty")]
    pub etag: String,
    /// Last update time, in seconds since the unix epoch.
    #[serde(rename = "_ts", default, skip_serializing_if = "is_zero")]
    pub ts: u64,
}

fn is_zero(v: &u64) -> bool {
    *v == 0
}

/// A database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,
}

/// A collection of documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// System properties.
    #[serde(flatten)]
    pub resource: Resource,
    /// Indexing policy, if the service returned one.
    #[serde(
        rename = "indexingPolicy",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub indexing_policy: Option<IndexingPolicy>,
}

/// Indexing policy of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexingPolicy {
    /// Whether documents are indexed automatically.
    #[serde(rename = "automatic")]
    pub is_automatic: bool,
    /// `consistent` or `lazy`.
    #[serde(rename = "indexingMode")]
    pub indexing_mode: String,
}

/// Error body returned by the service for non-success responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}, {message}")]
pub struct RequestError {
    /// Error code, e.g. `NotFound`.
    #[serde(default)]
    pub code: String,
    /// Human readable message.
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateDatabaseBody<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCollectionBody<'a> {
    pub id: &'a str,
    #[serde(rename = "indexingPolicy", skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<&'a IndexingPolicy>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DatabaseFeed {
    #[serde(rename = "Databases", default)]
    pub databases: Vec<Database>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CollectionFeed {
    #[serde(rename = "DocumentCollections", default)]
    pub collections: Vec<Collection>,
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub(crate) struct DocumentFeed<T> {
    #[serde(rename = "Documents", default = "Vec::new")]
    pub documents: Vec<T>,
    #[serde(rename = "_count", default)]
    pub count: usize,
}
