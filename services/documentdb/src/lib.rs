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

//! DocumentDB REST client with master key signing.
//!
//! This crate provides:
//! - A resource link parser that derives the resource type and id used in
//!   the signature.
//! - A [`RequestSigner`] that adds `x-ms-date` and the master key
//!   `Authorization` header to a request.
//! - A [`Client`] exposing database, collection, document and query
//!   operations on top of any [`docdb_core::HttpSend`].
//!
//! # Example
//!
//! ```rust,no_run
//! use anyhow::Result;
//! use docdb_core::{Context, OsEnv};
//! use docdb_documentdb::{Client, Config};
//! use docdb_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Endpoint and master key come from DOCUMENTDB_ENDPOINT and
//!     // DOCUMENTDB_MASTER_KEY.
//!     let config = Config::default().from_env(&ctx);
//!     let client = Client::new(ctx, config)?;
//!
//!     for db in client.read_databases().await? {
//!         println!("{} => {}", db.resource.id, db.resource.self_link);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod constants;

mod error;
pub use error::{Error, Result};

mod resource;
pub use resource::{normalize_path, parse_resource, LinkKind, ResourceInfo, ResourceType};

mod credential;
pub use credential::Credential;

mod config;
pub use config::Config;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::{build_auth_header, sign, string_to_sign, RequestSigner};

mod model;
pub use model::{Collection, Database, IndexingPolicy, RequestError, Resource};

mod client;
pub use client::{Client, RequestBody};
