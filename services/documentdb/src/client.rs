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

use bytes::Bytes;
use docdb_core::{Context, Signer};
use http::{header, HeaderValue, Method, Request, Response, StatusCode};
use log::{debug, warn};
use percent_encoding::utf8_percent_encode;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::*;
use crate::model::{
    CollectionFeed, CreateCollectionBody, CreateDatabaseBody, DatabaseFeed, DocumentFeed,
};
use crate::{
    parse_resource, Collection, Config, Credential, Database, DefaultCredentialProvider, Error,
    IndexingPolicy, RequestError, RequestSigner, ResourceType, Result,
};

/// Body of an outbound request.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// Serialized JSON, sent as `application/json`.
    Json(Bytes),
    /// Raw query text, sent as `application/sql` with the query marker header.
    Query(String),
}

impl RequestBody {
    /// Serialize `value` into a JSON body.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(RequestBody::Json(serde_json::to_vec(value)?.into()))
    }
}

/// Client for the DocumentDB REST API.
///
/// Links accepted by the operations are resource links such as the `_self`
/// property returned by the service; leading and trailing slashes are optional.
#[derive(Clone, Debug)]
pub struct Client {
    endpoint: String,
    signer: Signer<Credential>,
}

impl Client {
    /// Create a client from `config`.
    ///
    /// The master key is taken from `config`, or from the environment when
    /// `config` has none. Fails with [`Error::ConfigInvalid`] if neither has
    /// one. Requests are sent with the `HttpSend` of `ctx`.
    pub fn new(ctx: Context, config: Config) -> Result<Self> {
        let has_master_key = config.master_key.as_deref().is_some_and(|v| !v.is_empty())
            || ctx
                .env_var_any(&[DOCUMENTDB_MASTER_KEY, DATABASE_KEY])
                .is_some();
        if !has_master_key {
            return Err(Error::ConfigInvalid("master key is required".to_string()));
        }

        let loader = DefaultCredentialProvider::new(config.clone());
        Self::with_signer(&config, Signer::new(ctx, loader, RequestSigner::new()))
    }

    /// Create a client with a prepared signer.
    pub fn with_signer(config: &Config, signer: Signer<Credential>) -> Result<Self> {
        Ok(Self {
            endpoint: config.endpoint()?,
            signer,
        })
    }

    /// The endpoint requests are sent to, without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build a signed request for the resource addressed by `link`.
    ///
    /// The signature covers `link` only, so the endpoint may carry a path
    /// prefix. No network I/O happens here.
    pub async fn new_signed_request(
        &self,
        method: Method,
        link: &str,
        body: RequestBody,
    ) -> Result<Request<Bytes>> {
        let info = parse_resource(link)?;
        let uri = format!("{}{}", self.endpoint, encode_link(link));
        let (content_type, is_query, body) = match body {
            RequestBody::Empty => (None, false, Bytes::new()),
            RequestBody::Json(bs) => (Some(CONTENT_TYPE_JSON), false, bs),
            RequestBody::Query(q) => (Some(CONTENT_TYPE_SQL), true, Bytes::from(q)),
        };

        let (mut parts, body) = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)?
            .into_parts();
        if let Some(v) = content_type {
            parts
                .headers
                .insert(header::CONTENT_TYPE, HeaderValue::from_static(v));
        }
        parts.extensions.insert(info);
        if is_query {
            parts
                .headers
                .insert(X_MS_DOCUMENTDB_ISQUERY, HeaderValue::from_static("True"));
        }

        self.signer.sign(&mut parts).await?;
        Ok(Request::from_parts(parts, body))
    }

    /// Create a database with the given id.
    pub async fn create_database(&self, id: &str) -> Result<Database> {
        let body = RequestBody::json(&CreateDatabaseBody { id })?;
        self.create(ResourceType::Databases.as_str(), body).await
    }

    /// List all databases of the account.
    pub async fn read_databases(&self) -> Result<Vec<Database>> {
        let feed: DatabaseFeed = self.read(ResourceType::Databases.as_str()).await?;
        Ok(feed.databases)
    }

    /// Read a database by link.
    pub async fn read_database(&self, link: &str) -> Result<Database> {
        self.read(link).await
    }

    /// Delete a database by link.
    pub async fn delete_database(&self, link: &str) -> Result<()> {
        self.delete(link).await
    }

    /// Create a collection under the database `database_link`.
    pub async fn create_collection(
        &self,
        database_link: &str,
        id: &str,
        indexing_policy: Option<&IndexingPolicy>,
    ) -> Result<Collection> {
        let body = RequestBody::json(&CreateCollectionBody {
            id,
            indexing_policy,
        })?;
        self.create(&child_link(database_link, ResourceType::Collections), body)
            .await
    }

    /// List the collections of a database.
    pub async fn read_collections(&self, database_link: &str) -> Result<Vec<Collection>> {
        let feed: CollectionFeed = self
            .read(&child_link(database_link, ResourceType::Collections))
            .await?;
        Ok(feed.collections)
    }

    /// Read a collection by link.
    pub async fn read_collection(&self, link: &str) -> Result<Collection> {
        self.read(link).await
    }

    /// Delete a collection by link.
    pub async fn delete_collection(&self, link: &str) -> Result<()> {
        self.delete(link).await
    }

    /// Create a document in the collection `collection_link`.
    ///
    /// Returns the stored document, system properties included if `T` has
    /// fields for them.
    pub async fn create_document<T>(&self, collection_link: &str, document: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = RequestBody::json(document)?;
        self.create(&child_link(collection_link, ResourceType::Documents), body)
            .await
    }

    /// List the documents of a collection.
    pub async fn read_documents<T: DeserializeOwned>(
        &self,
        collection_link: &str,
    ) -> Result<Vec<T>> {
        let feed: DocumentFeed<T> = self
            .read(&child_link(collection_link, ResourceType::Documents))
            .await?;
        Ok(feed.documents)
    }

    /// Read a document by link.
    pub async fn read_document<T: DeserializeOwned>(&self, link: &str) -> Result<T> {
        self.read(link).await
    }

    /// Delete a document by link.
    pub async fn delete_document(&self, link: &str) -> Result<()> {
        self.delete(link).await
    }

    /// Run `query` against the documents of a collection.
    ///
    /// Only the first page of results is returned, continuation tokens are
    /// not followed.
    pub async fn query_documents<T: DeserializeOwned>(
        &self,
        collection_link: &str,
        query: &str,
    ) -> Result<Vec<T>> {
        let req = self
            .new_signed_request(
                Method::POST,
                &child_link(collection_link, ResourceType::Documents),
                RequestBody::Query(query.to_string()),
            )
            .await?;
        let resp = self.send(req).await?;

        match resp.status() {
            StatusCode::OK => {}
            StatusCode::BAD_REQUEST => {
                warn!("query rejected by service with {}", resp.status());
                debug!("rejected query: {query:?}");
                return Err(Error::InvalidSqlSyntax);
            }
            _ => return Err(parse_error(&resp)),
        }

        if let Some(count) = resp.headers().get(X_MS_ITEM_COUNT) {
            debug!("query returned {count:?} item(s)");
        }
        let feed: DocumentFeed<T> = serde_json::from_slice(resp.body())?;
        Ok(feed.documents)
    }

    async fn create<T: DeserializeOwned>(&self, link: &str, body: RequestBody) -> Result<T> {
        let req = self.new_signed_request(Method::POST, link, body).await?;
        let resp = check_status(self.send(req).await?, StatusCode::CREATED)?;
        Ok(serde_json::from_slice(resp.body())?)
    }

    async fn read<T: DeserializeOwned>(&self, link: &str) -> Result<T> {
        let req = self
            .new_signed_request(Method::GET, link, RequestBody::Empty)
            .await?;
        let resp = check_status(self.send(req).await?, StatusCode::OK)?;
        Ok(serde_json::from_slice(resp.body())?)
    }

    async fn delete(&self, link: &str) -> Result<()> {
        let req = self
            .new_signed_request(Method::DELETE, link, RequestBody::Empty)
            .await?;
        check_status(self.send(req).await?, StatusCode::NO_CONTENT)?;
        Ok(())
    }

    async fn send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        debug!("sending request: {} {}", req.method(), req.uri().path());
        let resp = self.signer.context().http_send(req).await?;
        debug!("got response: {}", resp.status());
        Ok(resp)
    }
}

/// Link of the `kind` feed under `parent`.
fn child_link(parent: &str, kind: ResourceType) -> String {
    let parent = parent.trim_matches('/');
    if parent.is_empty() {
        kind.as_str().to_string()
    } else {
        format!("{parent}/{}", kind.as_str())
    }
}

/// Turn a resource link into an absolute, percent-encoded request path.
fn encode_link(link: &str) -> String {
    let mut path = String::with_capacity(link.len() + 1);
    for segment in link.trim_matches('/').split('/') {
        path.push('/');
        path.extend(utf8_percent_encode(segment, &PATH_SEGMENT_ENCODE_SET));
    }
    path
}

fn check_status(resp: Response<Bytes>, expected: StatusCode) -> Result<Response<Bytes>> {
    if resp.status() == expected {
        Ok(resp)
    } else {
        Err(parse_error(&resp))
    }
}

fn parse_error(resp: &Response<Bytes>) -> Error {
    let status = resp.status();
    warn!("request failed with status {status}");

    if status == StatusCode::UNAUTHORIZED {
        return Error::Unauthorized;
    }

    let mut err: RequestError = serde_json::from_slice(resp.body()).unwrap_or_default();
    if err.code.is_empty() {
        err.code = status
            .canonical_reason()
            .unwrap_or(status.as_str())
            .to_string();
    }
    if err.message.is_empty() {
        err.message = String::from_utf8_lossy(resp.body()).into_owned();
    }
    Error::Request(err)
}
