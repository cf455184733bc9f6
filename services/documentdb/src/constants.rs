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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used in the DocumentDB REST API.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_DOCUMENTDB_ISQUERY: &str = "x-ms-documentdb-isquery";
pub const X_MS_ITEM_COUNT: &str = "x-ms-item-count";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_SQL: &str = "application/sql";

// Master key token metadata.
pub const MASTER_TOKEN: &str = "master";
pub const TOKEN_VERSION: &str = "1.0";

// Env values used by the DocumentDB client.
pub const DOCUMENTDB_ENDPOINT: &str = "DOCUMENTDB_ENDPOINT";
pub const DOCUMENTDB_MASTER_KEY: &str = "DOCUMENTDB_MASTER_KEY";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const DATABASE_KEY: &str = "DATABASE_KEY";

/// Characters escaped inside a single path segment of a resource link.
///
/// Unreserved characters and the sub-delims `=` and `+`, which show up in
/// resource ids, are kept as is.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'=')
    .remove(b'+');
