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

//! Resource link parsing.
//!
//! A resource link alternates resource-kind tokens and ids:
//!
//! ```text
//! /dbs/{db}/colls/{coll}/docs/{doc}/
//! ```
//!
//! A link that ends with an id addresses one item, a link that ends with a
//! kind token addresses the feed of that kind under its parent.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// The closed set of resource kinds a link can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// `dbs`
    Databases,
    /// `colls`
    Collections,
    /// `docs`
    Documents,
    /// `users`
    Users,
    /// `permissions`
    Permissions,
    /// `attachments`
    Attachments,
    /// `sprocs`
    StoredProcedures,
    /// `triggers`
    Triggers,
    /// `udfs`
    UserDefinedFunctions,
    /// `conflicts`
    Conflicts,
    /// `pkranges`
    PartitionKeyRanges,
    /// `offers`
    Offers,
}

impl ResourceType {
    /// The token used for this kind in resource links and in the string to sign.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Collections => "colls",
            ResourceType::Documents => "docs",
            ResourceType::Users => "users",
            ResourceType::Permissions => "permissions",
            ResourceType::Attachments => "attachments",
            ResourceType::StoredProcedures => "sprocs",
            ResourceType::Triggers => "triggers",
            ResourceType::UserDefinedFunctions => "udfs",
            ResourceType::Conflicts => "conflicts",
            ResourceType::PartitionKeyRanges => "pkranges",
            ResourceType::Offers => "offers",
        }
    }

    /// Look up a kind by its link token. Tokens are case sensitive.
    pub fn from_token(token: &str) -> Option<Self> {
        let ty = match token {
            "dbs" => ResourceType::Databases,
            "colls" => ResourceType::Collections,
            "docs" => ResourceType::Documents,
            "users" => ResourceType::Users,
            "permissions" => ResourceType::Permissions,
            "attachments" => ResourceType::Attachments,
            "sprocs" => ResourceType::StoredProcedures,
            "triggers" => ResourceType::Triggers,
            "udfs" => ResourceType::UserDefinedFunctions,
            "conflicts" => ResourceType::Conflicts,
            "pkranges" => ResourceType::PartitionKeyRanges,
            "offers" => ResourceType::Offers,
            _ => return None,
        };
        Some(ty)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceType::from_token(s).ok_or_else(|| Error::InvalidResourcePath(s.to_string()))
    }
}

/// Whether a link addresses a feed or a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// The link ends with a kind token, e.g. `/dbs/d1/colls/`.
    ///
    /// The resource id is the id of the parent, or empty for root feeds.
    Feed,
    /// The link ends with an id, e.g. `/dbs/d1/colls/c1/`.
    Item,
}

/// Resource type and id extracted from a resource link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceInfo {
    /// Kind of the addressed resource.
    pub resource_type: ResourceType,
    /// Id used for signing; empty for root feeds such as `/dbs/`.
    pub resource_id: String,
    /// Feed or item.
    pub kind: LinkKind,
}

/// Make sure `path` starts and ends with `/`.
///
/// Normalizing an already normalized path returns it unchanged.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() {
        return Cow::Borrowed("/");
    }

    match (path.starts_with('/'), path.ends_with('/')) {
        (true, true) => Cow::Borrowed(path),
        (true, false) => Cow::Owned(format!("{path}/")),
        (false, true) => Cow::Owned(format!("/{path}")),
        (false, false) => Cow::Owned(format!("/{path}/")),
    }
}

/// Parse a resource link into its [`ResourceInfo`].
///
/// Returns [`Error::InvalidResourcePath`] when the link holds no segment,
/// holds an empty segment, or holds an unknown token at a kind position.
///
/// ```
/// use docdb_documentdb::{parse_resource, ResourceType};
///
/// let info = parse_resource("/dbs/d1/colls/c1/docs/").unwrap();
/// assert_eq!(info.resource_type, ResourceType::Documents);
/// assert_eq!(info.resource_id, "c1");
///
/// let info = parse_resource("dbs/d1/colls/c1/docs/doc1").unwrap();
/// assert_eq!(info.resource_type, ResourceType::Documents);
/// assert_eq!(info.resource_id, "doc1");
/// ```
pub fn parse_resource(path: &str) -> Result<ResourceInfo> {
    let invalid = || Error::InvalidResourcePath(path.to_string());

    let normalized = normalize_path(path);
    let inner = normalized
        .strip_prefix('/')
        .and_then(|v| v.strip_suffix('/'))
        .filter(|v| !v.is_empty())
        .ok_or_else(invalid)?;

    let segments: Vec<&str> = inner.split('/').map(strip_escape).collect();
    if segments.iter().any(|v| v.is_empty()) {
        return Err(invalid());
    }

    // Even positions hold kind tokens, odd positions hold ids.
    let mut types = Vec::with_capacity(segments.len() / 2 + 1);
    for token in segments.iter().step_by(2) {
        types.push(ResourceType::from_token(token).ok_or_else(invalid)?);
    }

    let kind = if segments.len() % 2 == 0 {
        LinkKind::Item
    } else {
        LinkKind::Feed
    };
    let resource_type = *types.last().ok_or_else(invalid)?;
    let resource_id = match kind {
        LinkKind::Item => segments[segments.len() - 1],
        LinkKind::Feed if segments.len() >= 2 => segments[segments.len() - 2],
        LinkKind::Feed => "",
    };

    Ok(ResourceInfo {
        resource_type,
        resource_id: resource_id.to_string(),
        kind,
    })
}

/// Strip exactly one trailing backslash left over from escaping.
fn strip_escape(segment: &str) -> &str {
    segment.strip_suffix('\\').unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("/dbs/", ResourceType::Databases, "", LinkKind::Feed; "root database feed")]
    #[test_case("/dbs", ResourceType::Databases, "", LinkKind::Feed; "root feed without trailing slash")]
    #[test_case("/dbs/foo/", ResourceType::Databases, "foo", LinkKind::Item; "database")]
    #[test_case("/dbs/foo/colls/", ResourceType::Collections, "foo", LinkKind::Feed; "collection feed")]
    #[test_case("/dbs/d1/colls/c1/", ResourceType::Collections, "c1", LinkKind::Item; "collection")]
    #[test_case("/dbs/d1/colls/c1/docs/", ResourceType::Documents, "c1", LinkKind::Feed; "document feed")]
    #[test_case("/dbs/d1/colls/c1/docs/doc1/", ResourceType::Documents, "doc1", LinkKind::Item; "document")]
    #[test_case("dbs/d1/colls/c1/docs/doc1", ResourceType::Documents, "doc1", LinkKind::Item; "document without slashes")]
    #[test_case("/dbs/d1/colls/c1/docs", ResourceType::Documents, "c1", LinkKind::Feed; "query target")]
    #[test_case("dbs/AbcA==/colls/AbcAIJ+9aQ=/", ResourceType::Collections, "AbcAIJ+9aQ=", LinkKind::Item; "self link with rid")]
    #[test_case("/offers/", ResourceType::Offers, "", LinkKind::Feed; "offer feed")]
    #[test_case("/offers/o1/", ResourceType::Offers, "o1", LinkKind::Item; "offer")]
    #[test_case("/dbs/d1/users/u1/permissions/p1/", ResourceType::Permissions, "p1", LinkKind::Item; "permission")]
    #[test_case("/dbs/d1/colls/c1/sprocs/", ResourceType::StoredProcedures, "c1", LinkKind::Feed; "stored procedure feed")]
    fn test_parse_resource(path: &str, resource_type: ResourceType, resource_id: &str, kind: LinkKind) {
        let info = parse_resource(path).expect("path must be valid");

        assert_eq!(
            info,
            ResourceInfo {
                resource_type,
                resource_id: resource_id.to_string(),
                kind,
            }
        );
    }

    #[test_case("/dbs\\/d1\\/", ResourceType::Databases, "d1"; "escaped item")]
    #[test_case("/dbs/d1/colls/c1\\/docs\\/", ResourceType::Documents, "c1"; "escaped feed")]
    #[test_case("/dbs/d1\\\\/", ResourceType::Databases, "d1\\"; "only one backslash is stripped")]
    fn test_parse_resource_strips_trailing_backslash(path: &str, resource_type: ResourceType, resource_id: &str) {
        let info = parse_resource(path).expect("path must be valid");

        assert_eq!(info.resource_type, resource_type);
        assert_eq!(info.resource_id, resource_id);
    }

    #[test_case(""; "empty")]
    #[test_case("/"; "root")]
    #[test_case("//"; "double slash")]
    #[test_case("/dbs//colls/"; "empty id")]
    #[test_case("/dbs/d1//"; "empty trailing segment")]
    #[test_case("/tables/t1/"; "unknown kind")]
    #[test_case("/dbs/d1/tables/"; "unknown nested kind")]
    #[test_case("/DBS/d1/"; "kind is case sensitive")]
    fn test_parse_resource_invalid(path: &str) {
        match parse_resource(path) {
            Err(Error::InvalidResourcePath(p)) => assert_eq!(p, path),
            other => panic!("expected InvalidResourcePath, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_path_is_idempotent() {
        for path in ["/dbs/d1/", "dbs/d1", "/dbs/d1", "dbs/d1/", "/"] {
            let once = normalize_path(path).into_owned();
            assert!(once.starts_with('/') && once.ends_with('/'));
            assert_eq!(normalize_path(&once), once);
        }
        assert!(matches!(normalize_path("/dbs/d1/"), Cow::Borrowed(_)));
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_parse_resource_is_stable() {
        let path = "/dbs/d1/colls/c1/docs/doc1/";
        assert_eq!(parse_resource(path).unwrap(), parse_resource(path).unwrap());
        assert_eq!(
            parse_resource(path).unwrap(),
            parse_resource(&normalize_path("dbs/d1/colls/c1/docs/doc1")).unwrap()
        );
    }

    #[test]
    fn test_resource_type_tokens_round_trip() {
        for token in [
            "dbs",
            "colls",
            "docs",
            "users",
            "permissions",
            "attachments",
            "sprocs",
            "triggers",
            "udfs",
            "conflicts",
            "pkranges",
            "offers",
        ] {
            let ty: ResourceType = token.parse().expect("token must be known");
            assert_eq!(ty.as_str(), token);
            assert_eq!(ty.to_string(), token);
        }
        assert!("media".parse::<ResourceType>().is_err());
    }
}
