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


use anyhow::Result;
use docdb_core::{Context, OsEnv};
use docdb_documentdb::{Client, Config, IndexingPolicy};
use docdb_http_send_reqwest::ReqwestHttpSend;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Family {
    id: String,
    #[serde(rename = "lastName")]
    last_name: String,
    #[serde(rename = "_self", default, skip_serializing)]
    self_link: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);

    // Reads DOCUMENTDB_ENDPOINT / DOCUMENTDB_MASTER_KEY, falling back to
    // DATABASE_URL / DATABASE_KEY.
    let config = Config::default().from_env(&ctx);
    if config.endpoint.is_none() || config.master_key.is_none() {
        println!("DOCUMENTDB_ENDPOINT and DOCUMENTDB_MASTER_KEY must be set, skipped");
        return Ok(());
    }
    let client = Client::new(ctx, config)?;

    println!("Example 1: create database");
    let db = client.create_database("docdb-example").await?;
    println!("created {} at {}", db.resource.id, db.resource.self_link);

    println!("Example 2: create collection");
    let policy = IndexingPolicy {
        is_automatic: true,
        indexing_mode: "consistent".to_string(),
    };
    let coll = client
        .create_collection(&db.resource.self_link, "families", Some(&policy))
        .await?;
    println!("created {} at {}", coll.resource.id, coll.resource.self_link);

    println!("Example 3: create and query documents");
    for (id, last_name) in [("AndersenFamily", "Andersen"), ("WakefieldFamily", "Wakefield")] {
        let family = Family {
            id: id.to_string(),
            last_name: last_name.to_string(),
            self_link: String::new(),
        };
        let created = client
            .create_document(&coll.resource.self_link, &family)
            .await?;
        println!("created document {}", created.self_link);
    }

    let found: Vec<Family> = client
        .query_documents(
            &coll.resource.self_link,
            "SELECT * FROM Families f WHERE f.lastName = 'Andersen'",
        )
        .await?;
    println!("query matched {} document(s): {found:?}", found.len());

    println!("Example 4: clean up");
    let all: Vec<Family> = client.read_documents(&coll.resource.self_link).await?;
    for doc in all {
        client.delete_document(&doc.self_link).await?;
    }
    client.delete_collection(&coll.resource.self_link).await?;
    client.delete_database(&db.resource.self_link).await?;
    println!("done");

    Ok(())
}
