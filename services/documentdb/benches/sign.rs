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


use criterion::{criterion_group, criterion_main, Criterion};
use docdb_core::{Context, SignRequest};
use docdb_documentdb::{parse_resource, sign, string_to_sign, Credential, RequestSigner};

criterion_group!(benches, bench);
criterion_main!(benches);

const MASTER_KEY: &str = "ZG9jZGItbWFzdGVyLWtleS1mb3Itc2lnbmluZy10ZXN0cy0wMTIzNDU2Nzg5YWJjZGVm";

pub fn bench(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("must success");

    let mut group = c.benchmark_group("documentdb");

    group.bench_function("parse_resource", |b| {
        b.iter(|| parse_resource("/dbs/mydb/colls/mycoll/docs/doc1/").expect("must success"))
    });

    group.bench_function("sign", |b| {
        let sts = string_to_sign(
            "GET",
            "docs",
            "doc1",
            "Thu, 27 Apr 2017 00:51:12 GMT",
            "",
        );
        b.iter(|| sign(&sts, MASTER_KEY).expect("must success"))
    });

    group.bench_function("sign_request", |b| {
        let cred = Credential::with_master_key(MASTER_KEY);
        let signer = RequestSigner::new();
        let ctx = Context::new();

        b.to_async(&runtime).iter(|| async {
            let mut req = http::Request::new("");
            *req.method_mut() = http::Method::GET;
            *req.uri_mut() = "https://localhost:8081/dbs/mydb/colls/mycoll/docs/doc1"
                .parse()
                .expect("url must be valid");

            let (mut parts, _) = req.into_parts();
            signer
                .sign_request(&ctx, &mut parts, Some(&cred))
                .await
                .expect("must success")
        })
    });

    group.finish()
}
