//! End-to-end bootstrap workflow against a mocked service: create an
//! application anonymously, adopt its token, write an entity, read the
//! collection back.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use loomdb::prelude::*;

#[tokio::test]
async fn bootstrap_write_and_list() {
    let server = MockServer::start().await;

    // Application bootstrap is the one anonymous call: no token header.
    Mock::given(method("POST"))
        .and(path("/apps/shop"))
        .and(body_json(json!({"environmentName": "prod"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "applicationName": "shop",
            "environmentName": "prod",
            "applicationTokens": [{"key": "llt_app", "permission": "ALL"}],
            "environmentTokens": [{"key": "llt_env", "permission": "ALL"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/apps/shop/prod/projects"))
        .and(header("token", "llt_app"))
        .and(body_json(json!([{"title": "T"}])))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ids": ["e1"]})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/apps/shop/prod/projects"))
        .and(header("token", "llt_app"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {
                    "id": "e1",
                    "title": "T",
                    "__meta": {"self": "/apps/shop/prod/projects/e1"}
                }
            ],
            "__meta": {
                "totalCount": 1,
                "items": 1,
                "pages": 1,
                "page": 1,
                "current_page": "/shop/prod/projects?__page=1&__per_page=10"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Construct with base URL only - no credential.
    let client = Client::builder().url(server.uri()).build().unwrap();

    let created = client
        .application("shop")
        .create()
        .environment("prod")
        .await
        .unwrap();
    assert!(!created.application_tokens.is_empty());
    assert!(!created.environment_tokens.is_empty());

    // Adopt the application token for all subsequent calls.
    client.set_token(&created.application_tokens[0]);

    let projects = client
        .application("shop")
        .environment("prod")
        .entities("projects");

    let id = projects.write(&json!({"title": "T"})).await.unwrap();
    assert_eq!(id, "e1");

    let page = projects.list().await.unwrap();
    assert_eq!(page.meta.total_count, 1);
    assert_eq!(page.records.len(), 1);
    assert_eq!(page.records[0].get("title"), Some(&json!("T")));
}

#[tokio::test]
async fn deleted_scope_reads_back_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/apps/shop/prod/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": 2})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/apps/shop/prod/projects/e1"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"no such entity"}"#))
        .mount(&server)
        .await;

    let client = Client::builder()
        .url(server.uri())
        .token("llt_env")
        .build()
        .unwrap();
    let projects = client
        .application("shop")
        .environment("prod")
        .entities("projects");

    assert_eq!(projects.delete_all().await.unwrap(), 2);

    // A previously valid id now fails with a service error, never stale data.
    let err = projects.get("e1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Service);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn pagination_walks_pages() {
    let server = MockServer::start().await;

    for (page_number, ids, next) in [(1, vec!["e1", "e2"], Some(2)), (2, vec!["e3"], None)] {
        let records: Vec<_> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "title": format!("Project {id}"),
                    "__meta": {"self": format!("/apps/shop/prod/projects/{id}")}
                })
            })
            .collect();

        let mut meta = json!({
            "totalCount": 3,
            "items": records.len(),
            "pages": 2,
            "page": page_number,
            "current_page":
                format!("/shop/prod/projects?__page={page_number}&__per_page=2"),
        });
        if let Some(next) = next {
            meta["next"] = json!(next);
            meta["next_page"] = json!(format!("/shop/prod/projects?__page={next}&__per_page=2"));
        }

        Mock::given(method("GET"))
            .and(path("/apps/shop/prod/projects"))
            .and(query_param("__page", page_number.to_string()))
            .and(query_param("__per_page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"projects": records, "__meta": meta})),
            )
            .mount(&server)
            .await;
    }

    let client = Client::builder()
        .url(server.uri())
        .token("llt_env")
        .build()
        .unwrap();
    let projects = client
        .application("shop")
        .environment("prod")
        .entities("projects");

    let first = projects.list().page(1).per_page(2).await.unwrap();
    assert_eq!(first.records.len(), 2);
    assert_eq!(first.meta.next, Some(2));

    let second = projects.list().page(2).per_page(2).await.unwrap();
    assert_eq!(second.records.len(), 1);
    assert_eq!(second.meta.next, None);
    assert_eq!(
        first.meta.total_count,
        (first.records.len() + second.records.len()) as u64
    );
}
