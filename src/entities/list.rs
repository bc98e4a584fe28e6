//! Paginated collection listing.

use serde_json::Value;

use super::EntitiesClient;
use crate::error::Result;
use crate::types::EntityPage;

/// Request to list a page of an entity-kind collection.
///
/// Awaiting the request issues it. Unset parameters fall back to the
/// service's own defaults.
///
/// ## Example
///
/// ```rust,ignore
/// let page = projects.list().page(2).per_page(10).await?;
/// for record in &page.records {
///     println!("{}", record.id);
/// }
/// ```
pub struct ListEntitiesRequest {
    entities: EntitiesClient,
    page: Option<u64>,
    per_page: Option<u64>,
}

impl ListEntitiesRequest {
    pub(crate) fn new(entities: EntitiesClient) -> Self {
        Self {
            entities,
            page: None,
            per_page: None,
        }
    }

    /// Sets the 1-based page number to fetch.
    #[must_use]
    pub fn page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of records per page.
    #[must_use]
    pub fn per_page(mut self, per_page: u64) -> Self {
        self.per_page = Some(per_page);
        self
    }

    async fn execute(self) -> Result<EntityPage> {
        let token = self
            .entities
            .client()
            .inner()
            .credential(self.entities.token_override(), true)?;

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = self.page {
            query.push(("__page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            query.push(("__per_page", per_page.to_string()));
        }

        let body: Value = self
            .entities
            .client()
            .inner()
            .get(&self.entities.collection_path(), &query, token.as_ref())
            .await?;

        EntityPage::from_body(self.entities.kind(), body)
    }
}

impl std::future::IntoFuture for ListEntitiesRequest {
    type Output = Result<EntityPage>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.execute())
    }
}

#[cfg(test)]
mod wiremock_tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::Client;

    fn mock_entities(server: &MockServer) -> crate::entities::EntitiesClient {
        let client = Client::builder().url(server.uri()).build().unwrap();
        client.set_token("llt_env");
        client
            .application("shop")
            .environment("prod")
            .entities("projects")
    }

    #[tokio::test]
    async fn test_list_sends_pagination_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apps/shop/prod/projects"))
            .and(query_param("__page", "2"))
            .and(query_param("__per_page", "10"))
            .and(header("token", "llt_env"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [
                    {
                        "id": "e11",
                        "title": "Project Vulcan",
                        "__meta": {"self": "/apps/shop/prod/projects/e11"}
                    }
                ],
                "__meta": {
                    "totalCount": 11,
                    "items": 1,
                    "pages": 2,
                    "page": 2,
                    "previous": 1,
                    "current_page": "/shop/prod/projects?__page=2&__per_page=10",
                    "previous_page": "/shop/prod/projects?__page=1&__per_page=10"
                }
            })))
            .mount(&server)
            .await;

        let page = mock_entities(&server)
            .list()
            .page(2)
            .per_page(10)
            .await
            .unwrap();

        assert_eq!(page.kind, "projects");
        assert_eq!(page.meta.page, 2);
        assert_eq!(page.meta.total_count, 11);
        assert_eq!(page.meta.items, page.records.len() as u64);
        assert_eq!(page.records[0].id, "e11");
    }

    #[tokio::test]
    async fn test_list_without_params_sends_no_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/apps/shop/prod/projects"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projects": [],
                "__meta": {
                    "totalCount": 0,
                    "items": 0,
                    "pages": 0,
                    "page": 1,
                    "current_page": "/shop/prod/projects?__page=1&__per_page=10"
                }
            })))
            .mount(&server)
            .await;

        let page = mock_entities(&server).list().await.unwrap();
        assert!(page.records.is_empty());
        assert_eq!(page.meta.total_count, 0);
    }
}
