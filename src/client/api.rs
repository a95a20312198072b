//! HTTP access to the advocate listing endpoint.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::{advocate::AdvocateDetail, common::PaginationInfo};

use super::session::ListingQuery;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error! status: {status}{}", detail(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("{0}")]
    Api(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

fn detail(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(" ({})", message),
        None => String::new(),
    }
}

/// One page as returned by the endpoint.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvocatePage {
    pub data: Vec<AdvocateDetail>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingBody {
    data: Option<Vec<AdvocateDetail>>,
    pagination: Option<PaginationInfo>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone, Debug)]
pub struct AdvocateClient {
    http: Client,
    url: String,
}

impl AdvocateClient {
    /// `endpoint` is the server origin, `prefix` the API mount point (e.g. `/api`).
    pub fn new(endpoint: &str, prefix: &str) -> Result<Self, ClientError> {
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            url: listing_url(endpoint, prefix),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch_page(&self, query: &ListingQuery) -> Result<AdvocatePage, ClientError> {
        let mut params: Vec<(&str, String)> = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        let search = query.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        debug!(url = %self.url, ?params, "fetch advocates");

        let response = self.http.get(&self.url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            warn!(%status, ?message, "advocate listing failed");
            return Err(ClientError::Status { status, message });
        }

        let body: ListingBody = response.json().await?;
        if let Some(error) = body.error {
            return Err(ClientError::Api(error));
        }
        match (body.data, body.pagination) {
            (Some(data), Some(pagination)) => Ok(AdvocatePage { data, pagination }),
            _ => Err(ClientError::Api(
                "response is missing data or pagination".to_string(),
            )),
        }
    }
}

fn listing_url(endpoint: &str, prefix: &str) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}/advocates", endpoint)
    } else {
        format!("{}/{}/advocates", endpoint, prefix)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use poem::{
        endpoint::BoxEndpoint,
        get, handler,
        listener::{Acceptor, Listener, TcpListener},
        web::Json,
        EndpointExt, Request, Route, Server,
    };
    use serde_json::{json, Value};
    use sqlx::PgPool;
    use tokio::task::JoinHandle;

    use crate::{
        factory::advocate::AdvocateFactory, init_openapi_route, model::advocate::Advocate,
        settings::get_config, AppState,
    };

    use super::*;

    /// Serve `app` on an ephemeral port, returns the origin to call.
    async fn serve(
        app: BoxEndpoint<'static>,
    ) -> anyhow::Result<(String, JoinHandle<std::io::Result<()>>)> {
        let acceptor = TcpListener::bind("127.0.0.1:0").into_acceptor().await?;
        let addr = acceptor
            .local_addr()
            .into_iter()
            .next()
            .and_then(|addr| addr.0.as_socket_addr().copied())
            .ok_or_else(|| anyhow::anyhow!("no local address"))?;
        let server = tokio::spawn(Server::new_with_acceptor(acceptor).run(app));
        Ok((format!("http://{}", addr), server))
    }

    async fn serve_listing(
        db: Option<PgPool>,
    ) -> anyhow::Result<(String, JoinHandle<std::io::Result<()>>)> {
        let mut config = get_config()?;
        config.prefix = Some("/api".to_string());
        let app = init_openapi_route(Arc::new(AppState { db }), &config);
        serve(app.map_to_response().boxed()).await
    }

    /// Answers 200 with the raw query string carried in `error`.
    #[handler]
    fn echo_query(req: &Request) -> Json<Value> {
        Json(json!({ "error": req.uri().query().unwrap_or_default() }))
    }

    #[handler]
    fn data_only() -> Json<Value> {
        Json(json!({ "data": [] }))
    }

    #[test]
    fn test_listing_url() {
        assert_eq!(
            listing_url("http://localhost:8000", "/api"),
            "http://localhost:8000/api/advocates"
        );
        assert_eq!(
            listing_url("http://localhost:8000/", "api/"),
            "http://localhost:8000/api/advocates"
        );
        assert_eq!(
            listing_url("http://localhost:8000", "/"),
            "http://localhost:8000/advocates"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = ClientError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("Database not configured".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error! status: 500 Internal Server Error (Database not configured)"
        );
        let err = ClientError::Status {
            status: StatusCode::BAD_GATEWAY,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP error! status: 502 Bad Gateway");
    }

    #[tokio::test]
    async fn test_fetch_page_database_not_configured() -> anyhow::Result<()> {
        // Given
        let (origin, server) = serve_listing(None).await?;

        // When
        let client = AdvocateClient::new(&origin, "/api")?;
        let res = client.fetch_page(&ListingQuery::default()).await;

        // Expect
        match res {
            Err(ClientError::Status { status, message }) => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, Some("Database not configured".to_string()));
            }
            other => panic!("unexpected result: {:?}", other),
        }
        server.abort();
        Ok(())
    }

    #[sqlx::test]
    async fn test_fetch_page_second_page(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = AdvocateFactory::<()>::new();
        let mut advocates = factory.generate_many(&pool, 7, ()).await?;
        advocates.sort_by_key(|item| item.id);
        let (origin, server) = serve_listing(Some(pool)).await?;

        // When
        let client = AdvocateClient::new(&origin, "/api")?;
        let query = ListingQuery {
            page: 2,
            limit: 5,
            search: String::new(),
        };
        let page = client.fetch_page(&query).await?;

        // Expect
        assert_eq!(page.pagination, PaginationInfo::new(2, 5, 7));
        assert!(!page.pagination.has_next);
        assert!(page.pagination.has_prev);
        let expected: Vec<AdvocateDetail> = advocates
            .into_iter()
            .skip(5)
            .map(AdvocateDetail::from)
            .collect();
        assert_eq!(page.data, expected);
        server.abort();
        Ok(())
    }

    #[sqlx::test]
    async fn test_fetch_page_with_search(pool: PgPool) -> anyhow::Result<()> {
        // Given
        let mut factory = AdvocateFactory::<()>::new();
        factory.modified_many(|data, idx, _| Advocate {
            last_name: if idx < 2 {
                format!("Zzyzx{}", idx)
            } else {
                format!("Smith{}", idx)
            },
            ..data.clone()
        });
        factory.generate_many(&pool, 7, ()).await?;
        let (origin, server) = serve_listing(Some(pool)).await?;

        // When
        let client = AdvocateClient::new(&origin, "/api")?;
        let query = ListingQuery {
            search: " zzyzx ".to_string(),
            ..ListingQuery::default()
        };
        let page = client.fetch_page(&query).await?;

        // Expect
        assert_eq!(page.pagination, PaginationInfo::new(1, 10, 2));
        let last_names: Vec<&str> = page
            .data
            .iter()
            .map(|item| item.last_name.as_str())
            .collect();
        assert_eq!(last_names, vec!["Zzyzx0", "Zzyzx1"]);
        server.abort();
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_page_sends_search_only_when_not_blank() -> anyhow::Result<()> {
        // Given
        let app = Route::new().at("/api/advocates", get(echo_query)).boxed();
        let (origin, server) = serve(app).await?;
        let client = AdvocateClient::new(&origin, "/api")?;

        // When
        let blank = ListingQuery {
            search: "   ".to_string(),
            ..ListingQuery::default()
        };
        let blank = client.fetch_page(&blank).await;
        let term = ListingQuery {
            search: " car ".to_string(),
            ..ListingQuery::default()
        };
        let term = client.fetch_page(&term).await;

        // Expect
        match blank {
            Err(ClientError::Api(query)) => assert_eq!(query, "page=1&limit=10"),
            other => panic!("unexpected result: {:?}", other),
        }
        match term {
            Err(ClientError::Api(query)) => assert_eq!(query, "page=1&limit=10&search=car"),
            other => panic!("unexpected result: {:?}", other),
        }
        server.abort();
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_page_missing_pagination() -> anyhow::Result<()> {
        // Given
        let app = Route::new().at("/api/advocates", get(data_only)).boxed();
        let (origin, server) = serve(app).await?;

        // When
        let client = AdvocateClient::new(&origin, "/api")?;
        let res = client.fetch_page(&ListingQuery::default()).await;

        // Expect
        match res {
            Err(ClientError::Api(message)) => {
                assert_eq!(message, "response is missing data or pagination")
            }
            other => panic!("unexpected result: {:?}", other),
        }
        server.abort();
        Ok(())
    }
}
