//! Repository boundary between the app and the cloud-function gateway.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::gateway::ParseGateway;
use crate::record::Record;

/// Source of the full record list.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>>;
}

/// Repository backed by a [`ParseGateway`].
pub struct RemoteRepository<R> {
    gateway: Arc<ParseGateway>,
    _record: PhantomData<fn() -> R>,
}

impl<R> RemoteRepository<R> {
    pub fn new(gateway: Arc<ParseGateway>) -> Self {
        Self {
            gateway,
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Record> Repository<R> for RemoteRepository<R> {
    async fn fetch_all(&self) -> Result<Vec<R>> {
        self.gateway.fetch_all::<R>().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::record::DataItem;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn passes_records_through_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": [
                    {"id": "3", "name": "c", "description": "third"},
                    {"id": "1", "name": "a", "description": "first"},
                ]
            })))
            .mount(&server)
            .await;
        let gateway = Arc::new(ParseGateway::new(server.uri(), "app", "key"));
        let repo = RemoteRepository::<DataItem>::new(gateway);

        let items = repo.fetch_all().await.unwrap();

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn propagates_gateway_errors_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": "nope"})))
            .mount(&server)
            .await;
        let gateway = Arc::new(ParseGateway::new(server.uri(), "app", "key"));
        let repo = RemoteRepository::<DataItem>::new(gateway);

        let err = repo.fetch_all().await.unwrap_err();

        assert!(matches!(err, GatewayError::UnexpectedShape(_)));
    }
}
