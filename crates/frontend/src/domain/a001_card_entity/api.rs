use async_trait::async_trait;
use contracts::domain::a001_card_entity::aggregate::{CardEntity, CardEntityId};
use contracts::domain::common::AggregateId;
use contracts::shared::list::{DeleteRequest, ListPage, ListQuery};
use gloo_net::http::{Request, RequestBuilder, Response};

use crate::shared::api_utils::api_url;
use crate::shared::entity_table::{DataSource, RemoteDeleteService};
use crate::shared::error::RemoteError;

const LIST_PATH: &str = "/api/card_entity";
const DELETE_PATH: &str = "/api/card_entity/delete";

/// Card entity endpoints of the admin backend
#[derive(Debug, Clone, Default)]
pub struct HttpCardEntityService {
    access_token: Option<String>,
}

impl HttpCardEntityService {
    pub fn new(access_token: Option<String>) -> Self {
        Self { access_token }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }
}

/// Path and query string of a list request
pub fn list_path(query: &ListQuery) -> Result<String, RemoteError> {
    let qs = serde_qs::to_string(query)
        .map_err(|e| RemoteError::Transport(format!("Failed to encode query: {}", e)))?;
    Ok(format!("{}?{}", LIST_PATH, qs))
}

pub fn delete_request(ids: &[CardEntityId]) -> DeleteRequest {
    DeleteRequest {
        ids: ids.iter().map(|id| id.as_string()).collect(),
    }
}

fn check_status(response: &Response) -> Result<(), RemoteError> {
    match response.status() {
        401 | 403 => Err(RemoteError::NotAuthenticated),
        status if !response.ok() => Err(RemoteError::Status {
            status,
            message: response.status_text(),
        }),
        _ => Ok(()),
    }
}

#[async_trait(?Send)]
impl DataSource<CardEntity> for HttpCardEntityService {
    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<CardEntity>, RemoteError> {
        let url = api_url(&list_path(query)?);
        let response = self
            .authorize(Request::get(&url))
            .send()
            .await
            .map_err(RemoteError::transport)?;
        check_status(&response)?;

        response
            .json::<ListPage<CardEntity>>()
            .await
            .map_err(RemoteError::decode)
    }
}

#[async_trait(?Send)]
impl RemoteDeleteService<CardEntity> for HttpCardEntityService {
    async fn delete(&self, ids: Vec<CardEntityId>) -> Result<(), RemoteError> {
        let response = self
            .authorize(Request::post(&api_url(DELETE_PATH)))
            .json(&delete_request(&ids))
            .map_err(RemoteError::transport)?
            .send()
            .await
            .map_err(RemoteError::transport)?;
        check_status(&response)
    }
}
