//! Collaborators the entity table depends on

use crate::shared::error::RemoteError;
use async_trait::async_trait;
use contracts::shared::list::{ListPage, ListQuery};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use super::config::TableEntity;

/// Paged, sorted, filtered record source
#[async_trait(?Send)]
pub trait DataSource<E> {
    async fn fetch(&self, query: &ListQuery) -> Result<ListPage<E>, RemoteError>;
}

/// Bulk delete; succeeds or fails as a whole
#[async_trait(?Send)]
pub trait RemoteDeleteService<E: TableEntity> {
    async fn delete(&self, ids: Vec<E::Id>) -> Result<(), RemoteError>;
}

/// Whether the current viewer may create and delete records.
///
/// Read once when a table is built, not re-evaluated afterwards.
pub trait PermissionOracle {
    fn is_privileged(&self) -> bool;
}

/// Fixed privilege, for hosts that already know the answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Privilege(pub bool);

impl PermissionOracle for Privilege {
    fn is_privileged(&self) -> bool {
        self.0
    }
}

/// Runs a future to completion on the UI thread
pub type Spawner = Rc<dyn Fn(LocalBoxFuture<'static, ()>)>;

pub fn local_spawner() -> Spawner {
    Rc::new(|fut: LocalBoxFuture<'static, ()>| leptos::task::spawn_local(fut))
}
