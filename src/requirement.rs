//! The "consult records" use-case.
//!
//! A thin layer over [`Repository`] that exists so the view-model can be
//! driven by a substitute in tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::record::Record;
use crate::repository::Repository;

#[async_trait]
pub trait Requirement<R: Record>: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<R>>;
}

pub struct ConsultRequirement<R: Record> {
    repository: Arc<dyn Repository<R>>,
}

impl<R: Record> ConsultRequirement<R> {
    pub fn new(repository: Arc<dyn Repository<R>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: Record> Requirement<R> for ConsultRequirement<R> {
    async fn fetch_all(&self) -> Result<Vec<R>> {
        self.repository.fetch_all().await
    }
}
