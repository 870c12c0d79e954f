//! Adapter contract shared by the four routes

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::route::RouteLabel;
use crate::domain::DomainError;

/// Fulfils one route label by calling exactly one external backend.
///
/// Implementations report backend outages as
/// [`DomainError::AdapterUnavailable`] and questions they cannot answer as
/// [`DomainError::AdapterRejected`].
#[async_trait]
pub trait Adapter: Send + Sync + Debug {
    async fn answer(&self, question: &str) -> Result<String, DomainError>;

    /// Backend name, for logs
    fn backend_name(&self) -> &'static str;
}

/// One adapter per route label
#[derive(Debug, Clone)]
pub struct AdapterSet {
    pub structured: Arc<dyn Adapter>,
    pub web: Arc<dyn Adapter>,
    pub retrieval: Arc<dyn Adapter>,
    pub general: Arc<dyn Adapter>,
}

impl AdapterSet {
    pub fn get(&self, label: RouteLabel) -> &Arc<dyn Adapter> {
        match label {
            RouteLabel::Structured => &self.structured,
            RouteLabel::Web => &self.web,
            RouteLabel::Retrieval => &self.retrieval,
            RouteLabel::General => &self.general,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::adapter_set;
    use super::*;

    #[tokio::test]
    async fn test_each_label_dispatches_to_its_adapter() {
        let (set, _) = adapter_set();

        assert_eq!(set.get(RouteLabel::Structured).answer("q").await.unwrap(), "structured answer");
        assert_eq!(set.get(RouteLabel::Web).answer("q").await.unwrap(), "web answer");
        assert_eq!(set.get(RouteLabel::Retrieval).answer("q").await.unwrap(), "retrieval answer");
        assert_eq!(set.get(RouteLabel::General).answer("q").await.unwrap(), "general answer");
    }
}
