use std::future::Future;

use super::error::GatewayError;

/// Entities a transport can create from a draft once it knows their id.
pub trait Record: Clone + Send + Sync + 'static {
    type Draft: Send + 'static;

    fn from_draft(id: u64, draft: Self::Draft) -> Self;
}

/// Where a gateway's data actually lives.
///
/// The in-memory mock implements this; a network transport would issue
/// the corresponding requests and map failures to
/// [`GatewayError::Rejected`]. Controllers are unaffected by the swap.
pub trait Transport: Send + Sync + 'static {
    type Entity: Record;

    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Self::Entity>, GatewayError>> + Send;

    fn create(
        &self,
        draft: <Self::Entity as Record>::Draft,
    ) -> impl Future<Output = Result<Self::Entity, GatewayError>> + Send;
}
