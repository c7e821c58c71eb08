//! The seam between the per-entity cache and whatever loads the data.

use std::future::Future;

use async_trait::async_trait;

use crate::error::Result;

/// Loads the payload of one entity (ticker).
///
/// `refresh` asks the backend to bypass its own caches.
#[async_trait]
pub trait Fetcher<T>: Send + Sync {
    async fn fetch(&self, id: &str, refresh: bool) -> Result<T>;
}

/// Adapts a closure `Fn(String, bool) -> impl Future<Output = Result<T>>`
/// into a [`Fetcher`].
///
/// ```rust
/// use screener_view::fetcher::FnFetcher;
///
/// let fetcher = FnFetcher(|id: String, _refresh: bool| async move {
///     Ok::<_, screener_view::ScreenerError>(id.len())
/// });
/// ```
pub struct FnFetcher<F>(pub F);

#[async_trait]
impl<T, F, Fut> Fetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(String, bool) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    async fn fetch(&self, id: &str, refresh: bool) -> Result<T> {
        (self.0)(id.to_string(), refresh).await
    }
}
