//! Source Loaders
//!
//! The `Getter` is called on a full miss (no local entry and no reachable remote owner) to
//! produce the value for a key.

use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;

#[async_trait]
pub trait Getter: Send + Sync {
    async fn get(&self, key: &str) -> Result<Vec<u8>>;
}

/// Adapts an async closure into a [`Getter`].
///
/// ```ignore
/// let getter = GetterFunc(|key: String| async move { Ok(key.into_bytes()) });
/// ```
pub struct GetterFunc<F>(pub F);

#[async_trait]
impl<F, Fut> Getter for GetterFunc<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<u8>>> + Send + 'static,
{
    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        (self.0)(key.to_string()).await
    }
}
