use std::{
    collections::{HashMap, HashSet},
    time::Duration,
};

use chain_sdk_assets::{Asset, AssetRegistry, NewAsset, RegistryError, RequestContext};
use parking_lot::Mutex;

/// Wraps a registry, injecting panics and delays into calls selected by alias.
///
/// Every context passed to [`AssetRegistry::define`] is recorded, including calls that panic.
#[derive(Debug)]
pub struct FaultyRegistry<R> {
    inner: R,
    panics: HashSet<String>,
    delays: HashMap<String, Duration>,
    contexts: Mutex<Vec<RequestContext>>,
}

impl<R> FaultyRegistry<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            panics: HashSet::new(),
            delays: HashMap::new(),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Panics inside `define` when the alias matches. An empty alias matches calls without one.
    #[must_use]
    pub fn panic_on(mut self, alias: impl Into<String>) -> Self {
        self.panics.insert(alias.into());
        self
    }

    /// Sleeps before defining the asset when the alias matches.
    #[must_use]
    pub fn delay(mut self, alias: impl Into<String>, duration: Duration) -> Self {
        self.delays.insert(alias.into(), duration);
        self
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn contexts(&self) -> Vec<RequestContext> {
        self.contexts.lock().clone()
    }
}

impl<R> AssetRegistry for FaultyRegistry<R>
where
    R: AssetRegistry + Sync,
{
    async fn define(
        &self,
        ctx: &RequestContext,
        new_asset: NewAsset,
    ) -> Result<Asset, RegistryError> {
        self.contexts.lock().push(*ctx);

        let alias = new_asset.alias.clone().unwrap_or_default();

        if let Some(delay) = self.delays.get(&alias) {
            tokio::time::sleep(*delay).await;
        }

        if self.panics.contains(&alias) {
            panic!("injected fault for alias {alias:?}");
        }

        self.inner.define(ctx, new_asset).await
    }
}
