use std::sync::Arc;

use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;

use crate::assets::backends::{LoadRequest, LoaderBackends};
use crate::assets::registry::{AssetDescriptor, AssetRegistry};
use crate::assets::resource::Resource;
use crate::assets::store::ResourceStore;
use crate::errors::{ConfigError, LoadError, Result};
use crate::events::EventChannel;

/// Events broadcast by the [`ResourceCoordinator`].
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// Every declared asset is resolved. Carries the frozen store.
    Ready(Arc<ResourceStore>),
}

impl LoadEvent {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready(_) => "ready",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.loaded == self.total
    }

    #[must_use]
    pub fn fraction(&self) -> f32 {
        if self.total == 0 {
            1.0
        } else {
            self.loaded as f32 / self.total as f32
        }
    }
}

#[derive(Debug)]
enum LoadState {
    Idle,
    Loading(ResourceStore),
    Ready(Arc<ResourceStore>),
}

/// In-flight load requests. Drive them with [`ResourceCoordinator::finish`].
pub type PendingLoads = FuturesUnordered<BoxFuture<'static, (AssetDescriptor, anyhow::Result<Resource>)>>;

/// Fans load requests out to the backends and fans completions back in.
///
/// The loaded count is the number of distinct names in the store, so a
/// completion delivered twice cannot be counted twice, and `ready` can only
/// be emitted on the single `Loading -> Ready` transition.
pub struct ResourceCoordinator {
    registry: AssetRegistry,
    state: LoadState,
    events: EventChannel<LoadEvent>,
}

impl ResourceCoordinator {
    #[must_use]
    pub fn new(registry: AssetRegistry) -> Self {
        Self {
            registry,
            state: LoadState::Idle,
            events: EventChannel::new(),
        }
    }

    /// Subscription point for `ready`. Subscribe before calling [`Self::start`].
    pub fn events(&mut self) -> &mut EventChannel<LoadEvent> {
        &mut self.events
    }

    #[must_use]
    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    #[must_use]
    pub fn progress(&self) -> LoadProgress {
        let loaded = match &self.state {
            LoadState::Idle => 0,
            LoadState::Loading(store) => store.len(),
            LoadState::Ready(store) => store.len(),
        };
        LoadProgress {
            loaded,
            total: self.registry.total(),
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// The frozen store, once ready.
    #[must_use]
    pub fn store(&self) -> Option<&Arc<ResourceStore>> {
        match &self.state {
            LoadState::Ready(store) => Some(store),
            _ => None,
        }
    }

    /// Names still waiting for a completion. Useful when a load stalls.
    #[must_use]
    pub fn pending(&self) -> Vec<&str> {
        match &self.state {
            LoadState::Idle => self.registry.names().collect(),
            LoadState::Loading(store) => self
                .registry
                .names()
                .filter(|name| !store.contains(name))
                .collect(),
            LoadState::Ready(_) => Vec::new(),
        }
    }

    /// Dispatches every descriptor to its backend.
    ///
    /// Fails before issuing any request if a kind has no backend. Immediate
    /// resources are recorded here; the returned set holds the rest.
    pub fn start(&mut self, backends: &LoaderBackends) -> Result<PendingLoads> {
        if !matches!(self.state, LoadState::Idle) {
            return Err(LoadError::AlreadyStarted.into());
        }

        for descriptor in self.registry.iter() {
            if backends.get(descriptor.kind).is_none() {
                return Err(ConfigError::NoLoader {
                    kind: descriptor.kind,
                    name: descriptor.name.clone(),
                }
                .into());
            }
        }

        log::info!("Loading {} assets", self.registry.total());
        self.state = LoadState::Loading(ResourceStore::with_capacity(self.registry.total()));

        let pending = PendingLoads::new();
        let registry = self.registry.clone();
        for descriptor in registry.iter() {
            let Some(backend) = backends.get(descriptor.kind) else {
                continue;
            };
            match backend.load(descriptor) {
                LoadRequest::Immediate(resource) => {
                    self.on_resource_loaded(descriptor, resource)?;
                }
                LoadRequest::Deferred(future) => {
                    let descriptor = descriptor.clone();
                    pending.push(async move { (descriptor, future.await) }.boxed());
                }
            }
        }

        // An empty registry, or one made only of immediate resources.
        self.try_complete();
        Ok(pending)
    }

    /// Drives the pending requests to completion and returns the store.
    ///
    /// A backend failure aborts loading; there is no retry.
    pub async fn finish(&mut self, mut pending: PendingLoads) -> Result<Arc<ResourceStore>> {
        while let Some((descriptor, result)) = pending.next().await {
            let resource = result.map_err(|source| {
                log::error!("Asset '{}' failed to load: {source:#}", descriptor.name);
                LoadError::Backend {
                    name: descriptor.name.clone(),
                    source,
                }
            })?;
            self.on_resource_loaded(&descriptor, resource)?;
        }

        match self.store() {
            Some(store) => Ok(Arc::clone(store)),
            None => {
                let progress = self.progress();
                Err(LoadError::Incomplete {
                    loaded: progress.loaded,
                    total: progress.total,
                }
                .into())
            }
        }
    }

    /// [`Self::start`] followed by [`Self::finish`].
    pub async fn load_all(&mut self, backends: &LoaderBackends) -> Result<Arc<ResourceStore>> {
        let pending = self.start(backends)?;
        self.finish(pending).await
    }

    /// Records one completion.
    ///
    /// The first resource delivered for a name is kept; later deliveries for
    /// the same name change nothing. A completion arriving before `start`
    /// moves the coordinator into the loading state.
    pub fn on_resource_loaded(
        &mut self,
        descriptor: &AssetDescriptor,
        resource: Resource,
    ) -> std::result::Result<LoadProgress, LoadError> {
        if !self.registry.contains(&descriptor.name) {
            return Err(LoadError::UnknownAsset(descriptor.name.clone()));
        }

        if matches!(self.state, LoadState::Idle) {
            self.state = LoadState::Loading(ResourceStore::with_capacity(self.registry.total()));
        }

        match &mut self.state {
            LoadState::Loading(store) => {
                if store.insert(&descriptor.name, resource) {
                    log::debug!(
                        "Loaded {} '{}' ({}/{})",
                        descriptor.kind,
                        descriptor.name,
                        store.len(),
                        self.registry.total()
                    );
                } else {
                    log::debug!("Ignoring repeated completion for '{}'", descriptor.name);
                }
            }
            LoadState::Ready(_) => {
                log::debug!(
                    "Ignoring completion for '{}' after ready",
                    descriptor.name
                );
            }
            LoadState::Idle => {}
        }

        self.try_complete();
        Ok(self.progress())
    }

    fn try_complete(&mut self) {
        let complete = matches!(
            &self.state,
            LoadState::Loading(store) if store.len() == self.registry.total()
        );
        if !complete {
            return;
        }
        let LoadState::Loading(store) = std::mem::replace(&mut self.state, LoadState::Idle) else {
            return;
        };

        let store = Arc::new(store);
        self.state = LoadState::Ready(Arc::clone(&store));
        log::info!("All {} assets resolved", store.len());
        self.events.emit(LoadEvent::Ready(store));
    }
}
