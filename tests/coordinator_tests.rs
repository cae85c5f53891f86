//! Resource Coordinator Tests
//!
//! Tests for:
//! - Readiness: N-1 completions leave the coordinator loading, the N-th
//!   emits `ready` exactly once
//! - Redelivery: repeated completions change neither count nor store
//! - Store keys equal registry names
//! - Configuration defects: duplicate names, unknown kinds, missing backends
//! - Async loading through in-memory backends, including backend failure

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use vitrine::assets::{
    AssetDescriptor, AssetKind, AssetRegistry, DecoderConfigBackend, LoaderBackends,
    MemoryBackend, RawAssetDescriptor, Resource, ResourceCoordinator, SceneBundle, Texture,
};
use vitrine::errors::{ConfigError, LoadError, VitrineError};

fn texture(label: &str) -> Resource {
    Texture::new(label, 1, 1, vec![255, 255, 255, 255]).into()
}

fn bundle(label: &str) -> Resource {
    SceneBundle::new(label).with_nodes(["Body", "Neck"]).into()
}

fn showcase_registry() -> AssetRegistry {
    AssetRegistry::new([
        AssetDescriptor::scene_bundle("model_guitar_1", "models/guitar_1.glb"),
        AssetDescriptor::texture("texture_base_1", "textures/base_1.jpg"),
        AssetDescriptor::texture("texture_wall", "textures/wall.jpg"),
    ])
    .unwrap()
}

/// Subscribes a counter to `ready`.
fn count_ready(coordinator: &mut ResourceCoordinator) -> Rc<Cell<u32>> {
    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    coordinator
        .events()
        .subscribe(move |_| counter.set(counter.get() + 1));
    hits
}

fn memory_backends() -> LoaderBackends {
    LoaderBackends::new()
        .with(
            MemoryBackend::new(AssetKind::SceneBundle)
                .with("models/guitar_1.glb", bundle("guitar_1")),
        )
        .with(
            MemoryBackend::new(AssetKind::Texture)
                .with("textures/base_1.jpg", texture("base_1"))
                .with("textures/wall.jpg", texture("wall")),
        )
}

// ============================================================================
// Readiness Barrier
// ============================================================================

#[test]
fn not_ready_until_last_completion() {
    let registry = showcase_registry();
    let descriptors: Vec<_> = registry.iter().cloned().collect();
    let mut coordinator = ResourceCoordinator::new(registry);
    let ready = count_ready(&mut coordinator);

    let progress = coordinator
        .on_resource_loaded(&descriptors[0], bundle("guitar_1"))
        .unwrap();
    assert_eq!(progress.loaded, 1);
    coordinator
        .on_resource_loaded(&descriptors[1], texture("base_1"))
        .unwrap();

    assert!(!coordinator.is_ready());
    assert_eq!(ready.get(), 0);
    assert_eq!(coordinator.pending(), vec!["texture_wall"]);
    assert!(coordinator.store().is_none());

    let progress = coordinator
        .on_resource_loaded(&descriptors[2], texture("wall"))
        .unwrap();
    assert!(progress.is_complete());
    assert!(coordinator.is_ready());
    assert_eq!(ready.get(), 1);
    assert!(coordinator.pending().is_empty());
}

#[test]
fn completion_order_does_not_matter() {
    let registry = showcase_registry();
    let descriptors: Vec<_> = registry.iter().cloned().collect();
    let mut coordinator = ResourceCoordinator::new(registry);
    let ready = count_ready(&mut coordinator);

    coordinator.on_resource_loaded(&descriptors[2], texture("wall")).unwrap();
    coordinator.on_resource_loaded(&descriptors[0], bundle("guitar_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[1], texture("base_1")).unwrap();

    assert_eq!(ready.get(), 1);
}

#[test]
fn empty_registry_is_ready_on_start() {
    let mut coordinator = ResourceCoordinator::new(AssetRegistry::new([]).unwrap());
    let ready = count_ready(&mut coordinator);

    let pending = coordinator.start(&LoaderBackends::new()).unwrap();

    assert!(pending.is_empty());
    assert!(coordinator.is_ready());
    assert_eq!(ready.get(), 1);
    assert!((coordinator.progress().fraction() - 1.0).abs() < f32::EPSILON);
}

#[test]
fn ready_event_carries_the_store() {
    let registry = showcase_registry();
    let descriptors: Vec<_> = registry.iter().cloned().collect();
    let mut coordinator = ResourceCoordinator::new(registry);
    let rx = coordinator.events().channel();

    coordinator.on_resource_loaded(&descriptors[0], bundle("guitar_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[1], texture("base_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[2], texture("wall")).unwrap();

    let event = rx.try_recv().unwrap();
    assert_eq!(event.name(), "ready");
    let vitrine::assets::LoadEvent::Ready(store) = event;
    assert!(Arc::ptr_eq(&store, coordinator.store().unwrap()));
    assert!(rx.try_recv().is_err());
}

// ============================================================================
// Redelivery
// ============================================================================

#[test]
fn repeated_completion_counts_once() {
    let registry = showcase_registry();
    let descriptors: Vec<_> = registry.iter().cloned().collect();
    let mut coordinator = ResourceCoordinator::new(registry);
    let ready = count_ready(&mut coordinator);

    coordinator.on_resource_loaded(&descriptors[0], bundle("guitar_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[1], texture("base_1")).unwrap();
    let progress = coordinator
        .on_resource_loaded(&descriptors[1], texture("base_1_again"))
        .unwrap();

    assert_eq!(progress.loaded, 2);
    assert!(!coordinator.is_ready());
    assert_eq!(ready.get(), 0);
}

#[test]
fn completion_after_ready_is_inert() {
    let registry = showcase_registry();
    let descriptors: Vec<_> = registry.iter().cloned().collect();
    let mut coordinator = ResourceCoordinator::new(registry);
    let ready = count_ready(&mut coordinator);

    coordinator.on_resource_loaded(&descriptors[0], bundle("guitar_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[1], texture("base_1")).unwrap();
    coordinator.on_resource_loaded(&descriptors[2], texture("wall")).unwrap();
    coordinator
        .on_resource_loaded(&descriptors[2], texture("wall_again"))
        .unwrap();

    assert_eq!(ready.get(), 1);
    let store = coordinator.store().unwrap();
    assert_eq!(store.texture("texture_wall").unwrap().label, "wall");
}

#[test]
fn completion_for_undeclared_name_is_rejected() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let stray = AssetDescriptor::texture("texture_stray", "textures/stray.jpg");

    let err = coordinator
        .on_resource_loaded(&stray, texture("stray"))
        .unwrap_err();

    assert!(matches!(err, LoadError::UnknownAsset(name) if name == "texture_stray"));
    assert_eq!(coordinator.progress().loaded, 0);
}

// ============================================================================
// Store Contents
// ============================================================================

#[test]
fn store_keys_equal_registry_names() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let store = pollster::block_on(coordinator.load_all(&memory_backends())).unwrap();

    let mut keys: Vec<_> = store.names().collect();
    keys.sort_unstable();
    let mut names: Vec<_> = coordinator.registry().names().collect();
    names.sort_unstable();
    assert_eq!(keys, names);
}

#[test]
fn typed_accessors_check_the_kind() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let store = pollster::block_on(coordinator.load_all(&memory_backends())).unwrap();

    assert!(store.scene_bundle("model_guitar_1").is_ok());
    assert!(store.texture("model_guitar_1").is_err());
    assert!(store.texture("texture_missing").is_err());
}

// ============================================================================
// Configuration Defects
// ============================================================================

#[test]
fn duplicate_names_are_rejected() {
    let err = AssetRegistry::new([
        AssetDescriptor::texture("texture_base_1", "a.jpg"),
        AssetDescriptor::texture("texture_base_1", "b.jpg"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateAsset(name) if name == "texture_base_1"));
}

#[test]
fn unknown_kind_is_rejected_before_loading() {
    let raw: Vec<RawAssetDescriptor> = serde_json::from_str(
        r#"[
            { "type": "TextureLoader", "name": "texture_base_1", "path": "a.jpg" },
            { "type": "FBXLoader", "name": "model_old", "path": "old.fbx" }
        ]"#,
    )
    .unwrap();

    let err = AssetRegistry::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnknownKind { ref name, ref kind } if name == "model_old" && kind == "FBXLoader"
    ));
}

#[test]
fn missing_backend_fails_before_any_request() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let textures_only = LoaderBackends::new().with(MemoryBackend::new(AssetKind::Texture));

    let err = coordinator.start(&textures_only).err().unwrap();

    assert!(matches!(
        err,
        VitrineError::Config(ConfigError::NoLoader { kind: AssetKind::SceneBundle, .. })
    ));
    assert_eq!(coordinator.progress().loaded, 0);
    assert_eq!(coordinator.pending().len(), 3);
}

#[test]
fn start_twice_is_rejected() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let _pending = coordinator.start(&memory_backends()).unwrap();
    let err = coordinator.start(&memory_backends()).err().unwrap();
    assert!(matches!(err, VitrineError::Load(LoadError::AlreadyStarted)));
}

// ============================================================================
// Async Loading
// ============================================================================

#[test]
fn load_all_resolves_every_asset() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let ready = count_ready(&mut coordinator);

    let store = pollster::block_on(coordinator.load_all(&memory_backends())).unwrap();

    assert_eq!(store.len(), 3);
    assert_eq!(ready.get(), 1);
    assert!(coordinator.is_ready());
}

#[test]
fn decoder_config_resolves_immediately() {
    let registry = AssetRegistry::new([
        AssetDescriptor::decoder_config("draco", "/draco/"),
        AssetDescriptor::texture("texture_wall", "textures/wall.jpg"),
    ])
    .unwrap();
    let backends = LoaderBackends::new()
        .with(DecoderConfigBackend::new("public"))
        .with(MemoryBackend::new(AssetKind::Texture).with("textures/wall.jpg", texture("wall")));
    let mut coordinator = ResourceCoordinator::new(registry);

    let pending = coordinator.start(&backends).unwrap();
    assert_eq!(coordinator.progress().loaded, 1);
    assert_eq!(pending.len(), 1);

    let store = pollster::block_on(coordinator.finish(pending)).unwrap();
    let decoder = store.decoder_config("draco").unwrap();
    assert!(decoder.decoder_path.ends_with("draco"));
}

#[test]
fn backend_failure_aborts_loading() {
    let mut coordinator = ResourceCoordinator::new(showcase_registry());
    let ready = count_ready(&mut coordinator);
    let backends = LoaderBackends::new()
        .with(
            MemoryBackend::new(AssetKind::SceneBundle)
                .with("models/guitar_1.glb", bundle("guitar_1")),
        )
        .with(MemoryBackend::new(AssetKind::Texture).with("textures/base_1.jpg", texture("base_1")));

    let err = pollster::block_on(coordinator.load_all(&backends)).unwrap_err();

    assert!(matches!(
        err,
        VitrineError::Load(LoadError::Backend { ref name, .. }) if name == "texture_wall"
    ));
    assert!(!coordinator.is_ready());
    assert_eq!(ready.get(), 0);
}
