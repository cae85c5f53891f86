//! Headless Showcase
//!
//! Loads the showcase manifest from disk through the file-backed loaders,
//! assembles the guitar once everything is ready, then replays a scripted
//! focus session: move into view, drag to spin, release, return.
//!
//! Run with `RUST_LOG=debug` to see every load completion and tween hand-off.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, anyhow};
use glam::{Vec2, Vec3};
use vitrine::{
    Camera, LoaderBackends, PointerEvent, ResourceCoordinator, SceneAssembly, SceneGraph,
    SceneManifest, Timer, Tweener, ViewPositioner,
};

const FRAME: Duration = Duration::from_micros(16_667);

/// Minimal glTF document: no buffers, just a node hierarchy.
const GUITAR_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [
    { "name": "Body", "children": [1, 2] },
    { "name": "Neck" },
    { "name": "Strings" }
  ]
}"#;

fn write_sample_assets(root: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(root.join("models"))?;
    std::fs::create_dir_all(root.join("textures"))?;
    std::fs::write(root.join("models/guitar_1.gltf"), GUITAR_GLTF)?;

    let base = image::RgbaImage::from_pixel(4, 4, image::Rgba([182, 121, 64, 255]));
    base.save(root.join("textures/base_1.png"))
        .context("writing sample texture")?;
    Ok(())
}

fn run(
    frames: usize,
    scene: &mut SceneGraph,
    positioner: &mut ViewPositioner,
    tweener: &mut Tweener,
    timer: &mut Timer,
) {
    for _ in 0..frames {
        timer.step(FRAME);
        positioner.frame(timer.dt_seconds(), timer.now(), scene, tweener);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let root = std::env::temp_dir().join("vitrine_showcase");
    write_sample_assets(&root)?;

    let manifest = SceneManifest::from_json(include_str!("assets/scene.json"))?;
    let mut coordinator = ResourceCoordinator::new(manifest.registry()?);
    let mut assembly = SceneAssembly::new(coordinator.events(), manifest.props.clone());
    coordinator
        .events()
        .subscribe(|event| log::info!("Event: {}", event.name()));

    let runtime = tokio::runtime::Runtime::new()?;
    let backends = LoaderBackends::file_backed(&root);
    let store = runtime.block_on(coordinator.load_all(&backends))?;
    log::info!("Store holds {} resources", store.len());

    // The camera has already scrolled past the gallery entrance.
    let mut scene = SceneGraph::new(Camera::at(Vec3::new(0.0, 1.0, -42.0)));
    assembly.poll(&mut scene)?;
    let guitar = assembly
        .object("guitar_1")
        .ok_or_else(|| anyhow!("guitar_1 was not assembled"))?;
    let initial = scene
        .transform(guitar)
        .map(|t| t.position)
        .ok_or_else(|| anyhow!("guitar_1 missing from scene"))?;

    let mut positioner = ViewPositioner::new(manifest.focus.clone(), manifest.rotation.clone());
    positioner
        .events()
        .subscribe(|event| log::info!("Event: {}", event.name()));
    let mut tweener = Tweener::new();
    let mut timer = Timer::new();

    positioner.update(&scene.camera);
    if !positioner.move_to_view(guitar, initial, &scene, &mut tweener) {
        return Err(anyhow!("camera is not deep enough to focus"));
    }
    run(180, &mut scene, &mut positioner, &mut tweener, &mut timer);
    log::info!("In view at {}", scene.transform(guitar).map_or(Vec3::NAN, |t| t.position));

    // Drag right and slightly down, one sample per 60 ms.
    positioner.pointer(PointerEvent::Down { position: Vec2::new(640.0, 360.0) }, &mut scene);
    for step in 1..=10u8 {
        run(4, &mut scene, &mut positioner, &mut tweener, &mut timer);
        let position = Vec2::new(640.0 + f32::from(step) * 12.0, 360.0 + f32::from(step) * 3.0);
        positioner.pointer(PointerEvent::Move { position, time: timer.now() }, &mut scene);
    }
    positioner.pointer(PointerEvent::Up, &mut scene);
    run(120, &mut scene, &mut positioner, &mut tweener, &mut timer);
    log::info!(
        "Rotation after release: {}",
        scene.transform(guitar).map_or(Vec3::NAN, |t| t.rotation)
    );

    positioner.return_to_original(guitar, initial, &mut scene, &mut tweener);
    run(160, &mut scene, &mut positioner, &mut tweener, &mut timer);
    log::info!(
        "Back at {} after {} frames ({:?})",
        scene.transform(guitar).map_or(Vec3::NAN, |t| t.position),
        timer.frame_count,
        positioner.state()
    );

    Ok(())
}
