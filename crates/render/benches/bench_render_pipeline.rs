use std::hint::black_box;
use std::time::Instant;

use glam::Vec3;
use viewport_common::{Camera, SurfaceSize};
use viewport_kernel::{PartOverrides, Scene};
use viewport_render::{Projector, RecordingSink, collect_faces, paint};

fn make_scene(part_count: usize, spacing: f32) -> Scene {
    let mut scene = Scene::new();
    let ws = scene.workspace();
    let side = (part_count as f32).sqrt().ceil() as usize;
    for i in 0..part_count {
        let x = (i % side) as f32 * spacing - side as f32 * spacing / 2.0;
        let z = -((i / side) as f32 * spacing) - 5.0;
        scene
            .create_instance(
                "Part",
                PartOverrides {
                    position: Some(Vec3::new(x, 0.0, z)),
                    rotation: Some(Vec3::new(0.0, (i * 7 % 90) as f32, 0.0)),
                    ..Default::default()
                },
                Some(ws),
            )
            .expect("workspace accepts parts");
    }
    scene
}

fn bench_collect(part_count: usize, iterations: usize) {
    let scene = make_scene(part_count, 6.0);
    let projector = Projector::new(&SurfaceSize::default(), 38.0);
    let camera = Camera::default();

    let start = Instant::now();
    let mut faces = 0;
    for _ in 0..iterations {
        faces = collect_faces(black_box(&scene), &camera, &projector).faces.len();
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  collect ({part_count} parts, {faces} faces, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_paint(part_count: usize, iterations: usize) {
    let scene = make_scene(part_count, 6.0);
    let projector = Projector::new(&SurfaceSize::default(), 38.0);
    let list = collect_faces(&scene, &Camera::default(), &projector);
    let mut sink = RecordingSink::new();

    let start = Instant::now();
    for _ in 0..iterations {
        sink.clear_commands();
        paint(black_box(&list.faces), &mut sink);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  paint ({} faces, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        list.faces.len()
    );
}

fn main() {
    println!("render pipeline benchmarks");
    for &count in &[10, 100, 1_000] {
        bench_collect(count, 200);
    }
    for &count in &[10, 100, 1_000] {
        bench_paint(count, 200);
    }
}
