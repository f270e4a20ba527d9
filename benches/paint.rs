use criterion::{criterion_group, criterion_main, Criterion, black_box};

use rubble::core::frame::FrameClock;
use rubble::core::types::{Mat4, UVec3, Vec3};
use rubble::math::Aabb;
use rubble::object::{BoxCollider, ColliderId, CollisionSurface, PaintTarget};
use rubble::paint::{
    BlendMode, ColorProfile, DEFAULT_SURFACE_TAG, ImpactPainter, ImpactRequest, ImpactType,
    PaletteBuilder,
};
use rubble::voxel::{Rgba, Voxel, VoxelBuffer, VoxelHandle};

/// Fully active cube buffer with a single gray palette entry
fn filled_buffer(extent: u32) -> VoxelBuffer {
    let mut buffer = VoxelBuffer::new(UVec3::splat(extent));
    buffer.add_palette_color(Rgba::rgb(0.5, 0.5, 0.5));
    for cell in buffer.cells_mut() {
        *cell = Voxel::new(0);
    }
    buffer
}

struct BenchObject {
    voxels: Option<VoxelHandle>,
    collider: BoxCollider,
}

impl BenchObject {
    fn cube(extent: u32) -> Self {
        let max = (extent - 1) as f32;
        Self {
            voxels: Some(VoxelHandle::new(filled_buffer(extent))),
            collider: BoxCollider::new(ColliderId(1), Aabb::new(Vec3::ZERO, Vec3::splat(max))),
        }
    }
}

impl PaintTarget for BenchObject {
    fn voxels_mut(&mut self) -> Option<&mut VoxelHandle> {
        self.voxels.as_mut()
    }

    fn collision(&self) -> Option<&dyn CollisionSurface> {
        Some(&self.collider)
    }

    fn world_to_local(&self) -> Mat4 {
        Mat4::IDENTITY
    }

    fn voxel_size(&self) -> f32 {
        1.0
    }

    fn request_remesh(&mut self) {}
}

fn bench_count_active_inline(c: &mut Criterion) {
    // 125 cells stays under the offload threshold
    let buffer = filled_buffer(5);
    assert!(buffer.cell_count() < 200);

    c.bench_function("count_active_inline_125", |b| {
        b.iter(|| black_box(&buffer).count_active());
    });
}

fn bench_count_active_offloaded(c: &mut Criterion) {
    let buffer = filled_buffer(64);

    c.bench_function("count_active_offloaded_262k", |b| {
        b.iter(|| black_box(&buffer).count_active());
    });
}

fn bench_has_more_active_than(c: &mut Criterion) {
    let buffer = filled_buffer(64);

    c.bench_function("has_more_active_than_1000", |b| {
        b.iter(|| black_box(&buffer).has_more_active_than(black_box(1000)));
    });
}

fn bench_paint_pass(c: &mut Criterion) {
    let profile = ColorProfile::empty().with_entry(
        ImpactType::Explosion,
        DEFAULT_SURFACE_TAG,
        Rgba::rgb(0.06, 0.05, 0.05),
        BlendMode::BlendToOriginal,
    );

    for radius in [2.0f32, 6.0] {
        let mut object = BenchObject::cube(64);
        let mut painter = ImpactPainter::new(profile.clone());
        let request = ImpactRequest::at_point(Vec3::splat(32.0), ImpactType::Explosion, radius)
            .with_noise(0.35)
            .with_falloff(2.0);

        c.bench_function(&format!("paint_pass_radius_{}", radius as u32), |b| {
            let mut clock = FrameClock::new();
            b.iter(|| {
                clock.tick();
                painter.queue_impact(black_box(&mut object), black_box(request), clock.frame());
            });
        });
    }
}

fn bench_palette_saturated_fallback(c: &mut Criterion) {
    // 255 entries, so every novel color takes the nearest-distance scan
    let mut colors = Vec::new();
    for i in 0..255 {
        let v = i as f32 / 255.0;
        colors.push(Rgba::rgb(v, 1.0 - v, v * 0.5));
    }

    c.bench_function("palette_get_or_add_saturated", |b| {
        let mut builder = PaletteBuilder::from_palette(&colors);
        b.iter(|| builder.get_or_add(black_box(Rgba::rgb(0.21, 0.43, 0.87))));
    });
}

fn bench_snapshot_round_trip(c: &mut Criterion) {
    let buffer = filled_buffer(32);

    c.bench_function("snapshot_round_trip_32k", |b| {
        b.iter(|| {
            let snapshot = black_box(&buffer).snapshot();
            black_box(snapshot.into_buffer())
        });
    });
}

criterion_group!(
    benches,
    bench_count_active_inline,
    bench_count_active_offloaded,
    bench_has_more_active_than,
    bench_paint_pass,
    bench_palette_saturated_fallback,
    bench_snapshot_round_trip,
);
criterion_main!(benches);
