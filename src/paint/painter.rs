//! Deferred impact color painting
//!
//! Destruction engines apply voxel removal asynchronously, so the paint
//! request for an impact usually arrives before the crater it should color
//! exists. [`ImpactPainter`] resolves that race with a handshake instead of
//! locks: a request that cannot be applied yet is held pending, and every
//! removal notification from the destructible object triggers one retry.
//! Requests that wait longer than [`MAX_IMPACT_WAIT_FRAMES`] are dropped so a
//! stale request can never paint an unrelated later edit.
//!
//! The paint pass itself edits a spherical neighborhood around the impact:
//! distance-based falloff blends the profile color back toward the original,
//! hash-driven noise thins the rim, and resulting colors are resolved to
//! palette indices through a [`PaletteBuilder`].

use crate::core::types::{IVec3, Vec3};
use crate::object::collider::ColliderId;
use crate::object::events::{RemovalEvents, RemovalNotice, RemovalSubscription};
use crate::object::target::PaintTarget;
use crate::paint::palette::PaletteBuilder;
use crate::paint::profile::{BlendMode, ColorProfile, DEFAULT_SURFACE_TAG, ImpactType};

/// Frames a pending request stays eligible for a retry
pub const MAX_IMPACT_WAIT_FRAMES: u64 = 10;

/// Floor on the surface acceptance distance, for degenerate voxel sizes
const MIN_SURFACE_DISTANCE: f32 = 1e-4;

/// Floor on the falloff exponent
const MIN_FALLOFF: f32 = 0.01;

/// Where an impact request is anchored
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImpactAnchor {
    /// Free point, projected onto the collision surface when applied
    Point(Vec3),
    /// Point reported against a specific collider, used without projection
    Collider { id: ColliderId, point: Vec3 },
}

/// One impact paint request
///
/// `radius` is in voxel units. `noise` and `intensity` are clamped into
/// [0, 1] when applied; `falloff` shapes the blend curve, larger values
/// sharpening the transition near the rim.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpactRequest {
    pub anchor: ImpactAnchor,
    pub impact: ImpactType,
    pub radius: f32,
    pub noise: f32,
    pub falloff: f32,
    pub intensity: f32,
}

impl ImpactRequest {
    /// Request anchored at a free world-space point
    pub fn at_point(point: Vec3, impact: ImpactType, radius: f32) -> Self {
        Self {
            anchor: ImpactAnchor::Point(point),
            impact,
            radius,
            noise: 0.0,
            falloff: 1.0,
            intensity: 1.0,
        }
    }

    /// Request anchored to a collider hit
    pub fn on_collider(id: ColliderId, point: Vec3, impact: ImpactType, radius: f32) -> Self {
        Self {
            anchor: ImpactAnchor::Collider { id, point },
            impact,
            radius,
            noise: 0.0,
            falloff: 1.0,
            intensity: 1.0,
        }
    }

    /// Set rim noise (builder pattern)
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise;
        self
    }

    /// Set falloff exponent (builder pattern)
    pub fn with_falloff(mut self, falloff: f32) -> Self {
        self.falloff = falloff;
        self
    }

    /// Set paint intensity (builder pattern)
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }
}

/// A request held for the removal handshake, stamped with its enqueue frame
#[derive(Clone, Copy, Debug)]
struct PendingImpact {
    request: ImpactRequest,
    frame: u64,
}

/// Outcome of one application attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Attempt {
    /// Painted, or a no-op that no retry could change; the request is done
    Resolved,
    /// The surface is not there yet; hold the request for a retry
    NotExposed,
}

/// Paints impact colors onto a destructible object's voxels
///
/// Drive it with [`queue_impact`](Self::queue_impact) when impacts land and
/// [`update`](Self::update) once per frame after destructive edits have been
/// applied. Painting is best-effort cosmetic feedback, so neither call
/// reports success.
pub struct ImpactPainter {
    profile: ColorProfile,
    pending: Option<PendingImpact>,
    subscription: Option<RemovalSubscription>,
    last_notice: Option<RemovalNotice>,
}

impl ImpactPainter {
    /// Create a painter using the given color profile
    pub fn new(profile: ColorProfile) -> Self {
        Self {
            profile,
            pending: None,
            subscription: None,
            last_notice: None,
        }
    }

    /// The color profile consulted for each impact
    pub fn profile(&self) -> &ColorProfile {
        &self.profile
    }

    /// Mutable access to the color profile
    pub fn profile_mut(&mut self) -> &mut ColorProfile {
        &mut self.profile
    }

    /// True while a request is held for the removal handshake
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Start listening for removal notifications
    ///
    /// Replaces any previous subscription. Retries only happen for
    /// notifications received while enabled.
    pub fn enable(&mut self, events: &mut RemovalEvents) {
        if let Some(old) = self.subscription.take() {
            events.unsubscribe(old.id());
        }
        self.subscription = Some(events.subscribe());
    }

    /// Stop listening for removal notifications
    ///
    /// A pending request is kept; without notifications it can only expire.
    pub fn disable(&mut self, events: &mut RemovalEvents) {
        if let Some(subscription) = self.subscription.take() {
            events.unsubscribe(subscription.id());
        }
    }

    /// True while subscribed to removal notifications
    pub fn is_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Queue an impact and attempt to apply it immediately
    ///
    /// `frame` stamps the request; it doubles as the noise seed so a deferred
    /// retry reproduces the same ragged edge the immediate attempt would
    /// have painted. An unresolved older request is given one final attempt
    /// before the new one replaces it.
    pub fn queue_impact(&mut self, target: &mut dyn PaintTarget, request: ImpactRequest, frame: u64) {
        if let Some(old) = self.pending.take() {
            if frame.saturating_sub(old.frame) <= MAX_IMPACT_WAIT_FRAMES {
                log::debug!("impact from frame {} superseded, final attempt", old.frame);
                let _ = self.try_apply(target, &old.request, old.frame);
            }
        }

        if self.try_apply(target, &request, frame) == Attempt::Resolved {
            return;
        }

        // A removal that already landed this frame stands in for the
        // notification the request would otherwise wait on.
        self.drain_notices();
        if let Some(notice) = self.last_notice {
            if notice.removed > 0 && notice.frame == frame {
                log::debug!("impact at frame {} retried against a same-frame removal", frame);
                let _ = self.try_apply(target, &request, frame);
                return;
            }
        }

        log::debug!("impact at frame {} held pending a removal notification", frame);
        self.pending = Some(PendingImpact { request, frame });
    }

    /// Per-frame drive, called after destructive edits have been applied
    ///
    /// Drains removal notifications in arrival order. The first notification
    /// reporting removed voxels consumes the pending request with one retry;
    /// a request older than [`MAX_IMPACT_WAIT_FRAMES`] is dropped unretried,
    /// notification or not.
    pub fn update(&mut self, target: &mut dyn PaintTarget, frame: u64) {
        while let Some(notice) = self.poll_notice() {
            self.last_notice = Some(notice);
            if notice.removed == 0 {
                continue;
            }
            let Some(pending) = self.pending.take() else {
                continue;
            };
            if frame.saturating_sub(pending.frame) > MAX_IMPACT_WAIT_FRAMES {
                log::debug!("impact from frame {} missed its window, dropped", pending.frame);
                continue;
            }
            log::debug!(
                "retrying impact from frame {} after {} removed voxels",
                pending.frame,
                notice.removed
            );
            let _ = self.try_apply(target, &pending.request, pending.frame);
        }

        if let Some(pending) = self.pending {
            if frame.saturating_sub(pending.frame) > MAX_IMPACT_WAIT_FRAMES {
                self.pending = None;
                log::debug!("impact from frame {} expired unpainted", pending.frame);
            }
        }
    }

    fn poll_notice(&self) -> Option<RemovalNotice> {
        self.subscription.as_ref().and_then(RemovalSubscription::poll)
    }

    fn drain_notices(&mut self) {
        while let Some(notice) = self.poll_notice() {
            self.last_notice = Some(notice);
        }
    }

    /// One application attempt against the target's current state
    fn try_apply(
        &self,
        target: &mut dyn PaintTarget,
        request: &ImpactRequest,
        seed_frame: u64,
    ) -> Attempt {
        if request.radius <= 0.0 {
            log::debug!("impact radius {} paints nothing, request dropped", request.radius);
            return Attempt::Resolved;
        }

        let Some(collision) = target.collision() else {
            return Attempt::NotExposed;
        };

        let point = match request.anchor {
            ImpactAnchor::Point(point) => {
                // Accept only points touching the current surface; during the
                // race with a destructive edit the crater is not exposed yet
                // and the projection lands too far away.
                let closest = collision.closest_point(point);
                let accept = (target.voxel_size() * 0.5).max(MIN_SURFACE_DISTANCE);
                if closest.distance_squared(point) > accept * accept {
                    return Attempt::NotExposed;
                }
                closest
            }
            ImpactAnchor::Collider { id, point } => {
                // A hit reported against a different physical part must not
                // paint this object.
                if id != collision.id() {
                    return Attempt::NotExposed;
                }
                point
            }
        };

        let tag = collision
            .tag()
            .or_else(|| target.mesh_tag())
            .unwrap_or(DEFAULT_SURFACE_TAG);
        let Some(entry) = self.profile.resolve(request.impact, tag) else {
            log::debug!(
                "no profile entry for {:?} on '{}', request dropped",
                request.impact,
                tag
            );
            return Attempt::Resolved;
        };
        let impact_color = entry.color;
        let blend = entry.blend;

        let world_to_local = target.world_to_local();
        let voxel_size = target.voxel_size();
        let Some(handle) = target.voxels_mut() else {
            return Attempt::NotExposed;
        };
        if handle.cell_count() == 0 {
            return Attempt::NotExposed;
        }

        // Other objects may still run on this buffer after a duplication;
        // writes must land on a private copy.
        let buffer = handle.make_unique();
        let dims = buffer.dims();
        let bound = IVec3::new(dims.x as i32 - 1, dims.y as i32 - 1, dims.z as i32 - 1);

        let local = world_to_local.transform_point3(point) / voxel_size;
        let center = IVec3::new(
            (local.x.round() as i32).clamp(0, bound.x),
            (local.y.round() as i32).clamp(0, bound.y),
            (local.z.round() as i32).clamp(0, bound.z),
        );

        let radius = request.radius;
        let radius_sq = radius * radius;
        // A radius past i32 range saturates and clips to the grid like any
        // other reach beyond the bounds
        let reach = IVec3::splat(radius.ceil() as i32);
        let scan_min = center.saturating_sub(reach).max(IVec3::ZERO);
        let scan_max = center.saturating_add(reach).min(bound);

        let noise = request.noise.clamp(0.0, 1.0);
        let intensity = request.intensity.clamp(0.0, 1.0);
        let falloff = request.falloff.max(MIN_FALLOFF);
        let seed = seed_frame as u32;

        let mut palette = PaletteBuilder::from_palette(buffer.palette());
        for z in scan_min.z..=scan_max.z {
            for y in scan_min.y..=scan_max.y {
                for x in scan_min.x..=scan_max.x {
                    let delta = IVec3::new(x, y, z) - center;
                    let dist_sq = delta.length_squared() as f32;
                    if dist_sq > radius_sq {
                        continue;
                    }

                    let index = buffer.linear_index(x as u32, y as u32, z as u32);
                    let voxel = buffer.cells()[index];
                    if !voxel.is_active() {
                        continue;
                    }

                    let rim = (dist_sq.sqrt() / radius).clamp(0.0, 1.0);

                    // Noise thins the paint toward the rim for a ragged edge
                    if noise > 0.0 && hash01(index as u32, seed) < noise * rim {
                        continue;
                    }

                    let original = buffer.palette()[voxel.palette_index as usize];
                    let mut color = impact_color;
                    if blend == BlendMode::BlendToOriginal {
                        color = impact_color.lerp(original, rim.powf(falloff));
                    }
                    if intensity < 1.0 {
                        color = original.lerp(color, intensity);
                    }

                    buffer.cells_mut()[index].palette_index = palette.get_or_add(color);
                }
            }
        }

        if palette.changed() {
            buffer.replace_palette(palette.into_colors());
        }

        target.request_remesh();
        Attempt::Resolved
    }
}

/// Deterministic per-cell noise in [0, 1)
///
/// Mixes the cell's linear index with the request's enqueue frame, so a
/// deferred retry reproduces the exact edge the immediate attempt would
/// have produced.
fn hash01(value: u32, seed: u32) -> f32 {
    let mut h = value;
    h ^= seed
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(h << 6)
        .wrapping_add(h >> 2);
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    (h & 0x00ff_ffff) as f32 / 16_777_216.0
}
