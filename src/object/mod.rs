//! Destructible object boundary: colliders, removal events, edit descriptions

pub mod target;
pub mod collider;
pub mod events;
pub mod destruction;

pub use target::PaintTarget;
pub use collider::{BoxCollider, ColliderId, CollisionSurface, SphereCollider};
pub use events::{RemovalEvents, RemovalNotice, RemovalSubscription, SubscriptionId};
pub use destruction::{DestructionData, DestructionShape};
