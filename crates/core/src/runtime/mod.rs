//! Runtime primitives behind the generated `TextColorTo` operation.
//!
//! An [`Animation`] is a set of channel interpolations committed on an
//! owner's [`AnimationContext`]. One [`AnimationClock`] drives every channel
//! and [`join::spawn_joined`] waits for all of them.

pub mod animation;
pub mod cancellation;
pub mod clock;
pub mod color;
pub mod color_to;
pub mod context;
pub mod easing;
pub mod join;

pub use animation::{Animatable, Animation, ChannelCallback, Schedule};
pub use cancellation::CancellationToken;
pub use clock::AnimationClock;
pub use color::Color;
pub use color_to::{ColorAnimation, ColorAnimationOptions, OPERATION_NAME, TextColorTo, TextStyle};
pub use context::{AnimationContext, FinishedCallback};
pub use easing::Easing;
