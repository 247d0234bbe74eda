//! The text color animation that generated extension methods expose

use super::{
    animation::{Animatable, Animation, Schedule},
    cancellation::CancellationToken,
    color::Color,
    easing::Easing,
};
use crate::error::AnimationError;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::sync::oneshot;

/// Handle name animations started by [`TextColorTo`] run under
pub const OPERATION_NAME: &str = "TextColorTo";

/// An element with a text color
pub trait TextStyle: Send + Sync {
    fn text_color(&self) -> Option<Color>;
    fn set_text_color(&self, color: Option<Color>);
}

/// Timing of a text color animation
#[derive(Debug, Clone, Copy)]
pub struct ColorAnimationOptions {
    pub rate: Duration,
    pub length: Duration,
    /// `None` uses the default easing
    pub easing: Option<Easing>,
}

impl Default for ColorAnimationOptions {
    fn default() -> Self {
        Self::from_millis(16, 250)
    }
}

impl ColorAnimationOptions {
    pub fn from_millis(rate: u32, length: u32) -> Self {
        Self {
            rate: Duration::from_millis(rate.into()),
            length: Duration::from_millis(length.into()),
            easing: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = Some(easing);
        self
    }
}

/// Outcome of a text color animation: `Ok(true)` once it finished,
/// `Ok(false)` when it could not start for lack of an animation context,
/// `Err(Cancelled)` when the caller's token fired first
pub struct ColorAnimation {
    outcome: BoxFuture<'static, Result<bool, AnimationError>>,
}

impl Future for ColorAnimation {
    type Output = Result<bool, AnimationError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.outcome.as_mut().poll(cx)
    }
}

/// Serializes channel writes and shuts them off for good once closed
#[derive(Clone, Default)]
struct WriteGate(Arc<Mutex<bool>>);

impl WriteGate {
    fn write(&self, apply: impl FnOnce()) {
        let closed = self.0.lock();
        if !*closed {
            apply();
        }
    }

    fn close(&self) {
        *self.0.lock() = true;
    }
}

/// Animate the text color of an element that can own animations
pub trait TextColorTo: TextStyle + Animatable + Sized + 'static {
    fn text_color_to(
        self: &Arc<Self>,
        color: Color,
        options: ColorAnimationOptions,
        token: CancellationToken,
    ) -> Result<ColorAnimation, AnimationError> {
        text_color_to(self, color, options, token)
    }
}

impl<T> TextColorTo for T where T: TextStyle + Animatable + 'static {}

fn text_color_to<T>(
    element: &Arc<T>,
    color: Color,
    options: ColorAnimationOptions,
    token: CancellationToken,
) -> Result<ColorAnimation, AnimationError>
where
    T: TextStyle + Animatable + 'static,
{
    if !color.is_finite() {
        return Err(AnimationError::InvalidArgument {
            name: "color",
            reason: format!("every channel must be finite, got {color:?}"),
        });
    }

    // An absent color cannot be interpolated from
    let current = match element.text_color() {
        Some(current) => current,
        None => {
            element.set_text_color(Some(Color::TRANSPARENT));
            Color::TRANSPARENT
        }
    };

    let gate = WriteGate::default();
    let (completed, completion) = oneshot::channel();
    let schedule = Schedule {
        rate: options.rate,
        length: options.length,
        easing: options.easing.unwrap_or_default(),
    };

    let animation = Animation::new()
        .with_channel(
            current.red.into(),
            color.red.into(),
            channel_writer(element, &gate, Color::with_red),
        )
        .with_channel(
            current.green.into(),
            color.green.into(),
            channel_writer(element, &gate, Color::with_green),
        )
        .with_channel(
            current.blue.into(),
            color.blue.into(),
            channel_writer(element, &gate, Color::with_blue),
        )
        .with_channel(
            current.alpha.into(),
            color.alpha.into(),
            channel_writer(element, &gate, Color::with_alpha),
        );

    let committed = animation.commit(element.as_ref(), OPERATION_NAME, schedule, move |_, _| {
        let _ = completed.send(true);
    });

    match committed {
        Ok(()) => {}
        Err(AnimationError::NoAnimationContext) => {
            tracing::warn!(
                "{} on {} could not start: {}",
                OPERATION_NAME,
                std::any::type_name::<T>(),
                AnimationError::NoAnimationContext
            );
            return Ok(ColorAnimation {
                outcome: futures::future::ready(Ok(false)).boxed(),
            });
        }
        Err(e) => return Err(e),
    }

    let outcome = async move {
        tokio::select! {
            biased;
            finished = completion => finished.map_err(|_| AnimationError::Interrupted),
            _ = token.cancelled() => {
                gate.close();
                Err(AnimationError::Cancelled)
            }
        }
    };

    Ok(ColorAnimation {
        outcome: outcome.boxed(),
    })
}

fn channel_writer<T>(
    element: &Arc<T>,
    gate: &WriteGate,
    update: fn(Color, f32) -> Color,
) -> impl FnMut(f64) + Send + 'static
where
    T: TextStyle + 'static,
{
    let element = Arc::clone(element);
    let gate = gate.clone();
    move |value| {
        gate.write(|| {
            let current = element.text_color().unwrap_or(Color::TRANSPARENT);
            element.set_text_color(Some(update(current, value as f32)));
        })
    }
}
