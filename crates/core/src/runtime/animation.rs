use super::{
    clock::AnimationClock,
    context::{AnimationContext, FinishSlot, FinishedCallback},
    easing::Easing,
    join::spawn_joined,
};
use crate::error::AnimationError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Per-frame callback of one channel, called with the interpolated value
pub type ChannelCallback = Box<dyn FnMut(f64) + Send>;

/// Something that may own running animations
pub trait Animatable {
    /// `None` until the owner is attached to something that can drive
    /// animations
    fn animation_context(&self) -> Option<Arc<AnimationContext>>;
}

/// Timing of a committed animation
#[derive(Debug, Clone, Copy)]
pub struct Schedule {
    /// Time between frames
    pub rate: Duration,
    /// Total duration
    pub length: Duration,
    pub easing: Easing,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            rate: Duration::from_millis(16),
            length: Duration::from_millis(250),
            easing: Easing::Linear,
        }
    }
}

struct ChannelRange {
    start: f64,
    end: f64,
    callback: ChannelCallback,
}

/// A set of channel interpolations that run together on one clock
#[derive(Default)]
pub struct Animation {
    channels: Vec<ChannelRange>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel driven from `start` to `end`
    pub fn with_channel<F>(mut self, start: f64, end: f64, callback: F) -> Self
    where
        F: FnMut(f64) + Send + 'static,
    {
        self.channels.push(ChannelRange {
            start,
            end,
            callback: Box::new(callback),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Start every channel on the owner's animation context under `name`.
    ///
    /// `finished` runs once all channels have written their end value, or
    /// when the animation is aborted by a newer one with the same name.
    pub fn commit<O, F>(
        self,
        owner: &O,
        name: &str,
        schedule: Schedule,
        finished: F,
    ) -> Result<(), AnimationError>
    where
        O: Animatable + ?Sized,
        F: FnOnce(f64, bool) + Send + 'static,
    {
        let context = owner
            .animation_context()
            .ok_or(AnimationError::NoAnimationContext)?;
        let handle = context.handle().clone();
        let clock = AnimationClock::start(&handle, schedule.rate, schedule.length)?;

        let finished_callback: FinishedCallback = Box::new(finished);
        let finished = FinishSlot::new(finished_callback);
        let channels = self.channels;
        let driver_context = Arc::clone(&context);
        let driver_name = name.to_string();
        let driver_finished = finished.clone();

        context.register(name, finished, move |id| {
            let joined = spawn_joined(
                &handle,
                channels
                    .into_iter()
                    .map(|channel| run_channel(channel, clock.subscribe(), schedule.easing)),
            );
            let clock_task = clock.abort_handle();
            let driver = handle.spawn(async move {
                if joined.await.is_ok() {
                    driver_context.complete(&driver_name, id);
                    driver_finished.fire(1.0, false);
                }
            });
            vec![clock_task, driver.abort_handle()]
        });

        Ok(())
    }
}

async fn run_channel(mut channel: ChannelRange, mut progress: watch::Receiver<f64>, easing: Easing) {
    loop {
        let linear = *progress.borrow_and_update();
        if linear >= 1.0 {
            (channel.callback)(channel.end);
            return;
        }
        let eased = easing.ease(linear);
        (channel.callback)(channel.start + (channel.end - channel.start) * eased);

        if progress.changed().await.is_err() {
            // Clock aborted before reaching the end
            return;
        }
    }
}
