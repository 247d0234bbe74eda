use crate::error::AnimationError;
use std::time::Duration;
use tokio::{
    runtime::Handle,
    sync::watch,
    task::{AbortHandle, JoinHandle},
    time::{Instant, MissedTickBehavior},
};

/// Shared frame clock of one committed animation.
///
/// Publishes linear progress in `[0, 1]` once per frame interval until the
/// duration has elapsed. The last published value is always exactly `1.0`;
/// the channel closes right after it.
#[derive(Debug)]
pub struct AnimationClock {
    progress: watch::Receiver<f64>,
    task: JoinHandle<()>,
}

impl AnimationClock {
    pub fn start(handle: &Handle, rate: Duration, length: Duration) -> Result<Self, AnimationError> {
        if rate.is_zero() {
            return Err(AnimationError::InvalidSchedule(
                "frame interval must be greater than zero".to_string(),
            ));
        }

        let (sender, progress) = watch::channel(0.0);
        let task = handle.spawn(async move {
            let started = Instant::now();
            let mut frames = tokio::time::interval(rate);
            frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                frames.tick().await;
                let value = if length.is_zero() {
                    1.0
                } else {
                    (started.elapsed().as_secs_f64() / length.as_secs_f64()).min(1.0)
                };
                sender.send_replace(value);
                if value >= 1.0 {
                    break;
                }
            }
        });

        Ok(Self { progress, task })
    }

    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.progress.clone()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.task.abort_handle()
    }
}
