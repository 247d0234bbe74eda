use std::f64::consts::PI;

/// Maps linear animation progress to eased progress
#[derive(Debug, Clone, Copy, Default)]
pub enum Easing {
    #[default]
    Linear,
    SinIn,
    SinOut,
    SinInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    Custom(fn(f64) -> f64),
}

impl Easing {
    /// Eased value for `progress`, which is clamped to `[0, 1]`
    pub fn ease(&self, progress: f64) -> f64 {
        let x = progress.clamp(0.0, 1.0);
        match self {
            Easing::Linear => x,
            Easing::SinIn => 1.0 - (x * PI / 2.0).cos(),
            Easing::SinOut => (x * PI / 2.0).sin(),
            Easing::SinInOut => -(PI * x).cos() / 2.0 + 0.5,
            Easing::CubicIn => x * x * x,
            Easing::CubicOut => (x - 1.0).powi(3) + 1.0,
            Easing::CubicInOut => {
                if x < 0.5 {
                    4.0 * x * x * x
                } else {
                    4.0 * (x - 1.0).powi(3) + 1.0
                }
            }
            Easing::Custom(function) => function(x),
        }
    }
}
