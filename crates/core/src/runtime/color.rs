use serde::{Deserialize, Serialize};

/// RGBA color with floating point channels in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn with_red(self, red: f32) -> Self {
        Self { red, ..self }
    }

    pub fn with_green(self, green: f32) -> Self {
        Self { green, ..self }
    }

    pub fn with_blue(self, blue: f32) -> Self {
        Self { blue, ..self }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    pub fn channels(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    pub fn is_finite(&self) -> bool {
        self.channels().iter().all(|channel| channel.is_finite())
    }
}
