//! RGBA colors

/// Linear RGBA color with components in 0.0-1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Color = Color::rgb8(255, 255, 255);
    pub const RAYWHITE: Color = Color::rgb8(245, 245, 245);
    pub const LIGHTGRAY: Color = Color::rgb8(200, 200, 200);
    pub const GRAY: Color = Color::rgb8(130, 130, 130);
    pub const BLUE: Color = Color::rgb8(0, 121, 241);
    pub const GREEN: Color = Color::rgb8(0, 228, 48);

    pub const fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    pub fn r(&self) -> f32 {
        self.0[0]
    }

    pub fn g(&self) -> f32 {
        self.0[1]
    }

    pub fn b(&self) -> f32 {
        self.0[2]
    }

    pub fn a(&self) -> f32 {
        self.0[3]
    }

    pub fn rgb(&self) -> [f32; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb8() {
        assert_eq!(Color::WHITE.0, [1.0, 1.0, 1.0, 1.0]);
        assert!((Color::RAYWHITE.r() - 245.0 / 255.0).abs() < 1e-6);
        assert_eq!(Color::GREEN.rgb()[0], 0.0);
        assert_eq!(Color::BLUE.a(), 1.0);
    }
}
