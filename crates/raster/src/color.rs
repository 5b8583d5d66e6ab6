use serde::{Deserialize, Serialize};

/// 8-bit straight-alpha RGBA color, in canvas channel order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::opaque(0x00, 0x00, 0x00);
    pub const WHITE: Rgba8 = Rgba8::opaque(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

/// Foreground, background and guideline colors for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub foreground: Rgba8,
    pub background: Rgba8,
    pub guideline: Rgba8,
}

impl Default for ColorPair {
    fn default() -> Self {
        Self::select(false)
    }
}

impl ColorPair {
    /// Black on white with light rulers, or white on black with dark rulers
    pub const fn select(white_on_black: bool) -> Self {
        if white_on_black {
            Self {
                foreground: Rgba8::WHITE,
                background: Rgba8::BLACK,
                guideline: Rgba8::opaque(0x22, 0x22, 0x22),
            }
        } else {
            Self {
                foreground: Rgba8::BLACK,
                background: Rgba8::WHITE,
                guideline: Rgba8::opaque(0xdd, 0xdd, 0xdd),
            }
        }
    }
}
