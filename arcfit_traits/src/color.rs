/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const DARK_GRAY: Rgb = Rgb(64, 64, 64);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const MAGENTA: Rgb = Rgb(255, 0, 255);
    pub const ORANGE: Rgb = Rgb(255, 200, 0);

    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}
