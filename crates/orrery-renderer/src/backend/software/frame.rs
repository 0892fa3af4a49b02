use orrery_common::types::linear_to_srgb;

/// A linear-light RGBA image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
}

impl Frame {
    /// A black, opaque frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0, 0.0, 0.0, 1.0]; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[f32; 4]] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> [f32; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, color: [f32; 4]) {
        let index = (y * self.width + x) as usize;
        self.pixels[index] = color;
    }

    pub fn fill(&mut self, color: [f32; 4]) {
        self.pixels.fill(color);
    }

    /// Whether the RGB channels of `(x, y)` are all zero.
    pub fn is_black(&self, x: u32, y: u32) -> bool {
        let p = self.get(x, y);
        p[0] == 0.0 && p[1] == 0.0 && p[2] == 0.0
    }

    /// Iterate `(x, y, rgba)` over every pixel.
    pub fn enumerate(&self) -> impl Iterator<Item = (u32, u32, [f32; 4])> + '_ {
        let width = self.width.max(1);
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, p)| (i as u32 % width, i as u32 / width, *p))
    }

    /// 8-bit sRGB bytes, row-major RGBA. Values above 1.0 are clipped.
    pub fn to_srgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for p in &self.pixels {
            for c in &p[..3] {
                out.push((linear_to_srgb(*c) * 255.0).round() as u8);
            }
            out.push((p[3].clamp(0.0, 1.0) * 255.0).round() as u8);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_black_and_opaque() {
        let f = Frame::new(3, 2);
        assert_eq!(f.pixels().len(), 6);
        assert!(f.is_black(2, 1));
        assert_eq!(f.get(0, 0)[3], 1.0);
    }

    #[test]
    fn set_and_get_are_row_major() {
        let mut f = Frame::new(4, 3);
        f.set(3, 1, [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(f.pixels()[7], [1.0, 0.5, 0.25, 1.0]);
        assert!(!f.is_black(3, 1));
    }

    #[test]
    fn enumerate_yields_coordinates() {
        let mut f = Frame::new(2, 2);
        f.set(1, 1, [1.0, 1.0, 1.0, 1.0]);
        let lit: Vec<(u32, u32)> = f
            .enumerate()
            .filter(|(_, _, p)| p[0] > 0.0)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert_eq!(lit, vec![(1, 1)]);
    }

    #[test]
    fn srgb_bytes_clip_overbright() {
        let mut f = Frame::new(1, 1);
        f.set(0, 0, [4.0, 0.0, 1.0, 1.0]);
        assert_eq!(f.to_srgb8(), vec![255, 0, 255, 255]);
    }
}
