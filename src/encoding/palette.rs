//! Categorical palettes and continuous color interpolators.
//!
//! Colors are rendered as CSS strings: categorical entries as `#rrggbb`,
//! interpolated samples as `rgb(r, g, b)`.

use std::fmt;

/// Accent (ColorBrewer, 8 colors)
pub const ACCENT: [&str; 8] = [
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];

/// Tableau 10
pub const TABLEAU10: [&str; 10] = [
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

/// Category 10 (the classic categorical palette)
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Purples (ColorBrewer, 9 classes)
pub const PURPLES: [u32; 9] = [
    0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f, 0x3f007d,
];

/// Greens (ColorBrewer, 9 classes)
pub const GREENS: [u32; 9] = [
    0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c, 0x00441b,
];

/// Oranges (ColorBrewer, 9 classes)
pub const ORANGES: [u32; 9] = [
    0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603, 0x7f2704,
];

/// RGB triple with unclamped floating-point channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    /// Red, nominally 0-255
    pub r: f64,
    /// Green, nominally 0-255
    pub g: f64,
    /// Blue, nominally 0-255
    pub b: f64,
}

impl Rgb {
    /// Split a `0xrrggbb` literal into channels
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f64,
            g: ((hex >> 8) & 0xff) as f64,
            b: (hex & 0xff) as f64,
        }
    }
}

/// Channels are rounded half-up and clamped to 0-255.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgb({}, {}, {})",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

fn channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    (value + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Uniform cubic B-spline through evenly spaced control values
fn basis(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (t, i) = if t <= 0.0 {
        (0.0, 0)
    } else if t >= 1.0 {
        (1.0, n - 1)
    } else {
        (t, (t * n as f64).floor() as usize)
    };

    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

/// Sample a sequential ramp at `t` in `[0, 1]` with B-spline smoothing
pub fn interpolate_ramp(ramp: &[u32], t: f64) -> Rgb {
    let colors: Vec<Rgb> = ramp.iter().map(|&c| Rgb::from_hex(c)).collect();
    let r: Vec<f64> = colors.iter().map(|c| c.r).collect();
    let g: Vec<f64> = colors.iter().map(|c| c.g).collect();
    let b: Vec<f64> = colors.iter().map(|c| c.b).collect();
    Rgb {
        r: basis(&r, t),
        g: basis(&g, t),
        b: basis(&b, t),
    }
}

/// Cyclical rainbow built on the cubehelix color space
pub fn interpolate_rainbow(t: f64) -> Rgb {
    let t = if !(0.0..=1.0).contains(&t) {
        t - t.floor()
    } else {
        t
    };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

fn cubehelix(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (hue + 120.0).to_radians();
    let l = lightness;
    let a = saturation * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();

    Rgb {
        r: 255.0 * (l + a * (A * cos_h + B * sin_h)),
        g: 255.0 * (l + a * (C * cos_h + D * sin_h)),
        b: 255.0 * (l + a * (E * cos_h)),
    }
}
