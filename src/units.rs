//! Length conversions. Every length in the crate is in PDF points (1/72 inch).

const POINTS_PER_INCH: f32 = 72.0;

pub fn cm(value: f32) -> f32 {
    value * POINTS_PER_INCH / 2.54
}

pub fn mm(value: f32) -> f32 {
    value * POINTS_PER_INCH / 25.4
}

/// Round to 1/10000pt, the precision lengths are written with.
pub(crate) fn round_pt(value: f32) -> f32 {
    (value * 10_000.0).round() / 10_000.0
}
