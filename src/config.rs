/// What to do with a row or keep-together group that no page can hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Place it overflowing the page and report a warning.
    #[default]
    Accept,
    /// Fail the layout with `LayoutError::OversizedRow`.
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub overflow: OverflowPolicy,
    /// Tolerance in points for "fits on the page" checks.
    pub epsilon: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::Accept,
            epsilon: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
    /// FlateDecode page content streams. Turn off to get readable streams.
    pub compress_content_streams: bool,
    pub layout: LayoutOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            compress_content_streams: true,
            layout: LayoutOptions::default(),
        }
    }
}
