use std::fmt;

/// Video codecs the recorder can encode with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Codec {
    /// H.265 / HEVC in an MP4 container.
    Hevc,
    /// H.264 in an MP4 container.
    #[default]
    H264,
    /// Apple ProRes 422 in a QuickTime container.
    ProRes422,
    /// Apple ProRes 4444 in a QuickTime container.
    ProRes4444,
}

impl Codec {
    /// Every supported codec, in menu order.
    pub const ALL: [Codec; 4] = [Self::Hevc, Self::H264, Self::ProRes422, Self::ProRes4444];

    /// Stable identifier used in menu ids and log fields.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hevc => "hevc",
            Self::H264 => "h264",
            Self::ProRes422 => "proRes422",
            Self::ProRes4444 => "proRes4444",
        }
    }

    /// Container file extension for recordings in this codec.
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Hevc | Self::H264 => "mp4",
            Self::ProRes422 | Self::ProRes4444 => "mov",
        }
    }

    /// Parse the identifier produced by [`Codec::as_str`].
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|codec| codec.as_str() == id)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
