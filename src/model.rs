// Values collected from the user before any network call is made.

use std::fmt;

/// Resolution variants the photo API serves for every result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageSize {
    Raw,
    Full,
    #[default]
    Regular,
    Small,
    Thumb,
}

impl ImageSize {
    /// All sizes, in the order they are offered to the user.
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Raw,
        ImageSize::Full,
        ImageSize::Regular,
        ImageSize::Small,
        ImageSize::Thumb,
    ];

    /// Key used by the API in a result's `urls` object.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSize::Raw => "raw",
            ImageSize::Full => "full",
            ImageSize::Regular => "regular",
            ImageSize::Small => "small",
            ImageSize::Thumb => "thumb",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated answers to the three prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSelection {
    pub term: String,
    pub count: u32,
    pub size: ImageSize,
}
