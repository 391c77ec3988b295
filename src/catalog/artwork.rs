//! Show artwork resolution
//!
//! TVMaze delivers artwork as an optional object holding two optional sizes.
//! Every show record still needs exactly one image URL, so the nested
//! structure is collapsed here.

use super::tvmaze_types::TvMazeImage;

/// Image used when a show has no usable artwork
pub const PLACEHOLDER_IMAGE: &str = "https://tinyurl.com/tv-missing";

/// Resolves the image URL for a show
///
/// Preference order is the medium size, then the original size, then
/// [`PLACEHOLDER_IMAGE`]. Empty strings count as missing.
pub(crate) fn resolve_image(image: Option<&TvMazeImage>) -> String {
    let sizes = image.map(|image| (usable(&image.medium), usable(&image.original)));

    match sizes {
        // No image object at all
        None => PLACEHOLDER_IMAGE.to_string(),
        Some((Some(medium), _)) => medium.to_string(),
        Some((None, Some(original))) => original.to_string(),
        // Image object without any size
        Some((None, None)) => PLACEHOLDER_IMAGE.to_string(),
    }
}

fn usable(url: &Option<String>) -> Option<&str> {
    url.as_deref().filter(|url| !url.trim().is_empty())
}
