// Audio module
// Uses Symphonia for decoding, rubato for resampling and cpal for output

pub mod clip;
pub mod decoder;
#[cfg(feature = "cpal-output")]
pub mod output;
pub mod resampler;

pub use clip::DecodedClip;
#[cfg(feature = "cpal-output")]
pub use output::{CpalBackend, CpalPlayer};
