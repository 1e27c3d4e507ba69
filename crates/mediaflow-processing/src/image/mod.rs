//! Image processing module
//!
//! - Codec capability and its `image`-crate implementation (codec)
//! - Async classification and corruption checks (inspector)
//! - Orientation and resize helpers used by the codec

pub mod codec;
pub mod inspector;
pub mod orientation;
pub mod resize;

pub use codec::{ImageCodec, ImageRsCodec};
pub use inspector::ImageInspector;
pub use orientation::ImageOrientation;
pub use resize::ImageResize;
