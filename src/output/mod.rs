//! Output encoders for rendered frames.

mod png_encoder;

pub use png_encoder::PngEncoder;
