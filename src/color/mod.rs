//! per-cell color sampling, palette quantization, palette
//! mapping and HSL adjustment.

pub mod hsl;
pub mod palette_data;
pub mod sample;

// end of file
