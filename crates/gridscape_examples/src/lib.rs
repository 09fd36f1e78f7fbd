#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{glyph, init_tracing, render_field};
