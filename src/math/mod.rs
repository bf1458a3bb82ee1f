pub mod color;

pub use color::Rgb;
