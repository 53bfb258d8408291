pub mod annotator;
pub mod font;
