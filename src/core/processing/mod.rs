pub mod colormap;
pub mod font;
pub mod render;
pub mod save;
