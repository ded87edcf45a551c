pub(crate) mod bitmap;
mod font;
pub(crate) mod text;
