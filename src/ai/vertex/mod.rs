pub mod client;
pub mod image;

pub use image::VertexImagenClient;
