pub mod image;
pub mod request;
pub mod wire;

pub use image::*;
pub use request::*;
pub use wire::*;
