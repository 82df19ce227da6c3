pub mod discover;
pub mod image_io;

pub use discover::{discover_images, is_supported_image};
pub use image_io::{load_image, load_images_lenient, load_images_strict, save_image};
