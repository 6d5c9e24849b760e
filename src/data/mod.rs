mod loader;

pub use loader::{LoadError, load_image_base64, load_word_file};
