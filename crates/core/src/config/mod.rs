//! Configuration management for colorto

mod settings;
mod validation;

// Re-export main types
pub use settings::{
    CONFIG_FILE_NAME, Config, DEFAULT_ANIMATABLE_INTERFACE, DEFAULT_CACHE_CAPACITY,
    DEFAULT_LIBRARY_MODULE, DEFAULT_OPERATION_SUFFIX, DEFAULT_PLATFORM_TAG,
    DEFAULT_TEXT_STYLE_INTERFACE,
};
