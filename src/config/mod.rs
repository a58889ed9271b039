//! JSON configuration document and its manager.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_DEEPLX_URL, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL,
    DeeplxConfig, OpenAiConfig,
};
