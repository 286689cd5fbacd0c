//! CatDeck
//!
//! A poker deck generator whose card faces are AI cat portraits, fetched one
//! at a time from an external image-generation API.
//!
//! # Features
//!
//! - **HTTP backend** (default): talks to a predict-style image API over HTTPS
//! - **Swappable collaborator**: the image generator is a trait, so tests and
//!   alternative providers can slot in without touching the orchestration
//! - **Strictly sequential fetching**: one portrait at a time, with observable
//!   per-card progress and abort on the first failure
//!
//! # Example
//!
//! ```no_run
//! use catdeck::{GeneratorConfig, Studio};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GeneratorConfig {
//!     api_key: std::env::var("CATDECK_API_KEY")?,
//!     ..Default::default()
//! };
//!
//! let generator = catdeck::new_generator(config)?;
//! let mut studio = Studio::new(generator);
//! studio.generate_hand()?;
//! for card in studio.cards() {
//!     println!("{}", card.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod cards;
pub mod deck;
pub mod draw;
pub mod studio;

// HTTP backend for the image-generation collaborator
#[cfg(feature = "http")]
pub mod imagen;

// Presentation/export contract: pip layouts, sheet layout, rasterizer
pub mod render;

// Async-friendly session API (worker-backed, one batch at a time)
pub mod session;

pub use cards::{Artwork, Card, CardId, Rank, Suit};
pub use deck::{DeckState, Progress};
pub use session::Session;
pub use studio::{Activity, Batch, Studio};

/// Configuration for the image-generation collaborator
///
/// The defaults are conservative: a public predict-style endpoint, a modest
/// request timeout, and no API key (callers must supply one before the HTTP
/// backend will construct).
///
/// # Examples
///
/// ```
/// let cfg = catdeck::GeneratorConfig::default();
/// assert!(cfg.api_key.is_empty());
/// assert!(cfg.endpoint.starts_with("https://"));
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// API key sent with every generation request
    pub api_key: String,
    /// Base endpoint of the image-generation service
    pub endpoint: String,
    /// Model identifier appended to the predict path
    pub model: String,
    /// Timeout for a single generation request in milliseconds
    pub timeout_ms: u64,
    /// User agent string to send with requests
    pub user_agent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "imagen-3.0-generate-002".to_string(),
            timeout_ms: 60000,
            user_agent: "catdeck/0.1".to_string(),
        }
    }
}

/// Seam to the external image-generation service.
///
/// One prompt in, one image reference out. The call is opaque and single-shot:
/// any provider-side failure (invalid key, quota, network) surfaces as
/// `Error::GenerationError` and no retry is attempted by the caller.
pub trait ImageGenerator {
    /// Generate one image for `prompt`, returning a `data:image/png;base64,..`
    /// URL suitable for direct display.
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Create a generator backed by the default HTTP backend
#[cfg(feature = "http")]
pub fn new_generator(config: GeneratorConfig) -> Result<impl ImageGenerator> {
    imagen::ImagenClient::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.api_key.is_empty());
        assert_eq!(config.timeout_ms, 60000);
        assert!(config.endpoint.starts_with("https://"));
        assert!(!config.model.is_empty());
    }
}
