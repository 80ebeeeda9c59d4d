//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Glob handed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Cookie signing key material; at least 64 bytes.
    pub secret: String,
    /// Compared against the `X-Inertia-Version` request header.
    pub asset_version: String,
    /// Directory holding `assets/` and `images/`.
    pub public_dir: String,
}
