//! Example data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_OWNER_ID: &str = "example-owner";
const DEFAULT_COUNT: usize = 3;

/// Settings controlling sample-note seeding at startup.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed sample notes on startup.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Anonymous identity that will own the sample notes.
    pub owner_id: Option<String>,
    /// Number of sample notes to create.
    pub count: Option<usize>,
}

impl ExampleDataSettings {
    /// Owner for the sample notes, falling back to a fixed identity.
    pub fn owner_id(&self) -> &str {
        self.owner_id.as_deref().unwrap_or(DEFAULT_OWNER_ID)
    }

    /// Number of notes to seed, falling back to three.
    pub fn count(&self) -> usize {
        self.count.unwrap_or(DEFAULT_COUNT)
    }
}
