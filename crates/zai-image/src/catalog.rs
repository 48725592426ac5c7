use zai_core::{ModelCatalog, ModelEntry};

use crate::params::RATIO_SUFFIXES;

const MODEL_FAMILY: &str = "gemini-3-pro-image";
const CREATED: u64 = 1_700_000_000;
const OWNED_BY: &str = "zhipu";
const TIERS: [&str; 2] = ["1k", "2k"];

/// Models advertised by the image module
///
/// One bare name per resolution tier (rendered at the default ratio),
/// then every tier/ratio combination.
pub fn image_catalog() -> ModelCatalog {
    let bare = TIERS.iter().map(|tier| format!("{MODEL_FAMILY}-{tier}"));
    let sized = TIERS.iter().flat_map(|tier| {
        RATIO_SUFFIXES
            .iter()
            .map(move |(suffix, _)| format!("{MODEL_FAMILY}-{tier}{suffix}"))
    });

    ModelCatalog::new(
        bare.chain(sized)
            .map(|id| ModelEntry::new(id, CREATED, OWNED_BY))
            .collect(),
    )
}
