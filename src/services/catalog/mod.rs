//! Question Catalogs
//!
//! Built-in bilingual question banks and the guardrails that keep choice
//! questions renderable. `load_catalog` is the single entry point: pick a
//! language and a mode, get an immutable catalog.

pub mod fused;
pub mod validation;
pub mod wizard;

use tracing::debug;

use crate::models::{Catalog, CatalogMode, Language};

pub use validation::{choice_options_valid, effective_answer_type, label_is_forbidden};

/// Load the built-in catalog for a language and mode.
pub fn load_catalog(language: Language, mode: CatalogMode) -> Catalog {
    debug!(?language, ?mode, "loading built-in catalog");
    match mode {
        CatalogMode::Fused => fused::build(language),
        CatalogMode::Wizard => wizard::build(language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_catalog_dispatches_on_mode() {
        assert_eq!(
            load_catalog(Language::En, CatalogMode::Fused).mode,
            CatalogMode::Fused
        );
        assert_eq!(
            load_catalog(Language::Es, CatalogMode::Wizard).mode,
            CatalogMode::Wizard
        );
    }

    #[test]
    fn test_built_in_catalogs_pass_choice_validation() {
        for mode in [CatalogMode::Fused, CatalogMode::Wizard] {
            for language in [Language::En, Language::Es] {
                let catalog = load_catalog(language, mode);
                for block in &catalog.blocks {
                    for question in &block.questions {
                        assert!(
                            choice_options_valid(question),
                            "question {} fails validation",
                            question.id
                        );
                    }
                }
            }
        }
    }
}
