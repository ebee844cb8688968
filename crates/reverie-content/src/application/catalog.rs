//! Turns a script into a stage catalog.

use reverie_stage::SceneCatalog;
use tracing::info;

use crate::domain::scenes::instantiate;
use crate::domain::script::{Script, ScriptError};

/// Registers one factory per script scene, in script order.
///
/// # Errors
///
/// Returns a validation error if the script is inconsistent, or
/// `ScriptError::Catalog` if the stage refuses an entry.
pub fn build_catalog(script: &Script) -> Result<SceneCatalog, ScriptError> {
    script.validate()?;
    let first = script.first_scene().cloned().ok_or(ScriptError::Empty)?;

    let mut catalog = SceneCatalog::new();
    for scene in &script.scenes {
        let kind = scene.kind.clone();
        let first = first.clone();
        catalog.register(scene.id.clone(), scene.scored, move || {
            instantiate(&kind, &first)
        })?;
    }
    info!(
        scenes = catalog.len(),
        scored = catalog.scored_count(),
        "catalog built"
    );
    Ok(catalog)
}
