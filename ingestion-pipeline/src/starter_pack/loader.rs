use std::{fs, path::Path};

use common::error::AppError;
use serde_json::Value;
use tracing::debug;

use super::{normalize_items, validate_item, StarterPackItem, StarterPackItemInput};

/// Result of loading a starter-pack directory. All-or-nothing: when any
/// file fails validation the item list is empty and every accumulated error
/// is returned, so a broken pack never half-ingests.
#[derive(Debug, Default)]
pub struct LoadedPack {
    pub items: Vec<StarterPackItem>,
    pub errors: Vec<String>,
}

/// Reads every `.json` file in `dir`, sorted lexicographically by file
/// name. The sort order doubles as the slug-collision resolution order.
pub fn load_items(dir: &Path) -> Result<LoadedPack, AppError> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.ends_with(".json"))
        .collect();
    names.sort();

    debug!(dir = %dir.display(), files = names.len(), "loading starter pack");

    let mut raw_items: Vec<StarterPackItemInput> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    for name in &names {
        let path = dir.join(name);
        let raw: Value = match fs::read_to_string(&path)
            .map_err(AppError::from)
            .and_then(|text| serde_json::from_str(&text).map_err(AppError::from))
        {
            Ok(raw) => raw,
            Err(err) => {
                errors.push(format!("{name}: Invalid JSON ({err})"));
                continue;
            }
        };

        let validation = validate_item(&raw, name);
        if !validation.is_empty() {
            errors.extend(validation);
            continue;
        }

        match serde_json::from_value::<StarterPackItemInput>(raw) {
            Ok(item) => raw_items.push(item),
            Err(err) => errors.push(format!("{name}: Invalid item shape ({err})")),
        }
    }

    if !errors.is_empty() {
        return Ok(LoadedPack {
            items: Vec::new(),
            errors,
        });
    }

    Ok(LoadedPack {
        items: normalize_items(raw_items),
        errors: Vec::new(),
    })
}
