//! Optional scene configuration from disk.
//!
//! `assets/scene.ron` may override the built-in group list; a missing or
//! unparsable file falls back to the presets with a warning rather than
//! failing the launch. Group validation itself happens in the engine when
//! the groups are built.

use std::path::Path;

use bevy::prelude::*;
use bevy_tree_morph::{GroupConfig, presets};
use serde::{Deserialize, Serialize};

const SCENE_PATH: &str = "assets/scene.ron";

/// On-disk scene description.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SceneConfig {
    pub groups: Vec<GroupConfig>,
}

/// Load the group list, falling back to the built-in presets.
pub fn load_scene_config() -> Vec<GroupConfig> {
    let path = Path::new(SCENE_PATH);
    if !path.is_file() {
        return presets::scene_groups();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Failed to read {SCENE_PATH}: {e}");
            return presets::scene_groups();
        }
    };

    match ron::from_str::<SceneConfig>(&contents) {
        Ok(scene) => {
            info!("Loaded {} groups from {SCENE_PATH}", scene.groups.len());
            scene.groups
        }
        Err(e) => {
            warn!("Failed to parse {SCENE_PATH}: {e}");
            presets::scene_groups()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_config_round_trips_through_ron() {
        let scene = SceneConfig {
            groups: presets::scene_groups(),
        };
        let text = ron::ser::to_string_pretty(&scene, ron::ser::PrettyConfig::default()).unwrap();
        let parsed: SceneConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed.groups.len(), scene.groups.len());
        assert_eq!(parsed.groups[0], scene.groups[0]);
    }
}
