use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use sneak_core::Tuning;

const SUPPORTED_CONFIG_VERSION: u32 = 1;

#[derive(Debug, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    version: u32,
    #[serde(default)]
    game: Tuning,
}

/// Loads the tuning from `path`, or the defaults when no file was given.
pub(crate) fn load(path: Option<&Path>) -> Result<Tuning> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config at {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

fn parse(contents: &str) -> Result<Tuning> {
    let file: ConfigFile = toml::from_str(contents).context("failed to parse config toml")?;
    if file.version != SUPPORTED_CONFIG_VERSION {
        bail!(
            "unsupported config version {}; expected {}",
            file.version,
            SUPPORTED_CONFIG_VERSION
        );
    }
    file.game.validate().context("config describes an unusable map")?;
    Ok(file.game)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sneak_core::TilePosition;

    #[test]
    fn missing_path_yields_defaults() {
        assert_eq!(load(None).expect("defaults"), Tuning::default());
    }

    #[test]
    fn parses_partial_game_table() {
        let tuning = parse(
            r#"
            version = 1

            [game]
            map_width = 12
            map_height = 8
            debug = true
            screen_width = 96
            spawn = { column = 3, row = 4 }
            "#,
        )
        .expect("valid config");

        assert_eq!(tuning.map_width, 12);
        assert_eq!(tuning.map_height, 8);
        assert!(tuning.debug);
        assert_eq!(tuning.spawn, Some(TilePosition::new(3, 4)));
        assert_eq!(tuning.tile_size, Tuning::DEFAULT_TILE_SIZE);
        assert_eq!(tuning.seed, Tuning::DEFAULT_SEED);
        assert_eq!(tuning.screen_size(), (96, 8 * Tuning::DEFAULT_TILE_SIZE));
    }

    #[test]
    fn version_only_file_uses_default_game() {
        assert_eq!(parse("version = 1").expect("valid"), Tuning::default());
    }

    #[test]
    fn rejects_unknown_version() {
        let error = parse("version = 2").expect_err("version 2 is unsupported");
        assert!(error.to_string().contains("unsupported config version 2"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(parse("version = 1\n[game]\nspeed = 3\n").is_err());
    }

    #[test]
    fn rejects_spawn_outside_map() {
        let error = parse(
            "version = 1\n[game]\nmap_width = 4\nmap_height = 4\nspawn = { column = 9, row = 0 }\n",
        )
        .expect_err("spawn lies outside the map");
        assert!(error.to_string().contains("unusable map"));
    }
}
