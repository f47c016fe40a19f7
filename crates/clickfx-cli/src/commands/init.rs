//! Config scaffolding command

use crate::session::SAMPLE_SESSION_TOML;
use anyhow::Result;
use clickfx_particles::DEFAULT_CONFIG_TOML;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE: &str = "clickfx.toml";
pub const SESSION_FILE: &str = "session.toml";

pub fn run(dir: &str, force: bool) -> Result<()> {
    let target = Path::new(dir);
    fs::create_dir_all(target)?;

    for (name, contents) in [
        (CONFIG_FILE, DEFAULT_CONFIG_TOML),
        (SESSION_FILE, SAMPLE_SESSION_TOML),
    ] {
        let path = target.join(name);
        if path.exists() && !force {
            anyhow::bail!(
                "'{}' already exists (use --force to overwrite)",
                path.display()
            );
        }
        fs::write(&path, contents)?;
        println!("  Created {}", path.display());
    }

    println!();
    println!("Try:");
    println!(
        "  clickfx simulate {} --config {}",
        target.join(SESSION_FILE).display(),
        target.join(CONFIG_FILE).display()
    );
    println!(
        "  clickfx render {} --frame 90 --config {}",
        target.join(SESSION_FILE).display(),
        target.join(CONFIG_FILE).display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionScript;
    use clickfx_particles::EffectsConfig;

    #[test]
    fn writes_loadable_files_and_refuses_overwrite() {
        let dir = std::env::temp_dir().join(format!("clickfx-init-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let dir_str = dir.to_string_lossy().into_owned();

        run(&dir_str, false).unwrap();
        let config = EffectsConfig::load(dir.join(CONFIG_FILE)).unwrap();
        assert!(config.click.enabled);
        assert!(!config.color_balls.enabled);
        let session = SessionScript::load(dir.join(SESSION_FILE)).unwrap();
        assert!(!session.events.is_empty());

        assert!(run(&dir_str, false).is_err());
        assert!(run(&dir_str, true).is_ok());

        fs::remove_dir_all(&dir).unwrap();
    }
}
