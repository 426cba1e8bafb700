//! Environment overrides live in their own test binary: env vars are process
//! wide and would leak into the other config tests running in parallel.

use std::env;
use std::fs;

use tempfile::TempDir;

use colourtree::config::Settings;

#[test]
fn given_env_vars_when_load_then_override_files() {
    let dir = TempDir::new().unwrap();
    let local = dir.path().join("local.toml");
    fs::write(&local, "verify_each = false\n[render]\nshow_ids = false\n").unwrap();

    env::set_var("COLOURTREE_VERIFY_EACH", "true");
    env::set_var("COLOURTREE_RENDER__SHOW_IDS", "true");
    let settings = Settings::load_from(None, Some(&local));
    env::remove_var("COLOURTREE_VERIFY_EACH");
    env::remove_var("COLOURTREE_RENDER__SHOW_IDS");

    let settings = settings.expect("load settings");
    assert!(settings.verify_each);
    assert!(settings.render.show_ids);
    assert!(settings.render.show_propagated);
}
