// tests/config_default.rs
use remote_facts::config::ENV_CONFIG_PATH;
use remote_facts::{Catalog, FetchConfig};
use std::{env, fs};

#[test]
fn load_from_toml_and_json_paths() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("facts.toml");
    fs::write(
        &p_toml,
        r#"
timeout_ms = 1500

[credentials]
NASA_API_KEY = "ENV"

[endpoints.advice]
url = "http://127.0.0.1:8080/advice"
"#,
    )
    .unwrap();
    let c = FetchConfig::load_from(&p_toml).unwrap();
    assert_eq!(c.timeout_ms, Some(1500));
    assert_eq!(c.credentials["NASA_API_KEY"], "ENV");
    let catalog = Catalog::from_config(&c).unwrap();
    assert_eq!(
        catalog.get("advice").unwrap().url.as_str(),
        "http://127.0.0.1:8080/advice"
    );

    let p_json = dir.path().join("facts.json");
    fs::write(&p_json, r#"{"user_agent": "probe/1"}"#).unwrap();
    let j = FetchConfig::load_from(&p_json).unwrap();
    assert_eq!(j.user_agent, "probe/1");

    let p_bad = dir.path().join("bad.toml");
    fs::write(&p_bad, "timeout_ms = \"soon\"").unwrap();
    assert!(FetchConfig::load_from(&p_bad).is_err());
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    // Isolate CWD so the repo's own config/ is not picked up.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var(ENV_CONFIG_PATH);

    // 1) Nothing on disk -> defaults
    let d = FetchConfig::load_default().unwrap();
    assert!(d.endpoints.is_empty());
    assert_eq!(d.timeout_ms, None);

    // 2) Fallback TOML in ./config/
    let cfg_dir = tmp.path().join("config");
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("facts.toml"), "timeout_ms = 700").unwrap();
    assert_eq!(FetchConfig::load_default().unwrap().timeout_ms, Some(700));

    // 3) Env var wins
    let p_env = tmp.path().join("elsewhere.json");
    fs::write(&p_env, r#"{"timeout_ms": 42}"#).unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(FetchConfig::load_default().unwrap().timeout_ms, Some(42));

    // 4) Env var pointing nowhere is an error, not a silent fallback
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("nope.toml").display().to_string());
    assert!(FetchConfig::load_default().is_err());
    env::remove_var(ENV_CONFIG_PATH);

    env::set_current_dir(&old).unwrap();
}
