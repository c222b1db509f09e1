use anyhow::Result;

/// Execute `ofc config-hash`.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
    let loaded = ofc_config::load_layered_yaml(&refs)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}
