use std::fs;

fn main() -> anyhow::Result<()> {
    // Crate name has a hyphen in Cargo.toml; the library identifier uses '_'.
    let doc = jobboard_gate::docs::build_openapi(jobboard_gate::config::DEFAULT_PORT)?;
    let s = serde_json::to_string_pretty(&doc)?;
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/jobboard-gate-openapi.json".to_string());
    fs::write(&path, s)?;
    println!("wrote {}", path);
    Ok(())
}
