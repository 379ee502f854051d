use std::path::Path;

use smokefree_core::storage::parse_legacy;
use smokefree_core::Database;

pub fn run(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("cannot read {}: {e}", file.display()))?;
    let data = parse_legacy(&content);

    let db = Database::open()?;
    let summary = db.import_legacy(&data)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
