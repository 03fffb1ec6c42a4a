//! `aim target <dir> clobber` command

use std::path::Path;

use anyhow::Result;

use aim::ops::clobber::clobber;

pub fn execute(build_dir: &Path) -> Result<()> {
    let removed = clobber(build_dir)?;
    for path in &removed {
        eprintln!("     Removed {}", path.display());
    }
    Ok(())
}
