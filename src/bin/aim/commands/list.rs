//! `aim target <dir> list` command

use std::path::Path;

use anyhow::Result;

use aim::ops::list::{format_table, list};

pub fn execute(build_dir: &Path) -> Result<()> {
    let entries = list(build_dir)?;
    print!("{}", format_table(&entries));
    Ok(())
}
