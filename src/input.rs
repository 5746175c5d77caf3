use std::{fs::File, ops::Deref, path::Path};

use anyhow::{Context, Result};
use memmap2::Mmap;

/// Read-only view of a measurements file.
pub struct MappedInput {
    // `None` for an empty file, which can't be mapped.
    mmap: Option<Mmap>,
}

impl MappedInput {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("couldn't open file {path:?}"))?;
        let len = file
            .metadata()
            .with_context(|| format!("couldn't stat file {path:?}"))?
            .len();
        if len == 0 {
            return Ok(Self { mmap: None });
        }

        // SAFETY: the input is treated as a static artifact; nothing in this
        // process writes to it while the mapping is alive.
        let mmap =
            unsafe { Mmap::map(&file) }.with_context(|| format!("couldn't map file {path:?}"))?;
        Ok(Self { mmap: Some(mmap) })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }
}

impl Deref for MappedInput {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}
