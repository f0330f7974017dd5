// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! DFS single-side image builder.

use super::{
    sector_offset, validate_directory, validate_name, validate_title, write_catalog_entries,
    write_catalog_meta, CatalogEntry, DiskError, BOOT_OPTION_EXEC, FIRST_DATA_SECTOR,
    MAX_CATALOG_ENTRIES, SECTORS_PER_SIDE, SECTOR_SIZE, SIDE_SIZE,
};

/// Builds one 200 KiB DFS side, allocating file sectors contiguously
/// from sector 2. The catalog is kept current after every change, so
/// the image is valid at any point.
///
/// The interleave parameter is recorded but does not remap physical
/// storage; sectors are linear.
pub struct DfsImageBuilder {
    image: Vec<u8>,
    entries: Vec<CatalogEntry>,
    next_sector: u16,
    interleave: u8,
}

impl DfsImageBuilder {
    /// Allocate a zeroed side with an empty auto-boot catalog
    /// (boot option 3, sector count 800).
    pub fn create_blank(title: &str, interleave: u8) -> Result<Self, DiskError> {
        validate_title(title)?;
        let mut image = vec![0u8; SIDE_SIZE];
        write_catalog_meta(&mut image, title, 0, BOOT_OPTION_EXEC, SECTORS_PER_SIDE as u16);
        Ok(Self {
            image,
            entries: Vec::new(),
            next_sector: FIRST_DATA_SECTOR,
            interleave,
        })
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    pub fn free_sectors(&self) -> usize {
        SECTORS_PER_SIDE - self.next_sector as usize
    }

    pub fn interleave(&self) -> u8 {
        self.interleave
    }

    /// Copy `data` into the next free contiguous sectors and append a
    /// catalog entry for it.
    pub fn add_file(
        &mut self,
        directory: char,
        name: &str,
        data: &[u8],
        load_addr: u32,
        exec_addr: u32,
        locked: bool,
    ) -> Result<(), DiskError> {
        let directory = directory.to_ascii_uppercase();
        validate_directory(directory)?;
        validate_name(name)?;
        if self.entries.len() == MAX_CATALOG_ENTRIES {
            return Err(DiskError::CatalogFull);
        }

        let sectors_needed = data.len().div_ceil(SECTOR_SIZE);
        if sectors_needed > self.free_sectors() {
            return Err(DiskError::DiskFull {
                needed: sectors_needed,
                free: self.free_sectors(),
            });
        }

        let offset = sector_offset(self.next_sector);
        self.image[offset..offset + data.len()].copy_from_slice(data);

        self.entries.push(CatalogEntry {
            directory,
            name: name.to_string(),
            locked,
            load_addr,
            exec_addr,
            length: data.len() as u32,
            start_sector: self.next_sector,
        });
        self.next_sector += sectors_needed as u16;

        write_catalog_entries(&mut self.image, &self.entries)
    }

    /// Finish and hand over the image bytes.
    pub fn into_image(self) -> Vec<u8> {
        self.image
    }
}

/// Contents of the auto-boot file: `*RUN <dir>.<name>` terminated by CR.
pub fn boot_file_content(directory: char, name: &str) -> Vec<u8> {
    format!("*RUN {directory}.{name}\r").into_bytes()
}

/// Build one auto-booting side: a locked `$.!BOOT` running the payload
/// file by its qualified name, then the payload itself.
pub fn build_autoboot_side(
    title: &str,
    directory: char,
    name: &str,
    payload: &[u8],
    load_addr: u32,
    exec_addr: u32,
) -> Result<Vec<u8>, DiskError> {
    let mut builder = DfsImageBuilder::create_blank(title, 0)?;
    let boot = boot_file_content(directory.to_ascii_uppercase(), name);
    builder.add_file('$', "!BOOT", &boot, 0, 0, true)?;
    builder.add_file(directory, name, payload, load_addr, exec_addr, false)?;
    Ok(builder.into_image())
}
