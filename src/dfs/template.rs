// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! DFS template patcher.
//!
//! A template is an externally authored 200 KiB DFS image whose catalog
//! is taken as-is. Patching substitutes the payload and its load/exec
//! metadata into the slot of the well-known `HELLO` entry and touches
//! nothing else, so hand-tuned catalogs survive a rebuild byte-for-byte.

use super::{read_catalog, sector_offset, DiskError, SECTORS_PER_SIDE, SECTOR_SIZE, SIDE_SIZE};

/// Catalog entry the template must contain.
pub const TEMPLATE_ENTRY_NAME: &str = "HELLO";

/// Substitute `payload` (with its load and exec addresses) into the
/// template's `HELLO` slot. Returns the patched image; the input is not
/// modified.
pub fn patch_template(
    template: &[u8],
    payload: &[u8],
    load_addr: u32,
    exec_addr: u32,
) -> Result<Vec<u8>, DiskError> {
    if template.len() != SIDE_SIZE {
        return Err(DiskError::TemplateSizeMismatch {
            len: template.len(),
        });
    }

    let catalog = read_catalog(template)?;
    let (index, entry) = catalog
        .entries
        .iter()
        .enumerate()
        .find(|(_, entry)| entry.name.eq_ignore_ascii_case(TEMPLATE_ENTRY_NAME))
        .ok_or_else(|| DiskError::MissingTemplateEntry {
            name: TEMPLATE_ENTRY_NAME.to_string(),
        })?;

    let start_sector = entry.start_sector;
    let sectors_needed = payload.len().div_ceil(SECTOR_SIZE);
    if start_sector as usize + sectors_needed > SECTORS_PER_SIDE {
        return Err(DiskError::PayloadOverrun {
            start_sector,
            sectors_needed,
        });
    }

    let mut image = template.to_vec();

    // Payload sectors, zero-filling the slack of the final sector.
    let data_start = sector_offset(start_sector);
    let data_end = data_start + sectors_needed * SECTOR_SIZE;
    image[data_start..data_start + payload.len()].copy_from_slice(payload);
    image[data_start + payload.len()..data_end].fill(0);

    // Rewrite the info slot's low-16 fields and re-pack the high bits,
    // preserving the original start-sector bits. The name slot and the
    // start-sector byte stay untouched.
    let length = payload.len() as u32;
    let info_off = SECTOR_SIZE + 8 + index * 8;
    image[info_off] = (load_addr & 0xFF) as u8;
    image[info_off + 1] = ((load_addr >> 8) & 0xFF) as u8;
    image[info_off + 2] = (exec_addr & 0xFF) as u8;
    image[info_off + 3] = ((exec_addr >> 8) & 0xFF) as u8;
    image[info_off + 4] = (length & 0xFF) as u8;
    image[info_off + 5] = ((length >> 8) & 0xFF) as u8;
    let start_hi = image[info_off + 6] & 0x03;
    image[info_off + 6] = ((((exec_addr >> 16) & 0x03) as u8) << 6)
        | ((((length >> 16) & 0x03) as u8) << 4)
        | ((((load_addr >> 16) & 0x03) as u8) << 2)
        | start_hi;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::{patch_template, TEMPLATE_ENTRY_NAME};
    use crate::dfs::{
        read_catalog, write_catalog_entries, write_catalog_meta, CatalogEntry, DiskError,
        SECTOR_SIZE, SIDE_SIZE,
    };

    /// An externally authored template: HELLO at sector 4, length 100,
    /// plus a neighbor file and a recognizable background pattern.
    fn template() -> Vec<u8> {
        let mut image: Vec<u8> = (0..SIDE_SIZE).map(|ix| (ix % 251) as u8).collect();
        write_catalog_meta(&mut image, "TEMPLATE", 0x05, 3, 800);
        let entries = vec![
            CatalogEntry {
                directory: '$',
                name: "MENU".to_string(),
                locked: false,
                load_addr: 0x2000,
                exec_addr: 0x2000,
                length: 0x80,
                start_sector: 2,
            },
            CatalogEntry {
                directory: '$',
                name: TEMPLATE_ENTRY_NAME.to_string(),
                locked: false,
                load_addr: 0x1100,
                exec_addr: 0x1100,
                length: 100,
                start_sector: 4,
            },
        ];
        write_catalog_entries(&mut image, &entries).expect("template catalog");
        image
    }

    #[test]
    fn patch_replaces_payload_and_zero_fills_the_slack() {
        let payload: Vec<u8> = (0..150u8).collect();
        let patched =
            patch_template(&template(), &payload, 0x1900, 0x1900).expect("patch should succeed");

        let data = 4 * SECTOR_SIZE;
        assert_eq!(&patched[data..data + 150], &payload[..]);
        assert!(patched[data + 150..data + 256].iter().all(|b| *b == 0));
    }

    #[test]
    fn patch_rewrites_only_the_hello_info_entry() {
        let template = template();
        let payload: Vec<u8> = (0..150u8).collect();
        let patched =
            patch_template(&template, &payload, 0x1900, 0x3_1900).expect("patch should succeed");

        let catalog = read_catalog(&patched).expect("parse");
        let hello = &catalog.entries[1];
        assert_eq!(hello.length, 150);
        assert_eq!(hello.load_addr, 0x1900);
        assert_eq!(hello.exec_addr, 0x3_1900);
        assert_eq!(hello.start_sector, 4);

        // The neighbor entry and the meta bytes are untouched.
        assert_eq!(catalog.entries[0], read_catalog(&template).expect("parse").entries[0]);
        assert_eq!(catalog.title, "TEMPLATE");
        assert_eq!(catalog.cycle, 0x05);
    }

    #[test]
    fn every_byte_outside_payload_and_info_slot_is_preserved() {
        let template = template();
        let payload = vec![0xEE; 150];
        let patched =
            patch_template(&template, &payload, 0x1900, 0x1900).expect("patch should succeed");

        let data_start = 4 * SECTOR_SIZE;
        let data_end = data_start + SECTOR_SIZE; // 150 bytes round up to one sector
        let info_start = SECTOR_SIZE + 8 + 8;
        let info_end = info_start + 8;

        for (ix, (before, after)) in template.iter().zip(patched.iter()).enumerate() {
            let in_payload = ix >= data_start && ix < data_end;
            let in_info = ix >= info_start && ix < info_end;
            if !in_payload && !in_info {
                assert_eq!(before, after, "byte {ix} changed");
            }
        }
    }

    #[test]
    fn two_sector_payloads_split_across_sector_boundaries() {
        let payload: Vec<u8> = (0..406u16).map(|v| (v % 256) as u8).collect();
        let patched =
            patch_template(&template(), &payload, 0x1900, 0x1900).expect("patch should succeed");

        let first = 4 * SECTOR_SIZE;
        let second = 5 * SECTOR_SIZE;
        assert_eq!(&patched[first..first + 256], &payload[..256]);
        assert_eq!(&patched[second..second + 150], &payload[256..]);
        assert!(patched[second + 150..second + 256].iter().all(|b| *b == 0));
        // The sector after the payload keeps the template pattern.
        assert_eq!(patched[6 * SECTOR_SIZE], template()[6 * SECTOR_SIZE]);
    }

    #[test]
    fn missing_hello_entry_is_fatal() {
        let mut image = vec![0u8; SIDE_SIZE];
        write_catalog_meta(&mut image, "T", 0, 3, 800);
        let err = patch_template(&image, &[1, 2, 3], 0, 0).expect_err("should fail");
        assert_eq!(
            err,
            DiskError::MissingTemplateEntry {
                name: "HELLO".to_string()
            }
        );
    }

    #[test]
    fn wrong_template_size_is_fatal() {
        let err = patch_template(&[0u8; 100], &[1], 0, 0).expect_err("should fail");
        assert_eq!(err, DiskError::TemplateSizeMismatch { len: 100 });
    }

    #[test]
    fn payload_past_the_last_sector_is_fatal() {
        // HELLO starts at sector 4; 797 sectors may follow (4..=799).
        let fits = vec![0u8; 796 * SECTOR_SIZE];
        patch_template(&template(), &fits, 0, 0).expect("in-range payload should fit");

        let overruns = vec![0u8; 797 * SECTOR_SIZE];
        let err = patch_template(&template(), &overruns, 0, 0).expect_err("should fail");
        assert_eq!(
            err,
            DiskError::PayloadOverrun {
                start_sector: 4,
                sectors_needed: 797
            }
        );
    }
}
