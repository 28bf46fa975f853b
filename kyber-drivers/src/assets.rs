//! Sound asset image stored in flash
//!
//! # Image Layout
//!
//! ```text
//! "KYBR" | index length (u32 LE) | postcard AssetIndex | clip data
//! ```
//!
//! Entry offsets are relative to the start of the clip data. The image is
//! produced on the host from a directory of WAV files and flashed next to
//! the firmware.

use heapless::{String, Vec};
use kyber_core::effects::SoundBank;
use serde::{Deserialize, Serialize};

/// Image magic
pub const MAGIC: [u8; 4] = *b"KYBR";

/// Maximum entries in one image
pub const MAX_ASSETS: usize = 40;

/// Maximum asset name length
pub const MAX_NAME: usize = 24;

const HEADER_LEN: usize = 8;

/// Fixed clip names
pub const HUM: &str = "hum.wav";
pub const POWER_ON: &str = "poweron.wav";
pub const POWER_OFF: &str = "poweroff.wav";

/// Asset image errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssetError {
    /// Image does not start with [`MAGIC`]
    BadMagic,
    /// Image ends inside the header or index
    Truncated,
    /// Index could not be decoded
    Index,
}

/// One named clip within the data section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String<MAX_NAME>,
    pub offset: u32,
    pub len: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIndex {
    pub entries: Vec<AssetEntry, MAX_ASSETS>,
}

/// Parsed view of an asset image
pub struct AssetImage<'a> {
    index: AssetIndex,
    data: &'a [u8],
}

impl<'a> AssetImage<'a> {
    pub fn parse(image: &'a [u8]) -> Result<Self, AssetError> {
        if image.len() < HEADER_LEN {
            return Err(AssetError::Truncated);
        }
        if image[..4] != MAGIC {
            return Err(AssetError::BadMagic);
        }

        let index_len = u32::from_le_bytes([image[4], image[5], image[6], image[7]]) as usize;
        let index_end = HEADER_LEN
            .checked_add(index_len)
            .filter(|&end| end <= image.len())
            .ok_or(AssetError::Truncated)?;

        let index: AssetIndex =
            postcard::from_bytes(&image[HEADER_LEN..index_end]).map_err(|_| AssetError::Index)?;

        Ok(Self {
            index,
            data: &image[index_end..],
        })
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.index.entries
    }

    /// Clip bytes for an entry, `None` if it points outside the image
    pub fn bytes(&self, entry: &AssetEntry) -> Option<&'a [u8]> {
        let start = entry.offset as usize;
        let end = start.checked_add(entry.len as usize)?;
        self.data.get(start..end)
    }

    /// Look up a clip by name, ignoring ASCII case
    pub fn get(&self, name: &str) -> Option<&'a [u8]> {
        self.entries()
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
            .and_then(|e| self.bytes(e))
    }
}

/// Outcome of resolving a sound bank
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BankSummary {
    pub swing: u8,
    pub clash: u8,
    /// Entries ignored because they point outside the image or overflow
    /// the variant list
    pub skipped: u8,
}

/// Resolve the sound bank from an image
///
/// Swing and clash variants are every `swing*.wav` / `clash*.wav` entry,
/// sorted by name. Missing fixed clips are left empty.
pub fn load_bank<'a>(image: &AssetImage<'a>) -> (SoundBank<&'a [u8]>, BankSummary) {
    let mut bank = SoundBank::new();
    let mut summary = BankSummary::default();

    bank.hum = image.get(HUM);
    bank.power_on = image.get(POWER_ON);
    bank.power_off = image.get(POWER_OFF);

    let mut sorted: Vec<&AssetEntry, MAX_ASSETS> = image.entries().iter().collect();
    sorted.sort_unstable_by(|a, b| a.name.cmp(&b.name));

    for entry in sorted {
        let variants = if is_variant(&entry.name, "swing") {
            &mut bank.swing
        } else if is_variant(&entry.name, "clash") {
            &mut bank.clash
        } else {
            continue;
        };

        match image.bytes(entry).map(|clip| variants.push(clip)) {
            Some(Ok(())) => {}
            _ => summary.skipped = summary.skipped.saturating_add(1),
        }
    }

    summary.swing = bank.swing.len() as u8;
    summary.clash = bank.clash.len() as u8;
    (bank, summary)
}

fn is_variant(name: &str, prefix: &str) -> bool {
    let starts = name
        .get(..prefix.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(prefix));
    let ends = name
        .len()
        .checked_sub(4)
        .and_then(|i| name.get(i..))
        .is_some_and(|s| s.eq_ignore_ascii_case(".wav"));
    starts && ends
}
