//! Sound asset image in flash
//!
//! The image is flashed separately from the firmware (after the first MiB)
//! and read in place through the XIP window.

use defmt::*;
use kyber_core::effects::SoundBank;
use kyber_drivers::assets::{load_bank, AssetImage};

/// XIP address of the asset image
const ASSET_BASE: usize = 0x1010_0000;

/// Flash left after the firmware region (8 MiB part)
const ASSET_LEN: usize = 7 * 1024 * 1024;

fn image_bytes() -> &'static [u8] {
    // SAFETY: the XIP window maps flash read-only for the life of the
    // program, and nothing in the firmware writes to flash.
    unsafe { core::slice::from_raw_parts(ASSET_BASE as *const u8, ASSET_LEN) }
}

/// Resolve the sound bank, or an empty bank if no image is flashed
pub fn sound_bank() -> SoundBank<&'static [u8]> {
    let image = match AssetImage::parse(image_bytes()) {
        Ok(image) => image,
        Err(e) => {
            error!("No usable asset image: {}", e);
            return SoundBank::new();
        }
    };

    let (bank, summary) = load_bank(&image);
    info!(
        "Sound bank: {} swing, {} clash, hum={}, poweron={}, poweroff={}",
        summary.swing,
        summary.clash,
        bank.hum.is_some(),
        bank.power_on.is_some(),
        bank.power_off.is_some()
    );
    if summary.skipped > 0 {
        warn!("{} asset entries skipped", summary.skipped);
    }
    bank
}
