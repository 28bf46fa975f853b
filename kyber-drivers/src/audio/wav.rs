//! Minimal RIFF/WAVE reader
//!
//! Accepts exactly one format: PCM (format tag 1), mono, 16-bit,
//! [`SAMPLE_RATE`]. Unknown chunks are skipped.

use kyber_core::traits::AudioError;

use super::SAMPLE_RATE;

/// WAV parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WavError {
    /// Not a RIFF/WAVE container
    NotWave,
    /// A chunk runs past the end of the data
    Truncated,
    /// No `fmt ` chunk before the `data` chunk
    MissingFormat,
    /// No `data` chunk
    MissingData,
    /// Format other than 16-bit mono PCM at the mixer rate
    Unsupported,
}

impl From<WavError> for AudioError {
    fn from(e: WavError) -> Self {
        match e {
            WavError::Unsupported => AudioError::UnsupportedFormat,
            _ => AudioError::Unreadable,
        }
    }
}

const PCM_FORMAT: u16 = 1;

/// 16-bit little-endian mono samples borrowed from a WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pcm<'a> {
    data: &'a [u8],
}

impl<'a> Pcm<'a> {
    /// Locate the sample data inside a WAV file
    pub fn from_wav(bytes: &'a [u8]) -> Result<Self, WavError> {
        if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
            return Err(WavError::NotWave);
        }

        let mut rest = &bytes[12..];
        let mut format_ok = None;

        while rest.len() >= 8 {
            let id = &rest[0..4];
            let size = u32::from_le_bytes([rest[4], rest[5], rest[6], rest[7]]) as usize;
            let body = rest.get(8..8 + size).ok_or(WavError::Truncated)?;

            match id {
                b"fmt " => format_ok = Some(Self::check_format(body)?),
                b"data" => {
                    if format_ok.is_none() {
                        return Err(WavError::MissingFormat);
                    }
                    // Drop a dangling odd byte
                    let even = body.len() & !1;
                    return Ok(Self {
                        data: &body[..even],
                    });
                }
                _ => {}
            }

            // Chunks are padded to an even size
            let next = 8 + size + (size & 1);
            rest = rest.get(next..).unwrap_or(&[]);
        }

        Err(WavError::MissingData)
    }

    fn check_format(body: &[u8]) -> Result<(), WavError> {
        if body.len() < 16 {
            return Err(WavError::Truncated);
        }
        let u16_at = |i: usize| u16::from_le_bytes([body[i], body[i + 1]]);
        let rate = u32::from_le_bytes([body[4], body[5], body[6], body[7]]);

        let format = u16_at(0);
        let channels = u16_at(2);
        let bits = u16_at(14);
        if format != PCM_FORMAT || channels != 1 || bits != 16 || rate != SAMPLE_RATE {
            return Err(WavError::Unsupported);
        }
        Ok(())
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.data.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `index`, or silence past the end
    pub fn sample(&self, index: usize) -> i16 {
        let i = index * 2;
        match self.data.get(i..i + 2) {
            Some(b) => i16::from_le_bytes([b[0], b[1]]),
            None => 0,
        }
    }
}

/// Build a WAV file around raw sample bytes
#[cfg(test)]
pub(crate) fn wav_file(
    channels: u16,
    rate: u32,
    bits: u16,
    samples: &[i16],
) -> heapless::Vec<u8, 512> {
    let mut out = heapless::Vec::new();
    let data_len = (samples.len() * 2) as u32;
    let mut put = |bytes: &[u8]| out.extend_from_slice(bytes).unwrap();

    put(b"RIFF");
    put(&(36 + data_len).to_le_bytes());
    put(b"WAVE");
    put(b"fmt ");
    put(&16u32.to_le_bytes());
    put(&PCM_FORMAT.to_le_bytes());
    put(&channels.to_le_bytes());
    put(&rate.to_le_bytes());
    put(&(rate * u32::from(channels) * u32::from(bits) / 8).to_le_bytes());
    put(&(channels * bits / 8).to_le_bytes());
    put(&bits.to_le_bytes());
    put(b"data");
    put(&data_len.to_le_bytes());
    for s in samples {
        put(&s.to_le_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_samples() {
        let file = wav_file(1, SAMPLE_RATE, 16, &[1, -2, 300]);
        let pcm = Pcm::from_wav(&file).unwrap();
        assert_eq!(pcm.len(), 3);
        assert_eq!(pcm.sample(1), -2);
        assert_eq!(pcm.sample(2), 300);
        assert_eq!(pcm.sample(3), 0);
    }

    #[test]
    fn test_skips_unknown_chunks() {
        let plain = wav_file(1, SAMPLE_RATE, 16, &[7, 8]);
        let mut file: heapless::Vec<u8, 512> = heapless::Vec::new();
        file.extend_from_slice(&plain[..36]).unwrap();
        // Odd-sized LIST chunk with its pad byte
        file.extend_from_slice(b"LIST").unwrap();
        file.extend_from_slice(&3u32.to_le_bytes()).unwrap();
        file.extend_from_slice(&[1, 2, 3, 0]).unwrap();
        file.extend_from_slice(&plain[36..]).unwrap();

        let pcm = Pcm::from_wav(&file).unwrap();
        assert_eq!(pcm.len(), 2);
        assert_eq!(pcm.sample(0), 7);
    }

    #[test]
    fn test_rejects_non_wave() {
        assert_eq!(Pcm::from_wav(b"hello"), Err(WavError::NotWave));
        assert_eq!(
            Pcm::from_wav(b"RIFF\0\0\0\0AVI LIST"),
            Err(WavError::NotWave)
        );
    }

    #[test]
    fn test_rejects_unsupported_formats() {
        for file in [
            wav_file(2, SAMPLE_RATE, 16, &[0, 0]),
            wav_file(1, 44_100, 16, &[0]),
            wav_file(1, SAMPLE_RATE, 8, &[0]),
        ] {
            assert_eq!(Pcm::from_wav(&file), Err(WavError::Unsupported));
        }
        assert_eq!(
            AudioError::from(WavError::Unsupported),
            AudioError::UnsupportedFormat
        );
    }

    #[test]
    fn test_truncated_data() {
        let file = wav_file(1, SAMPLE_RATE, 16, &[1, 2, 3]);
        assert_eq!(
            Pcm::from_wav(&file[..file.len() - 1]),
            Err(WavError::Truncated)
        );
        assert_eq!(Pcm::from_wav(&file[..36]), Err(WavError::MissingData));
    }
}
