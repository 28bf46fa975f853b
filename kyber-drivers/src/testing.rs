//! Hand-written bus and pin mocks shared by the unit tests

extern crate std;

use core::convert::Infallible;
use std::vec::Vec;

use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType, NoAcknowledgeSource, Operation};
use embedded_hal_async::i2c::I2c;
use kyber_core::traits::StripError;
use smart_leds::RGB8;

use crate::blade::FrameWriter;

/// Register-file I2C device with auto-incrementing sub-address
pub struct MockI2c {
    pub address: u8,
    pub regs: [u8; 256],
    pub last_register: u8,
    pub fail: bool,
}

impl MockI2c {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            regs: [0; 256],
            last_register: 0,
            fail: false,
        }
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if address != self.address {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if self.fail {
            return Err(ErrorKind::Bus);
        }

        let mut pointer = 0usize;
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    let Some((&sub, data)) = bytes.split_first() else {
                        continue;
                    };
                    self.last_register = sub;
                    pointer = (sub & 0x7F) as usize;
                    for &b in data.iter() {
                        self.regs[pointer] = b;
                        pointer = (pointer + 1) % 256;
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.regs[pointer];
                        pointer = (pointer + 1) % 256;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Input pin whose level the test sets directly
#[derive(Default)]
pub struct MockPin {
    pub high: bool,
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Frame writer that records every frame
#[derive(Default)]
pub struct MockWriter<const N: usize> {
    pub frames: Vec<[RGB8; N]>,
    pub fail: bool,
}

impl<const N: usize> FrameWriter<N> for MockWriter<N> {
    async fn write(&mut self, frame: &[RGB8; N]) -> Result<(), StripError> {
        if self.fail {
            return Err(StripError::WriteFailed);
        }
        self.frames.push(*frame);
        Ok(())
    }
}
