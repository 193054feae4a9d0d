//! # Universal Synchronous/Asynchronous Receiver/Transmitter (USART)
//!
//! ## Overview
//!
//! The USART handles serial communication; on this device the classic USART
//! register block is exposed through FLEXCOM operating in USART mode. The
//! driver covers asynchronous operation: baud rate, data bits, parity and
//! stop bits are configurable through the [config] module, and data moves
//! through non-blocking byte accessors or blocking buffer transfers.
//!
//! ## Usage
//!
//! [`Usart::initialize`] resets the peripheral, programs the default
//! 115 200 8N1 setup against [`CLOCK_HZ`] and enables the receiver and
//! transmitter. Receiver errors (overrun, framing, parity) are sticky until
//! collected with [`Usart::take_error`].
//!
//! The driver implements [`core::fmt::Write`] as well as the
//! [embedded-hal-nb] and [embedded-io] serial traits, gated behind the
//! corresponding feature flags.
//!
//! [embedded-hal-nb]: https://docs.rs/embedded-hal-nb/latest/embedded_hal_nb/
//! [embedded-io]: https://docs.rs/embedded-io/latest/embedded_io/

use tock_registers::{
    interfaces::{Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

/// Peripheral clock rate the boot firmware leaves the FLEXCOM running at;
/// used by [`Usart::initialize`] for the default baud rate setup.
pub const CLOCK_HZ: u32 = 83_000_000;

register_structs! {
    /// USART register block (FLEXCOM USART mode).
    UsartRegisters {
        (0x00 => cr: WriteOnly<u32, CR::Register>),
        (0x04 => mr: ReadWrite<u32, MR::Register>),
        (0x08 => ier: WriteOnly<u32>),
        (0x0c => idr: WriteOnly<u32>),
        (0x10 => imr: ReadOnly<u32>),
        (0x14 => csr: ReadOnly<u32, CSR::Register>),
        (0x18 => rhr: ReadOnly<u32, RHR::Register>),
        (0x1c => thr: WriteOnly<u32, THR::Register>),
        (0x20 => brgr: ReadWrite<u32, BRGR::Register>),
        (0x24 => rtor: ReadWrite<u32>),
        (0x28 => ttgr: ReadWrite<u32>),
        (0x2c => @END),
    }
}

register_bitfields![u32,
    CR [
        /// Reset the receiver.
        RSTRX OFFSET(2) NUMBITS(1) [],
        /// Reset the transmitter.
        RSTTX OFFSET(3) NUMBITS(1) [],
        RXEN OFFSET(4) NUMBITS(1) [],
        RXDIS OFFSET(5) NUMBITS(1) [],
        TXEN OFFSET(6) NUMBITS(1) [],
        TXDIS OFFSET(7) NUMBITS(1) [],
        /// Clear the sticky receiver error flags in CSR.
        RSTSTA OFFSET(8) NUMBITS(1) []
    ],
    MR [
        USART_MODE OFFSET(0) NUMBITS(4) [
            Normal = 0
        ],
        /// Baud rate generator clock source.
        USCLKS OFFSET(4) NUMBITS(2) [
            PeripheralClock = 0,
            Div = 1,
            Sck = 3
        ],
        /// Character length (5 + value bits).
        CHRL OFFSET(6) NUMBITS(2) [],
        SYNC OFFSET(8) NUMBITS(1) [],
        PAR OFFSET(9) NUMBITS(3) [
            Even = 0,
            Odd = 1,
            Space = 2,
            Mark = 3,
            No = 4
        ],
        NBSTOP OFFSET(12) NUMBITS(2) [
            One = 0,
            OneAndHalf = 1,
            Two = 2
        ],
        CHMODE OFFSET(14) NUMBITS(2) [
            Normal = 0,
            Echo = 1,
            LocalLoopback = 2,
            RemoteLoopback = 3
        ],
        /// 8x oversampling instead of 16x.
        OVER OFFSET(19) NUMBITS(1) []
    ],
    CSR [
        /// A character is waiting in RHR.
        RXRDY OFFSET(0) NUMBITS(1) [],
        /// THR is empty and can accept a character.
        TXRDY OFFSET(1) NUMBITS(1) [],
        RXBRK OFFSET(2) NUMBITS(1) [],
        /// Receiver overrun since the last status reset.
        OVRE OFFSET(5) NUMBITS(1) [],
        /// Framing error since the last status reset.
        FRAME OFFSET(6) NUMBITS(1) [],
        /// Parity error since the last status reset.
        PARE OFFSET(7) NUMBITS(1) [],
        TIMEOUT OFFSET(8) NUMBITS(1) [],
        /// Transmitter shift register and THR are both empty.
        TXEMPTY OFFSET(9) NUMBITS(1) []
    ],
    RHR [
        RXCHR OFFSET(0) NUMBITS(9) []
    ],
    THR [
        TXCHR OFFSET(0) NUMBITS(9) []
    ],
    BRGR [
        /// Clock divider.
        CD OFFSET(0) NUMBITS(16) [],
        /// Fractional part, in eighths of the divider.
        FP OFFSET(16) NUMBITS(3) []
    ]
];

/// Receiver error, collected with [`Usart::take_error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// A received character overwrote one that was never read.
    Overrun,
    /// A character without a valid stop bit was received.
    Framing,
    /// A character with a parity mismatch was received.
    Parity,
}

#[cfg(feature = "embedded-hal")]
impl embedded_hal_nb::serial::Error for Error {
    fn kind(&self) -> embedded_hal_nb::serial::ErrorKind {
        use embedded_hal_nb::serial::ErrorKind;

        match self {
            Self::Overrun => ErrorKind::Overrun,
            Self::Framing => ErrorKind::FrameFormat,
            Self::Parity => ErrorKind::Parity,
        }
    }
}

#[cfg(feature = "embedded-io")]
impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        embedded_io::ErrorKind::Other
    }
}

/// Error applying a [`config::Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The requested baud rate is not reachable from the source clock: the
    /// clock divider would be zero or would not fit its register field.
    UnachievableBaudrate,
}

/// USART configuration
pub mod config {
    /// Number of data bits
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum DataBits {
        /// 5 data bits
        DataBits5 = 0,
        /// 6 data bits
        DataBits6 = 1,
        /// 7 data bits
        DataBits7 = 2,
        /// 8 data bits
        #[default]
        DataBits8 = 3,
    }

    /// Parity check
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum Parity {
        /// Even parity
        ParityEven = 0,
        /// Odd parity
        ParityOdd = 1,
        /// No parity
        #[default]
        ParityNone = 4,
    }

    /// Number of stop bits
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum StopBits {
        /// 1 stop bit
        #[default]
        Stop1 = 0,
        /// 1.5 stop bits
        Stop1p5 = 1,
        /// 2 stop bits
        Stop2 = 2,
    }

    /// USART configuration
    #[derive(Debug, Clone, Copy)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Config {
        pub(crate) baudrate: u32,
        pub(crate) data_bits: DataBits,
        pub(crate) parity: Parity,
        pub(crate) stop_bits: StopBits,
    }

    impl Config {
        /// Configure the USART's baud rate
        pub fn baudrate(mut self, baudrate: u32) -> Self {
            self.baudrate = baudrate;
            self
        }

        /// Configure the USART to use no parity
        pub fn parity_none(mut self) -> Self {
            self.parity = Parity::ParityNone;
            self
        }

        /// Configure the USART to use even parity
        pub fn parity_even(mut self) -> Self {
            self.parity = Parity::ParityEven;
            self
        }

        /// Configure the USART to use odd parity
        pub fn parity_odd(mut self) -> Self {
            self.parity = Parity::ParityOdd;
            self
        }

        /// Configure the USART's data bits
        pub fn data_bits(mut self, data_bits: DataBits) -> Self {
            self.data_bits = data_bits;
            self
        }

        /// Configure the USART's stop bits
        pub fn stop_bits(mut self, stop_bits: StopBits) -> Self {
            self.stop_bits = stop_bits;
            self
        }
    }

    impl Default for Config {
        fn default() -> Config {
            Config {
                baudrate: 115_200,
                data_bits: Default::default(),
                parity: Default::default(),
                stop_bits: Default::default(),
            }
        }
    }
}

/// USART driver
pub struct Usart {
    regs: &'static UsartRegisters,
}

impl Usart {
    /// Base address of the FLEXCOM0 USART registers.
    pub const BASE: usize = 0xF803_4200;

    /// Create a driver for the USART register block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to a USART register block that stays mapped for the
    /// program's lifetime, and no other driver instance may use the same
    /// block.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: unsafe { &*(base as *const UsartRegisters) },
        }
    }

    /// Create the driver for the FLEXCOM0 USART at [`Self::BASE`].
    ///
    /// # Safety
    ///
    /// Only one instance may exist at a time.
    pub unsafe fn steal() -> Self {
        unsafe { Self::new(Self::BASE) }
    }

    /// Reset the peripheral, program the default 115 200 8N1 setup against
    /// [`CLOCK_HZ`] and enable the receiver and transmitter.
    pub fn initialize(&mut self) {
        self.regs.cr.write(
            CR::RSTRX::SET + CR::RSTTX::SET + CR::RXDIS::SET + CR::TXDIS::SET + CR::RSTSTA::SET,
        );

        // Default setup is always achievable from the fixed clock.
        self.serial_setup(config::Config::default(), CLOCK_HZ).ok();

        self.regs.cr.write(CR::RXEN::SET + CR::TXEN::SET);
    }

    /// Reprogram line format and baud rate. `src_clk_hz` is the current
    /// peripheral clock rate.
    ///
    /// Communication in flight while reconfiguring is corrupted; drain the
    /// transmitter with [`Self::flush`] first.
    pub fn serial_setup(
        &mut self,
        config: config::Config,
        src_clk_hz: u32,
    ) -> Result<(), ConfigError> {
        // 16x oversampling; the divider counts in units of 16 clocks with a
        // fractional part in eighths.
        let divisor = match config.baudrate.checked_mul(16) {
            Some(divisor) if divisor > 0 => divisor,
            _ => return Err(ConfigError::UnachievableBaudrate),
        };

        let cd = src_clk_hz / divisor;
        if cd == 0 || cd > 0xffff {
            return Err(ConfigError::UnachievableBaudrate);
        }
        let fp = ((src_clk_hz % divisor) as u64 * 8 / divisor as u64) as u32;

        self.regs.mr.write(
            MR::USART_MODE::Normal
                + MR::USCLKS::PeripheralClock
                + MR::CHRL.val(config.data_bits as u32)
                + MR::PAR.val(config.parity as u32)
                + MR::NBSTOP.val(config.stop_bits as u32)
                + MR::CHMODE::Normal,
        );
        self.regs.brgr.write(BRGR::CD.val(cd) + BRGR::FP.val(fp));

        Ok(())
    }

    /// Read a single byte from the USART in a non-blocking manner.
    pub fn read_byte(&mut self) -> Option<u8> {
        if self.receiver_ready() {
            Some(self.regs.rhr.read(RHR::RXCHR) as u8)
        } else {
            None
        }
    }

    /// Write a single byte to the USART in a non-blocking manner.
    pub fn write_byte(&mut self, byte: u8) -> Option<()> {
        if self.transmitter_ready() {
            self.regs.thr.write(THR::TXCHR.val(byte as u32));
            Some(())
        } else {
            None
        }
    }

    /// Write all of `data` to the USART, blocking until every byte has been
    /// handed to the transmitter.
    pub fn write_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            while !self.transmitter_ready() {}
            self.regs.thr.write(THR::TXCHR.val(byte as u32));
        }
    }

    /// Fill `buf` from the USART, blocking until it is full. Aborts on the
    /// first receiver error encountered.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Error> {
        for slot in buf.iter_mut() {
            loop {
                if let Some(error) = self.take_error() {
                    return Err(error);
                }
                if let Some(byte) = self.read_byte() {
                    *slot = byte;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Collect and clear the sticky receiver error flags. On multiple
    /// simultaneous errors, overrun wins over framing over parity.
    pub fn take_error(&mut self) -> Option<Error> {
        let csr = self.regs.csr.extract();

        let error = if csr.is_set(CSR::OVRE) {
            Some(Error::Overrun)
        } else if csr.is_set(CSR::FRAME) {
            Some(Error::Framing)
        } else if csr.is_set(CSR::PARE) {
            Some(Error::Parity)
        } else {
            None
        };

        if error.is_some() {
            self.regs.cr.write(CR::RSTSTA::SET);
        }

        error
    }

    /// Whether the transmitter, including its shift register, has drained.
    /// Returns `Some(())` once idle.
    pub fn flush(&mut self) -> Option<()> {
        if self.regs.csr.is_set(CSR::TXEMPTY) {
            Some(())
        } else {
            None
        }
    }

    /// Whether the transmit holding register can accept a byte.
    pub fn transmitter_ready(&self) -> bool {
        self.regs.csr.is_set(CSR::TXRDY)
    }

    /// Whether a received byte is waiting to be read.
    pub fn receiver_ready(&self) -> bool {
        self.regs.csr.is_set(CSR::RXRDY)
    }
}

impl core::fmt::Write for Usart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.write_bytes(s.as_bytes());
        Ok(())
    }
}

#[cfg(feature = "embedded-hal")]
impl embedded_hal_nb::serial::ErrorType for Usart {
    type Error = Error;
}

#[cfg(feature = "embedded-hal")]
impl embedded_hal_nb::serial::Read for Usart {
    fn read(&mut self) -> embedded_hal_nb::nb::Result<u8, Self::Error> {
        if let Some(error) = self.take_error() {
            return Err(embedded_hal_nb::nb::Error::Other(error));
        }

        self.read_byte()
            .ok_or(embedded_hal_nb::nb::Error::WouldBlock)
    }
}

#[cfg(feature = "embedded-hal")]
impl embedded_hal_nb::serial::Write for Usart {
    fn write(&mut self, word: u8) -> embedded_hal_nb::nb::Result<(), Self::Error> {
        self.write_byte(word)
            .ok_or(embedded_hal_nb::nb::Error::WouldBlock)
    }

    fn flush(&mut self) -> embedded_hal_nb::nb::Result<(), Self::Error> {
        self.flush().ok_or(embedded_hal_nb::nb::Error::WouldBlock)
    }
}

#[cfg(feature = "embedded-io")]
impl embedded_io::ErrorType for Usart {
    type Error = Error;
}

#[cfg(feature = "embedded-io")]
impl embedded_io::Read for Usart {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }

        while !self.receiver_ready() {
            // Block until we have received at least one byte
        }

        let mut count = 0;
        while count < buf.len() {
            match self.read_byte() {
                Some(byte) => {
                    buf[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }

        Ok(count)
    }
}

#[cfg(feature = "embedded-io")]
impl embedded_io::ReadReady for Usart {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.receiver_ready())
    }
}

#[cfg(feature = "embedded-io")]
impl embedded_io::Write for Usart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.write_bytes(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while self.flush().is_none() {
            // Wait for the shift register to drain
        }

        Ok(())
    }
}
