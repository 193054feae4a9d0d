//! # Analog-to-Digital Converter (ADC)
//!
//! ## Overview
//!
//! The ADC controller converts the analog voltage on one of twelve input
//! channels into a 12-bit digital value. Conversions are started by software
//! trigger and walk over every enabled channel, either in numerical order or
//! in a caller-defined sequence of up to eleven entries. Each channel
//! reports completion through its end-of-conversion flag and its own data
//! register; a comparison window can additionally flag results that fall
//! outside (or inside) a programmed threshold pair without polling every
//! value.
//!
//! ## Usage
//!
//! [`Adc::initialize`] performs the software reset and programs the fixed
//! power-up configuration: software trigger only, user sequence
//! [`Channel::Ch5`], [`Channel::Ch6`], [`Channel::Ch0`], end-of-conversion
//! interrupt on channel 0 and channels 0–2 enabled. Call it once before any
//! other operation; calling it again is safe but discards a sequence set
//! through [`Adc::conversion_sequence_set`].
//!
//! The end-of-conversion flag of a channel is cleared by reading its data
//! register, so poll [`Adc::channel_result_is_ready`] (or wait for the
//! interrupt) strictly before calling [`Adc::channel_result_get`], never
//! after.
//!
//! ## Interrupt dispatch
//!
//! The driver holds a single callback slot. [`Adc::interrupt_handler`] is
//! meant to be called from the ADC interrupt vector and invokes the
//! registered callback, if any, with its context value. The callback runs in
//! interrupt context and must not block.

use core::cell::Cell;

use critical_section::Mutex;
use tock_registers::{
    interfaces::{ReadWriteable, Readable, Writeable},
    register_bitfields, register_structs,
    registers::{ReadOnly, ReadWrite, WriteOnly},
};

/// Number of sequence slots in SEQR1.
const SEQR1_SLOTS: usize = 8;
/// Number of usable sequence slots in SEQR2.
///
/// The register has room for four more 4-bit fields, but only three are
/// driven here; sequence entries past the eleventh are dropped.
const SEQR2_SLOTS: usize = 3;
/// Width of one user-sequence channel slot, in bits.
const SLOT_BITS: u32 = 4;

/// Sequence programmed by [`Adc::initialize`].
const INITIAL_SEQUENCE: [Channel; 3] = [Channel::Ch5, Channel::Ch6, Channel::Ch0];

register_structs! {
    /// ADC controller register block.
    AdcRegisters {
        (0x000 => cr: WriteOnly<u32, CR::Register>),
        (0x004 => mr: ReadWrite<u32, MR::Register>),
        (0x008 => seqr1: ReadWrite<u32>),
        (0x00c => seqr2: ReadWrite<u32>),
        (0x010 => cher: WriteOnly<u32>),
        (0x014 => chdr: WriteOnly<u32>),
        (0x018 => chsr: ReadOnly<u32>),
        (0x01c => _reserved0),
        (0x020 => lcdr: ReadOnly<u32>),
        (0x024 => ier: WriteOnly<u32>),
        (0x028 => idr: WriteOnly<u32>),
        (0x02c => imr: ReadOnly<u32>),
        (0x030 => isr: ReadOnly<u32, ISR::Register>),
        (0x034 => lctmr: ReadWrite<u32>),
        (0x038 => lccwr: ReadWrite<u32>),
        (0x03c => over: ReadOnly<u32>),
        (0x040 => emr: ReadWrite<u32, EMR::Register>),
        (0x044 => cwr: ReadWrite<u32, CWR::Register>),
        (0x048 => _reserved1),
        (0x050 => cdr: [ReadOnly<u32>; NUM_CHANNELS]),
        (0x080 => _reserved2),
        (0x094 => acr: ReadWrite<u32>),
        (0x098 => _reserved3),
        (0x0c0 => trgr: ReadWrite<u32, TRGR::Register>),
        (0x0c4 => _reserved4),
        (0x0e4 => wpmr: ReadWrite<u32>),
        (0x0e8 => wpsr: ReadOnly<u32>),
        (0x0ec => @END),
    }
}

register_bitfields![u32,
    CR [
        /// Software reset of the controller.
        SWRST OFFSET(0) NUMBITS(1) [],
        /// Begin a conversion pass over the enabled channels.
        START OFFSET(1) NUMBITS(1) [],
        /// Re-arm the comparison function.
        CMPRST OFFSET(4) NUMBITS(1) []
    ],
    MR [
        /// Peripheral clock prescaler.
        PRESCAL OFFSET(8) NUMBITS(8) [],
        /// Startup time, in periods of the ADC clock.
        STARTUP OFFSET(16) NUMBITS(4) [
            Sut0 = 0,
            Sut8 = 1,
            Sut16 = 2,
            Sut24 = 3,
            Sut64 = 4,
            Sut80 = 5,
            Sut96 = 6,
            Sut112 = 7,
            Sut512 = 8,
            Sut576 = 9,
            Sut640 = 10,
            Sut704 = 11,
            Sut768 = 12,
            Sut832 = 13,
            Sut896 = 14,
            Sut960 = 15
        ],
        /// Allow per-channel analog change (tracking between channels).
        ANACH OFFSET(23) NUMBITS(1) [],
        /// Tracking time, in periods of the ADC clock.
        TRACKTIM OFFSET(24) NUMBITS(4) [],
        /// Hold time between conversions.
        TRANSFER OFFSET(28) NUMBITS(2) [],
        /// Use the user-defined conversion sequence in SEQR1/SEQR2.
        USEQ OFFSET(31) NUMBITS(1) []
    ],
    EMR [
        CMPMODE OFFSET(0) NUMBITS(2) [
            Low = 0,
            High = 1,
            In = 2,
            Out = 3
        ],
        CMPSEL OFFSET(4) NUMBITS(4) [],
        CMPALL OFFSET(9) NUMBITS(1) [],
        CMPFILTER OFFSET(12) NUMBITS(2) [],
        /// Oversampling ratio.
        OSR OFFSET(16) NUMBITS(3) [
            NoAverage = 0,
            Osr4 = 1,
            Osr16 = 2,
            Osr64 = 3,
            Osr256 = 4
        ],
        ASTE OFFSET(20) NUMBITS(1) [],
        SRCCLK OFFSET(21) NUMBITS(1) [],
        /// Append the channel number to the conversion result in LCDR.
        TAG OFFSET(24) NUMBITS(1) [],
        /// Sign mode of the conversion result.
        SIGNMODE OFFSET(30) NUMBITS(2) [
            /// Single-ended unsigned, differential signed.
            SeUnsgDfSign = 0,
            /// Single-ended signed, differential unsigned.
            SeSignDfUnsg = 1,
            AllUnsigned = 2,
            AllSigned = 3
        ]
    ],
    CWR [
        /// Low threshold of the comparison window.
        LOWTHRES OFFSET(0) NUMBITS(16) [],
        /// High threshold of the comparison window.
        HIGHTHRES OFFSET(16) NUMBITS(16) []
    ],
    ISR [
        /// Comparison event since the last comparison restart.
        COMPE OFFSET(26) NUMBITS(1) [],
        GOVRE OFFSET(25) NUMBITS(1) [],
        /// A conversion result is available in LCDR.
        DRDY OFFSET(24) NUMBITS(1) []
    ],
    TRGR [
        /// Hardware trigger selection.
        TRGMOD OFFSET(0) NUMBITS(3) [
            /// Hardware triggers disabled, software trigger only.
            NoTrigger = 0,
            ExternalRising = 1,
            ExternalFalling = 2,
            ExternalAny = 3,
            Periodic = 5,
            Continuous = 6
        ],
        /// Trigger period for the periodic trigger mode.
        TRGPER OFFSET(16) NUMBITS(16) []
    ]
];

/// Number of analog input channels of this controller instance.
pub const NUM_CHANNELS: usize = 12;

/// Interrupt mask bit of the comparison event, for use with
/// [`Adc::channels_interrupt_enable`] / [`Adc::channels_interrupt_disable`].
pub const COMPARISON_EVENT_MASK: u32 = 1 << 26;

/// One analog input channel of the ADC controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel 0
    Ch0 = 0,
    /// Channel 1
    Ch1 = 1,
    /// Channel 2
    Ch2 = 2,
    /// Channel 3
    Ch3 = 3,
    /// Channel 4
    Ch4 = 4,
    /// Channel 5
    Ch5 = 5,
    /// Channel 6
    Ch6 = 6,
    /// Channel 7
    Ch7 = 7,
    /// Channel 8
    Ch8 = 8,
    /// Channel 9
    Ch9 = 9,
    /// Channel 10
    Ch10 = 10,
    /// Channel 11
    Ch11 = 11,
}

impl Channel {
    /// Bit mask of this channel in the enable, disable and interrupt
    /// registers. The same bit position reports the channel's
    /// end-of-conversion flag in the status register.
    pub const fn mask(self) -> u32 {
        1 << self as u32
    }
}

/// Callback invoked by [`Adc::interrupt_handler`], with the context value
/// given at registration. Runs in interrupt context; must not block.
pub type Callback = fn(context: usize);

/// Pack a conversion sequence into the two sequence register values.
///
/// Entry `i` of the slice lands in bits `[4 * i, 4 * i + 4)` of SEQR1 for the
/// first eight entries, then in the low three slots of SEQR2. Anything past
/// the eleventh entry does not fit and is dropped.
fn pack_sequence(channels: &[Channel]) -> (u32, u32) {
    let mut seqr1 = 0;
    let mut seqr2 = 0;

    for (slot, channel) in channels.iter().take(SEQR1_SLOTS).enumerate() {
        seqr1 |= (*channel as u32) << (slot as u32 * SLOT_BITS);
    }

    if channels.len() > SEQR1_SLOTS {
        for (slot, channel) in channels[SEQR1_SLOTS..]
            .iter()
            .take(SEQR2_SLOTS)
            .enumerate()
        {
            seqr2 |= (*channel as u32) << (slot as u32 * SLOT_BITS);
        }
    }

    (seqr1, seqr2)
}

/// ADC controller driver.
///
/// The driver owns the register block exclusively; all configuration goes
/// through `&mut self`. The only state shared with interrupt context is the
/// callback slot, which is accessed under a critical section on both sides.
///
/// Note that registering a callback while the corresponding interrupt is
/// already enabled races with an in-flight interrupt: the handler may still
/// observe the previous registration. Register the callback before enabling
/// the interrupt source at the interrupt controller.
pub struct Adc {
    regs: &'static AdcRegisters,
    callback: Mutex<Cell<Option<(Callback, usize)>>>,
}

impl Adc {
    /// Base address of the ADC controller.
    pub const BASE: usize = 0xFC03_0000;

    /// Create a driver for the ADC register block mapped at `base`.
    ///
    /// # Safety
    ///
    /// `base` must point to an ADC register block that stays mapped for the
    /// program's lifetime, and no other driver instance may use the same
    /// block.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            regs: unsafe { &*(base as *const AdcRegisters) },
            callback: Mutex::new(Cell::new(None)),
        }
    }

    /// Create the driver for the on-chip controller at [`Self::BASE`].
    ///
    /// # Safety
    ///
    /// Only one instance may exist at a time.
    pub unsafe fn steal() -> Self {
        unsafe { Self::new(Self::BASE) }
    }

    /// Reset the controller and program the fixed initial configuration.
    ///
    /// Must be called once before any other operation. Calling it again
    /// resets the controller and re-establishes the initial conversion
    /// sequence, discarding anything set through
    /// [`Self::conversion_sequence_set`], and clears the registered
    /// callback.
    pub fn initialize(&mut self) {
        self.regs.cr.write(CR::SWRST::SET);

        // Prescaler and timing settings for the clock configuration this
        // firmware runs with.
        self.regs.mr.write(
            MR::PRESCAL.val(9)
                + MR::TRACKTIM.val(15)
                + MR::STARTUP::Sut512
                + MR::TRANSFER.val(2)
                + MR::ANACH::SET,
        );

        // Result format: no averaging, single-ended unsigned, channel tag on.
        self.regs
            .emr
            .write(EMR::OSR::NoAverage + EMR::SIGNMODE::SeUnsgDfSign + EMR::TAG::SET);

        // Software trigger only.
        self.regs.trgr.write(TRGR::TRGMOD::NoTrigger);

        self.regs.mr.modify(MR::USEQ::SET);
        let (seqr1, seqr2) = pack_sequence(&INITIAL_SEQUENCE);
        self.regs.seqr1.set(seqr1);
        self.regs.seqr2.set(seqr2);

        self.regs.ier.set(Channel::Ch0.mask());

        critical_section::with(|cs| self.callback.borrow(cs).set(None));

        self.regs
            .cher
            .set(Channel::Ch0.mask() | Channel::Ch1.mask() | Channel::Ch2.mask());
    }

    /// Enable the channels in `mask`.
    ///
    /// Mask bits outside the physical channel range are written as-is; what
    /// they do is defined by the hardware, not by this driver.
    pub fn channels_enable(&mut self, mask: u32) {
        self.regs.cher.set(mask);
    }

    /// Disable the channels in `mask`.
    pub fn channels_disable(&mut self, mask: u32) {
        self.regs.chdr.set(mask);
    }

    /// Enable the end-of-conversion or comparison-event interrupt sources in
    /// `mask`. Use [`Channel::mask`] and [`COMPARISON_EVENT_MASK`] to build
    /// the mask.
    pub fn channels_interrupt_enable(&mut self, mask: u32) {
        self.regs.ier.set(mask);
    }

    /// Disable the interrupt sources in `mask`.
    pub fn channels_interrupt_disable(&mut self, mask: u32) {
        self.regs.idr.set(mask);
    }

    /// Start a software-triggered conversion pass over all enabled channels.
    ///
    /// Returns immediately; completion is reported per channel through
    /// [`Self::channel_result_is_ready`] and the enabled interrupts.
    pub fn conversion_start(&mut self) {
        self.regs.cr.write(CR::START::SET);
    }

    /// Whether `channel` has an unread conversion result.
    pub fn channel_result_is_ready(&self, channel: Channel) -> bool {
        (self.regs.isr.get() >> channel as u32) & 0x1 != 0
    }

    /// Read the latest conversion result of `channel`.
    ///
    /// Reading the data register clears the channel's end-of-conversion
    /// flag, so check [`Self::channel_result_is_ready`] before reading, not
    /// after.
    pub fn channel_result_get(&mut self, channel: Channel) -> u16 {
        self.regs.cdr[channel as usize].get() as u16
    }

    /// Program the user-defined conversion sequence.
    ///
    /// Channels are converted in slice order. Entries past the eleventh are
    /// silently dropped; an empty slice clears both sequence registers. The
    /// sequence takes effect on the next conversion start and survives until
    /// the next call to this function or to [`Self::initialize`].
    pub fn conversion_sequence_set(&mut self, channels: &[Channel]) {
        let (seqr1, seqr2) = pack_sequence(channels);
        self.regs.seqr1.set(seqr1);
        self.regs.seqr2.set(seqr2);
    }

    /// Set the low and high thresholds of the comparison window in a single
    /// register write.
    ///
    /// Takes effect only once a comparison mode and the comparison-event
    /// interrupt are configured separately.
    pub fn comparison_window_set(&mut self, low: u16, high: u16) {
        self.regs
            .cwr
            .write(CWR::LOWTHRES.val(low as u32) + CWR::HIGHTHRES.val(high as u32));
    }

    /// Whether a comparison event has occurred since the last restart.
    pub fn comparison_event_is_ready(&self) -> bool {
        self.regs.isr.is_set(ISR::COMPE)
    }

    /// Re-arm the comparison function.
    pub fn comparison_restart(&mut self) {
        self.regs.cr.write(CR::CMPRST::SET);
    }

    /// Register `callback` to be invoked from [`Self::interrupt_handler`]
    /// with `context`, replacing any previous registration.
    pub fn callback_register(&mut self, callback: Callback, context: usize) {
        critical_section::with(|cs| self.callback.borrow(cs).set(Some((callback, context))));
    }

    /// ADC interrupt entry point.
    ///
    /// Invokes the registered callback, if any, with its context value. Not
    /// meant to be called from normal execution.
    pub fn interrupt_handler(&self) {
        let registered = critical_section::with(|cs| self.callback.borrow(cs).get());

        if let Some((callback, context)) = registered {
            callback(context);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::{AtomicUsize, Ordering};

    use std::boxed::Box;

    use super::*;

    const CR_WORD: usize = 0x000 / 4;
    const MR_WORD: usize = 0x004 / 4;
    const SEQR1_WORD: usize = 0x008 / 4;
    const SEQR2_WORD: usize = 0x00c / 4;
    const CHER_WORD: usize = 0x010 / 4;
    const CHDR_WORD: usize = 0x014 / 4;
    const CHSR_WORD: usize = 0x018 / 4;
    const IER_WORD: usize = 0x024 / 4;
    const IDR_WORD: usize = 0x028 / 4;
    const ISR_WORD: usize = 0x030 / 4;
    const EMR_WORD: usize = 0x040 / 4;
    const CWR_WORD: usize = 0x044 / 4;
    const CDR0_WORD: usize = 0x050 / 4;

    const WORDS: usize = 0x0ec / 4;

    /// A zeroed memory-backed register block and a driver on top of it. The
    /// raw pointer allows peeking at write-only registers and faking
    /// read-only ones.
    fn fixture() -> (Adc, *mut u32) {
        let mem = Box::leak(Box::new([0u32; WORDS])).as_mut_ptr();
        let adc = unsafe { Adc::new(mem as usize) };
        (adc, mem)
    }

    fn peek(mem: *mut u32, word: usize) -> u32 {
        unsafe { mem.add(word).read_volatile() }
    }

    fn poke(mem: *mut u32, word: usize, value: u32) {
        unsafe { mem.add(word).write_volatile(value) }
    }

    #[test]
    fn initialize_programs_fixed_configuration() {
        let (mut adc, mem) = fixture();
        adc.initialize();

        // PRESCAL=9, STARTUP=SUT512, ANACH, TRACKTIM=15, TRANSFER=2, USEQ.
        assert_eq!(peek(mem, MR_WORD), 0xaf88_0900);
        // TAG only: no averaging, single-ended unsigned.
        assert_eq!(peek(mem, EMR_WORD), 0x0100_0000);
        // Channels 5, 6, 0 in the first three slots.
        assert_eq!(peek(mem, SEQR1_WORD), 0x065);
        assert_eq!(peek(mem, SEQR2_WORD), 0);
        // EOC interrupt on channel 0, channels 0-2 enabled.
        assert_eq!(peek(mem, IER_WORD), 0b001);
        assert_eq!(peek(mem, CHER_WORD), 0b111);
    }

    #[test]
    fn no_spurious_ready_flags_after_initialize() {
        let (mut adc, _) = fixture();
        adc.initialize();

        for channel in [Channel::Ch3, Channel::Ch7, Channel::Ch11] {
            assert!(!adc.channel_result_is_ready(channel));
        }
        assert!(!adc.comparison_event_is_ready());
    }

    #[test]
    fn explicit_initial_sequence_matches_initialize() {
        let (mut adc, mem) = fixture();
        adc.initialize();
        let after_init = (peek(mem, SEQR1_WORD), peek(mem, SEQR2_WORD));

        adc.conversion_sequence_set(&[Channel::Ch5, Channel::Ch6, Channel::Ch0]);
        assert_eq!((peek(mem, SEQR1_WORD), peek(mem, SEQR2_WORD)), after_init);
    }

    #[test]
    fn eleven_channel_sequence_splits_eight_three() {
        let (mut adc, mem) = fixture();
        let channels = [
            Channel::Ch0,
            Channel::Ch1,
            Channel::Ch2,
            Channel::Ch3,
            Channel::Ch4,
            Channel::Ch5,
            Channel::Ch6,
            Channel::Ch7,
            Channel::Ch8,
            Channel::Ch9,
            Channel::Ch10,
        ];
        adc.conversion_sequence_set(&channels);

        let mut seqr1 = 0;
        for (i, ch) in channels[..8].iter().enumerate() {
            seqr1 |= (*ch as u32) << (4 * i);
        }
        let mut seqr2 = 0;
        for (i, ch) in channels[8..].iter().enumerate() {
            seqr2 |= (*ch as u32) << (4 * i);
        }

        assert_eq!(peek(mem, SEQR1_WORD), seqr1);
        assert_eq!(peek(mem, SEQR2_WORD), seqr2);
    }

    #[test]
    fn overlong_sequence_drops_trailing_entries() {
        let twelve = [Channel::Ch11; 12];
        let eleven = [Channel::Ch11; 11];
        assert_eq!(pack_sequence(&twelve), pack_sequence(&eleven));
    }

    #[test]
    fn empty_sequence_zeroes_both_registers() {
        let (mut adc, mem) = fixture();
        poke(mem, SEQR1_WORD, 0xdead_beef);
        poke(mem, SEQR2_WORD, 0x0000_0abc);

        adc.conversion_sequence_set(&[]);
        assert_eq!(peek(mem, SEQR1_WORD), 0);
        assert_eq!(peek(mem, SEQR2_WORD), 0);
    }

    #[test]
    fn callback_dispatched_once_per_interrupt() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        static CONTEXT: AtomicUsize = AtomicUsize::new(0);

        fn record(context: usize) {
            CALLS.fetch_add(1, Ordering::SeqCst);
            CONTEXT.store(context, Ordering::SeqCst);
        }

        let (mut adc, _) = fixture();
        adc.callback_register(record, 0x1234);

        adc.interrupt_handler();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
        assert_eq!(CONTEXT.load(Ordering::SeqCst), 0x1234);

        adc.interrupt_handler();
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn registration_replaces_previous_callback() {
        static FIRST: AtomicUsize = AtomicUsize::new(0);
        static SECOND: AtomicUsize = AtomicUsize::new(0);

        fn first(_: usize) {
            FIRST.fetch_add(1, Ordering::SeqCst);
        }
        fn second(_: usize) {
            SECOND.fetch_add(1, Ordering::SeqCst);
        }

        let (mut adc, _) = fixture();
        adc.callback_register(first, 0);
        adc.callback_register(second, 0);

        adc.interrupt_handler();
        assert_eq!(FIRST.load(Ordering::SeqCst), 0);
        assert_eq!(SECOND.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn interrupt_without_registration_is_a_no_op() {
        let (adc, _) = fixture();
        adc.interrupt_handler();
    }

    #[test]
    fn initialize_clears_registered_callback() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        fn record(_: usize) {
            CALLS.fetch_add(1, Ordering::SeqCst);
        }

        let (mut adc, _) = fixture();
        adc.callback_register(record, 0);
        adc.initialize();

        adc.interrupt_handler();
        assert_eq!(CALLS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn start_and_comparison_restart_write_their_control_bits() {
        let (mut adc, mem) = fixture();

        adc.conversion_start();
        assert_eq!(peek(mem, CR_WORD), 1 << 1);

        adc.comparison_restart();
        assert_eq!(peek(mem, CR_WORD), 1 << 4);
    }

    #[test]
    fn comparison_window_packs_both_thresholds() {
        let (mut adc, mem) = fixture();
        adc.comparison_window_set(10, 200);
        assert_eq!(peek(mem, CWR_WORD), 10 | 200 << 16);
    }

    #[test]
    fn comparison_event_flag_follows_status_register() {
        let (adc, mem) = fixture();
        assert!(!adc.comparison_event_is_ready());
        poke(mem, ISR_WORD, 1 << 26);
        assert!(adc.comparison_event_is_ready());
    }

    #[test]
    fn enable_disable_round_trip_leaves_channel_status_alone() {
        let (mut adc, mem) = fixture();
        poke(mem, CHSR_WORD, 0b101);

        let mask = Channel::Ch3.mask() | Channel::Ch9.mask();
        adc.channels_enable(mask);
        adc.channels_disable(mask);

        assert_eq!(peek(mem, CHSR_WORD), 0b101);
        assert_eq!(peek(mem, CHER_WORD), mask);
        assert_eq!(peek(mem, CHDR_WORD), mask);
    }

    #[test]
    fn result_ready_and_read_back() {
        let (mut adc, mem) = fixture();
        poke(mem, ISR_WORD, Channel::Ch5.mask());
        poke(mem, CDR0_WORD + 5, 0xabc);

        assert!(adc.channel_result_is_ready(Channel::Ch5));
        assert!(!adc.channel_result_is_ready(Channel::Ch4));
        assert_eq!(adc.channel_result_get(Channel::Ch5), 0xabc);
    }

    #[test]
    fn interrupt_masks_hit_enable_and_disable_registers() {
        let (mut adc, mem) = fixture();

        adc.channels_interrupt_enable(Channel::Ch0.mask() | COMPARISON_EVENT_MASK);
        assert_eq!(peek(mem, IER_WORD), 1 | 1 << 26);

        adc.channels_interrupt_disable(COMPARISON_EVENT_MASK);
        assert_eq!(peek(mem, IDR_WORD), 1 << 26);
    }
}
