//! Bare-metal (`no_std`) drivers for a subset of the peripherals found in
//! Microchip SAMA5D2 devices. Where applicable, drivers implement the
//! [embedded-hal-nb] and [embedded-io] traits.
//!
//! ## Overview
//!
//! Each peripheral is covered by its own module containing a register-level
//! driver:
//!
//! - [`adc`] — the 12-channel ADC controller, including user-defined
//!   conversion sequences, the comparison window and interrupt callback
//!   dispatch.
//! - [`usart`] — the USART exposed through FLEXCOM in USART mode.
//!
//! Drivers own their register block exclusively; construct them with the
//! `steal()` associated function for the fixed on-chip instance, or with
//! `new(base)` for any other mapping of the same block.
//!
//! Clock, pin-mux and interrupt-controller setup are out of scope and are
//! assumed to have been performed by the boot firmware.
//!
//! [embedded-hal-nb]: https://docs.rs/embedded-hal-nb/latest/embedded_hal_nb/
//! [embedded-io]: https://docs.rs/embedded-io/latest/embedded_io/
//!
//! ## Feature Flags
#![doc = document_features::document_features!()]
#![deny(missing_docs)]
#![no_std]

#[cfg(test)]
extern crate std;

pub mod adc;
pub mod usart;
