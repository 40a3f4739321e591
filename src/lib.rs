//! Signed arbitrary-precision integers.
//!
//! A `BigInt` is a sign bit paired with a [`Magnitude`](magnitude::Magnitude):
//! an unsigned limb vector in base 100000. Arithmetic on the magnitude lives
//! in [`magnitude`], dispatching multiplication to either schoolbook or the
//! FFT convolution in [`fft`] depending on operand size; [`bigint`] layers
//! sign handling and floor-rounded division on top; [`textual_io`] handles
//! decimal parsing and formatting.

mod bigint;
mod error;
mod fft;
mod magnitude;
mod textual_io;


pub use bigint::{BigInt, add, minus};
pub use error::BigIntError;
