#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![doc = include_str!("../README.md")]

pub mod bulk;

mod buffer;
mod dev;
mod error;
mod field;
mod fp2;
mod monty;
mod uint;

pub use crate::{
    buffer::Buffer,
    error::{Error, Result},
    field::{Codec, Field, TwoAdicField},
    fp2::{Fp2Element, Fp2Field},
    monty::{MontyField, MontyFieldElement},
    uint::UintExt,
};
pub use bigint::{self, Uint};
pub use rand_core;
pub use subtle;
pub use workpool;
pub use zeroize;

/// Byte order used when encoding/decoding field elements as bytestrings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Big endian.
    BigEndian,

    /// Little endian.
    #[default]
    LittleEndian,
}
