//! FrameLens core library for passive frame dissection.
//!
//! This crate decodes captured link-layer frames into a layered object
//! model: packet sources feed raw buffers to [`decode_frame`], which
//! classifies the frame (Ethernet-II vs IEEE 802.3) and drives the
//! per-protocol decoders (layout/reader/parser) down through network and
//! transport layers. Decoding is byte-oriented and side-effect free; all
//! I/O is isolated in `source` modules.
//!
//! Invariants:
//! - Frame decoding never fails: malformed input lands in an `Unknown`
//!   variant, never in an error.
//! - Every decoded field records its absolute `[start, end)` byte range
//!   in the original capture buffer.
//! - Decoders never read past the captured bytes; truncation downgrades
//!   the affected layer, not the whole frame.
//!
//! Version française (résumé):
//! Cette crate fournit le cœur de dissection passive : sources -> trame ->
//! décodeurs de protocoles (layout/reader/parser) en couches fermées
//! `Layer3`/`Layer4`. Les E/S restent dans `source`; chaque champ décodé
//! conserve sa plage d'octets dans le tampon d'origine. Une entrée
//! malformée produit `Unknown`, jamais une erreur.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use framelens_core::{PacketSource, PcapFileSource, decode_frame};
//!
//! let mut source = PcapFileSource::open(Path::new("capture.pcapng"))?;
//! let mut number = 0u64;
//! while let Some(event) = source.next_packet()? {
//!     number += 1;
//!     let frame = decode_frame(&event.data, event.ts, event.original_length, Some(number));
//!     println!("{frame}");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod fields;
pub mod frame;
pub mod layers;
pub mod protocols;
pub mod source;
pub mod wire;

pub use fields::{FieldId, FieldMap, FieldRange};
pub use frame::{Frame, FrameFormat, decode_frame};
pub use layers::{Layer3, Layer4, Unknown};
pub use source::{PacketEvent, PacketSource, PcapFileSource, SourceError};
