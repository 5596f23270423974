//! Media handling seams
//!
//! The core never decodes or re-encodes image data itself; it routes opaque
//! encoded bytes. This module holds the codec trait the render path uses
//! and the passthrough implementation for already-JPEG pipelines.

pub mod codec;

pub use codec::{CodecError, DisplayCodec, PassthroughCodec};
