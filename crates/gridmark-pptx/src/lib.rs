//! # gridmark-pptx
//!
//! PPTX (PresentationML) support for gridmark: read the lookup table of
//! every slide and append slides carrying the grid and its markers.

pub mod error;
pub mod presentation;
pub mod reader;
pub mod writer;

pub use error::{PptxError, PptxResult};
pub use gridmark_opc::Package;
pub use presentation::slide_paths;
pub use reader::PptxReader;
pub use writer::PptxWriter;
