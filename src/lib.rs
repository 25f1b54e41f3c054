pub mod common;
pub mod processing;

pub use common::error::{Result, StegoError};
pub use common::pixels::PixelArray;
pub use processing::bit_plane::{BitPlane, PlaneOrder};
pub use processing::bits::BitSequence;
pub use processing::report::{Completion, Diagnostic, EmbedReport, ExtractReport};
