pub mod composer;
pub mod text;
pub mod tray;

pub use composer::TextComposer;
pub use text::{wrapped_row_count, FontMetrics};
pub use tray::AttachmentTray;
