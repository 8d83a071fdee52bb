pub mod table;
pub mod types;

pub use table::VoiceTable;
pub use types::{Gender, Language, VoiceId};
