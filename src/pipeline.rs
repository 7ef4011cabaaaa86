mod classes;
mod config;
mod decoder;
mod detection;
mod filter;
mod nms;
mod rect;

pub use classes::{ClassTable, FALLBACK_CLASS_NAME};
pub use config::DetectionConfig;
pub use decoder::{CandidateSet, RawDetectionRecord, collect_candidates, decode_record};
pub use detection::Detection;
pub use filter::filter_by_class;
pub use nms::{suppress, suppress_per_class};
pub use rect::Rect;
