pub mod config;

pub use config::{AppConfig, OutputConfig, SegmentationConfig, SegmenterKind, ServerConfig};
