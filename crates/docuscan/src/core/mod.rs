//! Core pipeline: configuration, enumeration, batch orchestration, and
//! result output.

pub mod config;
pub mod io;
pub mod runner;
pub mod writer;

pub use config::BatchConfig;
pub use io::{IMAGE_EXTENSIONS, collect_image_files, is_supported_image};
pub use runner::{run_batch, run_batch_sync};
pub use writer::write_result_record;
