//! GifStitch Worker Library
//!
//! Assembles still images into an animated GIF, either through the external
//! convert and gifsicle tools or with an in-process encoder.

pub mod dependency_locator;
pub mod error;
pub mod export;
pub mod frame_encoder;
pub mod image_collection;
pub mod models;
pub mod option_mapper;
pub mod pipeline_executor;
pub mod platform;
pub mod progress_reporter;
