//! Types and traits for recording training metrics.
//!
//! Agents return a [`Record`] from every update and the trainers add
//! per-episode values such as the return and the episode length.
//! A [`Recorder`] receives these records.
//!
//! ```rust
//! use replab_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(3.0));
//! record.insert("episode_return", RecordValue::Scalar(-13.0));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), -13.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
