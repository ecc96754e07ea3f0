use super::{Record, Recorder};

/// Buffered recorder.
///
/// Keeps every record in memory. Useful for inspecting a training run
/// after it finished.
#[derive(Default)]
pub struct BufferedRecorder {
    buf: Vec<Record>,
}

impl BufferedRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> std::slice::Iter<Record> {
        self.buf.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if no record was written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the scalar values of the given key in the order they were written.
    ///
    /// Records without the key are skipped.
    pub fn scalars(&self, key: &str) -> Vec<f32> {
        self.buf
            .iter()
            .filter_map(|r| r.get_scalar(key).ok())
            .collect()
    }
}

impl Recorder for BufferedRecorder {
    fn write(&mut self, record: Record) {
        self.buf.push(record);
    }
}
