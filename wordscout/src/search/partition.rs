/// A contiguous byte range of the dictionary assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    /// First byte of the range
    pub start: usize,
    /// One past the last byte of the range
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Splits the buffer into one partition per worker.
///
/// Nominal boundaries at multiples of `ceil(len / workers)` are pushed
/// forward to the next newline so no word straddles two partitions; the
/// newline itself belongs to neither side. Late partitions come out empty
/// when the buffer is small relative to the worker count, and the final
/// partition always ends at the buffer's end.
pub fn partition_buffer(buf: &[u8], workers: usize) -> Vec<Partition> {
    debug_assert!(workers > 0);
    let len = buf.len();
    let chunk = (len + workers - 1) / workers;
    let mut partitions = Vec::with_capacity(workers);
    let mut prev_end = 0;

    for i in 0..workers {
        let nominal = if i == workers - 1 {
            len
        } else {
            ((i + 1) * chunk).min(len)
        };
        let mut end = nominal;
        while end < len && buf[end] != b'\n' {
            end += 1;
        }
        let start = if i == 0 { 0 } else { (prev_end + 1).min(end) };
        partitions.push(Partition { start, end });
        prev_end = end;
    }

    partitions
}
