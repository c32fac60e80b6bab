/// This module implements concurrent dictionary scanning, demonstrating Rust's parallel
/// processing capabilities compared to .NET's Task Parallel Library (TPL).
///
/// # .NET vs Rust Parallel Processing
///
/// In .NET, you might implement a parallel dictionary scan using:
/// ```csharp
/// Parallel.ForEach(partitions, partition =>
/// {
///     foreach (var match in ScanPartition(partition))
///         matches.Add(match); // ConcurrentBag<T>
/// });
/// ```
///
/// In Rust, we use scoped threads over an atomically claimed work queue. The
/// scope guarantees every worker has finished before the results are read,
/// which lets workers borrow the dictionary buffer directly instead of
/// sharing ownership:
/// ```rust,ignore
/// thread::scope(|scope| {
///     for _ in 1..workers {
///         scope.spawn(|| drain_queue(&queue, buf, &profile, ...));
///     }
///     drain_queue(&queue, buf, &profile, ...); // coordinator participates
/// });
/// let matches = sink.finalize(); // provably after every worker
/// ```
///
/// # Coordination Without Locks
///
/// All cross-thread coordination is a handful of atomic counters:
/// 1. **Work claiming**: workers take partitions with `fetch_add` on a shared
///    cursor (similar to `Interlocked.Increment` handing out indices)
/// 2. **Match collection**: each match claims a unique slot in a fixed array,
///    so no worker ever waits on another
/// 3. **Progress tracking**: a retired-partition counter drives the progress
///    callback while the coordinator spins on it
///
/// No mutex, channel, or thread pool library is involved; the queue drains in
/// one pass and the threads exist only for the duration of the scope.
///
/// # Error Handling
///
/// Unlike .NET's exception handling:
/// ```csharp
/// try {
///     var result = FindWords(letters);
/// } catch (IOException ex) {
///     // Handle error
/// }
/// ```
///
/// Rust uses Result for error handling:
/// ```rust,ignore
/// match find_words(&dictionary, &config) {
///     Ok(output) => // Process output,
///     Err(e) => // Handle error
/// }
/// ```
pub mod aggregator;
pub mod engine;
pub mod matcher;
pub mod partition;

pub use aggregator::MatchSink;
pub use engine::{find_words, find_words_with_progress, MAX_WORKERS};
pub use matcher::{scan_range, LetterProfile, MatchStrategy, ScanTally};
pub use partition::{partition_buffer, Partition};
