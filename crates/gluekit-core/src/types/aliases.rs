//! Type aliases for shared state and callbacks.
//!
//! The preview is fed from the control loop thread and drawn from the
//! display loop, so slots shared between them are `Arc<Mutex<Option<T>>>`
//! built on `parking_lot`.
//!
//! ```rust,ignore
//! use gluekit_core::types::*;
//!
//! let frame: ThreadSafeOption<RgbImage> = thread_safe_none();
//! *frame.lock() = Some(image);
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

/// A thread-safe optional slot, empty until first written.
pub type ThreadSafeOption<T> = Arc<Mutex<Option<T>>>;

/// A shareable callback receiving a single value.
///
/// Cloning is cheap, so a publisher can take a snapshot of its callbacks
/// and invoke them without holding any lock.
pub type DataCallback<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Create an empty `ThreadSafeOption<T>`.
#[inline]
pub fn thread_safe_none<T>() -> ThreadSafeOption<T> {
    Arc::new(Mutex::new(None))
}
