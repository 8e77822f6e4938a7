//! A skiplist is a way of storing elements in such a way that elements can be efficiently
//! accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each element `[x]` has links to elements further down the list, allowing the search to
//! effectively skip ahead.
//!
//! The list is ordered by a "greater than" function which **must** be well-behaved.  Given such
//! a function `f(a, b)`, it must satisfy the following properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value.
//! - Be anti-symmetric: if `f(a, b)` then `!f(b, a)`.  Equal keys give `false` both ways.
//! - Be transitive: if `f(a, b)` and `f(b, c)` then `f(a, c)`.
//!
//! Failure to satisfy these properties results in misplaced elements and missed lookups.
//!
//! The list is not synchronized.  Wrap it in a lock to share it between threads.

#[macro_use]
extern crate logger;

pub mod compare;
mod element;
pub mod level_generator;
pub mod skiplist;

pub use config::{Config, ConfigError, DEFAULT_MAX_LEVEL};
pub use element::Element;
pub use level_generator::{LevelGenerator, UniformLevelGenerator};
pub use skiplist::SkipList;
