//! Candlestick pattern classifiers.
//!
//! Each classifier is one forward scan: validate the request, prime the
//! rolling averages it needs over the window ending just before the first
//! emitted bar, then for every index write a `{-100, 0, 100}` code and slide
//! every average one bar forward.
//!
//! # Categories
//!
//! - **Single-bar (17)**: Doji family, Hammer family, Marubozu, lines, etc.
//! - **Two-bar (16)**: Engulfing, Harami, Piercing, Kicking, etc.
//! - **Three-bar (20)**: Stars, Soldiers/Crows, Tasuki Gap, Tristar, etc.
//! - **Multi-bar (7)**: Breakaway, Hikkake, Mat Hold, Three Methods, etc.

pub mod multi_bar;
pub mod single_bar;
pub mod three_bar;
pub mod two_bar;

pub use multi_bar::*;
pub use single_bar::*;
pub use three_bar::*;
pub use two_bar::*;
