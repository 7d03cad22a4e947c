//! # labshift-ops
//!
//! The two numeric stages of statistical color transfer:
//!
//! - [`stats`] - reduces an image's sampling grid to per-channel lab
//!   means and variances (two-pass moment aggregation)
//! - [`transfer`] - rescales and recenters each target pixel so the
//!   target's lab moments match the source's
//!
//! Both stages are embarrassingly parallel and use rayon: statistics
//! reduce per-row partial sums with plain associative addition, and the
//! transfer is a pure per-pixel map.
//!
//! # Example
//!
//! ```rust
//! use labshift_core::Image;
//! use labshift_ops::{transfer_image, TransferConfig};
//!
//! let source = Image::filled(8, 8, [0.8, 0.2, 0.2, 1.0]);
//! let target = Image::filled(4, 4, [0.1, 0.1, 0.8, 1.0]);
//! let out = transfer_image(&source, &target, &TransferConfig::default()).unwrap();
//! assert_eq!(out.dimensions(), (4, 4));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod stats;
pub mod transfer;

pub use stats::{channel_stats, ChannelStats};
pub use transfer::{transfer_image, transfer_pixel, TransferConfig};
