//! Main content extraction module.
//!
//! # Module Structure
//!
//! - `tags`: Tag constants and catalogs used by the heuristics
//! - `state`: Pass flags, the retry ladder and attempt bookkeeping
//! - `prep`: Document preparation and the pre-scoring walk
//! - `candidates`: Top candidate selection and sibling gathering
//! - `cleaning`: Article cleanup and post-processing
//! - `pipeline`: The pass loop that ties the above together
//!
//! # Usage
//!
//! ```rust
//! use rs_readability::dom;
//! use rs_readability::extractor::{pipeline, PageFacts};
//! use rs_readability::Options;
//!
//! let tree = dom::parse("<div><p>Some text, with commas, long enough to count.</p></div>");
//! let mut facts = PageFacts::default();
//! let attempt = pipeline::grab_article(&tree, &Options::default(), "", &mut facts);
//! assert!(attempt.is_some());
//! ```

pub mod candidates;
pub mod cleaning;
pub mod pipeline;
pub mod prep;
pub mod state;
pub mod tags;

pub use pipeline::grab_article;
pub use state::{Attempt, Flags, PageFacts, RetryStage};
