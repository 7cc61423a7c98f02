//! Feature families computed from one parsed document.
//!
//! # Module Structure
//!
//! - `external`: cross-origin resources, forms, links, images and domains
//! - `binary`: presence flags
//! - `quantitative`: tag and attribute counts
//! - `heuristic`: ratios, averages, redirect and similarity signals
//! - `url_structure`: features of the URL string alone
//!
//! `external` runs first; `binary`, `quantitative` and `heuristic` consume its
//! [`ExternalReferences`].

pub mod binary;
pub mod external;
pub mod heuristic;
pub mod quantitative;
pub mod url_structure;

pub use binary::BinaryFeatures;
pub use external::{ExternalReferences, PageOrigin};
pub use heuristic::{HeuristicContext, HeuristicFeatures};
pub use quantitative::QuantitativeFeatures;
pub use url_structure::UrlFeatures;
