//! Record and URL matching utilities.

mod filter;
mod order;
mod url;

pub use filter::{record_matches, values_equal};
pub use order::compare_values;
pub use url::{ResourceMatch, ResourcePattern};
