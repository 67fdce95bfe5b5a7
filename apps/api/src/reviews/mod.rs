// Review acquisition: normalization of pasted text and, in link mode,
// place resolution + review fetch through the place directory.

pub mod normalizer;
pub mod place_resolver;
pub mod places_client;

pub use normalizer::{normalize_input, normalize_list, require_min_reviews};
pub use place_resolver::PlaceResolver;
pub use places_client::GooglePlacesClient;
