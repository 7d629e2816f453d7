pub mod country;
pub mod overlap;
pub mod peers;

pub use country::country_distribution;
pub use overlap::OverlapMatrix;
pub use peers::{Peer, PeerFilter};
