pub mod network;
pub mod profile;

pub use network::Network;
pub use profile::{LayerProfile, NetworkProfile, PropsProfile, StrategyAttr, WeightProfile};
