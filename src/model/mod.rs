pub mod checkpoint;
pub mod q_network;
