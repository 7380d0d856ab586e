mod descriptor;
mod error;
mod network;
mod node;

pub use descriptor::*;
pub use error::*;
pub use network::*;
pub use node::*;
