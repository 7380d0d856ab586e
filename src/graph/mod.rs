mod clique;
mod elimination;
mod junction;
mod moral;

pub use clique::*;
pub use elimination::*;
pub use junction::*;
pub use moral::*;
