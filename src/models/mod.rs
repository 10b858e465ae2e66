pub mod crop;
pub mod forest_registry;
pub mod land;
pub mod plantation;
pub mod tree;
pub mod vegetable;
pub mod worker;

pub use crop::*;
pub use forest_registry::*;
pub use land::*;
pub use plantation::*;
pub use tree::*;
pub use vegetable::*;
pub use worker::*;
