pub mod catalog;
pub mod deck;
pub mod evaluator;
pub mod guess_log;
pub mod session;
pub mod tile;


pub use catalog::*;
pub use deck::*;
pub use evaluator::*;
pub use guess_log::*;
pub use session::*;
pub use tile::*;
