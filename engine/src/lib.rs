pub mod actions;
pub mod cards;
pub mod damage;
pub mod deck;
pub mod interrupts;
pub mod log;
pub mod policy;
pub mod setup;
pub mod turn;
pub mod types;


pub use cards::{Card, CardCategory};
pub use policy::Policy;
pub use types::*;
