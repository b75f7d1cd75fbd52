mod action;
mod cell;
mod cgs;
mod coalition;
mod costs;
mod error;
mod joint;
mod random;
mod states;

pub use action::*;
pub use cell::*;
pub use cgs::*;
pub use coalition::*;
pub use costs::*;
pub use error::*;
pub use joint::*;
pub use states::*;
