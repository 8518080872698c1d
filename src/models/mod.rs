mod discount;
mod log;
mod order;
mod product;
mod response;
mod review;
mod user;
mod wallet;

pub use discount::*;
pub use log::*;
pub use order::*;
pub use product::*;
pub use response::*;
pub use review::*;
pub use user::*;
pub use wallet::*;
