pub mod product;
pub mod user;

pub use product::{NewProduct, Product, TIMESTAMP_FORMAT};
pub use user::UserRecord;
