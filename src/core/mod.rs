pub mod expect;
pub mod report;
pub mod sequence;

pub use crate::domain::model::{ApiResponse, Credentials, NewFood, PatchOperation};
pub use crate::domain::ports::{ConfigProvider, FoodApi};
pub use crate::utils::error::Result;
