pub mod estimate;
pub mod lead;
pub mod note;
pub mod product;
pub mod task;
pub mod user;
