pub mod estimate;
pub mod leads;
pub mod notes;
pub mod products;
pub mod projects;
pub mod tasks;
pub mod users;
