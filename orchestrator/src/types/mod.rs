pub mod endpoint;
pub mod jobs;
pub mod params;
pub mod users;
