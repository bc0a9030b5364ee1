pub mod descriptor;
pub mod record;
pub mod resource_id;
pub mod types;
