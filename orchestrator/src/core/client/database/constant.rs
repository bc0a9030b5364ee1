pub const RESOURCE_RECORDS_COLLECTION: &str = "resource_records";
pub const RESOURCE_POINTERS_COLLECTION: &str = "resource_pointers";
pub const TERMINATION_REQUESTS_COLLECTION: &str = "termination_requests";
pub const USERS_COLLECTION: &str = "users";
pub const INTERIM_RESULTS_COLLECTION: &str = "interim_results";
