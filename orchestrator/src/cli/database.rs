use clap::Args;

/// Parameters used to config the record store connection.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct DatabaseCliArgs {
    /// The connection string of the record store.
    #[arg(env = "GEOFLOW_ORCHESTRATOR_DATABASE_URI", long, default_value = "mongodb://localhost:27017")]
    pub database_uri: String,

    /// The database holding resource records, users and interim results.
    #[arg(env = "GEOFLOW_ORCHESTRATOR_DATABASE_NAME", long, default_value = "geoflow")]
    pub database_name: String,
}
