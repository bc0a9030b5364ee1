use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

use crate::cli::RunCmd;
use crate::core::client::database::mongodb::MongoDbClient;
use crate::core::client::database::JobStore;
use crate::core::client::dispatcher::{DispatchedJob, JobDispatcher, QueueDispatcher};
use crate::core::client::interim::mongodb::MongoInterimResultStore;
use crate::core::client::interim::InterimResultStore;
use crate::core::client::users::mongodb::MongoUserDirectory;
use crate::core::client::users::UserDirectory;
use crate::types::params::{DatabaseParams, ResumptionParams, ServerParams};
use crate::OrchestratorResult;

/// Shared application configuration: immutable parameter snapshots plus the
/// consumed collaborator clients. Handlers receive this behind an `Arc` and
/// never touch global state.
pub struct Config {
    server_params: ServerParams,
    resumption_params: ResumptionParams,
    database: Box<dyn JobStore>,
    user_directory: Box<dyn UserDirectory>,
    interim_results: Box<dyn InterimResultStore>,
    dispatcher: Box<dyn JobDispatcher>,
}

impl Config {
    pub fn new(
        server_params: ServerParams,
        resumption_params: ResumptionParams,
        database: Box<dyn JobStore>,
        user_directory: Box<dyn UserDirectory>,
        interim_results: Box<dyn InterimResultStore>,
        dispatcher: Box<dyn JobDispatcher>,
    ) -> Self {
        Self { server_params, resumption_params, database, user_directory, interim_results, dispatcher }
    }

    /// Builds the production configuration: MongoDB-backed collaborators and
    /// the queue head of the dispatcher seam. The returned receiver feeds the
    /// out-of-process engine adapter.
    pub async fn from_run_cmd(run_cmd: &RunCmd) -> OrchestratorResult<(Self, UnboundedReceiver<DispatchedJob>)> {
        let server_params = ServerParams::from(run_cmd.server_args.clone());
        let database_params = DatabaseParams::from(run_cmd.database_args.clone());
        let resumption_params = ResumptionParams::from(run_cmd.resumption_args.clone());

        let mongo = MongoDbClient::new(&database_params).await?;
        let user_directory = MongoUserDirectory::new(&mongo);
        let interim_results = MongoInterimResultStore::new(&mongo);
        let (dispatcher, engine_feed) = QueueDispatcher::new();
        debug!(database = %database_params.database_name, "Configuration initialized");

        let config = Self::new(
            server_params,
            resumption_params,
            Box::new(mongo),
            Box::new(user_directory),
            Box::new(interim_results),
            Box::new(dispatcher),
        );
        Ok((config, engine_feed))
    }

    pub fn server_params(&self) -> &ServerParams {
        &self.server_params
    }

    pub fn resumption_params(&self) -> &ResumptionParams {
        &self.resumption_params
    }

    pub fn database(&self) -> &dyn JobStore {
        self.database.as_ref()
    }

    pub fn user_directory(&self) -> &dyn UserDirectory {
        self.user_directory.as_ref()
    }

    pub fn interim_results(&self) -> &dyn InterimResultStore {
        self.interim_results.as_ref()
    }

    pub fn dispatcher(&self) -> &dyn JobDispatcher {
        self.dispatcher.as_ref()
    }
}
