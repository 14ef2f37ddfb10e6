// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod docker_repo;
pub mod error;
pub mod logging;
pub mod models;
pub mod remote_repo;
pub mod state;
pub mod version;
pub mod worker;
