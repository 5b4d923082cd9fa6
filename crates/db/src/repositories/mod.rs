pub mod project_repo;
pub mod test_run_repo;

pub use project_repo::ProjectRepo;
pub use test_run_repo::TestRunRepo;
