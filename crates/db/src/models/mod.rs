pub mod project;
pub mod test_run;
