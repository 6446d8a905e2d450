pub mod list_submissions;
