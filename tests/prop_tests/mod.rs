// Property tests, grouped per module
mod query;
