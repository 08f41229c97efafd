mod client;
mod query;
mod utils;
