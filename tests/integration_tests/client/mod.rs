// Mirror src/client: repository over a recording driver, sync and async
#[path = "mod_repository.rs"]
mod repository_tests;
#[path = "mod_repository_async.rs"]
mod repository_async_tests;
