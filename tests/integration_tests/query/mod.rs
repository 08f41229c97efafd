// Mirror src/query: compile, parse and dialect suites
#[path = "mod_compile.rs"]
mod compile_tests;
#[path = "mod_dialect.rs"]
mod dialect_tests;
#[path = "mod_parse.rs"]
mod parse_tests;
