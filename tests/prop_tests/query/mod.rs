#[path = "prop_compile.rs"]
mod compile_props;
#[path = "prop_sort_paging.rs"]
mod sort_paging_props;
