//! Macro-generated test suite for `Context` contract validation.
//!
//! The `context_contract_tests!` macro generates a test module that validates
//! any `Context` implementation against the shared behavior: search, sort
//! and paginate semantics, plus their no-op edge cases. Assertions only look
//! at `data` and `total`, which every backend reports the same way.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod context_harness;
//!
//! use context_harness::*;
//!
//! context_contract_tests!(in_memory_context);
//! ```
//!
//! # Generated Tests
//!
//! ## Search
//! - `test_search_single_column`: substring match on one column
//! - `test_search_ignores_case`: upper-case term matches mixed-case data
//! - `test_search_any_column`: OR across searchable columns
//! - `test_search_no_match`: empty page, total 0
//! - `test_search_empty_term_is_noop` / `test_search_no_columns_is_noop`
//! - `test_search_skips_non_searchable_columns`
//! - `test_search_null_field_never_matches`
//! - `test_searches_accumulate`: successive searches narrow the set
//! - `test_search_wildcards_are_literal`: `%` and `_` are plain characters
//!
//! ## Sort
//! - `test_sort_by_name_asc` / `test_sort_by_name_desc`
//! - `test_sort_numeric`, `test_sort_nulls_first`
//! - `test_sort_mixed_numbers_exactly`: integers and floats around 2^53
//! - `test_sort_invalid_direction_is_noop`, `test_sort_last_call_wins`
//! - `test_sort_twice_equals_once`
//!
//! ## Paginate
//! - `test_paginate_first_page`, `test_paginate_last_partial_page`
//! - `test_paginate_out_of_range`, `test_total_counts_searched_rows`

/// Generate a `Context` conformance test suite.
///
/// `$factory` must be callable as `fn(Vec<Record>) -> impl Context`. It is
/// invoked for each test with a fresh copy of `people()`.
#[macro_export]
macro_rules! context_contract_tests {
    ($factory:expr) => {
        mod context_contract_tests {
            use super::*;
            use datatable::core::Context;
            use serde_json::json;

            fn context() -> impl Context {
                ($factory)(people())
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[test]
            fn test_search_single_column() {
                let mut ctx = context();
                let name = name_column();
                ctx.search("ali", &[&name]);

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Alice"]);
                assert_eq!(result.total(), 1);
            }

            #[test]
            fn test_search_ignores_case() {
                let mut ctx = context();
                let name = name_column();
                ctx.search("CAROL", &[&name]);

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Carol"]);
            }

            #[test]
            fn test_search_any_column() {
                let mut ctx = context();
                let (name, email) = (name_column(), email_column());
                ctx.search("example.org", &[&name, &email]);
                ctx.sort("id", "asc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Bob", "Eve"]);
                assert_eq!(result.total(), 2);
            }

            #[test]
            fn test_search_no_match() {
                let mut ctx = context();
                let (name, email) = (name_column(), email_column());
                ctx.search("zzz", &[&name, &email]);

                let result = ctx.paginate(10, 1).unwrap();
                assert!(result.data.is_empty());
                assert_eq!(result.total(), 0);
            }

            #[test]
            fn test_search_empty_term_is_noop() {
                let mut ctx = context();
                let name = name_column();
                ctx.search("", &[&name]);

                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 5);
            }

            #[test]
            fn test_search_no_columns_is_noop() {
                let mut ctx = context();
                ctx.search("alice", &[]);

                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 5);
            }

            #[test]
            fn test_search_skips_non_searchable_columns() {
                let age = age_column();
                let name = name_column();

                let mut ctx = context();
                ctx.search("34", &[&age]);
                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 5);

                let mut ctx = context();
                ctx.search("34", &[&name, &age]);
                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 0);
            }

            #[test]
            fn test_search_null_field_never_matches() {
                let mut ctx = context();
                let city = city_column();
                ctx.search("l", &[&city]);
                ctx.sort("id", "asc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Carol", "Eve"]);
            }

            #[test]
            fn test_searches_accumulate() {
                let mut ctx = context();
                let (name, email) = (name_column(), email_column());
                ctx.search("example.com", &[&email]);
                ctx.search("car", &[&name]);

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Carol"]);
            }

            #[test]
            fn test_search_wildcards_are_literal() {
                let (name, email) = (name_column(), email_column());

                let mut ctx = context();
                ctx.search("%", &[&name, &email]);
                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 0);

                let mut ctx = context();
                ctx.search("_", &[&name, &email]);
                assert_eq!(ctx.paginate(10, 1).unwrap().total(), 0);
            }

            // ==================================================================
            // Sort
            // ==================================================================

            #[test]
            fn test_sort_by_name_asc() {
                let mut ctx = context();
                ctx.sort("id", "desc");
                ctx.sort("name", "asc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Alice", "Bob", "Carol", "Dave", "Eve"]);
            }

            #[test]
            fn test_sort_by_name_desc() {
                let mut ctx = context();
                ctx.sort("name", "DESC");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Eve", "Dave", "Carol", "Bob", "Alice"]);
            }

            #[test]
            fn test_sort_numeric() {
                let mut ctx = context();
                ctx.sort("age", "desc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(
                    field(&result, "age"),
                    vec![json!(41), json!(34), json!(27), json!(27), json!(22)]
                );
            }

            #[test]
            fn test_sort_nulls_first() {
                let mut ctx = context();
                ctx.sort("city", "asc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(
                    field(&result, "city"),
                    vec![
                        json!(null),
                        json!("Berlin"),
                        json!("Lisbon"),
                        json!("Paris"),
                        json!("Paris")
                    ]
                );
            }

            #[test]
            fn test_sort_mixed_numbers_exactly() {
                let sort_by_age = |direction: &str| {
                    let mut ctx = ($factory)(large_ages());
                    ctx.sort("age", direction);
                    field(&ctx.paginate(10, 1).unwrap(), "id")
                };

                assert_eq!(sort_by_age("asc"), vec![json!(4), json!(2), json!(1), json!(3)]);
                assert_eq!(sort_by_age("desc"), vec![json!(3), json!(1), json!(2), json!(4)]);
            }

            #[test]
            fn test_sort_invalid_direction_is_noop() {
                let mut ctx = context();
                ctx.sort("id", "desc");
                ctx.sort("name", "sideways");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(
                    field(&result, "id"),
                    vec![json!(5), json!(4), json!(3), json!(2), json!(1)]
                );
            }

            #[test]
            fn test_sort_last_call_wins() {
                let mut ctx = context();
                ctx.sort("age", "asc");
                ctx.sort("name", "desc");

                let result = ctx.paginate(10, 1).unwrap();
                assert_eq!(names(&result), vec!["Eve", "Dave", "Carol", "Bob", "Alice"]);
            }

            #[test]
            fn test_sort_twice_equals_once() {
                let mut once = context();
                once.sort("email", "asc");

                let mut twice = context();
                twice.sort("email", "asc");
                twice.sort("email", "asc");

                assert_eq!(
                    once.paginate(10, 1).unwrap().data,
                    twice.paginate(10, 1).unwrap().data
                );
            }

            // ==================================================================
            // Paginate
            // ==================================================================

            #[test]
            fn test_paginate_first_page() {
                let mut ctx = context();
                ctx.sort("id", "asc");

                let result = ctx.paginate(2, 1).unwrap();
                assert_eq!(field(&result, "id"), vec![json!(1), json!(2)]);
                assert_eq!(result.total(), 5);
            }

            #[test]
            fn test_paginate_last_partial_page() {
                let mut ctx = context();
                ctx.sort("id", "asc");

                let result = ctx.paginate(2, 3).unwrap();
                assert_eq!(field(&result, "id"), vec![json!(5)]);
                assert_eq!(result.total(), 5);
            }

            #[test]
            fn test_paginate_out_of_range() {
                let mut ctx = context();

                let result = ctx.paginate(2, 10).unwrap();
                assert!(result.data.is_empty());
                assert_eq!(result.total(), 5);
            }

            #[test]
            fn test_total_counts_searched_rows() {
                let mut ctx = context();
                let email = email_column();
                ctx.search("example.org", &[&email]);

                let result = ctx.paginate(1, 1).unwrap();
                assert_eq!(result.data.len(), 1);
                assert_eq!(result.total(), 2);
            }
        }
    };
}
