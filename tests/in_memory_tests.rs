//! Integration tests for InMemoryContext using the context test harness.
//!
//! This file invokes `context_contract_tests!` to validate that InMemoryContext
//! fully conforms to the Context contract.

#[macro_use]
mod context_harness;

use context_harness::*;

context_contract_tests!(in_memory_context);
