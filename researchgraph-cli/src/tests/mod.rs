//! Unit tests for researchgraph-cli, organized by module.
//!
//! Each submodule documents the behaviour under test.
