//! Unit tests for the `lexicon` facade.

mod markup_tests;
