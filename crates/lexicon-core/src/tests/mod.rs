//! Unit tests for `lexicon_core` types.


mod behaviour;
