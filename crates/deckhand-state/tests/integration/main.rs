//! Integration tests for deckhand-state
//!
//! Drives the sync store against an in-memory console server whose calls
//! can be held open, so optimistic edits and interleavings are observable,
//! and against a wiremock server through the real HTTP adapter.


mod test_interleaving;
mod test_sync_store;
