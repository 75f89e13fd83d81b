// SnipStash managers
// Stateful components coordinating storage-backed data.

pub mod history_store;
