// Endpoint wrappers, one file per back-end area. Each file adds inherent
// methods to `ApiClient`; transport mechanics stay in `client.rs`.

mod ai;
mod auth;
mod courses;
