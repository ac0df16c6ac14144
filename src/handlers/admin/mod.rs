// Tier 2: bearer-token authentication required. Routed behind
// admin_auth_middleware so the credential check always precedes any store
// access.
pub mod lists;
pub mod mutations;
pub mod session;
pub mod validate;
