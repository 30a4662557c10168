// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`, which injects the
// caller as an `AuthUser` extension. Item handlers scope every store call
// to that user.

pub mod todos;
pub mod users;
